//! Ports Layer - Hexagonal Architecture Boundaries
//!
//! Defines the interfaces (traits) that the domain/usecases layer
//! requires from the outside world. Adapters implement these traits.
//!
//! Port categories:
//! - `PassportApi`: paginated upstream talent search
//! - `WalletGateway`: wallet, token, and access-gate contract operations

pub mod passport_api;
pub mod wallet_gateway;
