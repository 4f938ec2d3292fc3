//! Use Cases Layer - Application Business Logic
//!
//! Orchestrates domain logic with port interfaces:
//! - `AggregationPipeline`: multi-page fetch → normalize → de-dup → filter
//! - `AccessFlow`: wallet connect / access check / approve-pay machine
//! - `Session`: process-local unlock state for one user-agent session

pub mod access_flow;
pub mod aggregation;
pub mod session;

pub use access_flow::AccessFlow;
pub use aggregation::AggregationPipeline;
pub use session::Session;
