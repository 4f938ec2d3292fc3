//! Session Controller - Process-local Unlock State
//!
//! Owns the "application unlocked" flag for one user-agent session.
//! Explicitly session-scoped: nothing here is persisted, and a restart
//! starts a fresh session where access is re-read from the chain.

use std::sync::atomic::{AtomicBool, Ordering};

use chrono::{DateTime, Utc};
use tokio::sync::RwLock;
use uuid::Uuid;

/// Point-in-time view of the session for logging and status output.
#[derive(Debug, Clone)]
pub struct SessionSnapshot {
  /// Session identifier.
  pub id: Uuid,
  /// When the session started.
  pub started_at: DateTime<Utc>,
  /// Connected wallet address, if any.
  pub address: Option<String>,
  /// Whether the main view is unlocked.
  pub unlocked: bool,
}

/// One user-agent session: id, connected address, unlock flag.
///
/// The unlock flag is monotonic: once granted, access holds for the
/// rest of the session (the on-chain record cannot be unset).
pub struct Session {
  id: Uuid,
  started_at: DateTime<Utc>,
  address: RwLock<Option<String>>,
  unlocked: AtomicBool,
}

impl Session {
  /// Start a fresh, locked session.
  pub fn new() -> Self {
    Self {
      id: Uuid::new_v4(),
      started_at: Utc::now(),
      address: RwLock::new(None),
      unlocked: AtomicBool::new(false),
    }
  }

  /// Session identifier.
  pub fn id(&self) -> Uuid {
    self.id
  }

  /// Record the connected wallet address.
  pub async fn set_address(&self, address: String) {
    let mut guard = self.address.write().await;
    *guard = Some(address);
  }

  /// Unlock the main view. Irreversible within the session.
  pub fn unlock(&self) {
    self.unlocked.store(true, Ordering::Relaxed);
  }

  /// Whether the main view is unlocked.
  pub fn is_unlocked(&self) -> bool {
    self.unlocked.load(Ordering::Relaxed)
  }

  /// Take a snapshot for logging/status.
  pub async fn snapshot(&self) -> SessionSnapshot {
    let address = self.address.read().await.clone();
    SessionSnapshot {
      id: self.id,
      started_at: self.started_at,
      address,
      unlocked: self.is_unlocked(),
    }
  }
}

impl Default for Session {
  fn default() -> Self {
    Self::new()
  }
}
