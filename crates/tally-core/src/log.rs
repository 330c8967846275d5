//! The `PullLog` trait, the boundary to whatever owns the pull log.
//!
//! Backends decide where records live and assign sequence keys. They must
//! route every batch through [`crate::validate::validate`] and commit only
//! accepted batches. Edits and deletions are player corrections and are not
//! re-validated; since nothing derived is cached, the next read simply sees
//! the corrected log.

use uuid::Uuid;

use crate::{
  pool::{Pool, PoolType},
  pull::{NewPull, PullRecord, SequenceKey},
  validate::ValidationReport,
};

/// Who is writing. Locked pools only accept writes from privileged actors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Actor {
  #[default]
  Player,
  Privileged,
}

impl Actor {
  pub fn may_write(&self, pool: &Pool) -> bool {
    !pool.locked || matches!(self, Self::Privileged)
  }
}

/// An accepted batch and the records it produced.
#[derive(Debug, Clone)]
pub struct Submission {
  pub report:    ValidationReport,
  pub committed: Vec<PullRecord>,
}

pub trait PullLog {
  type Error: std::error::Error + Send + Sync + 'static;

  // ── Pools ─────────────────────────────────────────────────────────────

  fn add_pool(&mut self, pool_type: PoolType, name: &str) -> Result<Pool, Self::Error>;

  fn get_pool(&self, pool_id: Uuid) -> Result<Option<Pool>, Self::Error>;

  fn list_pools(&self) -> Result<Vec<Pool>, Self::Error>;

  /// Lock or unlock a pool. Returns the updated pool.
  fn set_locked(&mut self, pool_id: Uuid, locked: bool) -> Result<Pool, Self::Error>;

  // ── Reads ─────────────────────────────────────────────────────────────

  /// A pool's records in sequence order, gifts included.
  fn records(&self, pool_id: Uuid) -> Result<Vec<PullRecord>, Self::Error>;

  /// Every record of every pool in sequence order.
  fn all_records(&self) -> Result<Vec<PullRecord>, Self::Error>;

  // ── Writes ────────────────────────────────────────────────────────────

  /// Validate `batch` and append it if accepted. A rejected batch leaves
  /// the log untouched.
  fn submit(
    &mut self,
    pool_id: Uuid,
    batch: Vec<NewPull>,
    actor: Actor,
  ) -> Result<Submission, Self::Error>;

  /// Replace one record, keeping its sequence key and pool.
  fn edit(
    &mut self,
    sequence_key: SequenceKey,
    replacement: NewPull,
    actor: Actor,
  ) -> Result<PullRecord, Self::Error>;

  /// Remove one record. Returns what was removed.
  fn delete(
    &mut self,
    sequence_key: SequenceKey,
    actor: Actor,
  ) -> Result<PullRecord, Self::Error>;
}
