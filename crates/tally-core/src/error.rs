//! Error types for `tally-core`.
//!
//! These are configuration and lookup faults. Problems with the pulls a
//! player submits are not errors at this level; they are reported through
//! [`crate::validate::ValidationReport`].

use thiserror::Error;
use uuid::Uuid;

use crate::pool::PoolType;

#[derive(Debug, Error)]
pub enum Error {
  #[error("unknown pool type: {0:?}")]
  UnknownPoolType(String),

  #[error("invalid rarity: {0} (expected 4, 5 or 6)")]
  InvalidRarity(u8),

  #[error("malformed rule set for {pool_type} pools: {reason}")]
  MalformedRules {
    pool_type: PoolType,
    reason:    &'static str,
  },

  #[error("pool not found: {0}")]
  PoolNotFound(Uuid),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
