//! Error type for `tally-store-memory`.

use tally_core::{pull::SequenceKey, validate::Violation};
use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum Error {
  #[error("core error: {0}")]
  Core(#[from] tally_core::Error),

  #[error("json error: {0}")]
  Json(#[from] serde_json::Error),

  #[error("pool not found: {0}")]
  PoolNotFound(Uuid),

  #[error("record not found: {0}")]
  RecordNotFound(SequenceKey),

  #[error("pool {0} is locked")]
  PoolLocked(Uuid),

  /// The batch failed validation and nothing was written.
  #[error("batch rejected: {}", join(.errors))]
  Rejected { errors: Vec<Violation> },
}

fn join(errors: &[Violation]) -> String {
  errors
    .iter()
    .map(ToString::to_string)
    .collect::<Vec<_>>()
    .join("; ")
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
