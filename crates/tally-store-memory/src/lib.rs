//! In-memory backend for the Tally pull log.
//!
//! Holds pools and records in plain vectors and can round-trip through a
//! serde [`Snapshot`]. Good enough for the CLI and for tests; anything
//! durable belongs in another backend.

mod store;

pub mod error;

pub use error::{Error, Result};
pub use store::{MemoryStore, Snapshot};
