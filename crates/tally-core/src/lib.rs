//! Core types and derivation engine for the Tally pull log.
//!
//! Every number shown to a player (pity, odds, carry-over, milestone
//! bonuses, histograms) is recomputed here from the ordered pull log. This
//! crate is synchronous and free of I/O; storage backends implement
//! [`log::PullLog`] on top of it.

pub mod distribution;
pub mod error;
pub mod gifts;
pub mod guarantee;
pub mod inheritance;
pub mod log;
pub mod pity;
pub mod pool;
pub mod probability;
pub mod pull;
pub mod rules;
pub mod summary;
pub mod validate;

#[cfg(test)]
mod testing;

pub use error::{Error, Result};
