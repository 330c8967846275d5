//! Pity counters derived from a pool's ordered pull log.
//!
//! Nothing here is cached. Callers recompute after every append, edit or
//! delete; the whole derivation is a single linear pass.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::pull::{PullRecord, Rarity};

/// Counters as of the end of a pull sequence.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PityState {
  /// Pulls since the last 6★.
  pub six_star_counter:      u32,
  /// Pulls since the last 5★ or above.
  pub five_star_counter:     u32,
  /// Whether any featured 6★ has landed in the sequence.
  pub featured_six_occurred: bool,
}

impl PityState {
  /// Apply one non-gift pull.
  ///
  /// Both [`compute_pity`] and the batch validator step through this, so a
  /// replayed batch always agrees with the recomputed log.
  pub fn advance(&mut self, rarity: Rarity, is_featured: bool) {
    match rarity {
      Rarity::Six => {
        self.six_star_counter = 0;
        self.five_star_counter = 0;
        self.featured_six_occurred |= is_featured;
      }
      Rarity::Five => {
        self.six_star_counter += 1;
        self.five_star_counter = 0;
      }
      Rarity::Four => {
        self.six_star_counter += 1;
        self.five_star_counter += 1;
      }
    }
  }
}

/// Non-gift records in log order.
pub fn valid_pulls<'a>(
  records: impl IntoIterator<Item = &'a PullRecord>,
) -> Vec<&'a PullRecord> {
  let mut valid: Vec<&PullRecord> =
    records.into_iter().filter(|r| !r.is_gift()).collect();
  valid.sort_by_key(|r| r.sequence_key);
  valid
}

/// Number of records that count towards pity and milestones.
pub fn valid_pull_count<'a>(
  records: impl IntoIterator<Item = &'a PullRecord>,
) -> u32 {
  records.into_iter().filter(|r| !r.is_gift()).count() as u32
}

/// Records belonging to one pool.
pub fn pool_records(
  records: &[PullRecord],
  pool_id: Uuid,
) -> impl Iterator<Item = &PullRecord> {
  records.iter().filter(move |r| r.pool_id == pool_id)
}

/// Derive the pity counters of a pull sequence.
pub fn compute_pity<'a>(
  records: impl IntoIterator<Item = &'a PullRecord>,
) -> PityState {
  valid_pulls(records)
    .into_iter()
    .fold(PityState::default(), |mut state, r| {
      state.advance(r.rarity, r.is_featured);
      state
    })
}
