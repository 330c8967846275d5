//! One-call read model of a pool for stat cards.

use serde::Serialize;
use uuid::Uuid;

use crate::{
  Error, Result,
  gifts::{Gifts, NextGift, compute_gifts, next_gift},
  guarantee::GuaranteeResolver,
  inheritance::{EffectivePity, effective_pity},
  pity::PityState,
  pool::Pool,
  probability::{Probability, current_probability},
  pull::{PullRecord, Rarity},
};

/// Raw tallies plus everything derived from them. Never stored.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PoolSummary {
  pub pool:          Pool,
  pub total_records: u32,
  pub valid_pulls:   u32,
  pub gift_records:  u32,
  pub four_star:     u32,
  pub five_star:     u32,
  pub six_star:      u32,
  pub featured_six:  u32,
  /// Milestone bonuses, to be added on top of the raw counts for display.
  pub gifts:         Gifts,
  pub next_gift:     Option<NextGift>,
  /// Pool pull on which a featured 6★ is still guaranteed, if it is ahead.
  pub featured_at:   Option<u32>,
  pub effective:     EffectivePity,
  pub probability:   Probability,
}

pub fn summarize(
  pools: &[Pool],
  records: &[PullRecord],
  pool_id: Uuid,
) -> Result<PoolSummary> {
  let pool = pools
    .iter()
    .find(|p| p.pool_id == pool_id)
    .ok_or(Error::PoolNotFound(pool_id))?;

  let mut summary = PoolSummary {
    pool:          pool.clone(),
    total_records: 0,
    valid_pulls:   0,
    gift_records:  0,
    four_star:     0,
    five_star:     0,
    six_star:      0,
    featured_six:  0,
    gifts:         Gifts::default(),
    next_gift:     None,
    featured_at:   None,
    effective:     effective_pity(pools, records, pool_id)?,
    probability:   current_probability(0, pool.rules()),
  };

  for record in records.iter().filter(|r| r.pool_id == pool_id) {
    summary.total_records += 1;
    if record.is_gift() {
      summary.gift_records += 1;
      continue;
    }
    summary.valid_pulls += 1;
    match record.rarity {
      Rarity::Four => summary.four_star += 1,
      Rarity::Five => summary.five_star += 1,
      Rarity::Six => {
        summary.six_star += 1;
        if record.is_featured {
          summary.featured_six += 1;
        }
      }
    }
  }

  summary.gifts = compute_gifts(pool.pool_type, summary.valid_pulls);
  summary.next_gift = next_gift(pool.pool_type, summary.valid_pulls);
  summary.probability =
    current_probability(summary.effective.six_star_counter, pool.rules());

  let seen = PityState {
    featured_six_occurred: summary.effective.featured_six_occurred,
    ..PityState::default()
  };
  let resolver =
    GuaranteeResolver::new(pool.pool_type, &seen, summary.valid_pulls);
  summary.featured_at =
    pool.rules().guaranteed_up_at.filter(|_| resolver.pending());
  Ok(summary)
}
