//! Histogram of the pity at which each 6★ landed.

use serde::{Deserialize, Serialize};

use crate::{
  pity::valid_pulls,
  pull::{PullRecord, Rarity, SpecialTag},
};

pub const BUCKET_WIDTH: u32 = 10;

/// One 6★ hit and the pull count it took.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SixStarEvent {
  pub pity_at_hit:   u32,
  pub is_featured:   bool,
  pub is_guaranteed: bool,
}

/// Inclusive range `range_start..=range_end` of hit pity values.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bucket {
  pub range_start:        u32,
  pub range_end:          u32,
  pub count:              u32,
  pub featured_count:     u32,
  pub non_featured_count: u32,
  pub guaranteed_count:   u32,
}

/// Extract the 6★ hits of a pool's log.
///
/// `starting_pity` is the counter carried into the first pull (inherited
/// pity for a fresh Limited pool, zero otherwise).
pub fn six_star_events<'a>(
  records: impl IntoIterator<Item = &'a PullRecord>,
  starting_pity: u32,
) -> Vec<SixStarEvent> {
  let mut counter = starting_pity;
  let mut events = Vec::new();
  for record in valid_pulls(records) {
    counter += 1;
    if record.rarity == Rarity::Six {
      events.push(SixStarEvent {
        pity_at_hit:   counter,
        is_featured:   record.is_featured,
        is_guaranteed: record.special_tag == SpecialTag::Guaranteed,
      });
      counter = 0;
    }
  }
  events
}

/// Group hits into fixed-width buckets covering `1..=max(observed,
/// display_floor)`, rounded up to a whole bucket. A hit at pity 0 counts in
/// the first bucket.
pub fn bucketize(events: &[SixStarEvent], display_floor: u32) -> Vec<Bucket> {
  let observed = events
    .iter()
    .map(|e| e.pity_at_hit.max(1))
    .max()
    .unwrap_or(0);
  let upper = observed.max(display_floor).div_ceil(BUCKET_WIDTH) * BUCKET_WIDTH;

  let mut buckets: Vec<Bucket> = (0..upper / BUCKET_WIDTH)
    .map(|i| Bucket {
      range_start: i * BUCKET_WIDTH + 1,
      range_end: (i + 1) * BUCKET_WIDTH,
      ..Bucket::default()
    })
    .collect();

  for event in events {
    let slot = (event.pity_at_hit.max(1) - 1) / BUCKET_WIDTH;
    let bucket = &mut buckets[slot as usize];
    bucket.count += 1;
    if event.is_featured {
      bucket.featured_count += 1;
    } else {
      bucket.non_featured_count += 1;
    }
    if event.is_guaranteed {
      bucket.guaranteed_count += 1;
    }
  }
  buckets
}
