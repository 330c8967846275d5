//! Milestone bonuses earned from the cumulative valid pull count.
//!
//! These are display-only adjustments layered on top of the raw tallies.
//! They are never written to the log and never touch pity.

use serde::{Deserialize, Serialize};

use crate::{pool::PoolType, rules::GiftKind};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Gifts {
  pub bonus_featured:     u32,
  pub bonus_non_featured: u32,
}

impl Gifts {
  pub fn total(&self) -> u32 { self.bonus_featured + self.bonus_non_featured }
}

/// The next milestone a pool is approaching.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct NextGift {
  pub at:   u32,
  pub kind: GiftKind,
}

/// Bonuses owed after `valid_pull_count` non-gift pulls.
pub fn compute_gifts(pool_type: PoolType, valid_pull_count: u32) -> Gifts {
  pool_type
    .rules()
    .gift_schedule
    .iter()
    .fold(Gifts::default(), |mut gifts, track| {
      let earned = track.earned(valid_pull_count);
      match track.kind {
        GiftKind::Featured => gifts.bonus_featured += earned,
        GiftKind::NonFeatured => gifts.bonus_non_featured += earned,
      }
      gifts
    })
}

/// The closest upcoming milestone, or `None` once every track is spent.
pub fn next_gift(pool_type: PoolType, valid_pull_count: u32) -> Option<NextGift> {
  pool_type
    .rules()
    .gift_schedule
    .iter()
    .filter_map(|track| {
      track
        .next_at(valid_pull_count)
        .map(|at| NextGift { at, kind: track.kind })
    })
    .min_by_key(|next| next.at)
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn limited_every_240() {
    assert_eq!(compute_gifts(PoolType::Limited, 239).total(), 0);
    let at_240 = compute_gifts(PoolType::Limited, 240);
    assert_eq!(at_240.bonus_featured, 1);
    assert_eq!(at_240.bonus_non_featured, 0);
    assert_eq!(compute_gifts(PoolType::Limited, 479).bonus_featured, 1);
    assert_eq!(compute_gifts(PoolType::Limited, 480).bonus_featured, 2);
  }

  #[test]
  fn weapon_alternates_from_100() {
    let cases = [
      (99, 0, 0),
      (100, 0, 1),
      (179, 0, 1),
      (180, 1, 1),
      (259, 1, 1),
      (260, 1, 2),
      (340, 2, 2),
      (420, 2, 3),
      (500, 3, 3),
    ];
    for (pulls, featured, non_featured) in cases {
      let gifts = compute_gifts(PoolType::Weapon, pulls);
      assert_eq!(gifts.bonus_featured, featured, "featured at {pulls}");
      assert_eq!(gifts.bonus_non_featured, non_featured, "non-featured at {pulls}");
    }
  }

  #[test]
  fn weapon_crossing_100_grants_non_featured() {
    let before = compute_gifts(PoolType::Weapon, 99);
    let after = compute_gifts(PoolType::Weapon, 100);
    assert_eq!(after.bonus_non_featured - before.bonus_non_featured, 1);
    assert_eq!(after.bonus_non_featured, 1);
  }

  #[test]
  fn standard_pays_once() {
    assert_eq!(compute_gifts(PoolType::Standard, 299).total(), 0);
    for pulls in [300, 600, 10_000] {
      let gifts = compute_gifts(PoolType::Standard, pulls);
      assert_eq!(gifts.bonus_non_featured, 1);
      assert_eq!(gifts.bonus_featured, 0);
    }
  }

  #[test]
  fn same_count_same_result() {
    for pool_type in PoolType::ALL {
      for pulls in [0, 100, 240, 333, 1_000] {
        assert_eq!(
          compute_gifts(pool_type, pulls),
          compute_gifts(pool_type, pulls)
        );
      }
    }
  }

  #[test]
  fn next_milestone() {
    assert_eq!(
      next_gift(PoolType::Weapon, 150),
      Some(NextGift {
        at:   180,
        kind: GiftKind::Featured,
      })
    );
    assert_eq!(
      next_gift(PoolType::Weapon, 180),
      Some(NextGift {
        at:   260,
        kind: GiftKind::NonFeatured,
      })
    );
    assert_eq!(next_gift(PoolType::Limited, 240).map(|n| n.at), Some(480));
    assert_eq!(next_gift(PoolType::Standard, 300), None);
  }
}
