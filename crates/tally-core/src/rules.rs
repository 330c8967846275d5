//! Per-pool-type mechanics: rates, pity thresholds and milestone gifts.
//!
//! This table is the only place that knows how the three pool types differ.
//! Everything else asks [`rules_for`] instead of matching on [`PoolType`].

use serde::{Deserialize, Serialize};

use crate::{Error, Result, pool::PoolType};

// ─── Building blocks ─────────────────────────────────────────────────────────

/// Linear probability ramp that starts before the hard pity.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SoftPity {
  /// Pity counter at which the ramp starts adding to the base rate.
  pub start:     u32,
  /// Added to the base rate for each pull past `start`.
  pub increment: f64,
}

/// Which slot a milestone bonus counts towards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GiftKind {
  Featured,
  NonFeatured,
}

/// One milestone track on the cumulative valid pull count.
///
/// Fires once at `first_at`, then every `every` pulls after that. A track
/// without a cadence is a one-shot bonus.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GiftTrack {
  pub kind:     GiftKind,
  pub first_at: u32,
  pub every:    Option<u32>,
}

impl GiftTrack {
  /// Number of bonuses this track has paid out at `valid_pulls`.
  pub fn earned(&self, valid_pulls: u32) -> u32 {
    if valid_pulls < self.first_at {
      return 0;
    }
    match self.every {
      Some(every) => (valid_pulls - self.first_at) / every + 1,
      None => 1,
    }
  }

  /// The next threshold strictly above `valid_pulls`, if the track has one.
  pub fn next_at(&self, valid_pulls: u32) -> Option<u32> {
    if valid_pulls < self.first_at {
      return Some(self.first_at);
    }
    self
      .every
      .map(|every| self.first_at + self.earned(valid_pulls) * every)
  }
}

/// How the 5★-or-above guarantee is enforced on a submitted batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FiveStarCheck {
  /// Every complete group of ten pulls holds at least one 5★ or above.
  PerTenPull,
  /// The run of pulls without one may not exceed `five_star_pity`.
  RunningCounter,
}

// ─── Rule set ────────────────────────────────────────────────────────────────

/// Immutable mechanics of one pool type.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PoolRuleSet {
  pub pool_type:           PoolType,
  pub base_six_star_rate:  f64,
  pub base_five_star_rate: f64,
  /// Pull count since the last 6★ at which a 6★ is certain.
  pub six_star_hard_pity:  u32,
  pub soft_pity:           Option<SoftPity>,
  /// Longest run of pulls allowed without a 5★ or above.
  pub five_star_pity:      u32,
  pub five_star_check:     FiveStarCheck,
  /// Whether the pool has a featured 6★ at all.
  pub featured_slot:       bool,
  /// Pool pull index at which a 6★ must be featured if none has been yet.
  pub guaranteed_up_at:    Option<u32>,
  pub gift_schedule:       &'static [GiftTrack],
}

impl PoolRuleSet {
  pub fn has_soft_pity(&self) -> bool { self.soft_pity.is_some() }

  /// Reject internally inconsistent tables.
  pub fn check(&self) -> Result<()> {
    let fail = |reason: &'static str| -> Result<()> {
      Err(Error::MalformedRules {
        pool_type: self.pool_type,
        reason,
      })
    };

    let rate_ok = |r: f64| (0.0..=1.0).contains(&r);
    if !rate_ok(self.base_six_star_rate) || !rate_ok(self.base_five_star_rate) {
      return fail("base rates must lie in [0, 1]");
    }
    if self.six_star_hard_pity == 0 {
      return fail("6★ hard pity must be positive");
    }
    if self.five_star_pity == 0 {
      return fail("5★ pity must be positive");
    }
    if let Some(soft) = self.soft_pity {
      if soft.start >= self.six_star_hard_pity {
        return fail("soft pity must start before the hard pity");
      }
      if !(soft.increment > 0.0 && soft.increment <= 1.0) {
        return fail("soft pity increment must lie in (0, 1]");
      }
    }
    if self.guaranteed_up_at == Some(0) {
      return fail("featured guarantee index must be positive");
    }
    if self.guaranteed_up_at.is_some() && !self.featured_slot {
      return fail("featured guarantee on a pool without a featured slot");
    }
    if self
      .gift_schedule
      .iter()
      .any(|t| t.first_at == 0 || t.every == Some(0))
    {
      return fail("gift thresholds and cadences must be positive");
    }
    Ok(())
  }
}

// ─── Tables ──────────────────────────────────────────────────────────────────

const LIMITED_GIFTS: &[GiftTrack] = &[GiftTrack {
  kind:     GiftKind::Featured,
  first_at: 240,
  every:    Some(240),
}];

const WEAPON_GIFTS: &[GiftTrack] = &[
  GiftTrack {
    kind:     GiftKind::NonFeatured,
    first_at: 100,
    every:    Some(160),
  },
  GiftTrack {
    kind:     GiftKind::Featured,
    first_at: 180,
    every:    Some(160),
  },
];

const STANDARD_GIFTS: &[GiftTrack] = &[GiftTrack {
  kind:     GiftKind::NonFeatured,
  first_at: 300,
  every:    None,
}];

pub const LIMITED: PoolRuleSet = PoolRuleSet {
  pool_type:           PoolType::Limited,
  base_six_star_rate:  0.008,
  base_five_star_rate: 0.08,
  six_star_hard_pity:  80,
  soft_pity:           Some(SoftPity {
    start:     65,
    increment: 0.05,
  }),
  five_star_pity:      10,
  five_star_check:     FiveStarCheck::RunningCounter,
  featured_slot:       true,
  guaranteed_up_at:    Some(120),
  gift_schedule:       LIMITED_GIFTS,
};

pub const WEAPON: PoolRuleSet = PoolRuleSet {
  pool_type:           PoolType::Weapon,
  base_six_star_rate:  0.04,
  base_five_star_rate: 0.15,
  six_star_hard_pity:  40,
  soft_pity:           None,
  five_star_pity:      10,
  five_star_check:     FiveStarCheck::PerTenPull,
  featured_slot:       true,
  guaranteed_up_at:    Some(80),
  gift_schedule:       WEAPON_GIFTS,
};

pub const STANDARD: PoolRuleSet = PoolRuleSet {
  pool_type:           PoolType::Standard,
  base_six_star_rate:  0.008,
  base_five_star_rate: 0.08,
  six_star_hard_pity:  80,
  soft_pity:           Some(SoftPity {
    start:     65,
    increment: 0.05,
  }),
  five_star_pity:      10,
  five_star_check:     FiveStarCheck::RunningCounter,
  featured_slot:       false,
  guaranteed_up_at:    None,
  gift_schedule:       STANDARD_GIFTS,
};

/// Look up the mechanics of a pool type.
pub fn rules_for(pool_type: PoolType) -> &'static PoolRuleSet {
  match pool_type {
    PoolType::Limited => &LIMITED,
    PoolType::Weapon => &WEAPON,
    PoolType::Standard => &STANDARD,
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn builtin_tables_are_well_formed() {
    for pool_type in PoolType::ALL {
      let rules = rules_for(pool_type);
      assert_eq!(rules.pool_type, pool_type);
      rules.check().unwrap();
    }
  }

  #[test]
  fn hard_pity_thresholds() {
    assert_eq!(rules_for(PoolType::Limited).six_star_hard_pity, 80);
    assert_eq!(rules_for(PoolType::Standard).six_star_hard_pity, 80);
    assert_eq!(rules_for(PoolType::Weapon).six_star_hard_pity, 40);
    assert!(!rules_for(PoolType::Weapon).has_soft_pity());
  }

  #[test]
  fn featured_guarantee_only_on_promoted_pools() {
    assert_eq!(rules_for(PoolType::Limited).guaranteed_up_at, Some(120));
    assert_eq!(rules_for(PoolType::Weapon).guaranteed_up_at, Some(80));
    assert_eq!(rules_for(PoolType::Standard).guaranteed_up_at, None);
  }

  #[test]
  fn malformed_table_fails_check() {
    let broken = PoolRuleSet {
      soft_pity: Some(SoftPity {
        start:     90,
        increment: 0.05,
      }),
      ..LIMITED
    };
    let err = broken.check().unwrap_err();
    assert!(matches!(
      err,
      Error::MalformedRules {
        pool_type: PoolType::Limited,
        ..
      }
    ));

    let zero_cadence = PoolRuleSet {
      gift_schedule: &[GiftTrack {
        kind:     GiftKind::Featured,
        first_at: 10,
        every:    Some(0),
      }],
      ..WEAPON
    };
    assert!(zero_cadence.check().is_err());
  }

  #[test]
  fn gift_track_thresholds() {
    let track = WEAPON_GIFTS[0];
    assert_eq!(track.earned(99), 0);
    assert_eq!(track.earned(100), 1);
    assert_eq!(track.earned(259), 1);
    assert_eq!(track.earned(260), 2);
    assert_eq!(track.next_at(0), Some(100));
    assert_eq!(track.next_at(100), Some(260));

    let once = STANDARD_GIFTS[0];
    assert_eq!(once.earned(10_000), 1);
    assert_eq!(once.next_at(299), Some(300));
    assert_eq!(once.next_at(300), None);
  }
}
