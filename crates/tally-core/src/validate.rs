//! Batch acceptance: replay a candidate submission against the pool's
//! derived state before anything is written.
//!
//! Errors ([`Violation`]) are outcomes the game cannot produce and block the
//! batch. Warnings ([`Advisory`]) are unlikely but possible (usually a
//! mistyped or skipped entry) and never block. The caller's log is only
//! read; the replay runs on a private copy of the counters.

use serde::Serialize;
use thiserror::Error;

use crate::{
  guarantee::{Decision, GuaranteeResolver, force},
  inheritance::InheritedPityState,
  pity::{compute_pity, valid_pull_count},
  pool::{Pool, PoolType},
  pull::{NewPull, PullRecord, Rarity, SpecialTag},
  rules::FiveStarCheck,
};

// ─── Findings ────────────────────────────────────────────────────────────────

/// A submitted pull contradicts an absolute game guarantee.
///
/// `pull` fields are 1-based positions within the submitted batch.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Violation {
  #[error("ten-pull {ten_pull} has no 5★ or above; every weapon ten-pull includes one")]
  WeaponTenPullWithoutFiveStar { ten_pull: usize },

  #[error("{run} pulls in a row without a 5★ or above exceeds the {pity}-pull guarantee")]
  FiveStarPityExceeded { run: u32, pity: u32 },

  #[error(
    "pull {pull}: 6★ at {position} pulls since the last 6★ is past the hard pity of {hard_pity}"
  )]
  SixStarBeyondHardPity {
    pull:      usize,
    position:  u32,
    hard_pity: u32,
  },

  #[error("pull {pull}: reached {position} pulls since the last 6★ without one (hard pity {hard_pity})")]
  HardPityMissed {
    pull:      usize,
    position:  u32,
    hard_pity: u32,
  },

  #[error(
    "pull {pull}: the 6★ on pool pull {index} is guaranteed featured but was logged as non-featured"
  )]
  GuaranteeNotFeatured { pull: usize, index: u32 },
}

/// Something looks off but could have happened.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Advisory {
  #[error(
    "pull {pull}: pool pull {index} should be the guaranteed featured 6★ but was logged as {rarity}"
  )]
  GuaranteeIndexWithoutSixStar {
    pull:   usize,
    index:  u32,
    rarity: Rarity,
  },

  #[error("pull {pull}: standard pools have no featured 6★; logged as non-featured")]
  StandardFeaturedNormalized { pull: usize },

  #[error(
    "pull {pull}: only the 6★ on the guarantee index is tagged guaranteed; tag removed"
  )]
  GuaranteedTagCleared { pull: usize },

  #[error(
    "{total} pulls logged with no featured 6★, past the {guaranteed_up_at}-pull guarantee; an entry may be missing"
  )]
  GuaranteeThresholdPassed { total: u32, guaranteed_up_at: u32 },
}

// ─── Report ──────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ValidationReport {
  pub errors:   Vec<Violation>,
  pub warnings: Vec<Advisory>,
  /// The candidate as it should be committed: guarantee forcing and
  /// featured-flag normalization applied, order preserved.
  pub records:  Vec<NewPull>,
}

impl ValidationReport {
  pub fn accept(&self) -> bool { self.errors.is_empty() }

  pub fn error_messages(&self) -> Vec<String> {
    self.errors.iter().map(ToString::to_string).collect()
  }

  pub fn warning_messages(&self) -> Vec<String> {
    self.warnings.iter().map(ToString::to_string).collect()
  }
}

// ─── Validation ──────────────────────────────────────────────────────────────

/// Simulate `candidate` on top of `pool`'s records in `existing`.
///
/// `existing` may contain other pools' records; they are ignored.
/// `inherited` is only consulted for an empty Limited pool.
pub fn validate(
  pool: &Pool,
  existing: &[PullRecord],
  candidate: &[NewPull],
  inherited: &InheritedPityState,
) -> ValidationReport {
  let rules = pool.rules();
  let own: Vec<&PullRecord> = existing
    .iter()
    .filter(|r| r.pool_id == pool.pool_id)
    .collect();
  let prior_count = valid_pull_count(own.iter().copied());
  let mut state = compute_pity(own);
  if prior_count == 0
    && pool.pool_type == PoolType::Limited
    && inherited.has_inherited_pity
  {
    state.six_star_counter = inherited.six_star_counter;
    state.five_star_counter = inherited.five_star_counter;
  }

  let mut report = ValidationReport::default();
  let valid: Vec<&NewPull> = candidate.iter().filter(|p| !p.is_gift()).collect();
  let has_five = |pulls: &[&NewPull]| pulls.iter().any(|p| p.rarity.is_five_or_above());

  match rules.five_star_check {
    FiveStarCheck::PerTenPull => {
      for (i, ten) in valid.chunks(10).enumerate() {
        if ten.len() == 10 && !has_five(ten) {
          report
            .errors
            .push(Violation::WeaponTenPullWithoutFiveStar { ten_pull: i + 1 });
        }
      }
    }
    FiveStarCheck::RunningCounter => {
      let run = state.five_star_counter + valid.len() as u32;
      if !valid.is_empty() && !has_five(valid.as_slice()) && run > rules.five_star_pity {
        report.errors.push(Violation::FiveStarPityExceeded {
          run,
          pity: rules.five_star_pity,
        });
      }
    }
  }

  let hard_pity = rules.six_star_hard_pity;
  let mut resolver = GuaranteeResolver::new(pool.pool_type, &state, prior_count);
  let mut hard_pity_reported = false;
  let mut index_warned = false;

  for (i, submitted) in candidate.iter().enumerate() {
    let pull_no = i + 1;
    let mut pull = submitted.clone();

    if pull.rarity != Rarity::Six {
      pull.is_featured = false;
    } else if pull.is_featured && !rules.featured_slot {
      pull.is_featured = false;
      report
        .warnings
        .push(Advisory::StandardFeaturedNormalized { pull: pull_no });
    }

    if pull.is_gift() {
      report.records.push(pull);
      continue;
    }

    let position = state.six_star_counter + 1;
    if pull.rarity == Rarity::Six {
      if position > hard_pity {
        report.errors.push(Violation::SixStarBeyondHardPity {
          pull: pull_no,
          position,
          hard_pity,
        });
      }
      hard_pity_reported = false;
    } else if position >= hard_pity && !hard_pity_reported {
      report.errors.push(Violation::HardPityMissed {
        pull: pull_no,
        position,
        hard_pity,
      });
      hard_pity_reported = true;
    }

    let decision = resolver.observe(&pull);
    match decision {
      Decision::Force { index } => {
        if !pull.is_featured {
          report
            .errors
            .push(Violation::GuaranteeNotFeatured { pull: pull_no, index });
        }
        force(&mut pull);
      }
      Decision::MissingSixStar { index } => {
        report.warnings.push(Advisory::GuaranteeIndexWithoutSixStar {
          pull: pull_no,
          index,
          rarity: pull.rarity,
        });
        index_warned = true;
      }
      Decision::Unaffected => {}
    }
    // Only the resolver hands out the guaranteed tag.
    if pull.special_tag == SpecialTag::Guaranteed
      && !matches!(decision, Decision::Force { .. })
    {
      pull.special_tag = SpecialTag::None;
      report
        .warnings
        .push(Advisory::GuaranteedTagCleared { pull: pull_no });
    }

    state.advance(pull.rarity, pull.is_featured);
    report.records.push(pull);
  }

  // A forced pull marks the guarantee as seen, so the resolver alone tells
  // whether the batch carried a real guaranteed 6★.
  if let Some(guaranteed_up_at) = rules.guaranteed_up_at
    && !valid.is_empty()
    && !index_warned
    && !resolver.featured_seen()
    && resolver.index() > guaranteed_up_at
  {
    report.warnings.push(Advisory::GuaranteeThresholdPassed {
      total: resolver.index(),
      guaranteed_up_at,
    });
  }

  report
}
