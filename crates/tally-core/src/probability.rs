//! Chance of a 6★ on the next pull.

use serde::{Deserialize, Serialize};

use crate::rules::PoolRuleSet;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Probability {
  /// Always within `[0, 1]`.
  pub probability:           f64,
  pub in_soft_pity:          bool,
  /// Zero once the ramp has started or when the pool has no ramp.
  pub pulls_until_soft_pity: u32,
}

/// Map a 6★ pity counter onto the soft-pity curve.
///
/// The hard pity is not folded in here: a 6★ on the hard pity pull is
/// enforced by the validator, not by this curve.
pub fn current_probability(pity: u32, rules: &PoolRuleSet) -> Probability {
  let base = rules.base_six_star_rate;
  let Some(soft) = rules.soft_pity else {
    return Probability {
      probability:           base,
      in_soft_pity:          false,
      pulls_until_soft_pity: 0,
    };
  };

  if pity < soft.start {
    return Probability {
      probability:           base,
      in_soft_pity:          false,
      pulls_until_soft_pity: soft.start - pity,
    };
  }

  let extra = f64::from(pity - soft.start + 1);
  Probability {
    probability:           (base + extra * soft.increment).min(1.0),
    in_soft_pity:          true,
    pulls_until_soft_pity: 0,
  }
}

/// Expected number of pulls from zero pity to the next 6★, counting the
/// hard pity pull as certain.
pub fn expected_pulls_per_six(rules: &PoolRuleSet) -> f64 {
  let mut survival = 1.0;
  let mut expected = 0.0;
  for pull in 1..=rules.six_star_hard_pity {
    let p = if pull >= rules.six_star_hard_pity {
      1.0
    } else {
      current_probability(pull - 1, rules).probability
    };
    expected += f64::from(pull) * survival * p;
    survival *= 1.0 - p;
    if survival <= 0.0 {
      break;
    }
  }
  expected
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::{pool::PoolType, rules::rules_for};

  #[test]
  fn base_rate_before_soft_pity() {
    let rules = rules_for(PoolType::Limited);
    let p = current_probability(10, rules);
    assert_eq!(p.probability, 0.008);
    assert!(!p.in_soft_pity);
    assert_eq!(p.pulls_until_soft_pity, 55);
  }

  #[test]
  fn ramp_starts_at_soft_pity() {
    let rules = rules_for(PoolType::Limited);
    let p = current_probability(65, rules);
    assert!(p.in_soft_pity);
    assert_eq!(p.pulls_until_soft_pity, 0);
    assert!((p.probability - 0.058).abs() < 1e-9);

    let later = current_probability(70, rules);
    assert!((later.probability - 0.308).abs() < 1e-9);
  }

  #[test]
  fn weapon_has_flat_rate() {
    let rules = rules_for(PoolType::Weapon);
    for pity in [0, 20, 39, 500] {
      let p = current_probability(pity, rules);
      assert_eq!(p.probability, 0.04);
      assert!(!p.in_soft_pity);
      assert_eq!(p.pulls_until_soft_pity, 0);
    }
  }

  #[test]
  fn probability_is_clamped() {
    for pool_type in PoolType::ALL {
      let rules = rules_for(pool_type);
      for pity in 0..1_000 {
        let p = current_probability(pity, rules).probability;
        assert!((0.0..=1.0).contains(&p), "{pool_type} pity {pity}: {p}");
      }
    }
    assert_eq!(
      current_probability(10_000, rules_for(PoolType::Standard)).probability,
      1.0
    );
  }

  #[test]
  fn expected_pulls_within_hard_pity() {
    let weapon = expected_pulls_per_six(rules_for(PoolType::Weapon));
    assert!(weapon > 1.0 && weapon < 40.0);

    let limited = expected_pulls_per_six(rules_for(PoolType::Limited));
    assert!(limited > 50.0 && limited < 80.0, "{limited}");
  }
}
