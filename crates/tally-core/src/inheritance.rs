//! Pity carried into a fresh Limited pool from the player's other Limited
//! pools.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
  Error, Result,
  pity::{PityState, compute_pity, valid_pull_count},
  pool::{Pool, PoolType},
  pull::PullRecord,
};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InheritedPityState {
  pub six_star_counter:   u32,
  pub five_star_counter:  u32,
  pub has_inherited_pity: bool,
}

/// The pity shown to the player: the pool's own while it has any valid pull,
/// otherwise whatever it inherited. Never a blend of the two.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EffectivePity {
  pub six_star_counter:      u32,
  pub five_star_counter:     u32,
  pub featured_six_occurred: bool,
  pub inherited:             bool,
}

fn find_pool(pools: &[Pool], pool_id: Uuid) -> Result<&Pool> {
  pools
    .iter()
    .find(|p| p.pool_id == pool_id)
    .ok_or(Error::PoolNotFound(pool_id))
}

/// Compute what `target` inherits.
///
/// Only an empty Limited pool inherits. The other Limited pools' valid pulls
/// are merged in log order and treated as one sequence.
pub fn inherited_pity(
  pools: &[Pool],
  records: &[PullRecord],
  target: Uuid,
) -> Result<InheritedPityState> {
  let pool = find_pool(pools, target)?;
  if pool.pool_type != PoolType::Limited {
    return Ok(InheritedPityState::default());
  }
  let own = records.iter().filter(|r| r.pool_id == target);
  if valid_pull_count(own) > 0 {
    return Ok(InheritedPityState::default());
  }

  let siblings: Vec<Uuid> = pools
    .iter()
    .filter(|p| p.pool_type == PoolType::Limited && p.pool_id != target)
    .map(|p| p.pool_id)
    .collect();
  let sibling_records: Vec<&PullRecord> = records
    .iter()
    .filter(|r| siblings.contains(&r.pool_id))
    .collect();

  if valid_pull_count(sibling_records.iter().copied()) == 0 {
    return Ok(InheritedPityState::default());
  }

  let state = compute_pity(sibling_records);
  Ok(InheritedPityState {
    six_star_counter:   state.six_star_counter,
    five_star_counter:  state.five_star_counter,
    has_inherited_pity: true,
  })
}

/// What `target` inherited at the moment its first valid pull was logged.
///
/// Only sibling pulls logged before that point count. For a pool that is
/// still empty this is the same as [`inherited_pity`].
pub fn carried_into(
  pools: &[Pool],
  records: &[PullRecord],
  target: Uuid,
) -> Result<InheritedPityState> {
  let first = records
    .iter()
    .filter(|r| r.pool_id == target && !r.is_gift())
    .map(|r| r.sequence_key)
    .min();
  let Some(first) = first else {
    return inherited_pity(pools, records, target);
  };
  let earlier: Vec<PullRecord> = records
    .iter()
    .filter(|r| r.sequence_key < first)
    .cloned()
    .collect();
  inherited_pity(pools, &earlier, target)
}

/// Own pity if the pool has any valid pull, otherwise inherited pity.
pub fn effective_pity(
  pools: &[Pool],
  records: &[PullRecord],
  target: Uuid,
) -> Result<EffectivePity> {
  find_pool(pools, target)?;
  let own: Vec<&PullRecord> =
    records.iter().filter(|r| r.pool_id == target).collect();

  if valid_pull_count(own.iter().copied()) > 0 {
    let PityState {
      six_star_counter,
      five_star_counter,
      featured_six_occurred,
    } = compute_pity(own);
    return Ok(EffectivePity {
      six_star_counter,
      five_star_counter,
      featured_six_occurred,
      inherited: false,
    });
  }

  let inherited = inherited_pity(pools, records, target)?;
  Ok(EffectivePity {
    six_star_counter:      inherited.six_star_counter,
    five_star_counter:     inherited.five_star_counter,
    featured_six_occurred: false,
    inherited:             inherited.has_inherited_pity,
  })
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::testing::LogBuilder;

  fn limited(name: &str) -> Pool { Pool::new(PoolType::Limited, name) }

  #[test]
  fn empty_pool_inherits_from_sibling() {
    let a = limited("A");
    let b = limited("B");
    // 30 pulls on B, the last 6★ twelve pulls ago.
    let log = LogBuilder::new()
      .filler(b.pool_id, 17)
      .pulls(b.pool_id, "6")
      .filler(b.pool_id, 12)
      .build();
    let pools = vec![a.clone(), b];

    let inherited = inherited_pity(&pools, &log, a.pool_id).unwrap();
    assert!(inherited.has_inherited_pity);
    assert_eq!(inherited.six_star_counter, 12);
    assert_eq!(inherited.five_star_counter, 2);

    let effective = effective_pity(&pools, &log, a.pool_id).unwrap();
    assert!(effective.inherited);
    assert_eq!(effective.six_star_counter, 12);
  }

  #[test]
  fn own_pulls_block_inheritance() {
    let a = limited("A");
    let b = limited("B");
    let log = LogBuilder::new()
      .filler(b.pool_id, 40)
      .pulls(a.pool_id, "4")
      .build();
    let pools = vec![a.clone(), b];

    let inherited = inherited_pity(&pools, &log, a.pool_id).unwrap();
    assert!(!inherited.has_inherited_pity);
    assert_eq!(inherited.six_star_counter, 0);

    let effective = effective_pity(&pools, &log, a.pool_id).unwrap();
    assert!(!effective.inherited);
    assert_eq!(effective.six_star_counter, 1);
  }

  #[test]
  fn gift_only_pool_still_inherits() {
    let a = limited("A");
    let b = limited("B");
    let log = LogBuilder::new()
      .filler(b.pool_id, 5)
      .pulls(a.pool_id, "g6*")
      .build();
    let pools = vec![a.clone(), b];
    let inherited = inherited_pity(&pools, &log, a.pool_id).unwrap();
    assert!(inherited.has_inherited_pity);
    assert_eq!(inherited.six_star_counter, 5);
  }

  #[test]
  fn siblings_are_merged_in_log_order() {
    let a = limited("A");
    let b = limited("B");
    let c = limited("C");
    let log = LogBuilder::new()
      .pulls(b.pool_id, "4 4 4")
      .pulls(c.pool_id, "6")
      .pulls(b.pool_id, "4 4")
      .build();
    let pools = vec![a.clone(), b, c];
    let inherited = inherited_pity(&pools, &log, a.pool_id).unwrap();
    assert_eq!(inherited.six_star_counter, 2);
  }

  #[test]
  fn other_pool_types_are_ignored() {
    let a = limited("A");
    let weapon = Pool::new(PoolType::Weapon, "W");
    let standard = Pool::new(PoolType::Standard, "S");
    let log = LogBuilder::new()
      .filler(weapon.pool_id, 20)
      .filler(standard.pool_id, 20)
      .build();
    let pools = vec![a.clone(), weapon.clone(), standard];

    let inherited = inherited_pity(&pools, &log, a.pool_id).unwrap();
    assert_eq!(inherited, InheritedPityState::default());

    // Non-limited targets never inherit.
    let weapon_target = inherited_pity(&pools, &log, weapon.pool_id).unwrap();
    assert!(!weapon_target.has_inherited_pity);
  }

  #[test]
  fn carry_over_is_frozen_at_first_pull() {
    let a = limited("A");
    let b = limited("B");
    let log = LogBuilder::new()
      .filler(b.pool_id, 30)
      .pulls(a.pool_id, "4 4 6")
      .filler(b.pool_id, 5)
      .build();
    let pools = vec![a.clone(), b.clone()];

    let carried = carried_into(&pools, &log, a.pool_id).unwrap();
    assert!(carried.has_inherited_pity);
    assert_eq!(carried.six_star_counter, 30);

    // B is not empty, so it never carried anything in.
    let carried_b = carried_into(&pools, &log, b.pool_id).unwrap();
    assert!(!carried_b.has_inherited_pity);
  }

  #[test]
  fn unknown_target_is_an_error() {
    let pools = vec![limited("A")];
    let missing = Uuid::new_v4();
    let err = inherited_pity(&pools, &[], missing).unwrap_err();
    assert!(matches!(err, Error::PoolNotFound(id) if id == missing));
  }
}
