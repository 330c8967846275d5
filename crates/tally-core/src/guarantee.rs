//! Featured ("UP") guarantee at a fixed pool pull index.
//!
//! On Limited and Weapon pools the 6★ landing on pull
//! [`PoolRuleSet::guaranteed_up_at`](crate::rules::PoolRuleSet) must be the
//! featured one, unless a featured 6★ has already shown up in that pool.
//! The index counts the pool's own non-gift pulls, including the one being
//! placed.

use crate::{
  pity::PityState,
  pool::PoolType,
  pull::{NewPull, Rarity, SpecialTag},
};

/// What the guarantee says about one pull.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
  /// The guarantee does not apply to this pull.
  Unaffected,
  /// A 6★ on the guarantee index: it must be featured and tagged.
  Force { index: u32 },
  /// The guarantee index was reached with something other than a 6★.
  MissingSixStar { index: u32 },
}

/// Walks a pool's pulls one at a time, tracking the guarantee index and
/// whether a featured 6★ has been seen.
///
/// A featured 6★ earlier in the same batch switches the guarantee off for
/// the rest of the batch even though nothing has been persisted yet.
#[derive(Debug, Clone)]
pub struct GuaranteeResolver {
  guaranteed_up_at: Option<u32>,
  index:            u32,
  featured_seen:    bool,
}

impl GuaranteeResolver {
  /// `prior` and `prior_count` describe the pool's own log before the batch.
  pub fn new(pool_type: PoolType, prior: &PityState, prior_count: u32) -> Self {
    Self {
      guaranteed_up_at: pool_type.rules().guaranteed_up_at,
      index:            prior_count,
      featured_seen:    prior.featured_six_occurred,
    }
  }

  /// Pool index of the last non-gift pull observed.
  pub fn index(&self) -> u32 { self.index }

  pub fn featured_seen(&self) -> bool { self.featured_seen }

  /// Whether the guarantee is still outstanding at the current index.
  pub fn pending(&self) -> bool {
    !self.featured_seen
      && self.guaranteed_up_at.is_some_and(|at| self.index < at)
  }

  /// Place the next pull and decide whether it is forced.
  pub fn observe(&mut self, pull: &NewPull) -> Decision {
    if pull.is_gift() {
      return Decision::Unaffected;
    }
    self.index += 1;

    let on_index = !self.featured_seen && self.guaranteed_up_at == Some(self.index);
    let decision = match (on_index, pull.rarity) {
      (true, Rarity::Six) => Decision::Force { index: self.index },
      (true, _) => Decision::MissingSixStar { index: self.index },
      (false, _) => Decision::Unaffected,
    };

    if pull.rarity == Rarity::Six
      && (pull.is_featured || matches!(decision, Decision::Force { .. }))
    {
      self.featured_seen = true;
    }
    decision
  }
}

/// Mark a pull as the guaranteed featured 6★.
pub fn force(pull: &mut NewPull) {
  pull.is_featured = true;
  pull.special_tag = SpecialTag::Guaranteed;
}

/// Apply the guarantee to a whole batch, returning the adjusted pulls.
pub fn resolve_batch(
  pool_type: PoolType,
  prior: &PityState,
  prior_count: u32,
  batch: &[NewPull],
) -> Vec<NewPull> {
  let mut resolver = GuaranteeResolver::new(pool_type, prior, prior_count);
  batch
    .iter()
    .map(|pull| {
      let mut pull = pull.clone();
      if let Decision::Force { .. } = resolver.observe(&pull) {
        force(&mut pull);
      }
      pull
    })
    .collect()
}
