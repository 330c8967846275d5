//! Log fixtures shared by the unit tests.

use chrono::{DateTime, TimeZone, Utc};
use uuid::Uuid;

use crate::pull::{NewPull, PullRecord, Rarity, SequenceKey, SpecialTag};

pub(crate) fn ts() -> DateTime<Utc> { Utc.timestamp_opt(1_700_000_000, 0).unwrap() }

/// Parse a compact pull list: `4`, `5`, `6`, `6*` (featured), `6!`
/// (featured, tagged guaranteed), and a `g` prefix for gifts (`g6*`).
pub(crate) fn pulls(tokens: &str) -> Vec<NewPull> {
  tokens
    .split_whitespace()
    .map(|token| {
      let (gift, token) = match token.strip_prefix('g') {
        Some(rest) => (true, rest),
        None => (false, token),
      };
      let rarity = Rarity::try_from(token.as_bytes()[0] - b'0').unwrap();
      let mut pull = NewPull::new(rarity).at(ts());
      match &token[1..] {
        "*" => pull = pull.featured(),
        "!" => pull = pull.featured().tagged(SpecialTag::Guaranteed),
        "" => {}
        other => panic!("bad pull token suffix {other:?}"),
      }
      if gift {
        pull = pull.tagged(SpecialTag::Gift);
      }
      pull
    })
    .collect()
}

/// `n` pulls without a 6★, with a 5★ on every tenth so the 5★ pity holds.
pub(crate) fn filler(n: usize) -> Vec<NewPull> {
  (1..=n)
    .map(|i| {
      let rarity = if i % 10 == 0 { Rarity::Five } else { Rarity::Four };
      NewPull::new(rarity).at(ts())
    })
    .collect()
}

/// Assigns sequence keys across any number of pools in push order.
#[derive(Default)]
pub(crate) struct LogBuilder {
  records: Vec<PullRecord>,
  next:    SequenceKey,
}

impl LogBuilder {
  pub(crate) fn new() -> Self { Self::default() }

  pub(crate) fn push(
    &mut self,
    pool_id: Uuid,
    batch: impl IntoIterator<Item = NewPull>,
  ) -> &mut Self {
    for pull in batch {
      self.next = self.next.next();
      self.records.push(pull.into_record(pool_id, self.next));
    }
    self
  }

  pub(crate) fn pulls(&mut self, pool_id: Uuid, tokens: &str) -> &mut Self {
    self.push(pool_id, pulls(tokens))
  }

  pub(crate) fn filler(&mut self, pool_id: Uuid, n: usize) -> &mut Self {
    self.push(pool_id, filler(n))
  }

  pub(crate) fn build(&self) -> Vec<PullRecord> { self.records.clone() }
}
