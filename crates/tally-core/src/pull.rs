//! Pull records and the append-only log every derived number comes from.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::Error;

// ─── Ordering ────────────────────────────────────────────────────────────────

/// Total order of the pull log. Assigned by the log backend at creation;
/// members of one batch receive consecutive keys in submission order.
#[derive(
  Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize,
  Deserialize,
)]
#[serde(transparent)]
pub struct SequenceKey(pub u64);

impl SequenceKey {
  pub fn next(self) -> Self { Self(self.0 + 1) }
}

impl fmt::Display for SequenceKey {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "#{}", self.0)
  }
}

// ─── Rarity ──────────────────────────────────────────────────────────────────

/// Star rating of a pull. Serialized as the bare number.
#[derive(
  Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize,
  Deserialize,
)]
#[serde(try_from = "u8", into = "u8")]
pub enum Rarity {
  Four = 4,
  Five = 5,
  Six = 6,
}

impl Rarity {
  /// Whether this pull satisfies the 5★-or-above guarantee.
  pub fn is_five_or_above(self) -> bool { self >= Self::Five }
}

impl TryFrom<u8> for Rarity {
  type Error = Error;

  fn try_from(value: u8) -> Result<Self, Self::Error> {
    match value {
      4 => Ok(Self::Four),
      5 => Ok(Self::Five),
      6 => Ok(Self::Six),
      other => Err(Error::InvalidRarity(other)),
    }
  }
}

impl From<Rarity> for u8 {
  fn from(r: Rarity) -> Self { r as u8 }
}

impl fmt::Display for Rarity {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}★", u8::from(*self))
  }
}

// ─── Tags ────────────────────────────────────────────────────────────────────

/// Out-of-band marker on a pull.
///
/// `Gift` pulls are milestone rewards: they stay in the log for audit but
/// are invisible to every counter and index.
#[derive(
  Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum SpecialTag {
  #[default]
  None,
  Guaranteed,
  Gift,
}

// ─── PullRecord ──────────────────────────────────────────────────────────────

/// One logged draw. Records are never mutated in place; an edit replaces the
/// whole record under the same [`SequenceKey`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PullRecord {
  pub sequence_key: SequenceKey,
  pub pool_id:      Uuid,
  pub rarity:       Rarity,
  /// Only meaningful for 6★ pulls; `false` is the non-featured slot.
  #[serde(default)]
  pub is_featured:  bool,
  #[serde(default)]
  pub special_tag:  SpecialTag,
  pub timestamp:    DateTime<Utc>,
}

impl PullRecord {
  pub fn is_gift(&self) -> bool { self.special_tag == SpecialTag::Gift }

  pub fn is_featured_six(&self) -> bool {
    self.rarity == Rarity::Six && self.is_featured
  }
}

// ─── NewPull ─────────────────────────────────────────────────────────────────

/// A candidate pull that has not been assigned a place in the log yet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewPull {
  pub rarity:      Rarity,
  #[serde(default)]
  pub is_featured: bool,
  #[serde(default)]
  pub special_tag: SpecialTag,
  pub timestamp:   DateTime<Utc>,
}

impl NewPull {
  /// A plain, untagged, non-featured pull stamped with the current time.
  pub fn new(rarity: Rarity) -> Self {
    Self {
      rarity,
      is_featured: false,
      special_tag: SpecialTag::None,
      timestamp: Utc::now(),
    }
  }

  pub fn featured(mut self) -> Self {
    self.is_featured = true;
    self
  }

  pub fn tagged(mut self, tag: SpecialTag) -> Self {
    self.special_tag = tag;
    self
  }

  pub fn at(mut self, timestamp: DateTime<Utc>) -> Self {
    self.timestamp = timestamp;
    self
  }

  pub fn is_gift(&self) -> bool { self.special_tag == SpecialTag::Gift }

  pub fn into_record(self, pool_id: Uuid, sequence_key: SequenceKey) -> PullRecord {
    PullRecord {
      sequence_key,
      pool_id,
      rarity: self.rarity,
      is_featured: self.is_featured,
      special_tag: self.special_tag,
      timestamp: self.timestamp,
    }
  }
}

impl From<&PullRecord> for NewPull {
  fn from(r: &PullRecord) -> Self {
    Self {
      rarity:      r.rarity,
      is_featured: r.is_featured,
      special_tag: r.special_tag,
      timestamp:   r.timestamp,
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn rarity_serializes_as_number() {
    assert_eq!(serde_json::to_string(&Rarity::Six).unwrap(), "6");
    let r: Rarity = serde_json::from_str("5").unwrap();
    assert_eq!(r, Rarity::Five);
  }

  #[test]
  fn rarity_out_of_range_rejected() {
    assert!(matches!(Rarity::try_from(3), Err(Error::InvalidRarity(3))));
    assert!(serde_json::from_str::<Rarity>("7").is_err());
  }

  #[test]
  fn record_defaults_tag_and_featured() {
    let json = r#"{
      "sequence_key": 4,
      "pool_id": "00000000-0000-0000-0000-000000000000",
      "rarity": 6,
      "timestamp": "2024-01-01T00:00:00Z"
    }"#;
    let record: PullRecord = serde_json::from_str(json).unwrap();
    assert_eq!(record.sequence_key, SequenceKey(4));
    assert!(!record.is_featured);
    assert_eq!(record.special_tag, SpecialTag::None);
  }
}
