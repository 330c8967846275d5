//! Pools: the named banners a player logs pulls against.

use std::{fmt, str::FromStr};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
  Error,
  rules::{PoolRuleSet, rules_for},
};

/// The kind of banner a pool represents. Every mechanical difference between
/// pools is looked up through [`PoolType::rules`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PoolType {
  Limited,
  Weapon,
  Standard,
}

impl PoolType {
  pub const ALL: [PoolType; 3] = [Self::Limited, Self::Weapon, Self::Standard];

  pub fn as_str(&self) -> &'static str {
    match self {
      Self::Limited => "limited",
      Self::Weapon => "weapon",
      Self::Standard => "standard",
    }
  }

  pub fn rules(&self) -> &'static PoolRuleSet { rules_for(*self) }
}

impl fmt::Display for PoolType {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.pad(self.as_str())
  }
}

impl FromStr for PoolType {
  type Err = Error;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s.trim().to_ascii_lowercase().as_str() {
      "limited" => Ok(Self::Limited),
      "weapon" => Ok(Self::Weapon),
      "standard" => Ok(Self::Standard),
      _ => Err(Error::UnknownPoolType(s.to_string())),
    }
  }
}

/// A named pool owned by one player.
///
/// `locked` is advisory to this crate: log backends refuse unprivileged
/// writes to a locked pool, the derivation engine ignores it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pool {
  pub pool_id:    Uuid,
  pub pool_type:  PoolType,
  pub name:       String,
  #[serde(default)]
  pub locked:     bool,
  pub created_at: DateTime<Utc>,
}

impl Pool {
  pub fn new(pool_type: PoolType, name: impl Into<String>) -> Self {
    Self {
      pool_id: Uuid::new_v4(),
      pool_type,
      name: name.into(),
      locked: false,
      created_at: Utc::now(),
    }
  }

  pub fn rules(&self) -> &'static PoolRuleSet { self.pool_type.rules() }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn parses_known_pool_types() {
    assert_eq!("limited".parse::<PoolType>().unwrap(), PoolType::Limited);
    assert_eq!(" Weapon ".parse::<PoolType>().unwrap(), PoolType::Weapon);
    assert_eq!("STANDARD".parse::<PoolType>().unwrap(), PoolType::Standard);
  }

  #[test]
  fn unknown_pool_type_fails_loudly() {
    let err = "beginner".parse::<PoolType>().unwrap_err();
    assert!(matches!(err, Error::UnknownPoolType(ref s) if s == "beginner"));
  }

  #[test]
  fn unknown_pool_type_rejected_on_deserialize() {
    let result = serde_json::from_str::<PoolType>("\"event\"");
    assert!(result.is_err());
  }
}
