//! [`MemoryStore`], the in-memory implementation of [`PullLog`].

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use tally_core::{
  inheritance::inherited_pity,
  log::{Actor, PullLog, Submission},
  pool::{Pool, PoolType},
  pull::{NewPull, PullRecord, SequenceKey},
  validate::validate,
};

use crate::{Error, Result};

// ─── Snapshot ────────────────────────────────────────────────────────────────

/// Serializable contents of a store.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
  pub pools:   Vec<Pool>,
  #[serde(default)]
  pub records: Vec<PullRecord>,
}

// ─── Store ───────────────────────────────────────────────────────────────────

/// Pools and records held in memory, records kept in sequence order.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
  pools:    Vec<Pool>,
  records:  Vec<PullRecord>,
  last_key: SequenceKey,
}

impl MemoryStore {
  pub fn new() -> Self { Self::default() }

  /// Rebuild a store from a snapshot. Key assignment resumes after the
  /// highest key present.
  pub fn from_snapshot(snapshot: Snapshot) -> Self {
    let Snapshot { pools, mut records } = snapshot;
    records.sort_by_key(|r| r.sequence_key);
    let last_key = records
      .last()
      .map(|r| r.sequence_key)
      .unwrap_or_default();
    Self {
      pools,
      records,
      last_key,
    }
  }

  pub fn snapshot(&self) -> Snapshot {
    Snapshot {
      pools:   self.pools.clone(),
      records: self.records.clone(),
    }
  }

  pub fn from_json(json: &str) -> Result<Self> {
    Ok(Self::from_snapshot(serde_json::from_str(json)?))
  }

  pub fn to_json(&self) -> Result<String> {
    Ok(serde_json::to_string_pretty(&self.snapshot())?)
  }

  fn pool(&self, pool_id: Uuid) -> Result<&Pool> {
    self
      .pools
      .iter()
      .find(|p| p.pool_id == pool_id)
      .ok_or(Error::PoolNotFound(pool_id))
  }

  fn check_writable(&self, pool_id: Uuid, actor: Actor) -> Result<()> {
    let pool = self.pool(pool_id)?;
    if actor.may_write(pool) {
      Ok(())
    } else {
      Err(Error::PoolLocked(pool_id))
    }
  }

  fn position(&self, sequence_key: SequenceKey) -> Result<usize> {
    self
      .records
      .binary_search_by_key(&sequence_key, |r| r.sequence_key)
      .map_err(|_| Error::RecordNotFound(sequence_key))
  }
}

impl PullLog for MemoryStore {
  type Error = Error;

  fn add_pool(&mut self, pool_type: PoolType, name: &str) -> Result<Pool> {
    let pool = Pool::new(pool_type, name);
    tracing::info!(pool_id = %pool.pool_id, %pool_type, name, "pool created");
    self.pools.push(pool.clone());
    Ok(pool)
  }

  fn get_pool(&self, pool_id: Uuid) -> Result<Option<Pool>> {
    Ok(self.pools.iter().find(|p| p.pool_id == pool_id).cloned())
  }

  fn list_pools(&self) -> Result<Vec<Pool>> { Ok(self.pools.clone()) }

  fn set_locked(&mut self, pool_id: Uuid, locked: bool) -> Result<Pool> {
    let pool = self
      .pools
      .iter_mut()
      .find(|p| p.pool_id == pool_id)
      .ok_or(Error::PoolNotFound(pool_id))?;
    pool.locked = locked;
    tracing::info!(%pool_id, locked, "pool lock changed");
    Ok(pool.clone())
  }

  fn records(&self, pool_id: Uuid) -> Result<Vec<PullRecord>> {
    self.pool(pool_id)?;
    Ok(
      self
        .records
        .iter()
        .filter(|r| r.pool_id == pool_id)
        .cloned()
        .collect(),
    )
  }

  fn all_records(&self) -> Result<Vec<PullRecord>> { Ok(self.records.clone()) }

  fn submit(
    &mut self,
    pool_id: Uuid,
    batch: Vec<NewPull>,
    actor: Actor,
  ) -> Result<Submission> {
    self.check_writable(pool_id, actor)?;
    let pool = self.pool(pool_id)?.clone();
    let inherited = inherited_pity(&self.pools, &self.records, pool_id)?;

    let report = validate(&pool, &self.records, &batch, &inherited);
    if !report.accept() {
      tracing::warn!(
        %pool_id,
        pulls = batch.len(),
        errors = ?report.error_messages(),
        "batch rejected"
      );
      return Err(Error::Rejected {
        errors: report.errors,
      });
    }
    for warning in &report.warnings {
      tracing::warn!(%pool_id, %warning, "batch accepted with warning");
    }

    let committed: Vec<PullRecord> = report
      .records
      .iter()
      .cloned()
      .map(|pull| {
        self.last_key = self.last_key.next();
        pull.into_record(pool_id, self.last_key)
      })
      .collect();
    self.records.extend(committed.iter().cloned());

    tracing::info!(
      %pool_id,
      pulls = committed.len(),
      inherited = inherited.has_inherited_pity,
      "batch committed"
    );
    Ok(Submission { report, committed })
  }

  fn edit(
    &mut self,
    sequence_key: SequenceKey,
    replacement: NewPull,
    actor: Actor,
  ) -> Result<PullRecord> {
    let idx = self.position(sequence_key)?;
    let pool_id = self.records[idx].pool_id;
    self.check_writable(pool_id, actor)?;

    let record = replacement.into_record(pool_id, sequence_key);
    self.records[idx] = record.clone();
    tracing::info!(%pool_id, %sequence_key, "record replaced");
    Ok(record)
  }

  fn delete(&mut self, sequence_key: SequenceKey, actor: Actor) -> Result<PullRecord> {
    let idx = self.position(sequence_key)?;
    self.check_writable(self.records[idx].pool_id, actor)?;

    let removed = self.records.remove(idx);
    tracing::info!(pool_id = %removed.pool_id, %sequence_key, "record deleted");
    Ok(removed)
  }
}
