//! `tally`: command-line front end for the Tally pull log.
//!
//! # Usage
//!
//! ```text
//! tally add-pool limited "Summer Banner"
//! tally submit "Summer Banner" 4,4,5,6* --ten
//! tally show "Summer Banner"
//! tally histogram "Summer Banner"
//! ```

mod input;
mod output;
mod settings;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result, anyhow, bail};
use chrono::Utc;
use clap::{Parser, Subcommand};
use tally_core::{
  distribution::{bucketize, six_star_events},
  inheritance::{carried_into, inherited_pity},
  log::{Actor, PullLog},
  pity::pool_records,
  pool::{Pool, PoolType},
  pull::SequenceKey,
  summary::summarize,
  validate::validate,
};
use tally_store_memory::{Error as StoreError, MemoryStore};
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;
use uuid::Uuid;

use crate::settings::CliConfig;

// ─── CLI args ─────────────────────────────────────────────────────────────────

#[derive(Parser, Debug)]
#[command(name = "tally", version, about = "Pity tracker for gacha pull logs")]
struct Cli {
  /// Path to a TOML config file.
  #[arg(short, long, value_name = "FILE")]
  config: Option<PathBuf>,

  /// Pull log snapshot (overrides `log_path` from the config).
  #[arg(long, value_name = "FILE", env = "TALLY_LOG")]
  log: Option<PathBuf>,

  #[command(subcommand)]
  command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
  /// List all pools.
  Pools,

  /// Create a pool.
  AddPool {
    /// limited, weapon or standard.
    pool_type: PoolType,
    name:      String,
  },

  /// Pity, odds and bonuses for one pool.
  Show {
    /// Pool name or id.
    pool: String,
  },

  /// Validate and log a batch of pulls, e.g. `4,4,5,6*`.
  Submit {
    pool:       String,
    pulls:      String,
    /// Pad the batch to a full ten-pull.
    #[arg(long)]
    ten:        bool,
    /// Only validate; do not write anything.
    #[arg(long)]
    dry_run:    bool,
    #[arg(long)]
    privileged: bool,
  },

  /// Replace one logged pull.
  Edit {
    key:        u64,
    pull:       String,
    #[arg(long)]
    privileged: bool,
  },

  /// Remove one logged pull.
  Delete {
    key:        u64,
    #[arg(long)]
    privileged: bool,
  },

  /// Lock or unlock a pool against player writes.
  Lock {
    pool:   String,
    #[arg(long)]
    unlock: bool,
  },

  /// Distribution of the pity at which 6★ pulls landed.
  Histogram {
    pool:  String,
    /// Extend the histogram to at least this pity.
    #[arg(long)]
    floor: Option<u32>,
  },
}

// ─── Entry point ──────────────────────────────────────────────────────────────

fn main() -> Result<()> {
  tracing_subscriber::fmt()
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy(),
    )
    .with_writer(std::io::stderr)
    .init();

  let cli = Cli::parse();
  let cfg = CliConfig::load(cli.config.as_deref())?;
  let log_path = cli.log.clone().unwrap_or_else(|| cfg.log_path.clone());
  let mut store = open_store(&log_path)?;

  let dirty = run(cli.command, &cfg, &mut store)?;
  if dirty {
    save_store(&store, &log_path)?;
  }
  Ok(())
}

fn actor(privileged: bool) -> Actor {
  if privileged { Actor::Privileged } else { Actor::Player }
}

/// Execute one command. Returns whether the store changed.
fn run(
  command: Command,
  cfg: &CliConfig,
  store: &mut MemoryStore,
) -> Result<bool> {
  match command {
    Command::Pools => {
      output::print_pools(&store.list_pools()?);
      Ok(false)
    }

    Command::AddPool { pool_type, name } => {
      if find_pool(store, &name).is_ok() {
        bail!("a pool named {name:?} already exists");
      }
      let pool = store.add_pool(pool_type, &name)?;
      println!(
        "created {} pool {} ({})",
        pool.pool_type, pool.name, pool.pool_id
      );
      Ok(true)
    }

    Command::Show { pool } => {
      let pool = find_pool(store, &pool)?;
      let pools = store.list_pools()?;
      let records = store.all_records()?;
      let summary = summarize(&pools, &records, pool.pool_id)?;
      output::print_summary(&summary);
      Ok(false)
    }

    Command::Submit {
      pool,
      pulls,
      ten,
      dry_run,
      privileged,
    } => {
      let pool = find_pool(store, &pool)?;
      let at = Utc::now();
      let mut batch = input::parse_pulls(&pulls, at)?;
      if ten {
        batch = input::pad_ten(batch, cfg.padding()?, at)?;
      }

      if dry_run {
        let pools = store.list_pools()?;
        let records = store.all_records()?;
        let inherited = inherited_pity(&pools, &records, pool.pool_id)?;
        let report = validate(&pool, &records, &batch, &inherited);
        output::print_report(&report);
        let verdict = if report.accept() { "accept" } else { "reject" };
        println!("would {verdict}");
        return Ok(false);
      }

      match store.submit(pool.pool_id, batch, actor(privileged)) {
        Ok(submission) => {
          output::print_report(&submission.report);
          println!("logged {} pull(s):", submission.committed.len());
          output::print_committed(&submission.committed);
          Ok(true)
        }
        Err(StoreError::Rejected { errors }) => {
          for error in &errors {
            println!("error:   {error}");
          }
          bail!("batch rejected; nothing was logged")
        }
        Err(e) => Err(e.into()),
      }
    }

    Command::Edit {
      key,
      pull,
      privileged,
    } => {
      let mut replacement = input::parse_pulls(&pull, Utc::now())?;
      if replacement.len() != 1 {
        bail!("edit takes exactly one pull");
      }
      let record = store.edit(
        SequenceKey(key),
        replacement.remove(0),
        actor(privileged),
      )?;
      println!("replaced {} with {}", record.sequence_key, record.rarity);
      Ok(true)
    }

    Command::Delete { key, privileged } => {
      let record = store.delete(SequenceKey(key), actor(privileged))?;
      println!("deleted {} ({})", record.sequence_key, record.rarity);
      Ok(true)
    }

    Command::Lock { pool, unlock } => {
      let pool = find_pool(store, &pool)?;
      let pool = store.set_locked(pool.pool_id, !unlock)?;
      println!(
        "{} is now {}",
        pool.name,
        if pool.locked { "locked" } else { "unlocked" }
      );
      Ok(true)
    }

    Command::Histogram { pool, floor } => {
      let pool = find_pool(store, &pool)?;
      let pools = store.list_pools()?;
      let records = store.all_records()?;
      let carried = carried_into(&pools, &records, pool.pool_id)?;
      let events = six_star_events(
        pool_records(&records, pool.pool_id),
        carried.six_star_counter,
      );
      let floor = floor.unwrap_or(cfg.display_floor);
      output::print_histogram(&bucketize(&events, floor));
      Ok(false)
    }
  }
}

/// Look a pool up by id or case-insensitive name.
fn find_pool(store: &MemoryStore, key: &str) -> Result<Pool> {
  let pools = store.list_pools()?;
  if let Ok(id) = Uuid::parse_str(key)
    && let Some(pool) = pools.iter().find(|p| p.pool_id == id)
  {
    return Ok(pool.clone());
  }
  pools
    .into_iter()
    .find(|p| p.name.eq_ignore_ascii_case(key))
    .ok_or_else(|| anyhow!("no pool named {key:?}"))
}

fn open_store(path: &Path) -> Result<MemoryStore> {
  if !path.exists() {
    tracing::info!(path = %path.display(), "no pull log yet, starting empty");
    return Ok(MemoryStore::new());
  }
  let raw = std::fs::read_to_string(path)
    .with_context(|| format!("reading pull log {}", path.display()))?;
  let store = MemoryStore::from_json(&raw)
    .with_context(|| format!("parsing pull log {}", path.display()))?;
  tracing::debug!(path = %path.display(), "pull log loaded");
  Ok(store)
}

fn save_store(store: &MemoryStore, path: &Path) -> Result<()> {
  let json = store.to_json()?;
  std::fs::write(path, json)
    .with_context(|| format!("writing pull log {}", path.display()))?;
  tracing::debug!(path = %path.display(), "pull log saved");
  Ok(())
}
