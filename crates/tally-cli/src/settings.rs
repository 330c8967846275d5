//! Layered CLI settings: defaults, then an optional TOML file, then
//! `TALLY_`-prefixed environment variables.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;
use tally_core::pull::Rarity;

#[derive(Debug, Clone, Deserialize)]
pub struct CliConfig {
  /// JSON snapshot holding pools and records.
  #[serde(default = "default_log_path")]
  pub log_path:       PathBuf,
  /// Histograms always extend at least this far.
  #[serde(default = "default_display_floor")]
  pub display_floor:  u32,
  /// Rarity used to pad a short ten-pull.
  #[serde(default = "default_padding_rarity")]
  pub padding_rarity: u8,
}

fn default_log_path() -> PathBuf { PathBuf::from("tally.json") }

fn default_display_floor() -> u32 { 80 }

fn default_padding_rarity() -> u8 { 4 }

impl CliConfig {
  pub fn load(path: Option<&Path>) -> Result<Self> {
    let file = match path {
      Some(path) => config::File::from(path.to_path_buf()).required(true),
      None => config::File::with_name("tally").required(false),
    };
    let settings = config::Config::builder()
      .add_source(file)
      .add_source(config::Environment::with_prefix("TALLY"))
      .build()
      .context("failed to read config")?;
    settings
      .try_deserialize()
      .context("failed to deserialise CliConfig")
  }

  pub fn padding(&self) -> Result<Rarity> {
    Rarity::try_from(self.padding_rarity).context("invalid padding_rarity")
  }
}
