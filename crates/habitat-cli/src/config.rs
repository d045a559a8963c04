//! Layered configuration: defaults, then the TOML file, then `HABITAT_*`
//! environment variables. Command-line flags are applied on top by `main`.

use std::path::{Path, PathBuf};

use anyhow::Context as _;
use serde::Deserialize;
use uuid::Uuid;

const DEFAULT_STORE_PATH: &str = "~/.local/share/habitat/habits.db";

/// Settings read from `habitat.toml` and the environment.
#[derive(Debug, Deserialize, Clone)]
pub struct CliConfig {
  /// SQLite database file. A leading `~/` is expanded.
  pub store_path: PathBuf,
  /// Identity whose habits the commands act on.
  #[serde(default)]
  pub owner_id:   Option<Uuid>,
}

impl CliConfig {
  pub fn load(file: &Path) -> anyhow::Result<Self> {
    let settings = config::Config::builder()
      .set_default("store_path", DEFAULT_STORE_PATH)?
      .add_source(config::File::from(file).required(false))
      .add_source(config::Environment::with_prefix("HABITAT"))
      .build()
      .context("failed to read config file")?;

    let mut cfg: CliConfig = settings
      .try_deserialize()
      .context("failed to deserialise CliConfig")?;
    cfg.store_path = expand_tilde(&cfg.store_path);
    Ok(cfg)
  }
}

/// Expand a leading `~` to the user's home directory.
pub fn expand_tilde(path: &Path) -> PathBuf {
  let s = path.to_string_lossy();
  if let Some(rest) = s.strip_prefix("~/")
    && let Ok(home) = std::env::var("HOME")
  {
    return PathBuf::from(home).join(rest);
  }
  path.to_path_buf()
}
