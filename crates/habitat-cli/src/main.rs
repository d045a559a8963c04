//! `habitat` — track daily habits and streaks from the command line.
//!
//! Reads `habitat.toml` (or the path given with `--config`), opens the SQLite
//! store and runs one command for the configured owner.
//!
//! # Usage
//!
//! ```text
//! habitat add "Morning run"
//! habitat list
//! habitat done <HABIT_ID>
//! habitat stats <HABIT_ID>
//! habitat --today 2024-03-05 done <HABIT_ID>
//! ```

mod config;
mod render;

use std::path::PathBuf;

use anyhow::{Context as _, anyhow};
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use habitat_core::{
  Error,
  clock::{Clock as _, FixedClock, SystemClock},
  tracker::HabitTracker,
};
use habitat_store_sqlite::SqliteStore;
use serde::Serialize;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;
use uuid::Uuid;

use crate::config::CliConfig;

// ─── CLI args ─────────────────────────────────────────────────────────────────

#[derive(Parser)]
#[command(name = "habitat", author, version, about = "Daily habit tracker")]
struct Cli {
  /// Path to the TOML configuration file.
  #[arg(short, long, default_value = "habitat.toml")]
  config: PathBuf,

  /// Act as this owner instead of the configured `owner_id`.
  #[arg(long, env = "HABITAT_OWNER")]
  owner: Option<Uuid>,

  /// Treat this date (YYYY-MM-DD) as today.
  #[arg(long)]
  today: Option<NaiveDate>,

  /// Print results as JSON.
  #[arg(long)]
  json: bool,

  #[command(subcommand)]
  command: Command,
}

#[derive(Subcommand)]
enum Command {
  /// Create a new habit.
  Add { name: String },
  /// List your habits with their current streaks.
  List,
  /// Mark a habit done for today.
  Done { habit_id: Uuid },
  /// Show completion statistics for a habit.
  Stats { habit_id: Uuid },
  /// Delete a habit and its history.
  Delete { habit_id: Uuid },
}

// ─── Entry point ──────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() -> anyhow::Result<()> {
  tracing_subscriber::fmt()
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(LevelFilter::WARN.into())
        .from_env_lossy(),
    )
    .with_writer(std::io::stderr)
    .init();

  let cli = Cli::parse();
  let cfg = CliConfig::load(&cli.config)?;

  let owner = cli.owner.or(cfg.owner_id).ok_or_else(|| {
    anyhow!("no owner configured; set `owner_id` in the config file or HABITAT_OWNER")
  })?;
  let today = cli.today.unwrap_or_else(|| SystemClock.today());
  tracing::debug!(%owner, %today, store = %cfg.store_path.display(), "starting");

  if let Some(parent) = cfg.store_path.parent()
    && !parent.as_os_str().is_empty()
  {
    std::fs::create_dir_all(parent)
      .with_context(|| format!("failed to create {}", parent.display()))?;
  }

  let store = SqliteStore::open(&cfg.store_path)
    .await
    .with_context(|| format!("failed to open store at {:?}", cfg.store_path))?;
  let tracker = HabitTracker::new(store, FixedClock(today));

  run(&tracker, owner, cli.command, cli.json).await
}

async fn run(
  tracker: &HabitTracker<SqliteStore, FixedClock>,
  owner: Uuid,
  command: Command,
  json: bool,
) -> anyhow::Result<()> {
  let today = tracker.today();

  match command {
    Command::Add { name } => {
      let habit = tracker.create_habit(owner, &name).await?;
      emit(json, &habit, || render::habit_line(&habit, today))
    }
    Command::List => {
      let habits = tracker.habits_for(owner).await?;
      emit(json, &habits, || render::habit_list(&habits, today))
    }
    Command::Done { habit_id } => {
      let done = tracker.mark_done(owner, habit_id).await?;
      emit(json, &done, || render::completion(&done))
    }
    Command::Stats { habit_id } => {
      let habit = tracker.habit(owner, habit_id).await?;
      match tracker.stats(owner, habit_id).await {
        Ok(stats) => emit(json, &stats, || render::stats(&habit, &stats)),
        // Created "after" today, e.g. with a backdated `--today`.
        Err(Error::InvalidDateRange { .. }) => {
          emit(json, &None::<()>, || "No stats available yet.".to_owned())
        }
        Err(e) => Err(e.into()),
      }
    }
    Command::Delete { habit_id } => {
      tracker.delete_habit(owner, habit_id).await?;
      emit(json, &habit_id, || format!("Deleted {habit_id}"))
    }
  }
}

/// Print `value` as JSON, or the text produced by `text`.
fn emit<T: Serialize>(
  json: bool,
  value: &T,
  text: impl FnOnce() -> String,
) -> anyhow::Result<()> {
  if json {
    println!("{}", serde_json::to_string_pretty(value)?);
  } else {
    println!("{}", text());
  }
  Ok(())
}
