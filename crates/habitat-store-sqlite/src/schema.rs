//! SQL schema for the Habitat SQLite store.
//!
//! Executed once at connection startup. Future migrations will be gated on
//! `PRAGMA user_version`.

/// Full schema DDL; idempotent thanks to `CREATE TABLE IF NOT EXISTS`.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;
PRAGMA foreign_keys = ON;

CREATE TABLE IF NOT EXISTS habits (
    habit_id            TEXT PRIMARY KEY,
    owner_id            TEXT NOT NULL,
    name                TEXT NOT NULL,
    creation_date       TEXT NOT NULL,   -- YYYY-MM-DD; never updated
    last_completed_date TEXT,            -- YYYY-MM-DD or NULL
    streak_count        INTEGER NOT NULL DEFAULT 0 CHECK (streak_count >= 0)
);

-- Completion rows are append-only; they leave only with their habit.
CREATE TABLE IF NOT EXISTS activity_logs (
    log_id          TEXT PRIMARY KEY,
    habit_id        TEXT NOT NULL REFERENCES habits(habit_id) ON DELETE CASCADE,
    completion_date TEXT NOT NULL
);

CREATE INDEX IF NOT EXISTS habits_owner_idx ON habits(owner_id);
CREATE INDEX IF NOT EXISTS logs_habit_idx   ON activity_logs(habit_id);

PRAGMA user_version = 1;
";
