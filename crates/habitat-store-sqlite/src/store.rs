//! [`SqliteStore`] — the SQLite implementation of [`HabitStore`].

use std::path::Path;

use rusqlite::OptionalExtension as _;
use uuid::Uuid;

use habitat_core::{
  habit::{ActivityLog, Habit, NewActivityLog, NewHabit},
  store::HabitStore,
};

use crate::{
  Error, Result,
  encode::{RawHabit, RawLog, encode_date, encode_streak, encode_uuid},
  schema::SCHEMA,
};

// ─── Store ───────────────────────────────────────────────────────────────────

/// A habit store backed by a single SQLite file.
///
/// Cloning is cheap; the inner connection is reference-counted.
#[derive(Clone)]
pub struct SqliteStore {
  conn: tokio_rusqlite::Connection,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let path = path.as_ref();
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let store = Self { conn };
    store.init_schema().await?;
    tracing::debug!(path = %path.display(), "opened habit store");
    Ok(store)
  }

  /// Open an in-memory store.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  async fn init_schema(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await?;
    Ok(())
  }
}

/// Parameters shared by every statement that writes a habit's mutable state.
struct HabitUpdate {
  habit_id:            String,
  name:                String,
  last_completed_date: Option<String>,
  streak_count:        i64,
}

impl HabitUpdate {
  const SQL: &'static str = "UPDATE habits
     SET name = ?2, last_completed_date = ?3, streak_count = ?4
     WHERE habit_id = ?1";

  fn new(habit: &Habit) -> Self {
    Self {
      habit_id:            encode_uuid(habit.habit_id),
      name:                habit.name.clone(),
      last_completed_date: habit.last_completed_date.map(encode_date),
      streak_count:        encode_streak(habit.streak_count),
    }
  }

  fn execute(&self, conn: &rusqlite::Connection) -> rusqlite::Result<usize> {
    conn.execute(
      Self::SQL,
      rusqlite::params![
        self.habit_id,
        self.name,
        self.last_completed_date,
        self.streak_count,
      ],
    )
  }
}

/// Parameters for inserting one `activity_logs` row.
struct LogInsert {
  log:             ActivityLog,
  log_id:          String,
  habit_id:        String,
  completion_date: String,
}

impl LogInsert {
  fn new(input: NewActivityLog) -> Self {
    let log = ActivityLog {
      log_id:          Uuid::new_v4(),
      habit_id:        input.habit_id,
      completion_date: input.completion_date,
    };
    Self {
      log_id:          encode_uuid(log.log_id),
      habit_id:        encode_uuid(log.habit_id),
      completion_date: encode_date(log.completion_date),
      log,
    }
  }

  fn execute(&self, conn: &rusqlite::Connection) -> rusqlite::Result<usize> {
    conn.execute(
      "INSERT INTO activity_logs (log_id, habit_id, completion_date)
       VALUES (?1, ?2, ?3)",
      rusqlite::params![self.log_id, self.habit_id, self.completion_date],
    )
  }
}

// ─── HabitStore impl ─────────────────────────────────────────────────────────

impl HabitStore for SqliteStore {
  type Error = Error;

  // ── Habits ────────────────────────────────────────────────────────────────

  async fn create_habit(&self, input: NewHabit) -> Result<Habit> {
    let habit = Habit {
      habit_id:            Uuid::new_v4(),
      owner_id:            input.owner_id,
      name:                input.name,
      creation_date:       input.creation_date,
      last_completed_date: None,
      streak_count:        0,
    };

    let id_str      = encode_uuid(habit.habit_id);
    let owner_str   = encode_uuid(habit.owner_id);
    let name        = habit.name.clone();
    let created_str = encode_date(habit.creation_date);

    self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO habits (habit_id, owner_id, name, creation_date, streak_count)
           VALUES (?1, ?2, ?3, ?4, 0)",
          rusqlite::params![id_str, owner_str, name, created_str],
        )?;
        Ok(())
      })
      .await?;

    Ok(habit)
  }

  async fn get_habit(&self, id: Uuid) -> Result<Option<Habit>> {
    let id_str = encode_uuid(id);
    let sql = format!("SELECT {} FROM habits WHERE habit_id = ?1", RawHabit::COLUMNS);

    let raw: Option<RawHabit> = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(&sql, rusqlite::params![id_str], RawHabit::from_row)
            .optional()?,
        )
      })
      .await?;

    raw.map(RawHabit::into_habit).transpose()
  }

  async fn list_habits(&self, owner_id: Uuid) -> Result<Vec<Habit>> {
    let owner_str = encode_uuid(owner_id);
    let sql = format!(
      "SELECT {} FROM habits WHERE owner_id = ?1 ORDER BY rowid",
      RawHabit::COLUMNS
    );

    let raws: Vec<RawHabit> = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(&sql)?;
        let rows = stmt
          .query_map(rusqlite::params![owner_str], RawHabit::from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawHabit::into_habit).collect()
  }

  async fn save_habit(&self, habit: &Habit) -> Result<()> {
    let update = HabitUpdate::new(habit);

    let changed = self
      .conn
      .call(move |conn| Ok(update.execute(conn)?))
      .await?;

    if changed == 0 {
      return Err(Error::HabitNotFound(habit.habit_id));
    }
    Ok(())
  }

  async fn delete_habit(&self, id: Uuid) -> Result<()> {
    let id_str = encode_uuid(id);

    // Logs go with it through `ON DELETE CASCADE`.
    let changed = self
      .conn
      .call(move |conn| {
        Ok(conn.execute(
          "DELETE FROM habits WHERE habit_id = ?1",
          rusqlite::params![id_str],
        )?)
      })
      .await?;

    if changed == 0 {
      return Err(Error::HabitNotFound(id));
    }
    Ok(())
  }

  // ── Activity logs ─────────────────────────────────────────────────────────

  async fn append_log(&self, input: NewActivityLog) -> Result<ActivityLog> {
    let insert = LogInsert::new(input);

    let insert = self
      .conn
      .call(move |conn| {
        insert.execute(conn)?;
        Ok(insert)
      })
      .await?;

    Ok(insert.log)
  }

  async fn list_logs(&self, habit_id: Uuid) -> Result<Vec<ActivityLog>> {
    let habit_str = encode_uuid(habit_id);

    let raws: Vec<RawLog> = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(
          "SELECT log_id, habit_id, completion_date
           FROM activity_logs
           WHERE habit_id = ?1
           ORDER BY rowid",
        )?;
        let rows = stmt
          .query_map(rusqlite::params![habit_str], RawLog::from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawLog::into_log).collect()
  }

  async fn record_completion(
    &self,
    habit: &Habit,
    log: NewActivityLog,
  ) -> Result<ActivityLog> {
    let update = HabitUpdate::new(habit);
    let insert = LogInsert::new(log);

    // Both statements commit together or not at all.
    let (found, insert) = self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;
        if update.execute(&tx)? == 0 {
          return Ok((false, insert));
        }
        insert.execute(&tx)?;
        tx.commit()?;
        Ok((true, insert))
      })
      .await?;

    if !found {
      return Err(Error::HabitNotFound(habit.habit_id));
    }
    Ok(insert.log)
  }
}
