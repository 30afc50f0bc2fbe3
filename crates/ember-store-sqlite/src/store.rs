//! [`SqliteProgressStore`] — the SQLite implementation of [`ProgressStore`].

use std::path::Path;

use rusqlite::OptionalExtension as _;
use uuid::Uuid;

use ember_core::store::{
  AchievementUnlock, CompletedTopic, ProfilePatch, ProfileRecord,
  ProgressStore,
};

use crate::{
  encode::{
    encode_date, encode_dt, encode_uuid, RawCompletedTopic, RawProfile,
    RawUnlock,
  },
  schema::SCHEMA,
  Error, Result,
};

// ─── Store ───────────────────────────────────────────────────────────────────

/// A progress store backed by a single SQLite file.
///
/// Cloning is cheap — the inner connection is reference-counted. The learner
/// identity is fixed at construction: [`Self::with_learner`] models a
/// signed-in session, the plain constructors an anonymous one.
#[derive(Clone)]
pub struct SqliteProgressStore {
  conn:    tokio_rusqlite::Connection,
  learner: Option<Uuid>,
}

impl SqliteProgressStore {
  /// Open (or create) a store at `path` with no signed-in learner.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let store = Self { conn, learner: None };
    store.init_schema().await?;
    Ok(store)
  }

  /// Open an in-memory store — useful for testing.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self { conn, learner: None };
    store.init_schema().await?;
    Ok(store)
  }

  /// The same store with `learner` as the signed-in identity.
  pub fn with_learner(mut self, learner: Uuid) -> Self {
    self.learner = Some(learner);
    self
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

  /// Make sure a `profiles` row exists so child-table writes satisfy their
  /// foreign keys.
  fn ensure_profile(
    conn: &rusqlite::Connection,
    learner_id: &str,
  ) -> rusqlite::Result<()> {
    conn.execute(
      "INSERT INTO profiles (learner_id) VALUES (?1)
       ON CONFLICT (learner_id) DO NOTHING",
      rusqlite::params![learner_id],
    )?;
    Ok(())
  }
}

// ─── ProgressStore impl ──────────────────────────────────────────────────────

impl ProgressStore for SqliteProgressStore {
  type Error = Error;

  async fn current_learner(&self) -> Option<Uuid> {
    self.learner
  }

  // ── Reads ─────────────────────────────────────────────────────────────────

  async fn read_profile(&self, learner: Uuid) -> Result<Option<ProfileRecord>> {
    let id_str = encode_uuid(learner);

    let raw: Option<RawProfile> = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              "SELECT xp, level, streak, last_login_date
               FROM profiles WHERE learner_id = ?1",
              rusqlite::params![id_str],
              |row| {
                Ok(RawProfile {
                  xp:              row.get(0)?,
                  level:           row.get(1)?,
                  streak:          row.get(2)?,
                  last_login_date: row.get(3)?,
                })
              },
            )
            .optional()?,
        )
      })
      .await?;

    raw.map(RawProfile::into_profile).transpose()
  }

  async fn read_completed_topics(
    &self,
    learner: Uuid,
  ) -> Result<Vec<CompletedTopic>> {
    let id_str = encode_uuid(learner);

    let raws: Vec<RawCompletedTopic> = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(
          "SELECT topic_id, score, completed_at FROM completed_topics
           WHERE learner_id = ?1",
        )?;
        let rows = stmt
          .query_map(rusqlite::params![id_str], |row| {
            Ok(RawCompletedTopic {
              topic_id:     row.get(0)?,
              score:        row.get(1)?,
              completed_at: row.get(2)?,
            })
          })?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawCompletedTopic::into_topic).collect()
  }

  async fn read_unlocked_achievements(
    &self,
    learner: Uuid,
  ) -> Result<Vec<AchievementUnlock>> {
    let id_str = encode_uuid(learner);

    let raws: Vec<RawUnlock> = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(
          "SELECT achievement_id, unlocked_at FROM achievement_unlocks
           WHERE learner_id = ?1",
        )?;
        let rows = stmt
          .query_map(rusqlite::params![id_str], |row| {
            Ok(RawUnlock {
              achievement_id: row.get(0)?,
              unlocked_at:    row.get(1)?,
            })
          })?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawUnlock::into_unlock).collect()
  }

  // ── Keyed writes ──────────────────────────────────────────────────────────

  async fn write_profile(&self, learner: Uuid, patch: ProfilePatch) -> Result<()> {
    let id_str = encode_uuid(learner);
    let xp = patch.xp.map(|v| v as i64);
    let level = patch.level.map(i64::from);
    let streak = patch.streak.map(i64::from);
    let date = patch.last_login_date.map(encode_date);

    self
      .conn
      .call(move |conn| {
        SqliteProgressStore::ensure_profile(conn, &id_str)?;

        // Build the SET clause from the populated fields only. The key is
        // ?5, so the statement's parameter count stays at five no matter
        // which fields are present.
        let mut sets: Vec<&'static str> = vec![];
        if xp.is_some() {
          sets.push("xp = ?1");
        }
        if level.is_some() {
          sets.push("level = ?2");
        }
        if streak.is_some() {
          sets.push("streak = ?3");
        }
        if date.is_some() {
          sets.push("last_login_date = ?4");
        }
        if sets.is_empty() {
          return Ok(());
        }

        let sql = format!(
          "UPDATE profiles SET {} WHERE learner_id = ?5",
          sets.join(", ")
        );
        conn.execute(&sql, rusqlite::params![xp, level, streak, date, id_str])?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  async fn upsert_completed_topic(
    &self,
    learner: Uuid,
    topic: CompletedTopic,
  ) -> Result<()> {
    let id_str = encode_uuid(learner);
    let topic_id = topic.topic_id;
    let score = i64::from(topic.score);
    let at_str = encode_dt(topic.completed_at);

    self
      .conn
      .call(move |conn| {
        SqliteProgressStore::ensure_profile(conn, &id_str)?;
        conn.execute(
          "INSERT INTO completed_topics (learner_id, topic_id, score, completed_at)
           VALUES (?1, ?2, ?3, ?4)
           ON CONFLICT (learner_id, topic_id)
           DO UPDATE SET score = excluded.score, completed_at = excluded.completed_at",
          rusqlite::params![id_str, topic_id, score, at_str],
        )?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  async fn upsert_achievement_unlock(
    &self,
    learner: Uuid,
    unlock: AchievementUnlock,
  ) -> Result<()> {
    let id_str = encode_uuid(learner);
    let ach_str = unlock.achievement_id.as_str();
    let at_str = encode_dt(unlock.unlocked_at);

    self
      .conn
      .call(move |conn| {
        SqliteProgressStore::ensure_profile(conn, &id_str)?;
        // DO NOTHING rather than DO UPDATE: an existing unlock keeps its
        // original timestamp even if two sessions race.
        conn.execute(
          "INSERT INTO achievement_unlocks (learner_id, achievement_id, unlocked_at)
           VALUES (?1, ?2, ?3)
           ON CONFLICT (learner_id, achievement_id) DO NOTHING",
          rusqlite::params![id_str, ach_str, at_str],
        )?;
        Ok(())
      })
      .await?;
    Ok(())
  }
}
