//! The `ProgressStore` trait and the record types it exchanges.
//!
//! The trait is implemented by persistence backends (e.g.
//! `ember-store-sqlite`). The engine in [`crate::session`] depends on this
//! abstraction, not on any concrete backend.

use std::future::Future;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::achievement::AchievementId;

// ─── Records ─────────────────────────────────────────────────────────────────

/// Profile-row fields as stored by the backend.
///
/// `level` is carried for backend-side consumers (leaderboards, parent
/// dashboards); hydration recomputes it from `xp` and ignores this copy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileRecord {
  pub xp:              u64,
  pub level:           u32,
  pub streak:          u32,
  pub last_login_date: NaiveDate,
}

/// Partial profile write: only the populated fields are touched.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ProfilePatch {
  pub xp:              Option<u64>,
  pub level:           Option<u32>,
  pub streak:          Option<u32>,
  pub last_login_date: Option<NaiveDate>,
}

/// One (learner, topic) best-score row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompletedTopic {
  pub topic_id:     String,
  pub score:        u32,
  pub completed_at: DateTime<Utc>,
}

/// One (learner, achievement) unlock row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AchievementUnlock {
  pub achievement_id: AchievementId,
  pub unlocked_at:    DateTime<Utc>,
}

// ─── Trait ───────────────────────────────────────────────────────────────────

/// Abstraction over the remote progress store.
///
/// Writes are upserts keyed on (learner, topic) and (learner, achievement);
/// a backend must never produce a second row for the same key.
///
/// All methods return `Send` futures so the trait can be used in
/// multi-threaded async runtimes.
pub trait ProgressStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  /// The authenticated learner, if any. `None` is a valid state (anonymous
  /// or demo session) and gates every write.
  fn current_learner(&self) -> impl Future<Output = Option<Uuid>> + Send + '_;

  // ── Reads ─────────────────────────────────────────────────────────────

  /// Profile fields for `learner`, or `None` if no row exists yet.
  fn read_profile(
    &self,
    learner: Uuid,
  ) -> impl Future<Output = Result<Option<ProfileRecord>, Self::Error>> + Send + '_;

  fn read_completed_topics(
    &self,
    learner: Uuid,
  ) -> impl Future<Output = Result<Vec<CompletedTopic>, Self::Error>> + Send + '_;

  fn read_unlocked_achievements(
    &self,
    learner: Uuid,
  ) -> impl Future<Output = Result<Vec<AchievementUnlock>, Self::Error>> + Send + '_;

  // ── Keyed writes ──────────────────────────────────────────────────────

  /// Write the populated fields of `patch`, creating the profile row with
  /// default values if it does not exist.
  fn write_profile(
    &self,
    learner: Uuid,
    patch: ProfilePatch,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;

  /// Upsert keyed on (learner, `topic.topic_id`).
  fn upsert_completed_topic(
    &self,
    learner: Uuid,
    topic: CompletedTopic,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;

  /// Upsert keyed on (learner, `unlock.achievement_id`). An existing row
  /// keeps its `unlocked_at`; the first unlock wins.
  fn upsert_achievement_unlock(
    &self,
    learner: Uuid,
    unlock: AchievementUnlock,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;
}
