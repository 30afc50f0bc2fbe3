//! Encoding and decoding helpers between Rust domain types and the plain-text
//! representations stored in SQLite columns.
//!
//! Timestamps are stored as RFC 3339 strings, calendar dates as
//! `YYYY-MM-DD`, UUIDs as hyphenated lowercase strings, and achievements by
//! their catalog id string.

use chrono::{DateTime, NaiveDate, Utc};
use ember_core::store::{AchievementUnlock, CompletedTopic, ProfileRecord};
use uuid::Uuid;

use crate::{Error, Result};

// ─── Uuid ────────────────────────────────────────────────────────────────────

pub fn encode_uuid(id: Uuid) -> String { id.hyphenated().to_string() }

// ─── Timestamps ──────────────────────────────────────────────────────────────

pub fn encode_dt(dt: DateTime<Utc>) -> String { dt.to_rfc3339() }

pub fn decode_dt(s: &str) -> Result<DateTime<Utc>> {
  DateTime::parse_from_rfc3339(s)
    .map(|dt| dt.with_timezone(&Utc))
    .map_err(|e| Error::DateParse(e.to_string()))
}

// ─── Calendar dates ──────────────────────────────────────────────────────────

pub fn encode_date(d: NaiveDate) -> String { d.format("%Y-%m-%d").to_string() }

pub fn decode_date(s: &str) -> Result<NaiveDate> {
  NaiveDate::parse_from_str(s, "%Y-%m-%d")
    .map_err(|e| Error::DateParse(e.to_string()))
}

// ─── Row types ───────────────────────────────────────────────────────────────

/// Raw values read directly from a `profiles` row.
pub struct RawProfile {
  pub xp:              i64,
  pub level:           i64,
  pub streak:          i64,
  pub last_login_date: String,
}

impl RawProfile {
  pub fn into_profile(self) -> Result<ProfileRecord> {
    Ok(ProfileRecord {
      xp:              u64::try_from(self.xp)?,
      level:           u32::try_from(self.level)?,
      streak:          u32::try_from(self.streak)?,
      last_login_date: decode_date(&self.last_login_date)?,
    })
  }
}

/// Raw values read directly from a `completed_topics` row.
pub struct RawCompletedTopic {
  pub topic_id:     String,
  pub score:        i64,
  pub completed_at: String,
}

impl RawCompletedTopic {
  pub fn into_topic(self) -> Result<CompletedTopic> {
    Ok(CompletedTopic {
      topic_id:     self.topic_id,
      score:        u32::try_from(self.score)?,
      completed_at: decode_dt(&self.completed_at)?,
    })
  }
}

/// Raw values read directly from an `achievement_unlocks` row.
pub struct RawUnlock {
  pub achievement_id: String,
  pub unlocked_at:    String,
}

impl RawUnlock {
  pub fn into_unlock(self) -> Result<AchievementUnlock> {
    Ok(AchievementUnlock {
      achievement_id: self.achievement_id.parse().map_err(Error::Core)?,
      unlocked_at:    decode_dt(&self.unlocked_at)?,
    })
  }
}
