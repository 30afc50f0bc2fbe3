//! The in-memory progress snapshot for a single learner.

use std::collections::BTreeMap;

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};

use crate::achievement::{Achievement, AchievementId, CATALOG};

const DAY_MS: i64 = 24 * 60 * 60 * 1000;

/// Best-score record for one completed topic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TopicProgress {
  pub score:        u32,
  pub completed_at: DateTime<Utc>,
}

/// One learner's progress snapshot, owned by the caller's session context.
///
/// `level` is always derived from `xp`; no code path writes it directly.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LearnerProgress {
  pub xp:               u64,
  pub level:            u32,
  pub streak:           u32,
  pub last_login_date:  NaiveDate,
  /// At most one entry per topic id; replaced only by a strictly higher
  /// score.
  pub completed_topics: BTreeMap<String, TopicProgress>,
  /// Unlock timestamps for catalog achievements. Once set, never
  /// overwritten.
  pub unlocked:         BTreeMap<AchievementId, DateTime<Utc>>,
}

impl LearnerProgress {
  /// A fresh snapshot for a learner first seen on `today`.
  pub fn starting(today: NaiveDate) -> Self {
    Self {
      xp:               0,
      level:            1,
      streak:           1,
      last_login_date:  today,
      completed_topics: BTreeMap::new(),
      unlocked:         BTreeMap::new(),
    }
  }

  pub fn unlocked_at(&self, id: AchievementId) -> Option<DateTime<Utc>> {
    self.unlocked.get(&id).copied()
  }

  /// The full catalog paired with this learner's unlock timestamps.
  pub fn achievements(
    &self,
  ) -> impl Iterator<Item = (&'static Achievement, Option<DateTime<Utc>>)> + '_
  {
    CATALOG.iter().map(|a| (a, self.unlocked_at(a.id)))
  }
}

/// The level a given XP total corresponds to: one tier per 1000 XP.
pub fn level_for_xp(xp: u64) -> u32 {
  (xp / 1000) as u32 + 1
}

/// Whole-day distance between two calendar dates: the ceiling of the
/// absolute millisecond delta between their UTC midnights.
///
/// Not a calendar-aware day count. Streak evaluation depends on the exact
/// rounding, including at daylight-saving boundaries.
pub fn day_span(from: NaiveDate, to: NaiveDate) -> i64 {
  let from_ms = from.and_time(NaiveTime::MIN).and_utc().timestamp_millis();
  let to_ms = to.and_time(NaiveTime::MIN).and_utc().timestamp_millis();
  ((to_ms - from_ms).abs() as u64).div_ceil(DAY_MS as u64) as i64
}
