//! [`ProgressSession`] — the progression engine for a single learner.
//!
//! Every mutation is two-phase: the in-memory snapshot is updated
//! synchronously, and the returned future performs the write-back against
//! the [`ProgressStore`] collaborator. The caller decides whether to spawn
//! or await that future; in-memory state never waits on it, and a second
//! mutation can be issued before the first write-back completes.
//!
//! Write-backs never fail from the caller's perspective: a store error is
//! logged and discarded, and the optimistic in-memory mutation stands. An
//! absent learner identity skips the write entirely.

use std::{collections::btree_map::Entry, future::Future, sync::Arc};

use chrono::{NaiveDate, Utc};
use tracing::{debug, warn};

use crate::{
  achievement::AchievementId,
  progress::{day_span, level_for_xp, LearnerProgress, TopicProgress},
  store::{AchievementUnlock, CompletedTopic, ProfilePatch, ProgressStore},
};

/// Holds one learner's [`LearnerProgress`] and its persistence collaborator.
///
/// Owned by the caller's session context; there is no ambient global
/// instance, so any number of learner sessions can run side by side.
pub struct ProgressSession<S> {
  progress: LearnerProgress,
  store:    Arc<S>,
}

impl<S: ProgressStore + 'static> ProgressSession<S> {
  /// A session with a fresh snapshot; call
  /// [`fetch_progress`](Self::fetch_progress) to hydrate it.
  pub fn new(store: S) -> Self {
    Self {
      progress: LearnerProgress::starting(Utc::now().date_naive()),
      store:    Arc::new(store),
    }
  }

  /// The current in-memory snapshot.
  pub fn progress(&self) -> &LearnerProgress {
    &self.progress
  }

  // ── Hydration ─────────────────────────────────────────────────────────────

  /// Replace in-memory state with the store's view of this learner.
  ///
  /// Best-effort: each of the three reads is applied independently, and a
  /// failed read keeps the prior values for that section. Never errors.
  pub async fn fetch_progress(&mut self) {
    let Some(learner) = self.store.current_learner().await else {
      debug!("no learner signed in, skipping hydration");
      return;
    };

    match self.store.read_profile(learner).await {
      Ok(Some(profile)) => {
        self.progress.xp = profile.xp;
        // The stored level column is ignored; the level stays derived even
        // against inconsistent remote data.
        self.progress.level = level_for_xp(profile.xp);
        self.progress.streak = profile.streak;
        self.progress.last_login_date = profile.last_login_date;
      }
      Ok(None) => {}
      Err(e) => warn!(error = %e, "profile read failed, keeping local values"),
    }

    match self.store.read_completed_topics(learner).await {
      Ok(topics) => {
        self.progress.completed_topics = topics
          .into_iter()
          .map(|t| {
            (t.topic_id, TopicProgress {
              score:        t.score,
              completed_at: t.completed_at,
            })
          })
          .collect();
      }
      Err(e) => {
        warn!(error = %e, "completed-topic read failed, keeping local values")
      }
    }

    match self.store.read_unlocked_achievements(learner).await {
      Ok(unlocks) => {
        self.progress.unlocked = unlocks
          .into_iter()
          .map(|u| (u.achievement_id, u.unlocked_at))
          .collect();
      }
      Err(e) => {
        warn!(error = %e, "achievement read failed, keeping local values")
      }
    }
  }

  // ── Mutations ─────────────────────────────────────────────────────────────

  /// Award `amount` XP and recompute the level.
  ///
  /// There is no separate level-up event; callers diff
  /// [`LearnerProgress::level`] before and after to detect one.
  pub fn add_xp(
    &mut self,
    amount: u64,
  ) -> impl Future<Output = ()> + Send + use<S> {
    self.progress.xp += amount;
    self.progress.level = level_for_xp(self.progress.xp);

    let patch = ProfilePatch {
      xp: Some(self.progress.xp),
      level: Some(self.progress.level),
      ..ProfilePatch::default()
    };
    let store = Arc::clone(&self.store);

    async move {
      let Some(learner) = store.current_learner().await else {
        debug!("no learner signed in, skipping xp write");
        return;
      };
      if let Err(e) = store.write_profile(learner, patch).await {
        warn!(error = %e, "xp write failed");
      }
    }
  }

  /// Record a topic completion. A score no higher than the stored one is a
  /// complete no-op: best score wins, and ties keep the existing record.
  pub fn complete_topic(
    &mut self,
    topic_id: &str,
    score: u32,
  ) -> impl Future<Output = ()> + Send + use<S> {
    let record = match self.progress.completed_topics.get(topic_id) {
      Some(existing) if existing.score >= score => None,
      _ => {
        let completed_at = Utc::now();
        self
          .progress
          .completed_topics
          .insert(topic_id.to_owned(), TopicProgress { score, completed_at });
        Some(CompletedTopic {
          topic_id: topic_id.to_owned(),
          score,
          completed_at,
        })
      }
    };
    let store = Arc::clone(&self.store);

    async move {
      let Some(topic) = record else { return };
      let Some(learner) = store.current_learner().await else {
        debug!("no learner signed in, skipping topic write");
        return;
      };
      if let Err(e) = store.upsert_completed_topic(learner, topic).await {
        warn!(error = %e, "topic write failed");
      }
    }
  }

  /// Unlock a catalog achievement. Idempotent: a second unlock leaves the
  /// original timestamp in place and issues no write.
  pub fn unlock_achievement(
    &mut self,
    id: AchievementId,
  ) -> impl Future<Output = ()> + Send + use<S> {
    let unlock = match self.progress.unlocked.entry(id) {
      Entry::Occupied(_) => None,
      Entry::Vacant(slot) => {
        let unlocked_at = Utc::now();
        slot.insert(unlocked_at);
        Some(AchievementUnlock { achievement_id: id, unlocked_at })
      }
    };
    let store = Arc::clone(&self.store);

    async move {
      let Some(unlock) = unlock else { return };
      let Some(learner) = store.current_learner().await else {
        debug!("no learner signed in, skipping unlock write");
        return;
      };
      if let Err(e) = store.upsert_achievement_unlock(learner, unlock).await {
        warn!(error = %e, "achievement write failed");
      }
    }
  }

  /// Evaluate streak continuity for `today` (callers pass the current
  /// calendar date, e.g. `Utc::now().date_naive()`).
  ///
  /// Same date: no-op. Exactly one day away: the streak extends. Anything
  /// further: the streak resets to 1. The distance comes from [`day_span`],
  /// with its rounding intact.
  pub fn check_streak(
    &mut self,
    today: NaiveDate,
  ) -> impl Future<Output = ()> + Send + use<S> {
    let patch = if self.progress.last_login_date == today {
      None
    } else {
      if day_span(self.progress.last_login_date, today) == 1 {
        self.progress.streak += 1;
      } else {
        self.progress.streak = 1;
      }
      self.progress.last_login_date = today;
      Some(ProfilePatch {
        streak: Some(self.progress.streak),
        last_login_date: Some(today),
        ..ProfilePatch::default()
      })
    };
    let store = Arc::clone(&self.store);

    async move {
      let Some(patch) = patch else { return };
      let Some(learner) = store.current_learner().await else {
        debug!("no learner signed in, skipping streak write");
        return;
      };
      if let Err(e) = store.write_profile(learner, patch).await {
        warn!(error = %e, "streak write failed");
      }
    }
  }
}
