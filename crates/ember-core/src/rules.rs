//! Achievement rules for finished quizzes.
//!
//! Pure functions over a progress snapshot. The caller records the quiz
//! outcome first (XP, topic completion, streak), then asks which catalog
//! achievements it earned and feeds those to
//! [`ProgressSession::unlock_achievement`](crate::session::ProgressSession::unlock_achievement).

use crate::{
  achievement::AchievementId,
  progress::LearnerProgress,
  topic::{self, Subject},
};

/// Completed Science topics required for [`AchievementId::SciencePro`].
const SCIENCE_PRO_TOPICS: usize = 3;

/// Streak length required for [`AchievementId::StreakMaster`].
const STREAK_MASTER_DAYS: u32 = 7;

/// The result of one finished quiz.
#[derive(Debug, Clone, Copy)]
pub struct QuizOutcome {
  pub subject:   Subject,
  pub score:     u32,
  /// The score a perfect run would reach.
  pub max_score: u32,
}

impl QuizOutcome {
  pub fn is_perfect(&self) -> bool {
    self.score >= self.max_score
  }
}

/// Which catalog achievements `quiz` earns against `progress`.
///
/// Evaluated after the completion is recorded, so the just-finished topic
/// counts toward [`AchievementId::SciencePro`]. Already-unlocked
/// achievements are never reported again.
pub fn earned_achievements(
  progress: &LearnerProgress,
  quiz: &QuizOutcome,
) -> Vec<AchievementId> {
  let mut earned = vec![AchievementId::FirstWin];

  if quiz.subject == Subject::Math && quiz.is_perfect() {
    earned.push(AchievementId::MathWhiz);
  }
  if science_completions(progress) >= SCIENCE_PRO_TOPICS {
    earned.push(AchievementId::SciencePro);
  }
  if progress.streak >= STREAK_MASTER_DAYS {
    earned.push(AchievementId::StreakMaster);
  }

  earned.retain(|id| !progress.unlocked.contains_key(id));
  earned
}

/// Completed topics that belong to the Science subject.
fn science_completions(progress: &LearnerProgress) -> usize {
  progress
    .completed_topics
    .keys()
    .filter_map(|id| topic::topic(id))
    .filter(|t| t.subject == Subject::Science)
    .count()
}
