//! The static achievement catalog.
//!
//! Catalog membership is fixed at compile time; only the per-learner unlock
//! timestamp varies, and it lives in
//! [`LearnerProgress`](crate::progress::LearnerProgress).

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::Error;

/// Identifier for one achievement in the fixed catalog.
///
/// An enum rather than a free-form string, so catalog membership is
/// statically checkable: an unknown id fails to parse and never reaches the
/// unlock path.
#[derive(
  Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum AchievementId {
  FirstWin,
  MathWhiz,
  SciencePro,
  StreakMaster,
}

impl AchievementId {
  pub const ALL: [Self; 4] =
    [Self::FirstWin, Self::MathWhiz, Self::SciencePro, Self::StreakMaster];

  /// The id string stored in the `achievement_id` column.
  /// Must match the `rename_all = "snake_case"` serde tags above.
  pub fn as_str(self) -> &'static str {
    match self {
      Self::FirstWin => "first_win",
      Self::MathWhiz => "math_whiz",
      Self::SciencePro => "science_pro",
      Self::StreakMaster => "streak_master",
    }
  }

  /// The catalog entry for this id.
  pub fn definition(self) -> &'static Achievement {
    &CATALOG[self as usize]
  }
}

impl fmt::Display for AchievementId {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

impl FromStr for AchievementId {
  type Err = Error;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s {
      "first_win" => Ok(Self::FirstWin),
      "math_whiz" => Ok(Self::MathWhiz),
      "science_pro" => Ok(Self::SciencePro),
      "streak_master" => Ok(Self::StreakMaster),
      other => Err(Error::UnknownAchievement(other.to_owned())),
    }
  }
}

/// One entry in the achievement catalog.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct Achievement {
  pub id:          AchievementId,
  pub title:       &'static str,
  pub description: &'static str,
  /// Icon name consumed by the UI layer.
  pub icon:        &'static str,
}

/// The full catalog, in [`AchievementId`] discriminant order.
pub const CATALOG: [Achievement; 4] = [
  Achievement {
    id:          AchievementId::FirstWin,
    title:       "First Victory",
    description: "Complete your first lesson",
    icon:        "Trophy",
  },
  Achievement {
    id:          AchievementId::MathWhiz,
    title:       "Math Whiz",
    description: "Score 100% on a Math quiz",
    icon:        "Calculator",
  },
  Achievement {
    id:          AchievementId::SciencePro,
    title:       "Science Pro",
    description: "Complete 3 Science topics",
    icon:        "Beaker",
  },
  Achievement {
    id:          AchievementId::StreakMaster,
    title:       "Streak Master",
    description: "Reach a 7-day streak",
    icon:        "Flame",
  },
];
