//! The static topic catalog — the curriculum units a learner can complete.
//!
//! Per-learner completion state is not stored here; it is a projection of
//! [`LearnerProgress`](crate::progress::LearnerProgress).

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::Error;

/// The subject a topic belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Subject {
  Math,
  Science,
}

impl Subject {
  pub fn as_str(self) -> &'static str {
    match self {
      Self::Math => "math",
      Self::Science => "science",
    }
  }
}

impl FromStr for Subject {
  type Err = Error;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s {
      "math" => Ok(Self::Math),
      "science" => Ok(Self::Science),
      other => Err(Error::UnknownSubject(other.to_owned())),
    }
  }
}

/// One curriculum unit.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct Topic {
  pub id:      &'static str,
  pub subject: Subject,
  pub title:   &'static str,
  pub summary: &'static str,
}

pub const TOPICS: [Topic; 8] = [
  Topic {
    id:      "m1",
    subject: Subject::Math,
    title:   "Ratios & Proportions",
    summary: "Understand relationships between numbers",
  },
  Topic {
    id:      "m2",
    subject: Subject::Math,
    title:   "Arithmetic Operations",
    summary: "Master addition, subtraction, multiplication, division",
  },
  Topic {
    id:      "m3",
    subject: Subject::Math,
    title:   "Fractions & Decimals",
    summary: "Working with parts of a whole",
  },
  Topic {
    id:      "m4",
    subject: Subject::Math,
    title:   "Geometry Basics",
    summary: "Points, lines, and angles",
  },
  Topic {
    id:      "s1",
    subject: Subject::Science,
    title:   "Matter & Atoms",
    summary: "The building blocks of the universe",
  },
  Topic {
    id:      "s2",
    subject: Subject::Science,
    title:   "Forces & Motion",
    summary: "How things move and interact",
  },
  Topic {
    id:      "s3",
    subject: Subject::Science,
    title:   "Energy Types",
    summary: "Kinetic, potential, and thermal energy",
  },
  Topic {
    id:      "s4",
    subject: Subject::Science,
    title:   "Cells & Life",
    summary: "The basic unit of life",
  },
];

/// Look up a topic by id. Returns `None` for ids outside the catalog.
pub fn topic(id: &str) -> Option<&'static Topic> {
  TOPICS.iter().find(|t| t.id == id)
}
