//! Error types for `ember-core`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("unknown achievement id: {0:?}")]
  UnknownAchievement(String),

  #[error("unknown subject: {0:?}")]
  UnknownSubject(String),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
