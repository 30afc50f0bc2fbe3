//! SQL schema for the SQLite progress store.
//!
//! Executed once at connection startup. Future migrations will be gated on
//! the `user_version` number.

/// Full schema DDL; idempotent thanks to `CREATE TABLE IF NOT EXISTS`.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;
PRAGMA foreign_keys = ON;

-- One row per learner. Column defaults are the fresh-learner snapshot, so a
-- partial first write still leaves a fully-formed row.
CREATE TABLE IF NOT EXISTS profiles (
    learner_id      TEXT PRIMARY KEY,
    xp              INTEGER NOT NULL DEFAULT 0,
    level           INTEGER NOT NULL DEFAULT 1,
    streak          INTEGER NOT NULL DEFAULT 1,
    last_login_date TEXT    NOT NULL DEFAULT (date('now'))
);

-- Best-score records; at most one row per (learner, topic).
CREATE TABLE IF NOT EXISTS completed_topics (
    learner_id   TEXT NOT NULL REFERENCES profiles(learner_id),
    topic_id     TEXT NOT NULL,
    score        INTEGER NOT NULL,
    completed_at TEXT NOT NULL,
    PRIMARY KEY (learner_id, topic_id)
);

-- Unlock timestamps; at most one row per (learner, achievement).
-- Rows are never updated: the first unlock wins.
CREATE TABLE IF NOT EXISTS achievement_unlocks (
    learner_id     TEXT NOT NULL REFERENCES profiles(learner_id),
    achievement_id TEXT NOT NULL,
    unlocked_at    TEXT NOT NULL,
    PRIMARY KEY (learner_id, achievement_id)
);

PRAGMA user_version = 1;
";
