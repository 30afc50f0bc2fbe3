//! Core types and trait definitions for the Ember learner progression engine.
//!
//! This crate is deliberately free of database dependencies. It owns the
//! in-memory progress snapshot, the static achievement and topic catalogs,
//! and the `ProgressStore` collaborator abstraction; concrete backends live
//! in sibling crates.

pub mod achievement;
pub mod error;
pub mod progress;
pub mod rules;
pub mod session;
pub mod store;
pub mod topic;

pub use error::{Error, Result};
