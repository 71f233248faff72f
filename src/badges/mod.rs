//! Achievement engine: badge definitions, the rule table, the pure progress
//! reducer and the persistence-aware service on top.

use thiserror::Error;

use crate::storage::StorageError;

pub mod engine;
pub mod models;
pub mod repository;
pub mod rules;
pub mod service;

#[derive(Debug, Error)]
pub enum BadgeError {
    #[error(transparent)]
    Storage(#[from] StorageError),
}

pub use models::{definition, required_progress, BadgeDefinition, BadgeProgress, ALL_BADGES};
pub use repository::BadgeStore;
pub use service::{BadgeService, MASTERY_THRESHOLD_METERS};
