//! Snapshot persistence for badge progress and per-map mastery sets.
//!
//! Reads degrade: an absent or corrupted snapshot yields zeroed defaults so a
//! bad write can never brick achievement tracking. Writes propagate errors.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use tracing::warn;

use crate::geo::LatLng;
use crate::storage::{PersistenceGateway, StorageError};

use super::models::{default_progress, BadgeProgress};

const PROGRESS_KEY: &str = "badges/progress";

fn mastery_key(map_id: &str) -> String {
    format!("badges/mastery/{map_id}")
}

pub struct BadgeStore {
    gateway: Arc<dyn PersistenceGateway>,
}

impl BadgeStore {
    pub fn new(gateway: Arc<dyn PersistenceGateway>) -> Self {
        Self { gateway }
    }

    /// Loads all badge progress, seeding zeroed entries for any badge the
    /// stored snapshot does not know about yet.
    pub async fn load_progress(&self) -> HashMap<String, BadgeProgress> {
        let mut progress = default_progress();

        let bytes = match self.gateway.get(PROGRESS_KEY).await {
            Ok(Some(bytes)) => bytes,
            Ok(None) => return progress,
            Err(err) => {
                warn!(%err, "failed to read badge progress, using defaults");
                return progress;
            }
        };

        match serde_json::from_slice::<Vec<BadgeProgress>>(&bytes) {
            Ok(stored) => {
                for entry in stored {
                    progress.insert(entry.badge_id.clone(), entry);
                }
            }
            Err(err) => {
                warn!(%err, "corrupted badge progress snapshot, using defaults");
            }
        }

        progress
    }

    /// Persists the full progress map as one replacement snapshot.
    pub async fn save_progress(
        &self,
        progress: &HashMap<String, BadgeProgress>,
    ) -> Result<(), StorageError> {
        let mut snapshot: Vec<&BadgeProgress> = progress.values().collect();
        snapshot.sort_by(|a, b| a.badge_id.cmp(&b.badge_id));
        let bytes = serde_json::to_vec(&snapshot)
            .map_err(|err| StorageError::Backend(err.to_string()))?;
        self.gateway.put(PROGRESS_KEY, bytes).await
    }

    /// The set of location keys already mastered on a curated map.
    pub async fn mastered_locations(&self, map_id: &str) -> HashSet<String> {
        let bytes = match self.gateway.get(&mastery_key(map_id)).await {
            Ok(Some(bytes)) => bytes,
            Ok(None) => return HashSet::new(),
            Err(err) => {
                warn!(%err, map_id, "failed to read mastery set");
                return HashSet::new();
            }
        };

        match serde_json::from_slice(&bytes) {
            Ok(set) => set,
            Err(err) => {
                warn!(%err, map_id, "corrupted mastery set, treating as empty");
                HashSet::new()
            }
        }
    }

    /// Records one mastered location and returns the updated set size.
    pub async fn record_mastered(
        &self,
        map_id: &str,
        location: LatLng,
    ) -> Result<usize, StorageError> {
        let mut mastered = self.mastered_locations(map_id).await;
        mastered.insert(location.storage_key());

        let mut snapshot: Vec<&String> = mastered.iter().collect();
        snapshot.sort();
        let bytes = serde_json::to_vec(&snapshot)
            .map_err(|err| StorageError::Backend(err.to_string()))?;
        self.gateway.put(&mastery_key(map_id), bytes).await?;
        Ok(mastered.len())
    }
}
