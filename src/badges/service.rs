//! Orchestrates badge evaluation against persistence.
//!
//! Standard and challenge games feed all rounds in one batch at game over;
//! curated maps additionally get per-round mastery feedback. A single async
//! mutex serializes every read-modify-write of the progress snapshot.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use tokio::sync::Mutex;
use tracing::{debug, info};

use crate::locations::curated_map;
use crate::session::models::RoundResult;
use crate::stats::StatsStore;
use crate::storage::PersistenceGateway;

use super::engine::apply_round;
use super::models::{required_progress, BadgeProgress};
use super::repository::BadgeStore;
use super::rules::{standard_rules, BadgeRule};
use super::BadgeError;

/// A guess at most this far off counts as mastering a curated location.
pub const MASTERY_THRESHOLD_METERS: f64 = 500.0;

pub struct BadgeService {
    rules: Vec<BadgeRule>,
    store: BadgeStore,
    stats: StatsStore,
    batch_lock: Mutex<()>,
}

impl BadgeService {
    pub fn new(gateway: Arc<dyn PersistenceGateway>) -> Self {
        Self {
            rules: standard_rules(),
            store: BadgeStore::new(Arc::clone(&gateway)),
            stats: StatsStore::new(gateway),
            batch_lock: Mutex::new(()),
        }
    }

    /// Folds a finished game's rounds into badge progress and lifetime stats,
    /// persisting one snapshot of each. Returns the ids of badges completed
    /// by this batch.
    pub async fn process_game_results(
        &self,
        results: &[RoundResult],
    ) -> Result<Vec<String>, BadgeError> {
        if results.is_empty() {
            return Ok(Vec::new());
        }

        let _guard = self.batch_lock.lock().await;

        let mut progress = self.store.load_progress().await;
        let already_complete = completed_ids(&progress);

        let mut stats = self.stats.load().await;
        for result in results {
            apply_round(&mut progress, &self.rules, result);
            stats.record(result);
        }

        self.store.save_progress(&progress).await?;
        self.stats.save(&stats).await?;

        let newly_complete: Vec<String> = completed_ids(&progress)
            .difference(&already_complete)
            .cloned()
            .collect();
        debug!(
            rounds = results.len(),
            unlocked = newly_complete.len(),
            "processed game results"
        );
        Ok(newly_complete)
    }

    /// Per-round mastery check for curated maps. An accurate enough guess is
    /// recorded against the map; completing the whole map unlocks its master
    /// badge. Returns true when that unlock happens.
    pub async fn process_curated_result(
        &self,
        result: &RoundResult,
        map_id: &str,
    ) -> Result<bool, BadgeError> {
        if result.distance_meters > MASTERY_THRESHOLD_METERS {
            return Ok(false);
        }
        let Some(map) = curated_map(map_id) else {
            return Ok(false);
        };

        let mastered_count = self.store.record_mastered(map_id, result.actual).await?;
        if map.locations.is_empty() || mastered_count < map.locations.len() {
            return Ok(false);
        }

        let _guard = self.batch_lock.lock().await;
        let mut progress = self.store.load_progress().await;
        let entry = progress
            .entry(map.master_badge.to_string())
            .or_insert_with(|| BadgeProgress::new(map.master_badge));
        // set directly; mastery unlocks are not incremental
        entry.current_progress = required_progress(map.master_badge);
        self.store.save_progress(&progress).await?;

        info!(map_id, badge = map.master_badge, "curated map mastered");
        Ok(true)
    }

    /// Current progress snapshot for display.
    pub async fn badge_progress(&self) -> HashMap<String, BadgeProgress> {
        self.store.load_progress().await
    }

    /// Location keys already mastered on a curated map.
    pub async fn mastered_locations(&self, map_id: &str) -> HashSet<String> {
        self.store.mastered_locations(map_id).await
    }
}

fn completed_ids(progress: &HashMap<String, BadgeProgress>) -> HashSet<String> {
    progress
        .values()
        .filter(|p| p.is_complete())
        .map(|p| p.badge_id.clone())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::badges::models::badge_ids::*;
    use crate::geo::{LatLng, LocationInfo};
    use crate::locations::locations_for_map;
    use crate::storage::InMemoryStore;
    use chrono::Utc;

    fn service() -> BadgeService {
        BadgeService::new(Arc::new(InMemoryStore::new()))
    }

    fn fast_round() -> RoundResult {
        RoundResult {
            distance_meters: 100.0,
            shame_score: 1,
            time_taken_secs: 10,
            actual: LatLng::new(10.0, 10.0),
            guess: LatLng::new(10.0, 10.0),
            actual_info: LocationInfo::unknown(),
            guess_info: LocationInfo::unknown(),
            completed_at: Utc::now(),
        }
    }

    fn curated_hit(target: LatLng) -> RoundResult {
        RoundResult {
            distance_meters: 0.0,
            shame_score: 0,
            time_taken_secs: 20,
            actual: target,
            guess: target,
            actual_info: LocationInfo::unknown(),
            guess_info: LocationInfo::unknown(),
            completed_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn batch_unlock_spans_multiple_games() {
        let service = service();

        let first = service
            .process_game_results(&[fast_round(), fast_round(), fast_round()])
            .await
            .unwrap();
        assert!(first.is_empty());

        let second = service
            .process_game_results(&[fast_round(), fast_round()])
            .await
            .unwrap();
        assert_eq!(second, vec![SMART_ASS.to_string()]);

        // already unlocked, must not report again
        let third = service.process_game_results(&[fast_round()]).await.unwrap();
        assert!(third.is_empty());

        let progress = service.badge_progress().await;
        assert_eq!(progress[SMART_ASS].current_progress, 5);
    }

    #[tokio::test]
    async fn empty_batch_is_a_no_op() {
        let service = service();
        assert!(service.process_game_results(&[]).await.unwrap().is_empty());
        let progress = service.badge_progress().await;
        assert!(progress.values().all(|p| p.current_progress == 0));
    }

    #[tokio::test]
    async fn mastering_every_location_unlocks_the_map_badge() {
        let service = service();
        let targets = locations_for_map("pop_culture_hotspots");

        for (i, target) in targets.iter().enumerate() {
            let unlocked = service
                .process_curated_result(&curated_hit(*target), "pop_culture_hotspots")
                .await
                .unwrap();
            assert_eq!(unlocked, i == targets.len() - 1);
        }

        let progress = service.badge_progress().await;
        assert_eq!(progress[POP_CULTURE_MASTER].current_progress, 1);
        assert!(progress[POP_CULTURE_MASTER].is_complete());

        // further qualifying guesses keep progress pinned at 1
        let again = service
            .process_curated_result(&curated_hit(targets[0]), "pop_culture_hotspots")
            .await
            .unwrap();
        assert!(again);
        assert_eq!(
            service.badge_progress().await[POP_CULTURE_MASTER].current_progress,
            1
        );
    }

    #[tokio::test]
    async fn inaccurate_curated_guess_records_nothing() {
        let service = service();
        let target = locations_for_map("tourist_traps")[0];
        let mut result = curated_hit(target);
        result.distance_meters = MASTERY_THRESHOLD_METERS + 1.0;

        let unlocked = service
            .process_curated_result(&result, "tourist_traps")
            .await
            .unwrap();
        assert!(!unlocked);
        assert!(service.mastered_locations("tourist_traps").await.is_empty());
    }

    #[tokio::test]
    async fn unknown_map_id_is_ignored() {
        let service = service();
        let unlocked = service
            .process_curated_result(&curated_hit(LatLng::new(0.0, 0.0)), "atlantis")
            .await
            .unwrap();
        assert!(!unlocked);
    }
}
