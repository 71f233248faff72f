//! Lifetime aggregate statistics, updated once per completed round.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::session::models::RoundResult;
use crate::storage::{PersistenceGateway, StorageError};

const STATS_KEY: &str = "stats/global";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GameStats {
    pub total_rounds: u64,
    pub total_distance_km: f64,
    pub best_distance_km: Option<f64>,
    pub worst_distance_km: Option<f64>,
    pub fast_guesses: u64,
    pub slow_guesses: u64,
    pub total_shame_score: u64,
}

impl GameStats {
    pub fn avg_distance_km(&self) -> f64 {
        if self.total_rounds > 0 {
            self.total_distance_km / self.total_rounds as f64
        } else {
            0.0
        }
    }

    /// Folds one round result into the aggregates.
    pub fn record(&mut self, result: &RoundResult) {
        let distance_km = result.distance_meters / 1_000.0;

        self.total_rounds += 1;
        self.total_distance_km += distance_km;
        self.total_shame_score += u64::from(result.shame_score);

        self.best_distance_km = Some(match self.best_distance_km {
            Some(best) => best.min(distance_km),
            None => distance_km,
        });
        self.worst_distance_km = Some(match self.worst_distance_km {
            Some(worst) => worst.max(distance_km),
            None => distance_km,
        });

        if result.time_taken_secs <= 30 {
            self.fast_guesses += 1;
        }
        if result.time_taken_secs >= 120 {
            self.slow_guesses += 1;
        }
    }
}

pub struct StatsStore {
    gateway: Arc<dyn PersistenceGateway>,
}

impl StatsStore {
    pub fn new(gateway: Arc<dyn PersistenceGateway>) -> Self {
        Self { gateway }
    }

    /// Loads the aggregates; absent or corrupted data reads as zeroes.
    pub async fn load(&self) -> GameStats {
        let bytes = match self.gateway.get(STATS_KEY).await {
            Ok(Some(bytes)) => bytes,
            Ok(None) => return GameStats::default(),
            Err(err) => {
                warn!(%err, "failed to read stats, starting from zero");
                return GameStats::default();
            }
        };

        match serde_json::from_slice(&bytes) {
            Ok(stats) => stats,
            Err(err) => {
                warn!(%err, "corrupted stats snapshot, starting from zero");
                GameStats::default()
            }
        }
    }

    pub async fn save(&self, stats: &GameStats) -> Result<(), StorageError> {
        let bytes =
            serde_json::to_vec(stats).map_err(|err| StorageError::Backend(err.to_string()))?;
        self.gateway.put(STATS_KEY, bytes).await
    }
}
