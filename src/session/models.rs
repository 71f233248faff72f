//! Round and game state records shared by the single-player and multiplayer
//! controllers.

use crate::geo::{self, GeoLookup, LatLng, LocationInfo};
use crate::scoring;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use uuid::Uuid;

/// Immutable outcome of one submitted guess.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoundResult {
    pub distance_meters: f64,
    pub shame_score: u32,
    pub time_taken_secs: u64,
    pub actual: LatLng,
    pub guess: LatLng,
    pub actual_info: LocationInfo,
    pub guess_info: LocationInfo,
    pub completed_at: DateTime<Utc>,
}

impl RoundResult {
    /// Scores a guess against its target and resolves both endpoints through
    /// the geo lookup.
    pub async fn evaluate(
        target: LatLng,
        guess: LatLng,
        time_taken_secs: u64,
        geo: &dyn GeoLookup,
    ) -> Self {
        let distance_meters = geo::distance_between(target, guess);
        Self {
            distance_meters,
            shame_score: scoring::shame_score(distance_meters),
            time_taken_secs,
            actual: target,
            guess,
            actual_info: geo.resolve(target).await,
            guess_info: geo.resolve(guess).await,
            completed_at: Utc::now(),
        }
    }
}

/// One round of a single-player game. Guess and result go from absent to
/// present exactly once.
#[derive(Debug, Clone)]
pub struct GameRound {
    pub target: LatLng,
    pub guess: Option<LatLng>,
    pub result: Option<RoundResult>,
}

impl GameRound {
    pub fn new(target: LatLng) -> Self {
        Self {
            target,
            guess: None,
            result: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameMode {
    Standard,
    Challenge,
    Curated { map_id: String },
}

impl GameMode {
    /// The bundled location file backing this mode's pool. Curated maps draw
    /// from the static catalog instead.
    pub fn asset_path(&self) -> Option<&'static str> {
        match self {
            GameMode::Standard => Some("assets/locations.txt"),
            GameMode::Challenge => Some("assets/challenge_locations.txt"),
            GameMode::Curated { .. } => None,
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct SessionConfig {
    pub round_duration_ms: u64,
    pub rounds_per_game: usize,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            round_duration_ms: 120_000,
            rounds_per_game: 5,
        }
    }
}

/// Live single-player state as published to observers.
#[derive(Debug, Clone, Default)]
pub struct GameState {
    pub loading: bool,
    pub rounds: Vec<GameRound>,
    pub current_round: usize,
    pub finished: bool,
    pub remaining_ms: u64,
    pub movement_allowed: bool,
    pub force_guess: bool,
    pub exit_prompt: bool,
}

impl GameState {
    pub fn current(&self) -> Option<&GameRound> {
        self.rounds.get(self.current_round)
    }

    /// Remaining time rendered as `MM:SS`.
    pub fn format_remaining(&self) -> String {
        let total_secs = self.remaining_ms / 1_000;
        format!("{:02}:{:02}", total_secs / 60, total_secs % 60)
    }
}

/// Multiplayer phase machine. Turn-taking rules key off the variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    Loading,
    GameStart,
    Playing { player_index: usize },
    RoundTransition { next_player_index: usize },
    RoundResult,
    GameOver,
}

/// One multiplayer round: a shared target, one result per player.
#[derive(Debug, Clone)]
pub struct MultiplayerRound {
    pub target: LatLng,
    pub results: HashMap<Uuid, RoundResult>,
}

impl MultiplayerRound {
    pub fn new(target: LatLng) -> Self {
        Self {
            target,
            results: HashMap::new(),
        }
    }
}

/// Live multiplayer state as published to observers.
#[derive(Debug, Clone)]
pub struct MultiplayerState {
    pub phase: GamePhase,
    pub players: Vec<Uuid>,
    pub rounds: Vec<MultiplayerRound>,
    pub current_round: usize,
    pub remaining_ms: u64,
    pub movement_allowed: bool,
    pub force_guess: bool,
    pub exit_prompt: bool,
    pub abandoned: bool,
}

impl MultiplayerState {
    pub fn new(players: Vec<Uuid>) -> Self {
        Self {
            phase: GamePhase::Loading,
            players,
            rounds: Vec::new(),
            current_round: 0,
            remaining_ms: 0,
            movement_allowed: false,
            force_guess: false,
            exit_prompt: false,
            abandoned: false,
        }
    }
}
