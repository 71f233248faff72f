// Library crate for the location-guessing game core
// This file exposes the public API for integration tests

pub mod badges;
pub mod clock;
pub mod geo;
pub mod locations;
pub mod players;
pub mod scoring;
pub mod session;
pub mod stats;
pub mod storage;

// Re-export commonly used types for easier access in tests
pub use badges::{BadgeProgress, BadgeService, ALL_BADGES};
pub use clock::{ClockEvent, ClockState, RoundClock};
pub use geo::{Continent, GeoLookup, LatLng, LocationInfo, NullGeoLookup};
pub use locations::{LocationPool, CURATED_MAPS};
pub use players::{Player, PlayerRepository};
pub use scoring::{shame_score, ShameTier, MAX_SHAME_SCORE};
pub use session::{
    GameMode, GamePhase, GameSession, GameState, MultiplayerCommand, MultiplayerSession,
    RoundResult, SessionCommand, SessionConfig,
};
pub use stats::{GameStats, StatsStore};
pub use storage::{InMemoryStore, PersistenceGateway, StorageError};
