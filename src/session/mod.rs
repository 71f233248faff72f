//! Game controllers: the single-player session (standard, challenge and
//! curated modes) and the pass-and-play multiplayer turn scheduler.

pub mod models;
pub mod multiplayer;
pub mod service;

pub use models::{
    GameMode, GamePhase, GameRound, GameState, MultiplayerRound, MultiplayerState, RoundResult,
    SessionConfig,
};
pub use multiplayer::{MultiplayerCommand, MultiplayerConfig, MultiplayerSession};
pub use service::{GameSession, SessionCommand};
