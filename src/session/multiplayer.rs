//! Pass-and-play turn scheduler. Every player guesses the same target each
//! round, in roster order; the clock runs only while someone is actually
//! guessing.

use std::sync::Arc;

use tokio::sync::{mpsc, watch};
use tracing::{debug, error, info, warn};

use crate::clock::{ClockEvent, RoundClock};
use crate::geo::{GeoLookup, LatLng};
use crate::locations::LocationPool;
use crate::players::{Player, PlayerRepository};

use super::models::{GamePhase, MultiplayerRound, MultiplayerState, RoundResult};

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MultiplayerCommand {
    StartNewGame,
    BeginTurn,
    SubmitGuess(LatLng),
    NextRound,
    RequestExit,
    ConfirmExit,
    CancelExit,
}

#[derive(Debug, Clone, Copy)]
pub struct MultiplayerConfig {
    pub round_duration_ms: u64,
    pub rounds_per_game: usize,
}

impl Default for MultiplayerConfig {
    fn default() -> Self {
        Self {
            round_duration_ms: 120_000,
            rounds_per_game: 3,
        }
    }
}

pub struct MultiplayerSession {
    players: Vec<Player>,
    config: MultiplayerConfig,
    state: MultiplayerState,
    clock: RoundClock,
    clock_events: mpsc::UnboundedReceiver<ClockEvent>,
    pool: LocationPool,
    geo: Arc<dyn GeoLookup>,
    roster: Arc<PlayerRepository>,
    state_tx: watch::Sender<MultiplayerState>,
}

impl MultiplayerSession {
    pub fn new(
        players: Vec<Player>,
        config: MultiplayerConfig,
        pool: LocationPool,
        geo: Arc<dyn GeoLookup>,
        roster: Arc<PlayerRepository>,
    ) -> Self {
        let (clock, clock_events) = RoundClock::new();
        let state = MultiplayerState::new(players.iter().map(|p| p.id).collect());
        let (state_tx, _) = watch::channel(state.clone());
        Self {
            players,
            config,
            state,
            clock,
            clock_events,
            pool,
            geo,
            roster,
            state_tx,
        }
    }

    pub fn subscribe(&self) -> watch::Receiver<MultiplayerState> {
        self.state_tx.subscribe()
    }

    pub fn state(&self) -> &MultiplayerState {
        &self.state
    }

    pub async fn handle(&mut self, command: MultiplayerCommand) {
        match command {
            MultiplayerCommand::StartNewGame => self.start_new_game(),
            MultiplayerCommand::BeginTurn => self.begin_turn(),
            MultiplayerCommand::SubmitGuess(guess) => self.submit_guess(guess).await,
            MultiplayerCommand::NextRound => self.next_round().await,
            MultiplayerCommand::RequestExit => self.request_exit(),
            MultiplayerCommand::ConfirmExit => self.confirm_exit(),
            MultiplayerCommand::CancelExit => self.cancel_exit(),
        }
    }

    /// Drains pending clock signals; see [`GameSession::pump_clock`].
    ///
    /// [`GameSession::pump_clock`]: super::service::GameSession::pump_clock
    pub fn pump_clock(&mut self) {
        while let Ok(event) = self.clock_events.try_recv() {
            self.apply_clock_event(event);
        }
    }

    /// Owns the session until the command channel closes.
    pub async fn run(mut self, mut commands: mpsc::UnboundedReceiver<MultiplayerCommand>) {
        enum Input {
            Command(Option<MultiplayerCommand>),
            Clock(Option<ClockEvent>),
        }

        loop {
            let input = tokio::select! {
                command = commands.recv() => Input::Command(command),
                event = self.clock_events.recv() => Input::Clock(event),
            };
            match input {
                Input::Command(Some(command)) => self.handle(command).await,
                Input::Command(None) => break,
                Input::Clock(Some(event)) => self.apply_clock_event(event),
                Input::Clock(None) => break,
            }
        }
    }

    /// Loads targets and announces the first player. The clock stays idle
    /// until the explicit begin-turn command.
    fn start_new_game(&mut self) {
        if self.state.phase != GamePhase::Loading || self.players.is_empty() {
            return;
        }
        let targets = self.pool.sample(self.config.rounds_per_game);
        if targets.is_empty() {
            warn!("no targets available, multiplayer game not starting");
            return;
        }

        self.state.rounds = targets.into_iter().map(MultiplayerRound::new).collect();
        self.state.current_round = 0;
        self.state.phase = GamePhase::GameStart;
        debug!(
            players = self.players.len(),
            rounds = self.state.rounds.len(),
            "multiplayer game ready"
        );
        self.publish();
    }

    fn begin_turn(&mut self) {
        let player_index = match self.state.phase {
            GamePhase::GameStart => 0,
            GamePhase::RoundTransition { next_player_index } => next_player_index,
            _ => return,
        };
        self.state.phase = GamePhase::Playing { player_index };
        self.state.remaining_ms = self.config.round_duration_ms;
        self.state.movement_allowed = true;
        self.state.force_guess = false;
        self.clock.start(self.config.round_duration_ms);
        self.publish();
    }

    async fn submit_guess(&mut self, guess: LatLng) {
        let GamePhase::Playing { player_index } = self.state.phase else {
            return;
        };
        let player_id = self.players[player_index].id;
        let Some(round) = self.state.rounds.get(self.state.current_round) else {
            return;
        };
        if round.results.contains_key(&player_id) {
            return;
        }
        let target = round.target;

        self.clock.pause();
        let time_taken_secs = self.clock.elapsed_ms() / 1_000;
        let result = RoundResult::evaluate(target, guess, time_taken_secs, self.geo.as_ref()).await;

        self.state.rounds[self.state.current_round]
            .results
            .insert(player_id, result);
        self.state.force_guess = false;
        self.clock.cancel();

        if player_index + 1 < self.players.len() {
            self.state.phase = GamePhase::RoundTransition {
                next_player_index: player_index + 1,
            };
        } else {
            self.state.phase = GamePhase::RoundResult;
        }
        self.publish();
    }

    async fn next_round(&mut self) {
        if self.state.phase != GamePhase::RoundResult {
            return;
        }

        if self.state.current_round + 1 < self.state.rounds.len() {
            self.state.current_round += 1;
            self.state.phase = GamePhase::RoundTransition {
                next_player_index: 0,
            };
            self.publish();
            return;
        }

        self.state.phase = GamePhase::GameOver;
        self.commit_totals().await;
        self.publish();
    }

    /// Sums each player's scores across all rounds into their lifetime total.
    async fn commit_totals(&self) {
        for player in &self.players {
            let total: u64 = self
                .state
                .rounds
                .iter()
                .filter_map(|round| round.results.get(&player.id))
                .map(|result| u64::from(result.shame_score))
                .sum();
            if let Err(err) = self.roster.add_score(player.id, total).await {
                error!(%err, player = %player.name, "failed to commit player total");
            }
        }
        info!(players = self.players.len(), "multiplayer totals committed");
    }

    fn request_exit(&mut self) {
        if self.state.exit_prompt || self.state.phase == GamePhase::GameOver {
            return;
        }
        self.state.exit_prompt = true;
        self.clock.pause();
        self.publish();
    }

    /// Abandons the session outright. Partial totals are never committed.
    fn confirm_exit(&mut self) {
        if !self.state.exit_prompt {
            return;
        }
        self.clock.cancel();
        self.state.exit_prompt = false;
        self.state.abandoned = true;
        self.state.phase = GamePhase::GameOver;
        self.publish();
    }

    fn cancel_exit(&mut self) {
        if !self.state.exit_prompt {
            return;
        }
        self.state.exit_prompt = false;
        self.clock.resume();
        self.publish();
    }

    pub(crate) fn apply_clock_event(&mut self, event: ClockEvent) {
        match event {
            ClockEvent::Tick { remaining_ms } => self.state.remaining_ms = remaining_ms,
            ClockEvent::Expired => {
                self.state.remaining_ms = 0;
                // the active player must now submit from where they stand
                if matches!(self.state.phase, GamePhase::Playing { .. }) {
                    self.state.force_guess = true;
                    self.state.movement_allowed = false;
                }
            }
        }
        self.publish();
    }

    fn publish(&self) {
        let _ = self.state_tx.send(self.state.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geo::NullGeoLookup;
    use crate::storage::InMemoryStore;

    fn roster() -> Arc<PlayerRepository> {
        Arc::new(PlayerRepository::new(Arc::new(InMemoryStore::new())))
    }

    async fn three_player_session(
        rounds_per_game: usize,
        roster: Arc<PlayerRepository>,
    ) -> MultiplayerSession {
        let players = vec![Player::new("Ana"), Player::new("Ben"), Player::new("Cleo")];
        for player in &players {
            roster.upsert(player.clone()).await.unwrap();
        }
        let pool = LocationPool::from_text("10.0,10.0\n20.0,20.0\n30.0,30.0");
        MultiplayerSession::new(
            players,
            MultiplayerConfig {
                round_duration_ms: 120_000,
                rounds_per_game,
            },
            pool,
            Arc::new(NullGeoLookup),
            roster,
        )
    }

    fn current_target(session: &MultiplayerSession) -> LatLng {
        session.state().rounds[session.state().current_round].target
    }

    #[tokio::test(start_paused = true)]
    async fn full_two_round_game_walks_every_phase() {
        let roster = roster();
        let mut session = three_player_session(2, Arc::clone(&roster)).await;
        assert_eq!(session.state().phase, GamePhase::Loading);

        session.handle(MultiplayerCommand::StartNewGame).await;
        assert_eq!(session.state().phase, GamePhase::GameStart);

        for round in 0..2 {
            for player_index in 0..3 {
                session.handle(MultiplayerCommand::BeginTurn).await;
                assert_eq!(session.state().phase, GamePhase::Playing { player_index });

                let target = current_target(&session);
                session.handle(MultiplayerCommand::SubmitGuess(target)).await;

                if player_index < 2 {
                    assert_eq!(
                        session.state().phase,
                        GamePhase::RoundTransition {
                            next_player_index: player_index + 1
                        }
                    );
                }
            }
            assert_eq!(session.state().phase, GamePhase::RoundResult);
            assert_eq!(session.state().rounds[round].results.len(), 3);

            session.handle(MultiplayerCommand::NextRound).await;
            if round == 0 {
                assert_eq!(
                    session.state().phase,
                    GamePhase::RoundTransition {
                        next_player_index: 0
                    }
                );
            }
        }

        assert_eq!(session.state().phase, GamePhase::GameOver);
        assert!(!session.state().abandoned);
    }

    #[tokio::test(start_paused = true)]
    async fn game_over_commits_summed_totals() {
        let roster = roster();
        let mut session = three_player_session(2, Arc::clone(&roster)).await;
        session.handle(MultiplayerCommand::StartNewGame).await;

        // everyone guesses the exact target except Ben, who is 600+ km off
        for _ in 0..2 {
            for player_index in 0..3 {
                session.handle(MultiplayerCommand::BeginTurn).await;
                let target = current_target(&session);
                let guess = if player_index == 1 {
                    LatLng::new(target.lat + 6.0, target.lng)
                } else {
                    target
                };
                session.handle(MultiplayerCommand::SubmitGuess(guess)).await;
            }
            session.handle(MultiplayerCommand::NextRound).await;
        }

        let players = roster.load_all().await;
        let ana = players.iter().find(|p| p.name == "Ana").unwrap();
        let ben = players.iter().find(|p| p.name == "Ben").unwrap();
        let cleo = players.iter().find(|p| p.name == "Cleo").unwrap();
        assert_eq!(ana.total_shame_score, 0);
        assert_eq!(cleo.total_shame_score, 0);
        assert!(ben.total_shame_score > 0);
    }

    #[tokio::test(start_paused = true)]
    async fn begin_turn_is_required_between_turns() {
        let roster = roster();
        let mut session = three_player_session(1, roster).await;
        session.handle(MultiplayerCommand::StartNewGame).await;

        // guessing before any turn started goes nowhere
        session
            .handle(MultiplayerCommand::SubmitGuess(LatLng::new(0.0, 0.0)))
            .await;
        assert_eq!(session.state().phase, GamePhase::GameStart);

        session.handle(MultiplayerCommand::BeginTurn).await;
        let target = current_target(&session);
        session.handle(MultiplayerCommand::SubmitGuess(target)).await;

        // second submit without a new turn is ignored
        session.handle(MultiplayerCommand::SubmitGuess(target)).await;
        assert_eq!(
            session.state().phase,
            GamePhase::RoundTransition {
                next_player_index: 1
            }
        );
        assert_eq!(session.state().rounds[0].results.len(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn expiry_forces_the_active_players_guess() {
        let roster = roster();
        let mut session = three_player_session(1, roster).await;
        session.handle(MultiplayerCommand::StartNewGame).await;

        session.handle(MultiplayerCommand::BeginTurn).await;
        assert!(session.state().movement_allowed);
        assert!(!session.state().force_guess);

        tokio::time::sleep(std::time::Duration::from_millis(120_100)).await;
        session.pump_clock();

        let state = session.state();
        assert!(state.force_guess);
        assert!(!state.movement_allowed);
        assert_eq!(state.remaining_ms, 0);

        // the forced submission clears the flag and scores the full duration
        let target = current_target(&session);
        session.handle(MultiplayerCommand::SubmitGuess(target)).await;
        let state = session.state();
        assert!(!state.force_guess);
        assert_eq!(
            state.phase,
            GamePhase::RoundTransition {
                next_player_index: 1
            }
        );
        let first_player = state.players[0];
        assert_eq!(
            state.rounds[0].results[&first_player].time_taken_secs,
            120
        );

        // the next turn starts unconstrained
        session.handle(MultiplayerCommand::BeginTurn).await;
        assert!(session.state().movement_allowed);
        assert!(!session.state().force_guess);
    }

    #[tokio::test(start_paused = true)]
    async fn abandoning_commits_nothing() {
        let roster = roster();
        let mut session = three_player_session(2, Arc::clone(&roster)).await;
        session.handle(MultiplayerCommand::StartNewGame).await;

        session.handle(MultiplayerCommand::BeginTurn).await;
        let target = current_target(&session);
        session.handle(MultiplayerCommand::SubmitGuess(target)).await;

        session.handle(MultiplayerCommand::RequestExit).await;
        assert!(session.state().exit_prompt);
        session.handle(MultiplayerCommand::ConfirmExit).await;

        assert_eq!(session.state().phase, GamePhase::GameOver);
        assert!(session.state().abandoned);
        for player in roster.load_all().await {
            assert_eq!(player.total_shame_score, 0);
        }
    }

    #[tokio::test(start_paused = true)]
    async fn exit_prompt_can_be_cancelled_mid_turn() {
        let roster = roster();
        let mut session = three_player_session(1, roster).await;
        session.handle(MultiplayerCommand::StartNewGame).await;
        session.handle(MultiplayerCommand::BeginTurn).await;

        tokio::time::sleep(std::time::Duration::from_millis(2_100)).await;
        session.pump_clock();
        let before = session.state().remaining_ms;

        session.handle(MultiplayerCommand::RequestExit).await;
        session.handle(MultiplayerCommand::CancelExit).await;
        assert!(!session.state().exit_prompt);
        assert_eq!(session.state().remaining_ms, before);
        assert!(matches!(session.state().phase, GamePhase::Playing { .. }));
    }
}
