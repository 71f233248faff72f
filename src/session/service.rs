//! Single-player game controller, covering the standard, challenge and
//! curated-map modes. One task owns the session; observers follow along
//! through a watch channel.

use std::sync::Arc;

use tokio::sync::{mpsc, watch};
use tracing::{debug, error, info};

use crate::badges::BadgeService;
use crate::clock::{ClockEvent, RoundClock};
use crate::geo::{GeoLookup, LatLng};
use crate::locations::{locations_for_map, shuffled, LocationPool};

use super::models::{GameMode, GameRound, GameState, RoundResult, SessionConfig};

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SessionCommand {
    StartNewGame,
    SubmitGuess(LatLng),
    NextRound,
    RequestExit,
    ConfirmExit,
    CancelExit,
}

pub struct GameSession {
    mode: GameMode,
    config: SessionConfig,
    state: GameState,
    clock: RoundClock,
    clock_events: mpsc::UnboundedReceiver<ClockEvent>,
    pool: LocationPool,
    geo: Arc<dyn GeoLookup>,
    badges: Arc<BadgeService>,
    unlocked: Vec<String>,
    state_tx: watch::Sender<GameState>,
}

impl GameSession {
    pub fn new(
        mode: GameMode,
        config: SessionConfig,
        pool: LocationPool,
        geo: Arc<dyn GeoLookup>,
        badges: Arc<BadgeService>,
    ) -> Self {
        let (clock, clock_events) = RoundClock::new();
        let (state_tx, _) = watch::channel(GameState::default());
        Self {
            mode,
            config,
            state: GameState::default(),
            clock,
            clock_events,
            pool,
            geo,
            badges,
            unlocked: Vec::new(),
            state_tx,
        }
    }

    pub fn subscribe(&self) -> watch::Receiver<GameState> {
        self.state_tx.subscribe()
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Badges completed by this session's end-of-game batch.
    pub fn unlocked_badges(&self) -> &[String] {
        &self.unlocked
    }

    pub async fn handle(&mut self, command: SessionCommand) {
        match command {
            SessionCommand::StartNewGame => self.start_new_game().await,
            SessionCommand::SubmitGuess(guess) => self.submit_guess(guess).await,
            SessionCommand::NextRound => self.next_round().await,
            SessionCommand::RequestExit => self.request_exit(),
            SessionCommand::ConfirmExit => self.confirm_exit(),
            SessionCommand::CancelExit => self.cancel_exit(),
        }
    }

    /// Drains clock signals that arrived since the last command. The `run`
    /// driver does this continuously; direct-drive callers (tests, the demo
    /// binary) call it between commands.
    pub fn pump_clock(&mut self) {
        while let Ok(event) = self.clock_events.try_recv() {
            self.apply_clock_event(event);
        }
    }

    /// Owns the session until the command channel closes.
    pub async fn run(mut self, mut commands: mpsc::UnboundedReceiver<SessionCommand>) {
        enum Input {
            Command(Option<SessionCommand>),
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
                // the clock sender lives inside self, so this cannot close
                Input::Clock(None) => break,
            }
        }
    }

    async fn start_new_game(&mut self) {
        self.state = GameState {
            loading: true,
            ..GameState::default()
        };
        self.unlocked.clear();
        self.publish();

        let targets = self.pick_targets().await;
        if targets.is_empty() {
            // nothing left to play; stay non-terminal and round-less
            info!(mode = ?self.mode, "no targets available, not starting");
            self.state.loading = false;
            self.publish();
            return;
        }

        self.state.rounds = targets.into_iter().map(GameRound::new).collect();
        self.state.loading = false;
        self.state.current_round = 0;
        self.state.movement_allowed = true;
        self.state.remaining_ms = self.config.round_duration_ms;
        self.clock.start(self.config.round_duration_ms);
        debug!(rounds = self.state.rounds.len(), "game started");
        self.publish();
    }

    async fn pick_targets(&self) -> Vec<LatLng> {
        match &self.mode {
            GameMode::Curated { map_id } => {
                let mastered = self.badges.mastered_locations(map_id).await;
                let unplayed: Vec<LatLng> = locations_for_map(map_id)
                    .iter()
                    .filter(|target| !mastered.contains(&target.storage_key()))
                    .copied()
                    .collect();
                shuffled(unplayed)
            }
            GameMode::Standard | GameMode::Challenge => {
                self.pool.sample(self.config.rounds_per_game)
            }
        }
    }

    async fn submit_guess(&mut self, guess: LatLng) {
        if self.state.finished {
            return;
        }
        let Some(round) = self.state.rounds.get(self.state.current_round) else {
            return;
        };
        if round.result.is_some() {
            return;
        }
        let target = round.target;

        self.clock.pause();
        let time_taken_secs = self.clock.elapsed_ms() / 1_000;
        let result = RoundResult::evaluate(target, guess, time_taken_secs, self.geo.as_ref()).await;

        if let GameMode::Curated { map_id } = &self.mode {
            if let Err(err) = self.badges.process_curated_result(&result, map_id).await {
                error!(%err, map_id, "failed to record curated mastery");
            }
        }

        let round = &mut self.state.rounds[self.state.current_round];
        round.guess = Some(guess);
        round.result = Some(result);
        self.state.force_guess = false;
        self.state.remaining_ms = self.clock.remaining_ms();
        self.publish();
    }

    async fn next_round(&mut self) {
        let Some(round) = self.state.rounds.get(self.state.current_round) else {
            return;
        };
        if round.result.is_none() || self.state.finished {
            return;
        }

        if self.state.current_round + 1 < self.state.rounds.len() {
            self.state.current_round += 1;
            self.state.movement_allowed = true;
            self.state.force_guess = false;
            self.state.remaining_ms = self.config.round_duration_ms;
            self.clock.start(self.config.round_duration_ms);
            self.publish();
            return;
        }

        self.state.finished = true;
        let results: Vec<RoundResult> = self
            .state
            .rounds
            .iter()
            .filter_map(|r| r.result.clone())
            .collect();
        match self.badges.process_game_results(&results).await {
            Ok(newly_unlocked) => self.unlocked = newly_unlocked,
            Err(err) => error!(%err, "failed to persist game results"),
        }
        info!(
            rounds = results.len(),
            unlocked = self.unlocked.len(),
            "game over"
        );
        self.publish();
    }

    fn request_exit(&mut self) {
        if self.state.exit_prompt || self.state.finished {
            return;
        }
        self.state.exit_prompt = true;
        self.clock.pause();
        self.publish();
    }

    fn confirm_exit(&mut self) {
        if !self.state.exit_prompt {
            return;
        }
        // an abandoned game feeds nothing to the achievement engine
        self.clock.cancel();
        self.state.exit_prompt = false;
        self.state.finished = true;
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
            ClockEvent::Tick { remaining_ms } => {
                self.state.remaining_ms = remaining_ms;
            }
            ClockEvent::Expired => {
                self.state.remaining_ms = 0;
                if !self.state.finished && !self.current_round_done() {
                    self.state.force_guess = true;
                    self.state.movement_allowed = false;
                }
            }
        }
        self.publish();
    }

    fn current_round_done(&self) -> bool {
        self.state
            .current()
            .map(|round| round.result.is_some())
            .unwrap_or(true)
    }

    fn publish(&self) {
        let _ = self.state_tx.send(self.state.clone());
    }
}
