mod utils;

use tokio::sync::mpsc;

use geoshame::locations::{locations_for_map, LocationPool};
use geoshame::players::Player;
use geoshame::session::{
    GameMode, GamePhase, GameSession, MultiplayerCommand, MultiplayerConfig, MultiplayerSession,
    SessionCommand, SessionConfig,
};
use geoshame::stats::StatsStore;
use geoshame::LatLng;

use utils::TestSetupBuilder;

const BERLIN: LatLng = LatLng::new(52.52, 13.4);
const PARIS: LatLng = LatLng::new(48.8566, 2.3522);

#[tokio::test(start_paused = true)]
async fn standard_game_batches_badges_and_stats_at_game_over() {
    let setup = TestSetupBuilder::new()
        .with_country(BERLIN, "DE")
        .with_country(PARIS, "FR")
        .build();

    // five targets in and around Berlin; every guess lands on Paris
    let pool = LocationPool::from_text(
        "52.52,13.40\n52.53,13.41\n52.51,13.39\n52.52,13.42\n52.50,13.40",
    );
    let mut session = GameSession::new(
        GameMode::Standard,
        SessionConfig::default(),
        pool,
        setup.geo.clone(),
        setup.badges.clone(),
    );

    session.handle(SessionCommand::StartNewGame).await;
    assert_eq!(session.state().rounds.len(), 5);

    for round in 0..5 {
        session.handle(SessionCommand::SubmitGuess(PARIS)).await;

        if round == 1 {
            // nothing is persisted until the whole game is over
            let progress = setup.badges.badge_progress().await;
            assert!(progress.values().all(|p| p.current_progress == 0));
        }
        session.handle(SessionCommand::NextRound).await;
    }
    assert!(session.state().finished);

    let progress = setup.badges.badge_progress().await;
    assert_eq!(progress["SMART_ASS"].current_progress, 5);
    assert_eq!(progress["NATIONAL_EMBARRASSMENT"].current_progress, 3);
    assert_eq!(progress["CULTURAL_MENACE"].current_progress, 3);
    assert_eq!(progress["GEOGRAPHY_DROPOUT"].current_progress, 5);
    assert_eq!(progress["CHRONICALLY_WRONG"].current_progress, 5);
    // Berlin and Paris share a continent
    assert_eq!(progress["CONTINENTAL_DRIFT"].current_progress, 0);

    let unlocked = session.unlocked_badges();
    assert!(unlocked.contains(&"SMART_ASS".to_string()));
    assert!(unlocked.contains(&"NATIONAL_EMBARRASSMENT".to_string()));
    assert!(!unlocked.contains(&"GEOGRAPHY_DROPOUT".to_string()));

    let stats = StatsStore::new(setup.gateway.clone()).load().await;
    assert_eq!(stats.total_rounds, 5);
    assert_eq!(stats.fast_guesses, 5);
    assert_eq!(stats.slow_guesses, 0);
    assert!(stats.total_shame_score > 0);
}

#[tokio::test(start_paused = true)]
async fn multiplayer_run_driver_plays_to_game_over_and_commits_totals() {
    let setup = TestSetupBuilder::new().build();
    let players = vec![Player::new("Ana"), Player::new("Ben")];
    for player in &players {
        setup.roster.upsert(player.clone()).await.unwrap();
    }

    let pool = LocationPool::from_text("10.0,10.0");
    let session = MultiplayerSession::new(
        players.clone(),
        MultiplayerConfig {
            round_duration_ms: 120_000,
            rounds_per_game: 1,
        },
        pool,
        setup.geo.clone(),
        setup.roster.clone(),
    );
    let mut state_rx = session.subscribe();

    let (tx, rx) = mpsc::unbounded_channel();
    let driver = tokio::spawn(session.run(rx));

    // both players guess ten degrees of latitude off the only target
    let guess = LatLng::new(20.0, 10.0);
    for command in [
        MultiplayerCommand::StartNewGame,
        MultiplayerCommand::BeginTurn,
        MultiplayerCommand::SubmitGuess(guess),
        MultiplayerCommand::BeginTurn,
        MultiplayerCommand::SubmitGuess(guess),
        MultiplayerCommand::NextRound,
    ] {
        tx.send(command).unwrap();
    }
    drop(tx);
    driver.await.unwrap();

    let final_state = state_rx.borrow_and_update().clone();
    assert_eq!(final_state.phase, GamePhase::GameOver);
    assert!(!final_state.abandoned);
    assert_eq!(final_state.rounds[0].results.len(), 2);

    let roster = setup.roster.load_all().await;
    assert_eq!(roster.len(), 2);
    let expected = geoshame::shame_score(geoshame::geo::distance_between(
        LatLng::new(10.0, 10.0),
        guess,
    ));
    for player in roster {
        assert_eq!(player.total_shame_score, u64::from(expected));
        assert!(player.total_shame_score > 0);
    }
}

#[tokio::test(start_paused = true)]
async fn curated_mastery_carries_across_sessions() {
    let setup = TestSetupBuilder::new().build();
    let map_id = "cancelled_destinations";
    let total = locations_for_map(map_id).len();
    assert_eq!(total, 5);

    let mode = || GameMode::Curated {
        map_id: map_id.to_string(),
    };

    // first game: master the first three targets, miss the rest
    let mut first = GameSession::new(
        mode(),
        SessionConfig::default(),
        LocationPool::default(),
        setup.geo.clone(),
        setup.badges.clone(),
    );
    first.handle(SessionCommand::StartNewGame).await;
    assert_eq!(first.state().rounds.len(), 5);

    for round in 0..5 {
        let target = first.state().current().unwrap().target;
        let guess = if round < 3 {
            target
        } else {
            LatLng::new(target.lat + 1.0, target.lng)
        };
        first.handle(SessionCommand::SubmitGuess(guess)).await;
        first.handle(SessionCommand::NextRound).await;
    }
    assert!(first.state().finished);
    assert_eq!(setup.badges.mastered_locations(map_id).await.len(), 3);
    assert!(!setup.badges.badge_progress().await["CANCELLED_DESTINATIONS_MASTER"].is_complete());

    // second game only offers the two remaining targets
    let mut second = GameSession::new(
        mode(),
        SessionConfig::default(),
        LocationPool::default(),
        setup.geo.clone(),
        setup.badges.clone(),
    );
    second.handle(SessionCommand::StartNewGame).await;
    assert_eq!(second.state().rounds.len(), 2);

    for _ in 0..2 {
        let target = second.state().current().unwrap().target;
        second.handle(SessionCommand::SubmitGuess(target)).await;
        second.handle(SessionCommand::NextRound).await;
    }

    let progress = setup.badges.badge_progress().await;
    assert!(progress["CANCELLED_DESTINATIONS_MASTER"].is_complete());
    assert_eq!(setup.badges.mastered_locations(map_id).await.len(), total);

    // a third game has nothing left to offer
    let mut third = GameSession::new(
        mode(),
        SessionConfig::default(),
        LocationPool::default(),
        setup.geo.clone(),
        setup.badges.clone(),
    );
    third.handle(SessionCommand::StartNewGame).await;
    assert!(third.state().rounds.is_empty());
    assert!(!third.state().finished);
}

#[tokio::test(start_paused = true)]
async fn running_down_the_clock_counts_as_a_slow_guess() {
    let setup = TestSetupBuilder::new().build();
    let pool = LocationPool::from_text("10.0,10.0");
    let mut session = GameSession::new(
        GameMode::Standard,
        SessionConfig {
            round_duration_ms: 120_000,
            rounds_per_game: 1,
        },
        pool,
        setup.geo.clone(),
        setup.badges.clone(),
    );

    session.handle(SessionCommand::StartNewGame).await;
    tokio::time::sleep(std::time::Duration::from_millis(120_100)).await;
    session.pump_clock();
    assert!(session.state().force_guess);

    let target = session.state().current().unwrap().target;
    session.handle(SessionCommand::SubmitGuess(target)).await;
    let result = session.state().current().unwrap().result.clone().unwrap();
    assert_eq!(result.time_taken_secs, 120);

    session.handle(SessionCommand::NextRound).await;
    assert!(session.state().finished);

    let progress = setup.badges.badge_progress().await;
    assert_eq!(progress["CRITICAL_OVERTHINKER"].current_progress, 1);

    let stats = StatsStore::new(setup.gateway.clone()).load().await;
    assert_eq!(stats.slow_guesses, 1);
    assert_eq!(stats.fast_guesses, 0);
}
