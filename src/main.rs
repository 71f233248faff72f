use std::sync::Arc;

use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use geoshame::badges::BadgeService;
use geoshame::locations::LocationPool;
use geoshame::scoring::random_roast;
use geoshame::session::{GameMode, GameSession, SessionCommand, SessionConfig};
use geoshame::storage::InMemoryStore;
use geoshame::{LatLng, NullGeoLookup};

/// Demo driver: plays one scripted standard game against the bundled
/// location list and prints the scored rounds.
#[tokio::main(flavor = "current_thread")]
async fn main() {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "geoshame=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("starting demo game");

    let gateway = Arc::new(InMemoryStore::new());
    let badges = Arc::new(BadgeService::new(gateway));
    let mode = GameMode::Standard;
    let pool = match mode.asset_path() {
        Some(path) => LocationPool::from_file(path).await,
        None => LocationPool::default(),
    };
    info!(locations = pool.len(), "location pool loaded");

    let mut session = GameSession::new(
        mode,
        SessionConfig::default(),
        pool,
        Arc::new(NullGeoLookup),
        Arc::clone(&badges),
    );

    session.handle(SessionCommand::StartNewGame).await;
    let rounds = session.state().rounds.len();

    for index in 0..rounds {
        let target = match session.state().current() {
            Some(round) => round.target,
            None => break,
        };
        // guess a fixed offset from the target so every tier shows up
        let offset = (index as f64 + 1.0) * 2.0;
        let guess = LatLng::new(target.lat + offset, target.lng - offset);

        session.handle(SessionCommand::SubmitGuess(guess)).await;
        if let Some(result) = session.state().current().and_then(|r| r.result.as_ref()) {
            println!(
                "round {}: {:.1} km off, {} shame - {}",
                index + 1,
                result.distance_meters / 1_000.0,
                result.shame_score,
                random_roast(result.distance_meters)
            );
        }
        session.handle(SessionCommand::NextRound).await;
    }

    println!("unlocked badges: {:?}", session.unlocked_badges());
}
