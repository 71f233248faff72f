//! Shared fixtures for the integration tests.

use std::sync::Arc;

use async_trait::async_trait;

use geoshame::badges::BadgeService;
use geoshame::geo::{self, GeoLookup, LatLng, LocationInfo};
use geoshame::players::PlayerRepository;
use geoshame::storage::{InMemoryStore, PersistenceGateway};

/// Everything a game flow test needs, sharing one storage backend so state
/// written by one component is visible to the others.
pub struct TestSetup {
    pub gateway: Arc<InMemoryStore>,
    pub badges: Arc<BadgeService>,
    pub roster: Arc<PlayerRepository>,
    pub geo: Arc<TableGeoLookup>,
}

pub struct TestSetupBuilder {
    geo_entries: Vec<(LatLng, &'static str)>,
}

impl TestSetupBuilder {
    pub fn new() -> Self {
        Self {
            geo_entries: Vec::new(),
        }
    }

    /// Registers a coordinate as belonging to the given country, so the
    /// lookup can resolve it (and anything within 50 km of it).
    pub fn with_country(mut self, point: LatLng, country: &'static str) -> Self {
        self.geo_entries.push((point, country));
        self
    }

    pub fn build(self) -> TestSetup {
        let gateway = Arc::new(InMemoryStore::new());
        let dyn_gateway: Arc<dyn PersistenceGateway> = gateway.clone();
        let badges = Arc::new(BadgeService::new(dyn_gateway.clone()));
        let roster = Arc::new(PlayerRepository::new(dyn_gateway));
        TestSetup {
            gateway,
            badges,
            roster,
            geo: Arc::new(TableGeoLookup {
                entries: self.geo_entries,
            }),
        }
    }
}

/// Deterministic lookup backed by a fixed coordinate table. Points more than
/// 50 km from every entry resolve as unknown.
pub struct TableGeoLookup {
    entries: Vec<(LatLng, &'static str)>,
}

#[async_trait]
impl GeoLookup for TableGeoLookup {
    async fn resolve(&self, point: LatLng) -> LocationInfo {
        for (known, country) in &self.entries {
            if geo::distance_between(*known, point) < 50_000.0 {
                return LocationInfo::for_country(country);
            }
        }
        LocationInfo::unknown()
    }
}
