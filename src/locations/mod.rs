//! Target-location sources: line-oriented location files and the curated
//! ("recommended") map catalog.

pub mod curated;

pub use curated::{curated_map, curated_map_ids, locations_for_map, CuratedMap, CURATED_MAPS};

use crate::geo::LatLng;
use rand::seq::{IndexedRandom, SliceRandom};
use std::path::Path;
use tracing::warn;

/// Parses a `latitude,longitude` per line asset. Malformed lines (wrong
/// field count, unparsable numbers) are skipped, not fatal.
pub fn parse_locations(text: &str) -> Vec<LatLng> {
    text.lines()
        .filter_map(|line| {
            let mut parts = line.split(',');
            let lat = parts.next()?.trim().parse::<f64>().ok()?;
            let lng = parts.next()?.trim().parse::<f64>().ok()?;
            if parts.next().is_some() {
                return None;
            }
            Some(LatLng::new(lat, lng))
        })
        .collect()
}

/// A fixed pool of candidate target locations, loaded once.
#[derive(Debug, Clone, Default)]
pub struct LocationPool {
    locations: Vec<LatLng>,
}

impl LocationPool {
    pub fn from_text(text: &str) -> Self {
        Self {
            locations: parse_locations(text),
        }
    }

    /// Loads a pool from a location asset file. A missing or unreadable file
    /// yields an empty pool rather than an error.
    pub async fn from_file(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        match tokio::fs::read_to_string(path).await {
            Ok(text) => Self::from_text(&text),
            Err(err) => {
                warn!(path = %path.display(), %err, "failed to read location file");
                Self::default()
            }
        }
    }

    /// Picks up to `count` distinct random locations.
    pub fn sample(&self, count: usize) -> Vec<LatLng> {
        self.locations
            .choose_multiple(&mut rand::rng(), count)
            .copied()
            .collect()
    }

    pub fn len(&self) -> usize {
        self.locations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.locations.is_empty()
    }
}

/// Shuffles a list of targets into play order.
pub fn shuffled(mut locations: Vec<LatLng>) -> Vec<LatLng> {
    locations.shuffle(&mut rand::rng());
    locations
}
