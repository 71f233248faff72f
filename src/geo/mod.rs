//! Coordinates, great-circle distance and the reverse-geocoding contract.

mod continents;

pub use continents::continent_for_country;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumIter, EnumString};

/// Mean earth radius in meters.
const EARTH_RADIUS_METERS: f64 = 6_371_000.0;

/// Countries whose landmarks everyone is expected to recognize.
pub const FAMOUS_COUNTRIES: &[&str] = &["US", "CN", "IN", "JP", "DE"];

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

impl LatLng {
    pub const fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// Stable string form used to key played/mastered-location sets.
    pub fn storage_key(&self) -> String {
        format!("{},{}", self.lat, self.lng)
    }
}

/// Haversine great-circle distance in meters.
pub fn distance_between(a: LatLng, b: LatLng) -> f64 {
    let lat_a = a.lat.to_radians();
    let lat_b = b.lat.to_radians();
    let d_lat = (b.lat - a.lat).to_radians();
    let d_lng = (b.lng - a.lng).to_radians();

    let h = (d_lat / 2.0).sin().powi(2) + lat_a.cos() * lat_b.cos() * (d_lng / 2.0).sin().powi(2);
    2.0 * EARTH_RADIUS_METERS * h.sqrt().asin()
}

/// The six continents tracked by the badge engine.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
)]
pub enum Continent {
    #[serde(rename = "EU")]
    #[strum(serialize = "EU")]
    Europe,
    #[serde(rename = "AS")]
    #[strum(serialize = "AS")]
    Asia,
    #[serde(rename = "AF")]
    #[strum(serialize = "AF")]
    Africa,
    #[serde(rename = "NA")]
    #[strum(serialize = "NA")]
    NorthAmerica,
    #[serde(rename = "SA")]
    #[strum(serialize = "SA")]
    SouthAmerica,
    #[serde(rename = "OC")]
    #[strum(serialize = "OC")]
    Oceania,
}

impl Continent {
    pub const COUNT: u32 = 6;

    /// Slot in the missed-continent bitmask.
    pub fn bit(self) -> u8 {
        match self {
            Continent::Europe => 0,
            Continent::Asia => 1,
            Continent::Africa => 2,
            Continent::NorthAmerica => 3,
            Continent::SouthAmerica => 4,
            Continent::Oceania => 5,
        }
    }
}

/// Best-effort output of a reverse-geocoding lookup. Either field may be
/// unknown; badge predicates treat unknown as non-matching.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocationInfo {
    pub country_code: Option<String>,
    pub continent: Option<Continent>,
}

impl LocationInfo {
    pub fn unknown() -> Self {
        Self {
            country_code: None,
            continent: None,
        }
    }

    /// Builds the info for a known country code, deriving the continent from
    /// the static table.
    pub fn for_country(code: &str) -> Self {
        Self {
            country_code: Some(code.to_string()),
            continent: continent_for_country(code),
        }
    }
}

/// Reverse-geocoding collaborator. Lookup failures degrade to an unknown
/// [`LocationInfo`] instead of raising.
#[async_trait]
pub trait GeoLookup: Send + Sync {
    async fn resolve(&self, point: LatLng) -> LocationInfo;
}

/// Lookup that never resolves anything. Used when no geocoder is wired in.
pub struct NullGeoLookup;

#[async_trait]
impl GeoLookup for NullGeoLookup {
    async fn resolve(&self, _point: LatLng) -> LocationInfo {
        LocationInfo::unknown()
    }
}
