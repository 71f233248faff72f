//! Distance to shame-score and mockery-tier mapping. Pure, stateless.

mod roasts;

pub use roasts::{random_roast, roasts_for_tier};

use strum_macros::{Display, EnumIter};

/// Score for anything worse than 5000 km.
pub const MAX_SHAME_SCORE: u32 = 5001;

/// Converts a guess deviation to shame points.
///
/// Piecewise-linear across eight fixed distance bands; within a band the
/// score grows from the band's lower bound to its upper bound in proportion
/// to the distance covered, rounding half up.
pub fn shame_score(distance_meters: f64) -> u32 {
    let km = distance_meters / 1000.0;

    match km {
        // 0 to 500 m: 0-5 points
        d if d <= 0.5 => round(d / 0.5 * 5.0),
        // 500 m to 2 km: 6-20 points
        d if d <= 2.0 => 6 + round((d - 0.5) / 1.5 * 14.0),
        // 2 km to 25 km: 21-100 points
        d if d <= 25.0 => 21 + round((d - 2.0) / 23.0 * 79.0),
        // 25 km to 250 km: 101-500 points
        d if d <= 250.0 => 101 + round((d - 25.0) / 225.0 * 399.0),
        // 250 km to 500 km: 501-1000 points
        d if d <= 500.0 => 501 + round((d - 250.0) / 250.0 * 499.0),
        // 500 km to 1000 km: 1001-2000 points
        d if d <= 1000.0 => 1001 + round((d - 500.0) / 500.0 * 999.0),
        // 1000 km to 5000 km: 2001-5000 points
        d if d <= 5000.0 => 2001 + round((d - 1000.0) / 4000.0 * 2999.0),
        // beyond 5000 km: fixed sentinel
        _ => MAX_SHAME_SCORE,
    }
}

fn round(value: f64) -> u32 {
    value.round() as u32
}

/// Severity tiers for mockery lines, ordered from best to worst guess.
///
/// Shares its distance boundaries with the score bands but is an independent
/// lookup, not derived from the score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Display, EnumIter)]
pub enum ShameTier {
    SuspiciouslyGood,
    BareMinimum,
    Mediocre,
    VaguelyInTheArea,
    WrongZipCode,
    DrunkCompass,
    Columbus,
    FlatEarther,
}

impl ShameTier {
    pub fn for_distance(distance_meters: f64) -> Self {
        match distance_meters {
            d if d <= 500.0 => ShameTier::SuspiciouslyGood,
            d if d <= 2_000.0 => ShameTier::BareMinimum,
            d if d <= 25_000.0 => ShameTier::Mediocre,
            d if d <= 250_000.0 => ShameTier::VaguelyInTheArea,
            d if d <= 500_000.0 => ShameTier::WrongZipCode,
            d if d <= 1_000_000.0 => ShameTier::DrunkCompass,
            d if d <= 5_000_000.0 => ShameTier::Columbus,
            _ => ShameTier::FlatEarther,
        }
    }
}
