//! The badge rule table. Every rule is a pure predicate over one round
//! result; how a hit mutates progress depends on the rule kind.

use crate::geo::{self, Continent, LatLng, FAMOUS_COUNTRIES};
use crate::session::models::RoundResult;

use super::models::badge_ids::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuleKind {
    /// Increment by one per qualifying round, capped at the threshold.
    Counter,
    /// Track consecutive qualifying rounds; progress is the longest streak.
    Streak,
    /// Set the missed continent's bit; progress is the population count.
    Bitmask,
}

pub struct BadgeRule {
    pub badge_id: &'static str,
    pub kind: RuleKind,
    pub predicate: fn(&RoundResult) -> bool,
}

/// All rules evaluated against every completed round, in a fixed order.
pub fn standard_rules() -> Vec<BadgeRule> {
    vec![
        rule(SMART_ASS, RuleKind::Counter, guessed_fast),
        rule(CRITICAL_OVERTHINKER, RuleKind::Counter, ran_down_the_clock),
        rule(LOST_TOURIST, RuleKind::Counter, missed_by_a_town),
        rule(BARE_MINIMUM, RuleKind::Counter, missed_by_a_region),
        rule(COLUMBUS, RuleKind::Counter, missed_by_an_ocean),
        rule(GEOGRAPHY_DROPOUT, RuleKind::Counter, far_off),
        rule(LATITUDE_LOSER, RuleKind::Counter, latitude_way_off),
        rule(LONGITUDE_LOSER, RuleKind::Counter, longitude_way_off),
        rule(CONTINENTAL_DRIFT, RuleKind::Counter, continent_mismatch),
        rule(US_AMERICAN, RuleKind::Counter, continent_mismatch),
        rule(NATIONAL_EMBARRASSMENT, RuleKind::Counter, missed_germany),
        rule(EUROCENTRIC_MUCH, RuleKind::Counter, defaulted_to_europe),
        rule(CULTURAL_MENACE, RuleKind::Counter, missed_famous_country),
        rule(CONSISTENTLY_MID, RuleKind::Streak, solidly_mid),
        rule(CHRONICALLY_WRONG, RuleKind::Streak, far_off),
        rule(FLAT_EARTHER, RuleKind::Streak, wrong_hemisphere),
        rule(GLOBAL_MENACE, RuleKind::Bitmask, continent_mismatch),
    ]
}

fn rule(badge_id: &'static str, kind: RuleKind, predicate: fn(&RoundResult) -> bool) -> BadgeRule {
    BadgeRule {
        badge_id,
        kind,
        predicate,
    }
}

fn guessed_fast(result: &RoundResult) -> bool {
    result.time_taken_secs <= 30
}

fn ran_down_the_clock(result: &RoundResult) -> bool {
    result.time_taken_secs >= 119
}

fn missed_by_a_town(result: &RoundResult) -> bool {
    (2_000.0..=25_000.0).contains(&result.distance_meters)
}

fn missed_by_a_region(result: &RoundResult) -> bool {
    (25_000.0..=250_000.0).contains(&result.distance_meters)
}

fn missed_by_an_ocean(result: &RoundResult) -> bool {
    (1_000_000.0..=5_000_000.0).contains(&result.distance_meters)
}

fn far_off(result: &RoundResult) -> bool {
    result.distance_meters > 100_000.0
}

fn solidly_mid(result: &RoundResult) -> bool {
    (50_000.0..=100_000.0).contains(&result.distance_meters)
}

/// North/south deviation alone, measured by moving only the latitude.
fn latitude_way_off(result: &RoundResult) -> bool {
    let lat_only = LatLng::new(result.guess.lat, result.actual.lng);
    geo::distance_between(result.actual, lat_only) > 200_000.0
}

/// East/west deviation alone, measured by moving only the longitude.
fn longitude_way_off(result: &RoundResult) -> bool {
    let lng_only = LatLng::new(result.actual.lat, result.guess.lng);
    geo::distance_between(result.actual, lng_only) > 200_000.0
}

fn wrong_hemisphere(result: &RoundResult) -> bool {
    result.actual.lat * result.guess.lat < 0.0
}

/// Unknown continents never count as a mismatch.
fn continent_mismatch(result: &RoundResult) -> bool {
    match (result.actual_info.continent, result.guess_info.continent) {
        (Some(actual), Some(guess)) => actual != guess,
        _ => false,
    }
}

fn missed_germany(result: &RoundResult) -> bool {
    country_mismatch(result, |actual| actual == "DE")
}

fn missed_famous_country(result: &RoundResult) -> bool {
    country_mismatch(result, |actual| FAMOUS_COUNTRIES.contains(&actual))
}

fn country_mismatch(result: &RoundResult, actual_matches: impl Fn(&str) -> bool) -> bool {
    match (
        result.actual_info.country_code.as_deref(),
        result.guess_info.country_code.as_deref(),
    ) {
        (Some(actual), Some(guess)) => actual_matches(actual) && actual != guess,
        _ => false,
    }
}

fn defaulted_to_europe(result: &RoundResult) -> bool {
    match (result.actual_info.continent, result.guess_info.continent) {
        (Some(actual), Some(Continent::Europe)) => actual != Continent::Europe,
        _ => false,
    }
}
