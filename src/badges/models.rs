//! Static badge definitions and the per-badge progress record.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Static properties of a badge. Loaded once, shared read-only.
#[derive(Debug, Clone, Copy)]
pub struct BadgeDefinition {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub required_progress: u32,
}

pub mod badge_ids {
    pub const SMART_ASS: &str = "SMART_ASS";
    pub const CRITICAL_OVERTHINKER: &str = "CRITICAL_OVERTHINKER";
    pub const US_AMERICAN: &str = "US_AMERICAN";
    pub const FLAT_EARTHER: &str = "FLAT_EARTHER";
    pub const LOST_TOURIST: &str = "LOST_TOURIST";
    pub const NATIONAL_EMBARRASSMENT: &str = "NATIONAL_EMBARRASSMENT";
    pub const EUROCENTRIC_MUCH: &str = "EUROCENTRIC_MUCH";
    pub const CHRONICALLY_WRONG: &str = "CHRONICALLY_WRONG";
    pub const GEOGRAPHY_DROPOUT: &str = "GEOGRAPHY_DROPOUT";
    pub const CULTURAL_MENACE: &str = "CULTURAL_MENACE";
    pub const COLUMBUS: &str = "COLUMBUS";
    pub const GLOBAL_MENACE: &str = "GLOBAL_MENACE";
    pub const BARE_MINIMUM: &str = "BARE_MINIMUM";
    pub const LATITUDE_LOSER: &str = "LATITUDE_LOSER";
    pub const LONGITUDE_LOSER: &str = "LONGITUDE_LOSER";
    pub const CONTINENTAL_DRIFT: &str = "CONTINENTAL_DRIFT";
    pub const TOURIST_TRAPS_MASTER: &str = "TOURIST_TRAPS_MASTER";
    pub const POP_CULTURE_MASTER: &str = "POP_CULTURE_MASTER";
    pub const CANCELLED_DESTINATIONS_MASTER: &str = "CANCELLED_DESTINATIONS_MASTER";
    pub const CONSPIRACY_CORE_MASTER: &str = "CONSPIRACY_CORE_MASTER";
    pub const CONSISTENTLY_MID: &str = "CONSISTENTLY_MID";
}

use badge_ids::*;

pub const ALL_BADGES: &[BadgeDefinition] = &[
    BadgeDefinition {
        id: SMART_ASS,
        name: "Smart Ass",
        description: "You guessed 5 times in under 30 seconds. Speed isn't the same as accuracy, you know.",
        required_progress: 5,
    },
    BadgeDefinition {
        id: CRITICAL_OVERTHINKER,
        name: "Critical Overthinker",
        description: "You waited for the timer to run out 5 times. Commitment to indecision, impressive.",
        required_progress: 5,
    },
    BadgeDefinition {
        id: US_AMERICAN,
        name: "U.S. American",
        description: "Only a true American could land on the wrong continent 3 times. Your geography teacher is crying.",
        required_progress: 3,
    },
    BadgeDefinition {
        id: FLAT_EARTHER,
        name: "Flat Earther",
        description: "You picked the wrong hemisphere 3 rounds in a row. Science weeps.",
        required_progress: 3,
    },
    BadgeDefinition {
        id: LOST_TOURIST,
        name: "Lost Tourist",
        description: "You were 2-25 km off, 5 times. Close enough to smell it, still too far to matter.",
        required_progress: 5,
    },
    BadgeDefinition {
        id: NATIONAL_EMBARRASSMENT,
        name: "National Embarrassment",
        description: "You missed 3 German locations. Even your homeland wants nothing to do with you.",
        required_progress: 3,
    },
    BadgeDefinition {
        id: EUROCENTRIC_MUCH,
        name: "Eurocentric Much?",
        description: "You called 3 non-European places 'Europe.' Colonizer vibes.",
        required_progress: 3,
    },
    BadgeDefinition {
        id: CHRONICALLY_WRONG,
        name: "Chronically Wrong",
        description: "You stayed 100+ km off for 10 rounds in a row. A masterclass in consistent failure.",
        required_progress: 10,
    },
    BadgeDefinition {
        id: GEOGRAPHY_DROPOUT,
        name: "Geography Dropout",
        description: "You missed by over 100 km, 10 times. Graduation denied.",
        required_progress: 10,
    },
    BadgeDefinition {
        id: CULTURAL_MENACE,
        name: "Cultural Menace",
        description: "You messed up 3 of the 5 most famous countries. The audacity is impressive.",
        required_progress: 3,
    },
    BadgeDefinition {
        id: COLUMBUS,
        name: "Columbus",
        description: "You guessed 5 times between 1,000 and 5,000 km off. Boldly wrong, just like the original.",
        required_progress: 5,
    },
    BadgeDefinition {
        id: GLOBAL_MENACE,
        name: "Global Menace",
        description: "You got every continent wrong at least once. Congrats on uniting the world - in disappointment.",
        required_progress: 6,
    },
    BadgeDefinition {
        id: BARE_MINIMUM,
        name: "Bare Minimum",
        description: "You landed 5 guesses between 25 and 250 km. Congrats on achieving mediocrity.",
        required_progress: 5,
    },
    BadgeDefinition {
        id: LATITUDE_LOSER,
        name: "Latitude Loser",
        description: "You missed the latitude by 200+ km, 5 times. North? South? Still wrong.",
        required_progress: 5,
    },
    BadgeDefinition {
        id: LONGITUDE_LOSER,
        name: "Longitude Loser",
        description: "You missed the longitude by 200+ km, 5 times. East, west… who cares, right?",
        required_progress: 5,
    },
    BadgeDefinition {
        id: CONTINENTAL_DRIFT,
        name: "Continental Drift",
        description: "You guessed the wrong continent 3 times. Even tectonic plates drift with more accuracy.",
        required_progress: 3,
    },
    BadgeDefinition {
        id: TOURIST_TRAPS_MASTER,
        name: "Tourist Traps",
        description: "You actually nailed all the tourist traps. Congrats, you fell for all of them.",
        required_progress: 1,
    },
    BadgeDefinition {
        id: POP_CULTURE_MASTER,
        name: "Pop Culture Hotspots",
        description: "You got every pop culture location right. TV raised you well.",
        required_progress: 1,
    },
    BadgeDefinition {
        id: CANCELLED_DESTINATIONS_MASTER,
        name: "Cancelled Destinations",
        description: "You guessed every cancelled destination. Problematic, but consistent.",
        required_progress: 1,
    },
    BadgeDefinition {
        id: CONSPIRACY_CORE_MASTER,
        name: "Conspiracy Core",
        description: "You guessed every conspiracy hotspot. Put the tinfoil hat on already.",
        required_progress: 1,
    },
    BadgeDefinition {
        id: CONSISTENTLY_MID,
        name: "Consistently Mid",
        description: "You stayed between 50-100 km off for 5 rounds straight. Commitment to mediocrity.",
        required_progress: 5,
    },
];

pub fn definition(badge_id: &str) -> Option<&'static BadgeDefinition> {
    ALL_BADGES.iter().find(|def| def.id == badge_id)
}

/// Completion threshold for a badge; unknown ids unlock at 1.
pub fn required_progress(badge_id: &str) -> u32 {
    definition(badge_id).map(|def| def.required_progress).unwrap_or(1)
}

/// Mutable per-badge progress. A closed shape: only a counter, a running
/// streak length and a missed-continent bitmask are ever needed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BadgeProgress {
    pub badge_id: String,
    pub current_progress: u32,
    #[serde(default)]
    pub streak: u32,
    #[serde(default)]
    pub missed_continents: u8,
}

impl BadgeProgress {
    pub fn new(badge_id: &str) -> Self {
        Self {
            badge_id: badge_id.to_string(),
            current_progress: 0,
            streak: 0,
            missed_continents: 0,
        }
    }

    pub fn is_complete(&self) -> bool {
        self.current_progress >= required_progress(&self.badge_id)
    }
}

/// Zeroed progress for every known badge, the state before anything has been
/// persisted.
pub fn default_progress() -> HashMap<String, BadgeProgress> {
    ALL_BADGES
        .iter()
        .map(|def| (def.id.to_string(), BadgeProgress::new(def.id)))
        .collect()
}
