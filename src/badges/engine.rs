//! Pure progress reducer. Takes the current progress map and one round
//! result, applies every rule, and mutates the map in place. Persistence and
//! locking live in the service layer, not here.

use std::collections::HashMap;

use crate::session::models::RoundResult;

use super::models::{required_progress, BadgeProgress};
use super::rules::{BadgeRule, RuleKind};

pub fn apply_round(
    progress: &mut HashMap<String, BadgeProgress>,
    rules: &[BadgeRule],
    result: &RoundResult,
) {
    for rule in rules {
        let hit = (rule.predicate)(result);
        let entry = progress
            .entry(rule.badge_id.to_string())
            .or_insert_with(|| BadgeProgress::new(rule.badge_id));

        match rule.kind {
            RuleKind::Counter => {
                if hit && entry.current_progress < required_progress(rule.badge_id) {
                    entry.current_progress += 1;
                }
            }
            RuleKind::Streak => {
                if hit {
                    entry.streak += 1;
                } else {
                    entry.streak = 0;
                }
                // visible progress is the longest streak ever reached
                if entry.streak > entry.current_progress {
                    entry.current_progress = entry.streak;
                }
            }
            RuleKind::Bitmask => {
                if hit {
                    if let Some(continent) = result.actual_info.continent {
                        entry.missed_continents |= 1 << continent.bit();
                        entry.current_progress = entry.missed_continents.count_ones();
                    }
                }
            }
        }
    }
}
