//! Mockery lines, grouped by severity tier.

use super::ShameTier;
use rand::seq::IndexedRandom;

pub fn roasts_for_tier(tier: ShameTier) -> &'static [&'static str] {
    match tier {
        ShameTier::SuspiciouslyGood => &[
            "That's… suspiciously good.",
            "You have to be cheating.",
            "This smells like a second map open on the side.",
            "Impressive… for once.",
            "Suspiciously smart for you.",
            "Okay Einstein, calm down.",
            "Ok, pop off.",
        ],
        ShameTier::BareMinimum => &[
            "Have you actually been to school?",
            "Barely counts as knowing where you are.",
            "Half a braincell moment.",
            "Congrats, you located the neighborhood.",
            "Congrats, you unlocked the bare minimum.",
            "That's giving lucky guess, not brainpower.",
            "You tried, I guess.",
            "Not you actually knowing stuff.",
        ],
        ShameTier::Mediocre => &[
            "Not tragic, but not giving genius either.",
            "You missed it like your morning alarm.",
            "Close… but not close enough to brag.",
            "You call that a guess? Cute.",
            "You aimed for smart and landed on mediocre.",
            "That's a B- at best.",
            "Close. Like emotionally, not factually.",
        ],
        ShameTier::VaguelyInTheArea => &[
            "This ain't it, chief.",
            "You're like… vaguely in the area.",
            "The confidence? Unreal. The accuracy? Not so much.",
            "You're giving GPS malfunction.",
            "Does this count as cultural ignorance?",
            "Girl, be serious.",
        ],
        ShameTier::WrongZipCode => &[
            "Wow, you know continents exist, I'll give you that.",
            "And you said that with confidence and everything.",
            "That's a long-distance relationship with reality.",
            "If being wrong burned calories, you'd be shredded.",
            "This is not the serve you thought it was.",
            "Did you even try?",
            "This guess should be illegal.",
        ],
        ShameTier::DrunkCompass => &[
            "Not you crossing country lines like it's nothing.",
            "Your compass is drunk.",
            "Okay, but you were confident too.",
            "Lowkey impressive how off you are.",
            "That's a long-distance relationship with the truth.",
            "Your internal compass is American-coded.",
            "You're treating borders like suggestions.",
            "This ain't geography, this is improv.",
        ],
        ShameTier::Columbus => &[
            "Are you American?",
            "Okay Columbus, wrong coast.",
            "Does this count as a hate crime?",
            "Pack it up, Dora the Explorer.",
            "Your sense of direction is in witness protection.",
            "Not you crossing borders like they're your territory.",
            "You're basically playing blindfolded.",
        ],
        ShameTier::FlatEarther => &[
            "Geography is just not your aesthetic.",
            "Wrong continent, chief.",
            "Pack it up, Marco Polo.",
            "You're basically speedrunning colonialism.",
            "That's a world tour, not a guess.",
        ],
    }
}

/// Picks a random mockery line matching the given deviation.
pub fn random_roast(distance_meters: f64) -> &'static str {
    let tier = ShameTier::for_distance(distance_meters);
    roasts_for_tier(tier)
        .choose(&mut rand::rng())
        .copied()
        .unwrap_or("I'm speechless.")
}
