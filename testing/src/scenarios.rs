//! Reference domains with two parties of opposing preferences.
use std::collections::BTreeMap;

use boa_builtin_negotiators::fallback::fallback_issues;
use boa_outcome_utils::{
    build_utility, BuildError, Issue, OutcomeSpace, Preferences, SharedUtility, UtilityConfig,
};

/// Reservation values of holiday domain parties.
pub const HOLIDAY_RESERVATIONS: (f64, f64) = (0.5, 0.2);

fn preferences(weights: &[(&str, f64)], evaluations: &[(&str, &[(&str, f64)])]) -> Preferences {
    Preferences {
        weights: weights
            .iter()
            .map(|(issue, weight)| (issue.to_string(), *weight))
            .collect(),
        evaluations: evaluations
            .iter()
            .map(|(issue, scores)| {
                let scores = scores
                    .iter()
                    .map(|(value, score)| (value.to_string(), *score))
                    .collect::<BTreeMap<_, _>>();
                (issue.to_string(), scores)
            })
            .collect(),
    }
}

fn build(
    preferences: Preferences,
    normalize: bool,
    space: OutcomeSpace,
) -> Result<SharedUtility, BuildError> {
    build_utility(
        UtilityConfig::Table {
            preferences,
            normalize,
        },
        Some(space),
    )
}

/// Party planning: venue, food, music and drinks.
pub fn party_space() -> Result<OutcomeSpace, BuildError> {
    Ok(OutcomeSpace::new(fallback_issues())?)
}

/// Prefers classy party.
pub fn party_first_preferences() -> Preferences {
    preferences(
        &[("venue", 0.3), ("food", 0.25), ("music", 0.25), ("drinks", 0.2)],
        &[
            ("venue", &[("Hotel", 1.0), ("Restaurant", 0.7), ("Club", 0.4)]),
            ("food", &[("Buffet", 0.6), ("Plated", 1.0), ("Cocktail", 0.8)]),
            ("music", &[("DJ", 0.7), ("Band", 1.0), ("Playlist", 0.3)]),
            ("drinks", &[("Premium", 1.0), ("Standard", 0.6), ("Basic", 0.2)]),
        ],
    )
}

/// Prefers cheap club party.
pub fn party_second_preferences() -> Preferences {
    preferences(
        &[("venue", 0.4), ("food", 0.2), ("music", 0.3), ("drinks", 0.1)],
        &[
            ("venue", &[("Club", 1.0), ("Restaurant", 0.8), ("Hotel", 0.5)]),
            ("food", &[("Cocktail", 1.0), ("Buffet", 0.7), ("Plated", 0.6)]),
            ("music", &[("Playlist", 1.0), ("DJ", 0.8), ("Band", 0.4)]),
            ("drinks", &[("Basic", 1.0), ("Standard", 0.7), ("Premium", 0.3)]),
        ],
    )
}

pub fn party_utilities() -> Result<(SharedUtility, SharedUtility), BuildError> {
    Ok((
        build(party_first_preferences(), false, party_space()?)?,
        build(party_second_preferences(), false, party_space()?)?,
    ))
}

/// Holiday planning: location, duration and hotel quality.
pub fn holiday_space() -> Result<OutcomeSpace, BuildError> {
    Ok(OutcomeSpace::new(vec![
        Issue::new("location", &["Antalya", "Barcelona", "Milan"]),
        Issue::new("duration", &["1 week", "2 weeks"]),
        Issue::new("hotel_quality", &["Hostel", "3 star hotel", "5 star hotel"]),
    ])?)
}

/// Raw evaluations on 1-10 scale. Normalized when utility is built.
pub fn holiday_first_preferences() -> Preferences {
    preferences(
        &[("location", 0.5), ("duration", 0.2), ("hotel_quality", 0.3)],
        &[
            ("location", &[("Antalya", 4.0), ("Barcelona", 10.0), ("Milan", 2.0)]),
            ("duration", &[("1 week", 3.0), ("2 weeks", 10.0)]),
            (
                "hotel_quality",
                &[("Hostel", 10.0), ("3 star hotel", 2.0), ("5 star hotel", 3.0)],
            ),
        ],
    )
}

pub fn holiday_second_preferences() -> Preferences {
    preferences(
        &[("location", 0.5), ("duration", 0.4), ("hotel_quality", 0.1)],
        &[
            ("location", &[("Antalya", 3.0), ("Barcelona", 2.0), ("Milan", 10.0)]),
            ("duration", &[("1 week", 4.0), ("2 weeks", 10.0)]),
            (
                "hotel_quality",
                &[("Hostel", 3.0), ("3 star hotel", 3.0), ("5 star hotel", 10.0)],
            ),
        ],
    )
}

pub fn holiday_utilities() -> Result<(SharedUtility, SharedUtility), BuildError> {
    Ok((
        build(holiday_first_preferences(), true, holiday_space()?)?,
        build(holiday_second_preferences(), true, holiday_space()?)?,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use boa_outcome_utils::{Outcome, UtilityFunction};

    #[test]
    fn test_party_best_outcomes() {
        let (first, second) = party_utilities().unwrap();
        let classy = Outcome::new()
            .with("venue", "Hotel")
            .with("food", "Plated")
            .with("music", "Band")
            .with("drinks", "Premium");
        let cheap = Outcome::new()
            .with("venue", "Club")
            .with("food", "Cocktail")
            .with("music", "Playlist")
            .with("drinks", "Basic");

        assert!((first.utility(&classy) - 1.0).abs() < 1e-9);
        assert!((second.utility(&cheap) - 1.0).abs() < 1e-9);
        assert!(first.utility(&cheap) < 0.5);
        assert!(second.utility(&classy) < 0.5);
    }

    #[test]
    fn test_holiday_utilities_normalized() {
        let (first, second) = holiday_utilities().unwrap();
        let outcome = Outcome::new()
            .with("location", "Barcelona")
            .with("duration", "2 weeks")
            .with("hotel_quality", "Hostel");

        assert!((first.utility(&outcome) - 1.0).abs() < 1e-9);
        assert_eq!(second.value_score("location", "Barcelona"), 0.0);
        assert_eq!(second.value_score("hotel_quality", "Hostel"), 0.0);
        assert_eq!(holiday_space().unwrap().size(), 18);
    }
}
