use rand::seq::SliceRandom;
use rand::Rng;

use boa_outcome_utils::{Issue, Outcome};

/// Domain used to make a move, when negotiator has no utility function
/// or its utility function doesn't know outcome space.
pub const FALLBACK_DOMAIN: &[(&str, &[&str])] = &[
    ("venue", &["Hotel", "Restaurant", "Club"]),
    ("food", &["Buffet", "Plated", "Cocktail"]),
    ("music", &["DJ", "Band", "Playlist"]),
    ("drinks", &["Premium", "Standard", "Basic"]),
];

pub fn fallback_issues() -> Vec<Issue> {
    FALLBACK_DOMAIN
        .iter()
        .map(|(name, values)| Issue::new(name, values))
        .collect()
}

pub fn fallback_outcome<R: Rng + ?Sized>(rng: &mut R) -> Outcome {
    FALLBACK_DOMAIN
        .iter()
        .filter_map(|(issue, values)| values.choose(rng).map(|value| (*issue, *value)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use boa_outcome_utils::OutcomeSpace;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_fallback_outcome_within_domain() {
        let space = OutcomeSpace::new(fallback_issues()).unwrap();
        assert_eq!(space.size(), 81);

        let mut rng = StdRng::seed_from_u64(4);
        for _ in 0..20 {
            let outcome = fallback_outcome(&mut rng);
            assert_eq!(outcome.len(), 4);
            assert!(space.contains(&outcome));
        }
    }
}
