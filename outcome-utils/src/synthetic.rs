use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::error::BuildError;
use crate::outcome::Outcome;
use crate::space::OutcomeSpace;
use crate::utility::{Preferences, TableUtility, UtilityFunction};

/// Randomly generated utility function over known outcome space. Useful
/// for tests and simulations, where real preferences don't matter.
/// The same seed always produces the same preferences.
#[derive(Clone, Debug)]
pub struct SyntheticUtility {
    seed: u64,
    table: TableUtility,
}

impl SyntheticUtility {
    pub fn generate(space: OutcomeSpace, seed: u64) -> Result<SyntheticUtility, BuildError> {
        if space.issues().is_empty() {
            return Err(BuildError::NoIssues);
        }

        let mut rng = StdRng::seed_from_u64(seed);
        let mut preferences = Preferences::default();

        // Small offset keeps every issue relevant.
        let raw = space
            .issues()
            .iter()
            .map(|issue| (issue.name.clone(), rng.gen::<f64>() + 0.05))
            .collect::<Vec<_>>();
        let total: f64 = raw.iter().map(|(_, weight)| weight).sum();

        for (issue, weight) in raw {
            preferences.weights.insert(issue, weight / total);
        }

        for issue in space.issues() {
            let scores = preferences
                .evaluations
                .entry(issue.name.clone())
                .or_default();
            for value in &issue.values {
                scores.insert(value.clone(), rng.gen_range(0.0..=1.0));
            }
        }

        Ok(SyntheticUtility {
            seed,
            table: TableUtility::from_preferences(preferences, Some(space))?,
        })
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn preferences(&self) -> Preferences {
        self.table.preferences()
    }
}

impl UtilityFunction for SyntheticUtility {
    fn utility(&self, outcome: &Outcome) -> f64 {
        self.table.utility(outcome)
    }

    fn value_score(&self, issue: &str, value: &str) -> f64 {
        self.table.value_score(issue, value)
    }

    fn outcome_space(&self) -> Option<&OutcomeSpace> {
        self.table.outcome_space()
    }
}
