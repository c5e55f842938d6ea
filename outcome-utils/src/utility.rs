use rand::RngCore;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::convert::TryFrom;
use std::sync::Arc;

use crate::error::BuildError;
use crate::outcome::Outcome;
use crate::space::OutcomeSpace;
use crate::synthetic::SyntheticUtility;

/// Score used for issue values that utility function doesn't know.
pub const NEUTRAL_SCORE: f64 = 0.5;

/// Maps outcome to desirability score for one party.
///
/// Implementations are read-only after construction, so they can be shared
/// between negotiator and analysis code.
pub trait UtilityFunction: Send + Sync {
    /// Never fails. Issues or values unknown to the function contribute
    /// `NEUTRAL_SCORE`.
    fn utility(&self, outcome: &Outcome) -> f64;

    /// Preference score of single issue value in range [0, 1].
    fn value_score(&self, _issue: &str, _value: &str) -> f64 {
        NEUTRAL_SCORE
    }

    /// Outcome space this function is defined over, if it is known.
    fn outcome_space(&self) -> Option<&OutcomeSpace> {
        None
    }

    fn random_outcome(&self, rng: &mut dyn RngCore) -> Option<Outcome> {
        self.outcome_space().map(|space| space.random_outcome(rng))
    }
}

pub type SharedUtility = Arc<dyn UtilityFunction>;

/// Utility of offer in foreign representation. Anything that can't be
/// converted to `Outcome` gets neutral score.
pub fn utility_of_value(ufun: &dyn UtilityFunction, offer: &Value) -> f64 {
    match Outcome::try_from(offer) {
        Ok(outcome) => ufun.utility(&outcome),
        Err(e) => {
            log::debug!("Scoring malformed offer as neutral. {}", e);
            NEUTRAL_SCORE
        }
    }
}

/// Raw description of party preferences: issue weights and per-value evaluations.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Preferences {
    pub weights: BTreeMap<String, f64>,
    pub evaluations: BTreeMap<String, BTreeMap<String, f64>>,
}

impl Preferences {
    /// Min-max normalizes evaluations of each issue into [0, 1].
    /// Issues with all-equal evaluations are left untouched.
    pub fn normalized(mut self) -> Preferences {
        for values in self.evaluations.values_mut() {
            let min = values.values().cloned().fold(f64::INFINITY, f64::min);
            let max = values.values().cloned().fold(f64::NEG_INFINITY, f64::max);

            if max > min {
                for score in values.values_mut() {
                    *score = (*score - min) / (max - min);
                }
            }
        }
        self
    }
}

/// Additive-weighted utility function backed by lookup tables.
#[derive(Clone, Debug, PartialEq)]
pub struct TableUtility {
    weights: BTreeMap<String, f64>,
    scores: BTreeMap<String, BTreeMap<String, f64>>,
    space: Option<OutcomeSpace>,
}

#[derive(Default)]
pub struct TableUtilityBuilder {
    preferences: Preferences,
    space: Option<OutcomeSpace>,
}

impl TableUtilityBuilder {
    pub fn weight(mut self, issue: impl ToString, weight: f64) -> Self {
        self.preferences.weights.insert(issue.to_string(), weight);
        self
    }

    pub fn score(mut self, issue: impl ToString, value: impl ToString, score: f64) -> Self {
        self.preferences
            .evaluations
            .entry(issue.to_string())
            .or_default()
            .insert(value.to_string(), score);
        self
    }

    pub fn scores(mut self, issue: impl ToString, scores: &[(&str, f64)]) -> Self {
        let entry = self
            .preferences
            .evaluations
            .entry(issue.to_string())
            .or_default();
        for (value, score) in scores {
            entry.insert(value.to_string(), *score);
        }
        self
    }

    pub fn space(mut self, space: OutcomeSpace) -> Self {
        self.space = Some(space);
        self
    }

    pub fn build(self) -> Result<TableUtility, BuildError> {
        TableUtility::from_preferences(self.preferences, self.space)
    }
}

impl TableUtility {
    pub fn builder() -> TableUtilityBuilder {
        TableUtilityBuilder::default()
    }

    pub fn from_preferences(
        preferences: Preferences,
        space: Option<OutcomeSpace>,
    ) -> Result<TableUtility, BuildError> {
        if preferences.weights.is_empty() {
            return Err(BuildError::NoIssues);
        }

        for (issue, weight) in &preferences.weights {
            if !weight.is_finite() || *weight < 0.0 {
                return Err(BuildError::InvalidWeight {
                    issue: issue.clone(),
                    weight: *weight,
                });
            }
            if let Some(space) = &space {
                if space.issue(issue).is_none() {
                    return Err(BuildError::UnknownIssue(issue.clone()));
                }
            }
        }

        for (issue, values) in &preferences.evaluations {
            for (value, score) in values {
                if !(0.0..=1.0).contains(score) {
                    return Err(BuildError::ScoreOutOfRange {
                        issue: issue.clone(),
                        value: value.clone(),
                        score: *score,
                    });
                }
            }
        }

        Ok(TableUtility {
            weights: preferences.weights,
            scores: preferences.evaluations,
            space,
        })
    }

    pub fn weights(&self) -> &BTreeMap<String, f64> {
        &self.weights
    }

    pub fn preferences(&self) -> Preferences {
        Preferences {
            weights: self.weights.clone(),
            evaluations: self.scores.clone(),
        }
    }
}

impl UtilityFunction for TableUtility {
    fn utility(&self, outcome: &Outcome) -> f64 {
        self.weights
            .iter()
            .map(|(issue, weight)| {
                let score = outcome
                    .get(issue)
                    .map(|value| self.value_score(issue, value))
                    .unwrap_or(NEUTRAL_SCORE);
                weight * score
            })
            .sum()
    }

    fn value_score(&self, issue: &str, value: &str) -> f64 {
        self.scores
            .get(issue)
            .and_then(|values| values.get(value))
            .cloned()
            .unwrap_or(NEUTRAL_SCORE)
    }

    fn outcome_space(&self) -> Option<&OutcomeSpace> {
        self.space.as_ref()
    }
}

/// Selects utility function implementation.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum UtilityConfig {
    Table {
        preferences: Preferences,
        /// Min-max normalize raw evaluations before building.
        #[serde(default)]
        normalize: bool,
    },
    Synthetic {
        seed: u64,
    },
}

pub fn build_utility(
    config: UtilityConfig,
    space: Option<OutcomeSpace>,
) -> Result<SharedUtility, BuildError> {
    Ok(match config {
        UtilityConfig::Table {
            preferences,
            normalize,
        } => {
            let preferences = match normalize {
                true => preferences.normalized(),
                false => preferences,
            };
            Arc::new(TableUtility::from_preferences(preferences, space)?) as SharedUtility
        }
        UtilityConfig::Synthetic { seed } => {
            let space = space.ok_or(BuildError::MissingSpace)?;
            Arc::new(SyntheticUtility::generate(space, seed)?) as SharedUtility
        }
    })
}
