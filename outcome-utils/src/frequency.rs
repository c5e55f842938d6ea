use serde::Serialize;
use std::collections::BTreeMap;

use crate::error::BuildError;
use crate::outcome::Outcome;
use crate::space::OutcomeSpace;
use crate::utility::{Preferences, TableUtility};

/// Default smoothing added to every estimated issue weight.
pub const DEFAULT_WEIGHT_SMOOTHING: f64 = 0.1;

/// Counts how often each issue value appeared in observed offers.
#[derive(Clone, Debug, Default, Serialize)]
pub struct IssueFrequencies {
    counts: BTreeMap<String, BTreeMap<String, u32>>,
    observations: u32,
}

/// Preferences inferred from value frequencies.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct FrequencyEstimate {
    pub relative_frequencies: BTreeMap<String, BTreeMap<String, f64>>,
    pub weights: BTreeMap<String, f64>,
    pub evaluations: BTreeMap<String, BTreeMap<String, f64>>,
}

impl IssueFrequencies {
    pub fn new() -> IssueFrequencies {
        IssueFrequencies::default()
    }

    pub fn observe(&mut self, outcome: &Outcome) {
        self.observations += 1;
        for (issue, value) in outcome.iter() {
            *self
                .counts
                .entry(issue.to_string())
                .or_default()
                .entry(value.to_string())
                .or_default() += 1;
        }
    }

    pub fn count(&self, issue: &str, value: &str) -> u32 {
        self.counts
            .get(issue)
            .and_then(|values| values.get(value))
            .cloned()
            .unwrap_or(0)
    }

    pub fn observations(&self) -> u32 {
        self.observations
    }

    /// Issues whose values vary less are assumed to matter more to the
    /// party making offers: weight is the variance of relative value
    /// frequencies plus `smoothing`, normalized over issues. Value evaluation
    /// is its frequency relative to the most frequent value of the issue.
    pub fn estimate(&self, space: &OutcomeSpace, smoothing: f64) -> FrequencyEstimate {
        let mut estimate = FrequencyEstimate::default();

        for issue in space.issues() {
            let relative = issue
                .values
                .iter()
                .map(|value| {
                    let frequency = match self.observations {
                        0 => 0.0,
                        n => self.count(&issue.name, value) as f64 / n as f64,
                    };
                    (value.clone(), frequency)
                })
                .collect::<BTreeMap<_, _>>();

            let mean = relative.values().sum::<f64>() / relative.len() as f64;
            let variance = relative
                .values()
                .map(|frequency| (frequency - mean).powi(2))
                .sum::<f64>()
                / relative.len() as f64;
            estimate
                .weights
                .insert(issue.name.clone(), variance + smoothing);

            let max = relative.values().cloned().fold(0.0, f64::max);
            let evaluations = relative
                .iter()
                .map(|(value, frequency)| {
                    let evaluation = if max > 0.0 { frequency / max } else { 0.0 };
                    (value.clone(), evaluation)
                })
                .collect();
            estimate
                .evaluations
                .insert(issue.name.clone(), evaluations);
            estimate
                .relative_frequencies
                .insert(issue.name.clone(), relative);
        }

        let total: f64 = estimate.weights.values().sum();
        if total > 0.0 {
            for weight in estimate.weights.values_mut() {
                *weight /= total;
            }
        }
        estimate
    }
}

impl FrequencyEstimate {
    pub fn into_utility(self, space: Option<OutcomeSpace>) -> Result<TableUtility, BuildError> {
        TableUtility::from_preferences(
            Preferences {
                weights: self.weights,
                evaluations: self.evaluations,
            },
            space,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::space::Issue;
    use crate::utility::UtilityFunction;

    fn holiday_space() -> OutcomeSpace {
        OutcomeSpace::new(vec![
            Issue::new("location", &["Antalya", "Barcelona", "Milan"]),
            Issue::new("duration", &["1 week", "2 weeks"]),
        ])
        .unwrap()
    }

    fn offer(location: &str, duration: &str) -> Outcome {
        Outcome::new()
            .with("location", location)
            .with("duration", duration)
    }

    #[test]
    fn test_counts() {
        let mut frequencies = IssueFrequencies::new();
        frequencies.observe(&offer("Milan", "2 weeks"));
        frequencies.observe(&offer("Milan", "1 week"));

        assert_eq!(frequencies.observations(), 2);
        assert_eq!(frequencies.count("location", "Milan"), 2);
        assert_eq!(frequencies.count("duration", "2 weeks"), 1);
        assert_eq!(frequencies.count("location", "Antalya"), 0);
    }

    #[test]
    fn test_stable_issue_gets_higher_weight() {
        let mut frequencies = IssueFrequencies::new();
        for duration in ["1 week", "2 weeks", "1 week", "2 weeks"] {
            frequencies.observe(&offer("Milan", duration));
        }

        let estimate = frequencies.estimate(&holiday_space(), DEFAULT_WEIGHT_SMOOTHING);
        assert!(estimate.weights["location"] > estimate.weights["duration"]);
        assert!((estimate.weights.values().sum::<f64>() - 1.0).abs() < 1e-9);
        assert_eq!(estimate.evaluations["location"]["Milan"], 1.0);
        assert_eq!(estimate.evaluations["location"]["Antalya"], 0.0);

        let ufun = estimate.into_utility(Some(holiday_space())).unwrap();
        assert!(ufun.utility(&offer("Milan", "1 week")) > ufun.utility(&offer("Antalya", "1 week")));
    }

    #[test]
    fn test_estimate_without_observations() {
        let estimate = IssueFrequencies::new().estimate(&holiday_space(), DEFAULT_WEIGHT_SMOOTHING);
        assert_eq!(estimate.weights["location"], 0.5);
        assert_eq!(estimate.evaluations["duration"]["1 week"], 0.0);
    }
}
