use boa_outcome_utils::frequency::DEFAULT_WEIGHT_SMOOTHING;
use boa_outcome_utils::{FrequencyEstimate, IssueFrequencies, Outcome, OutcomeSpace, Preferences};

/// Infers opponent preferences from offers it made.
pub fn analyze_opponent_offers(
    offers: &[Outcome],
    space: &OutcomeSpace,
    smoothing: Option<f64>,
) -> FrequencyEstimate {
    let mut frequencies = IssueFrequencies::new();
    for offer in offers {
        frequencies.observe(offer);
    }
    frequencies.estimate(space, smoothing.unwrap_or(DEFAULT_WEIGHT_SMOOTHING))
}

/// Mean absolute difference between estimated and actual issue weights.
/// Issues missing on either side count with weight 0.
pub fn weight_error(estimate: &FrequencyEstimate, actual: &Preferences) -> f64 {
    let issues = estimate
        .weights
        .keys()
        .chain(actual.weights.keys())
        .collect::<std::collections::BTreeSet<_>>();
    if issues.is_empty() {
        return 0.0;
    }

    let total = issues
        .iter()
        .map(|issue| {
            let estimated = estimate.weights.get(*issue).cloned().unwrap_or(0.0);
            let real = actual.weights.get(*issue).cloned().unwrap_or(0.0);
            (estimated - real).abs()
        })
        .sum::<f64>();
    total / issues.len() as f64
}
