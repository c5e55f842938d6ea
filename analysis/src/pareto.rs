use serde::Serialize;

use boa_negotiator_component::PartyUtilities;
use boa_outcome_utils::{Outcome, UtilityFunction};

use crate::record::{party_utilities, OutcomeAnalysis};

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ParetoPoint {
    pub outcome: Outcome,
    pub utilities: PartyUtilities,
}

/// `a` is at least as good as `b` for both parties and strictly better
/// for at least one.
pub fn dominates(a: PartyUtilities, b: PartyUtilities) -> bool {
    a.first >= b.first && a.second >= b.second && (a.first > b.first || a.second > b.second)
}

pub fn is_pareto_optimal<I>(point: PartyUtilities, others: I) -> bool
where
    I: IntoIterator<Item = PartyUtilities>,
{
    !others.into_iter().any(|other| dominates(other, point))
}

/// Outcomes not dominated by any other outcome in the set, sorted by utility
/// of the first party. Quadratic in size of the set.
pub fn find_pareto_frontier(
    outcomes: &[Outcome],
    first: Option<&dyn UtilityFunction>,
    second: Option<&dyn UtilityFunction>,
) -> Vec<ParetoPoint> {
    let points = outcomes
        .iter()
        .map(|outcome| ParetoPoint {
            outcome: outcome.clone(),
            utilities: party_utilities(outcome, first, second),
        })
        .collect::<Vec<_>>();

    let mut frontier = points
        .iter()
        .enumerate()
        .filter(|(idx, point)| {
            is_pareto_optimal(
                point.utilities,
                points
                    .iter()
                    .enumerate()
                    .filter(|(other, _)| other != idx)
                    .map(|(_, other)| other.utilities),
            )
        })
        .map(|(_, point)| point.clone())
        .collect::<Vec<_>>();

    frontier.sort_by(|a, b| a.utilities.first.total_cmp(&b.utilities.first));
    frontier
}

/// Sets `is_pareto_optimal` flag of analyses, which outcomes are on `frontier`.
pub fn mark_pareto_optimal(analyses: &mut [OutcomeAnalysis], frontier: &[ParetoPoint]) {
    for analysis in analyses.iter_mut() {
        analysis.is_pareto_optimal = frontier
            .iter()
            .any(|point| point.outcome == analysis.outcome);
    }
}
