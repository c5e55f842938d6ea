use serde::Serialize;

use boa_negotiator_component::PartyUtilities;
use boa_outcome_utils::{Outcome, UtilityFunction};

use crate::record::{analyze_outcome, distance, OutcomeAnalysis};

/// Nash bargaining solution found in set of outcomes.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct NashSolution {
    /// `None` if no outcome in the set was individually rational.
    pub solution: Option<Outcome>,
    pub utilities: Option<PartyUtilities>,
    pub product: f64,
    /// Analysis of every outcome from the set, in the same order.
    pub analyses: Vec<OutcomeAnalysis>,
}

impl NashSolution {
    pub fn analysis_of(&self, outcome: &Outcome) -> Option<&OutcomeAnalysis> {
        self.analyses
            .iter()
            .find(|analysis| &analysis.outcome == outcome)
    }
}

/// Finds individually rational outcome maximizing product of utility gains
/// over reservation values. When several outcomes have the same product,
/// the first one is chosen.
pub fn find_nash_solution(
    outcomes: &[Outcome],
    first: Option<&dyn UtilityFunction>,
    second: Option<&dyn UtilityFunction>,
    first_reservation: f64,
    second_reservation: f64,
) -> NashSolution {
    let mut analyses = outcomes
        .iter()
        .map(|outcome| {
            analyze_outcome(outcome, first, second, first_reservation, second_reservation)
        })
        .collect::<Vec<_>>();

    let mut best: Option<usize> = None;
    for (idx, analysis) in analyses.iter().enumerate() {
        if !analysis.individually_rational {
            continue;
        }
        let better = best
            .map(|best| analysis.nash_product > analyses[best].nash_product)
            .unwrap_or(true);
        if better {
            best = Some(idx);
        }
    }

    let best = match best {
        Some(best) => best,
        None => {
            log::debug!(
                "None of {} outcomes is individually rational. No Nash solution.",
                outcomes.len()
            );
            return NashSolution {
                solution: None,
                utilities: None,
                product: 0.0,
                analyses,
            };
        }
    };

    let solution = analyses[best].outcome.clone();
    let utilities = analyses[best].utilities;
    let product = analyses[best].nash_product;

    for analysis in analyses.iter_mut() {
        analysis.is_nash_solution = analysis.outcome == solution;
        analysis.nash_distance = Some(match analysis.is_nash_solution {
            true => 0.0,
            false => distance(analysis.utilities, utilities),
        });
    }

    NashSolution {
        solution: Some(solution),
        utilities: Some(utilities),
        product,
        analyses,
    }
}
