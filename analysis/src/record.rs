use serde::Serialize;

use boa_negotiator_component::PartyUtilities;
use boa_outcome_utils::{Outcome, UtilityFunction, NEUTRAL_SCORE};

/// Properties of single outcome computed for both negotiating parties.
///
/// `nash_distance`, `is_nash_solution` and `is_pareto_optimal` depend on
/// the whole set of outcomes the record was analyzed with, and are filled
/// by `find_nash_solution` and `mark_pareto_optimal`.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct OutcomeAnalysis {
    pub outcome: Outcome,
    pub utilities: PartyUtilities,
    /// Product of utility gains over reservation values, floored at 0.
    pub nash_product: f64,
    /// Sum of both utilities.
    pub pareto_efficiency: f64,
    /// Mean utility.
    pub social_welfare: f64,
    pub individually_rational: bool,
    /// Euclidean distance to Nash point in utility space. `None` if there
    /// was no Nash point in the set.
    pub nash_distance: Option<f64>,
    pub is_nash_solution: bool,
    pub is_pareto_optimal: bool,
}

/// Utility of outcome for party. Party without utility function is
/// indifferent to all outcomes.
pub fn party_utility(ufun: Option<&dyn UtilityFunction>, outcome: &Outcome) -> f64 {
    ufun.map(|ufun| ufun.utility(outcome))
        .unwrap_or(NEUTRAL_SCORE)
}

pub fn party_utilities(
    outcome: &Outcome,
    first: Option<&dyn UtilityFunction>,
    second: Option<&dyn UtilityFunction>,
) -> PartyUtilities {
    PartyUtilities {
        first: party_utility(first, outcome),
        second: party_utility(second, outcome),
    }
}

pub fn nash_product(utilities: PartyUtilities, first_reservation: f64, second_reservation: f64) -> f64 {
    (utilities.first - first_reservation).max(0.0) * (utilities.second - second_reservation).max(0.0)
}

pub fn analyze_outcome(
    outcome: &Outcome,
    first: Option<&dyn UtilityFunction>,
    second: Option<&dyn UtilityFunction>,
    first_reservation: f64,
    second_reservation: f64,
) -> OutcomeAnalysis {
    let utilities = party_utilities(outcome, first, second);
    let sum = utilities.first + utilities.second;

    OutcomeAnalysis {
        outcome: outcome.clone(),
        utilities,
        nash_product: nash_product(utilities, first_reservation, second_reservation),
        pareto_efficiency: sum,
        social_welfare: sum / 2.0,
        individually_rational: utilities.first >= first_reservation
            && utilities.second >= second_reservation,
        nash_distance: None,
        is_nash_solution: false,
        is_pareto_optimal: false,
    }
}

pub(crate) fn distance(a: PartyUtilities, b: PartyUtilities) -> f64 {
    (a.first - b.first).hypot(a.second - b.second)
}

#[cfg(test)]
mod tests {
    use super::*;
    use boa_outcome_utils::TableUtility;

    #[test]
    fn test_analyze_outcome() {
        let first = TableUtility::builder()
            .weight("venue", 1.0)
            .score("venue", "Hotel", 0.9)
            .build()
            .unwrap();
        let second = TableUtility::builder()
            .weight("venue", 1.0)
            .score("venue", "Hotel", 0.4)
            .build()
            .unwrap();
        let outcome = Outcome::new().with("venue", "Hotel");

        let analysis = analyze_outcome(&outcome, Some(&first), Some(&second), 0.5, 0.2);
        assert_eq!(analysis.utilities, PartyUtilities { first: 0.9, second: 0.4 });
        assert!((analysis.nash_product - 0.4 * 0.2).abs() < 1e-9);
        assert!((analysis.pareto_efficiency - 1.3).abs() < 1e-9);
        assert!((analysis.social_welfare - 0.65).abs() < 1e-9);
        assert!(analysis.individually_rational);
        assert_eq!(analysis.nash_distance, None);

        let analysis = analyze_outcome(&outcome, Some(&first), Some(&second), 0.5, 0.6);
        assert_eq!(analysis.nash_product, 0.0);
        assert!(!analysis.individually_rational);
    }

    #[test]
    fn test_missing_utility_function_is_neutral() {
        let outcome = Outcome::new().with("venue", "Hotel");
        let analysis = analyze_outcome(&outcome, None, None, 0.0, 0.0);
        assert_eq!(analysis.utilities, PartyUtilities { first: 0.5, second: 0.5 });
        assert_eq!(analysis.nash_product, 0.25);
    }

    #[test]
    fn test_nash_product_floored_per_party() {
        // Both gains negative would give positive product without flooring.
        let utilities = PartyUtilities { first: 0.1, second: 0.1 };
        assert_eq!(nash_product(utilities, 0.3, 0.3), 0.0);
    }
}
