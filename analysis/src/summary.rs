use serde::Serialize;

use crate::session::{SessionAnalysis, SessionReport};

/// Aggregated results of many analyzed negotiations. Rates are computed
/// over negotiations which reached agreement.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct SessionsSummary {
    pub total_negotiations: usize,
    pub agreements: usize,
    pub nash_solutions: usize,
    pub pareto_optimal: usize,
    pub nash_and_pareto: usize,

    pub agreement_rate: f64,
    pub nash_solution_rate: f64,
    pub pareto_optimal_rate: f64,
    pub optimal_outcome_rate: f64,
    pub avg_social_welfare: f64,
    pub avg_negotiation_efficiency: f64,
    pub avg_pareto_efficiency: f64,
}

fn mean(reports: &[&SessionReport], value: impl Fn(&SessionReport) -> f64) -> f64 {
    match reports.len() {
        0 => 0.0,
        n => reports.iter().map(|report| value(*report)).sum::<f64>() / n as f64,
    }
}

impl SessionsSummary {
    pub fn from_analyses(analyses: &[SessionAnalysis]) -> SessionsSummary {
        let reports = analyses
            .iter()
            .filter_map(SessionAnalysis::report)
            .collect::<Vec<_>>();

        let total = analyses.len();
        let agreements = reports.len();
        let nash_solutions = reports.iter().filter(|r| r.is_nash_solution).count();
        let pareto_optimal = reports.iter().filter(|r| r.is_pareto_optimal).count();
        let nash_and_pareto = reports
            .iter()
            .filter(|r| r.is_nash_solution && r.is_pareto_optimal)
            .count();

        let rate = |count: usize, of: usize| match of {
            0 => 0.0,
            of => count as f64 / of as f64,
        };

        SessionsSummary {
            total_negotiations: total,
            agreements,
            nash_solutions,
            pareto_optimal,
            nash_and_pareto,
            agreement_rate: rate(agreements, total),
            nash_solution_rate: rate(nash_solutions, agreements),
            pareto_optimal_rate: rate(pareto_optimal, agreements),
            optimal_outcome_rate: rate(nash_and_pareto, agreements),
            avg_social_welfare: mean(&reports, |r| r.social_welfare),
            avg_negotiation_efficiency: mean(&reports, |r| r.negotiation_efficiency),
            avg_pareto_efficiency: mean(&reports, |r| r.pareto_efficiency),
        }
    }
}
