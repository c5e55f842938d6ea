use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use boa_negotiator_component::{PartyUtilities, SessionResult};
use boa_outcome_utils::{Outcome, OutcomeSpace, UtilityFunction};

use crate::nash::find_nash_solution;
use crate::pareto::{find_pareto_frontier, mark_pareto_optimal};
use crate::quality::OutcomeQuality;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Outcome spaces up to this size are enumerated, bigger are sampled.
    pub enumeration_limit: u64,
    pub sample_size: usize,
    pub seed: Option<u64>,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        AnalysisConfig {
            enumeration_limit: 5000,
            sample_size: 1000,
            seed: None,
        }
    }
}

/// Negotiating party as seen by analysis.
#[derive(Clone, Copy)]
pub struct Party<'a> {
    pub ufun: Option<&'a dyn UtilityFunction>,
    pub reservation: f64,
}

impl<'a> Party<'a> {
    pub fn new(ufun: &'a dyn UtilityFunction, reservation: f64) -> Party<'a> {
        Party {
            ufun: Some(ufun),
            reservation,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum ComparisonSet {
    Enumerated,
    Sampled,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct SessionReport {
    pub final_offer: Outcome,
    pub final_utilities: PartyUtilities,
    pub is_nash_solution: bool,
    pub is_pareto_optimal: bool,
    pub nash_distance: Option<f64>,
    pub pareto_efficiency: f64,
    pub social_welfare: f64,
    pub nash_solution: Option<Outcome>,
    pub nash_utilities: Option<PartyUtilities>,
    pub pareto_frontier_size: usize,
    pub negotiation_efficiency: f64,
    pub quality: OutcomeQuality,
    pub comparison_set: ComparisonSet,
    pub comparison_size: usize,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub enum SessionAnalysis {
    /// Negotiation ended without agreement, so there is nothing to compare.
    NotApplicable,
    Analyzed(Box<SessionReport>),
}

impl SessionAnalysis {
    pub fn report(&self) -> Option<&SessionReport> {
        match self {
            SessionAnalysis::NotApplicable => None,
            SessionAnalysis::Analyzed(report) => Some(&**report),
        }
    }
}

/// Earlier agreement is more efficient. 0 if negotiation had no rounds.
pub fn negotiation_efficiency(final_round: u32, total_rounds: u32) -> f64 {
    match total_rounds {
        0 => 0.0,
        total => 1.0 - final_round as f64 / total as f64,
    }
}

/// Outcomes the agreement is compared against: whole space if it is small
/// enough, random sample otherwise. Always contains `final_offer`, and no
/// outcome is repeated.
pub fn comparison_set(
    space: &OutcomeSpace,
    final_offer: &Outcome,
    config: &AnalysisConfig,
) -> (ComparisonSet, Vec<Outcome>) {
    let (kind, candidates) = if space.size() <= config.enumeration_limit {
        (ComparisonSet::Enumerated, space.enumerate().collect::<Vec<_>>())
    } else {
        let mut rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let sample = space
            .sample(&mut rng)
            .take(config.sample_size)
            .collect::<Vec<_>>();
        (ComparisonSet::Sampled, sample)
    };

    let mut seen = HashSet::new();
    let mut outcomes = candidates
        .into_iter()
        .filter(|outcome| seen.insert(outcome.clone()))
        .collect::<Vec<_>>();
    if !seen.contains(final_offer) {
        outcomes.push(final_offer.clone());
    }
    (kind, outcomes)
}

pub fn analyze_negotiation_session(
    result: &SessionResult,
    first: Party,
    second: Party,
    space: &OutcomeSpace,
    config: &AnalysisConfig,
) -> SessionAnalysis {
    let agreement = match &result.agreement {
        Some(agreement) => agreement,
        None => {
            log::info!(
                "Negotiation between [{}] and [{}] ended without agreement. Nothing to analyze.",
                result.first,
                result.second
            );
            return SessionAnalysis::NotApplicable;
        }
    };
    let final_offer = &agreement.offer;

    let (kind, outcomes) = comparison_set(space, final_offer, config);
    log::debug!(
        "Analyzing agreement {} against {} {:?} outcomes (space size {}).",
        final_offer,
        outcomes.len(),
        kind,
        space.size()
    );

    let mut nash = find_nash_solution(
        &outcomes,
        first.ufun,
        second.ufun,
        first.reservation,
        second.reservation,
    );
    let frontier = find_pareto_frontier(&outcomes, first.ufun, second.ufun);
    mark_pareto_optimal(&mut nash.analyses, &frontier);

    // Final offer is always part of comparison set.
    let final_analysis = match nash.analysis_of(final_offer) {
        Some(analysis) => analysis.clone(),
        None => return SessionAnalysis::NotApplicable,
    };

    let report = SessionReport {
        final_offer: final_offer.clone(),
        final_utilities: final_analysis.utilities,
        is_nash_solution: final_analysis.is_nash_solution,
        is_pareto_optimal: final_analysis.is_pareto_optimal,
        nash_distance: final_analysis.nash_distance,
        pareto_efficiency: final_analysis.pareto_efficiency,
        social_welfare: final_analysis.social_welfare,
        nash_solution: nash.solution.clone(),
        nash_utilities: nash.utilities,
        pareto_frontier_size: frontier.len(),
        negotiation_efficiency: negotiation_efficiency(result.final_round(), result.total_rounds),
        quality: OutcomeQuality::classify(&final_analysis),
        comparison_set: kind,
        comparison_size: outcomes.len(),
    };

    log::info!(
        "Agreement between [{}] and [{}]: {}. Nash: {}, Pareto optimal: {}.",
        result.first,
        result.second,
        report.quality,
        report.is_nash_solution,
        report.is_pareto_optimal
    );
    SessionAnalysis::Analyzed(Box::new(report))
}
