//! Game-theoretic analysis of bilateral negotiations: Nash bargaining
//! solution, Pareto frontier and classification of reached agreements.
pub mod conflict;
pub mod frequency;
pub mod nash;
pub mod pareto;
pub mod quality;
pub mod record;
pub mod session;
pub mod steps;
pub mod summary;

pub use conflict::{sensitivity, ConflictLevel, SensitivityReport};
pub use frequency::{analyze_opponent_offers, weight_error};
pub use nash::{find_nash_solution, NashSolution};
pub use pareto::{
    dominates, find_pareto_frontier, is_pareto_optimal, mark_pareto_optimal, ParetoPoint,
};
pub use quality::OutcomeQuality;
pub use record::{analyze_outcome, nash_product, party_utilities, party_utility, OutcomeAnalysis};
pub use session::{
    analyze_negotiation_session, negotiation_efficiency, AnalysisConfig, ComparisonSet, Party,
    SessionAnalysis, SessionReport,
};
pub use steps::{classify_steps, StepClassification, StepKind};
pub use summary::SessionsSummary;
