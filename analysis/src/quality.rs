use derive_more::Display;
use serde::Serialize;

use crate::record::OutcomeAnalysis;

/// Outcome closer to Nash point than this is considered fair.
pub const CLOSE_TO_NASH_DISTANCE: f64 = 0.1;
/// Outcome with higher mean utility is considered fair.
pub const HIGH_SOCIAL_WELFARE: f64 = 0.7;

#[derive(Clone, Copy, Debug, Display, PartialEq, Eq, Serialize)]
pub enum OutcomeQuality {
    #[display(fmt = "Excellent - Nash solution and Pareto optimal")]
    Excellent,
    #[display(fmt = "Good - Nash solution but not Pareto optimal")]
    NashNotPareto,
    #[display(fmt = "Good - Pareto optimal but not Nash solution")]
    ParetoNotNash,
    #[display(fmt = "Fair - Close to Nash solution")]
    CloseToNash,
    #[display(fmt = "Fair - High social welfare")]
    HighWelfare,
    #[display(fmt = "Poor - Low efficiency and far from optimal")]
    Poor,
}

impl OutcomeQuality {
    /// Strongest guarantees are checked first.
    pub fn classify(analysis: &OutcomeAnalysis) -> OutcomeQuality {
        match (analysis.is_nash_solution, analysis.is_pareto_optimal) {
            (true, true) => OutcomeQuality::Excellent,
            (true, false) => OutcomeQuality::NashNotPareto,
            (false, true) => OutcomeQuality::ParetoNotNash,
            (false, false) => {
                let close = analysis
                    .nash_distance
                    .map(|distance| distance < CLOSE_TO_NASH_DISTANCE)
                    .unwrap_or(false);
                if close {
                    OutcomeQuality::CloseToNash
                } else if analysis.social_welfare > HIGH_SOCIAL_WELFARE {
                    OutcomeQuality::HighWelfare
                } else {
                    OutcomeQuality::Poor
                }
            }
        }
    }

    /// One word rating: Excellent, Good, Fair or Poor.
    pub fn rating(&self) -> &'static str {
        match self {
            OutcomeQuality::Excellent => "Excellent",
            OutcomeQuality::NashNotPareto | OutcomeQuality::ParetoNotNash => "Good",
            OutcomeQuality::CloseToNash | OutcomeQuality::HighWelfare => "Fair",
            OutcomeQuality::Poor => "Poor",
        }
    }
}
