use serde::Serialize;

use boa_nash_analysis::{SessionAnalysis, SessionReport};
use boa_negotiator_component::{PerformanceStats, SessionResult};

/// Everything known about finished negotiation. Saved in test directory
/// to make failed tests easier to debug.
#[derive(Clone, Debug, Serialize)]
pub struct NegotiationRecord {
    pub result: SessionResult,
    pub stats: Vec<PerformanceStats>,
    pub analysis: Option<SessionReport>,
}

impl NegotiationRecord {
    pub fn new(
        result: SessionResult,
        stats: Vec<PerformanceStats>,
        analysis: &SessionAnalysis,
    ) -> NegotiationRecord {
        NegotiationRecord {
            result,
            stats,
            analysis: analysis.report().cloned(),
        }
    }
}
