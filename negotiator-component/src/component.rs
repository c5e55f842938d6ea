use derive_more::Display;
use serde::{Deserialize, Serialize};

use boa_outcome_utils::{Outcome, SharedUtility};

/// Snapshot of negotiation handed to negotiator on every turn.
/// Owned by protocol driver; negotiators only read it.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct NegotiationState {
    /// Fraction of negotiation time elapsed: 0 at start, 1 at deadline.
    pub relative_time: f64,
    /// Offer most recently received from the other party.
    pub current_offer: Option<Outcome>,
    pub step: u32,
}

impl NegotiationState {
    /// State for `step` of negotiation limited to `total_steps`.
    pub fn at_step(step: u32, total_steps: u32) -> NegotiationState {
        let relative_time = match total_steps {
            0 => 1.0,
            total => (step as f64 / total as f64).min(1.0),
        };
        NegotiationState {
            relative_time,
            current_offer: None,
            step,
        }
    }

    pub fn with_offer(mut self, offer: Outcome) -> NegotiationState {
        self.current_offer = Some(offer);
        self
    }
}

/// Reaction to offer from the other party.
#[derive(Clone, Copy, Debug, Display, PartialEq, Eq, Serialize, Deserialize)]
pub enum Response {
    #[display(fmt = "AcceptOffer")]
    Accept,
    #[display(fmt = "RejectOffer")]
    Reject,
}

/// Statistics collected by negotiator over all negotiations it took part in.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PerformanceStats {
    pub name: String,
    pub strategy: String,
    pub total_negotiations: u32,
    pub successful_negotiations: u32,
    pub success_rate: f64,
    pub average_utility: f64,
    pub reservation_value: f64,
    pub estimated_opponent_reservation: f64,
}

/// Strategy of single negotiating party in bilateral alternating-offers protocol.
///
/// Protocol driver owns turn sequencing and calls negotiator once per turn.
/// None of the functions is allowed to fail: in degraded conditions (no utility
/// function, malformed offers) negotiator should still make a move.
pub trait Negotiator {
    fn name(&self) -> &str;

    /// Starts new negotiation. All state gathered about previous opponent
    /// is dropped, statistics are preserved.
    fn initialize(&mut self, ufun: Option<SharedUtility>);

    /// Offer we want to send in this turn.
    fn propose(&mut self, state: &NegotiationState) -> Option<Outcome>;

    /// Decides about `state.current_offer`.
    fn respond(&mut self, state: &NegotiationState) -> Response;

    fn performance_stats(&self) -> PerformanceStats;
}

pub type BoxedNegotiator = Box<dyn Negotiator + Send + Sync>;

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case(0, 20, 0.0; "negotiation start")]
    #[test_case(10, 20, 0.5; "half time")]
    #[test_case(25, 20, 1.0; "after deadline")]
    #[test_case(3, 0, 1.0; "no time at all")]
    fn test_state_relative_time(step: u32, total: u32, expected: f64) {
        let state = NegotiationState::at_step(step, total);
        assert_eq!(state.relative_time, expected);
        assert_eq!(state.current_offer, None);
    }

    #[test]
    fn test_response_display() {
        assert_eq!(Response::Accept.to_string(), "AcceptOffer");
        assert_eq!(Response::Reject.to_string(), "RejectOffer");
    }
}
