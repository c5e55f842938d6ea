use derive_more::Display;
use rand::Rng;

use boa_negotiator_component::Response;

use crate::config::AcceptanceConfig;

/// Criterion that decided about an offer.
#[derive(Clone, Copy, Debug, Display, PartialEq, Eq)]
pub enum AcceptanceRule {
    #[display(fmt = "utility far below reservation value")]
    BelowReservation,
    #[display(fmt = "deadline is close")]
    Deadline,
    #[display(fmt = "late phase of negotiation")]
    LatePhase,
    #[display(fmt = "offer as good as our next proposal")]
    NextOffer,
    #[display(fmt = "opponent is conceding")]
    OpponentConceding,
    #[display(fmt = "no criterion satisfied")]
    Default,
    #[display(fmt = "random decision without utility function")]
    Random,
}

#[derive(Clone, Copy, Debug, Display, PartialEq, Eq)]
#[display(fmt = "{} ({})", response, rule)]
pub struct Decision {
    pub response: Response,
    pub rule: AcceptanceRule,
}

impl Decision {
    fn accept(rule: AcceptanceRule) -> Decision {
        Decision {
            response: Response::Accept,
            rule,
        }
    }

    fn reject(rule: AcceptanceRule) -> Decision {
        Decision {
            response: Response::Reject,
            rule,
        }
    }

    fn accept_if(condition: bool, rule: AcceptanceRule) -> Decision {
        match condition {
            true => Decision::accept(rule),
            false => Decision::reject(rule),
        }
    }
}

/// Ordered list of acceptance criteria. First criterion that applies
/// makes the decision.
#[derive(Clone, Debug)]
pub struct MultiCriteriaAcceptance {
    config: AcceptanceConfig,
}

impl MultiCriteriaAcceptance {
    pub fn new(config: AcceptanceConfig) -> MultiCriteriaAcceptance {
        MultiCriteriaAcceptance { config }
    }

    /// Decides about offer with our utility `utility` at `relative_time`.
    /// `next_target` is utility our next proposal would aim at.
    pub fn decide(
        &self,
        utility: f64,
        relative_time: f64,
        reservation: f64,
        next_target: f64,
        opponent_conceding: bool,
    ) -> Decision {
        let config = &self.config;

        if utility < config.reject_factor * reservation {
            return Decision::reject(AcceptanceRule::BelowReservation);
        }
        if relative_time > config.emergency_time {
            return Decision::accept_if(
                utility > config.emergency_factor * reservation,
                AcceptanceRule::Deadline,
            );
        }
        if relative_time > config.late_time {
            return Decision::accept_if(
                utility > config.late_factor * reservation,
                AcceptanceRule::LatePhase,
            );
        }
        if utility >= config.next_offer_factor * next_target {
            return Decision::accept(AcceptanceRule::NextOffer);
        }
        if opponent_conceding && utility > config.conceding_factor * reservation {
            return Decision::accept(AcceptanceRule::OpponentConceding);
        }
        Decision::reject(AcceptanceRule::Default)
    }

    /// Used when we can't evaluate offers at all. Accepting from time to time
    /// lets negotiation finish instead of running until deadline.
    pub fn random_decision<R: Rng + ?Sized>(&self, rng: &mut R) -> Decision {
        Decision::accept_if(
            rng.gen::<f64>() < self.config.random_accept_probability,
            AcceptanceRule::Random,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use test_case::test_case;

    fn acceptance() -> MultiCriteriaAcceptance {
        MultiCriteriaAcceptance::new(AcceptanceConfig::default())
    }

    #[test_case(0.2, 0.99, 0.5, 0.9, true, Response::Reject, AcceptanceRule::BelowReservation; "below reservation")]
    #[test_case(0.41, 0.99, 0.5, 0.9, false, Response::Accept, AcceptanceRule::Deadline; "deadline")]
    #[test_case(0.41, 0.9, 0.5, 0.9, false, Response::Accept, AcceptanceRule::LatePhase; "late phase")]
    #[test_case(0.29, 0.9, 0.5, 0.9, false, Response::Reject, AcceptanceRule::BelowReservation; "late phase too low")]
    #[test_case(0.85, 0.5, 0.5, 0.9, false, Response::Accept, AcceptanceRule::NextOffer; "as good as next offer")]
    #[test_case(0.5, 0.5, 0.5, 0.9, true, Response::Accept, AcceptanceRule::OpponentConceding; "opponent conceding")]
    #[test_case(0.5, 0.5, 0.5, 0.9, false, Response::Reject, AcceptanceRule::Default; "nothing applies")]
    #[test_case(0.44, 0.5, 0.5, 0.9, true, Response::Reject, AcceptanceRule::Default; "conceding but too low")]
    fn test_decide(
        utility: f64,
        time: f64,
        reservation: f64,
        next_target: f64,
        conceding: bool,
        response: Response,
        rule: AcceptanceRule,
    ) {
        let decision = acceptance().decide(utility, time, reservation, next_target, conceding);
        assert_eq!(decision, Decision { response, rule });
    }

    #[test]
    fn test_deadline_rule_checked_before_late_rule() {
        let mut config = AcceptanceConfig::default();
        config.emergency_factor = 2.0;
        let acceptance = MultiCriteriaAcceptance::new(config);

        // Late phase rule would accept, but deadline rule decides first.
        let decision = acceptance.decide(0.9, 0.99, 0.5, 1.0, false);
        assert_eq!(decision.response, Response::Reject);
        assert_eq!(decision.rule, AcceptanceRule::Deadline);
    }

    #[test_case(0.1, 0.3, false; "early")]
    #[test_case(0.9, 0.3, false; "late")]
    #[test_case(0.99, 0.3, true; "deadline")]
    #[test_case(0.5, 0.0, true; "zero reservation")]
    #[test_case(0.5, 0.8, true; "conceding opponent")]
    fn test_monotonic_in_utility(time: f64, reservation: f64, conceding: bool) {
        let acceptance = acceptance();
        let mut accepted = false;
        for step in 0..=100 {
            let utility = step as f64 / 100.0;
            let decision = acceptance.decide(utility, time, reservation, 0.95, conceding);
            if accepted {
                assert_eq!(decision.response, Response::Accept, "utility {}", utility);
            }
            accepted = decision.response == Response::Accept;
        }
        assert!(accepted);
    }

    #[test]
    fn test_random_decision() {
        let acceptance = acceptance();
        let mut rng = StdRng::seed_from_u64(3);

        let accepted = (0..1000)
            .map(|_| acceptance.random_decision(&mut rng))
            .filter(|decision| decision.response == Response::Accept)
            .count();
        assert!(accepted > 200 && accepted < 400, "accepted {}", accepted);
    }

    #[test_case(-0.5, false; "negative probability never accepts")]
    #[test_case(1.5, true; "probability above one always accepts")]
    fn test_random_decision_out_of_range(probability: f64, accepted: bool) {
        let acceptance = MultiCriteriaAcceptance::new(AcceptanceConfig {
            random_accept_probability: probability,
            ..AcceptanceConfig::default()
        });
        let mut rng = StdRng::seed_from_u64(8);

        for _ in 0..50 {
            let decision = acceptance.random_decision(&mut rng);
            assert_eq!(decision.response == Response::Accept, accepted);
            assert_eq!(decision.rule, AcceptanceRule::Random);
        }
    }

    #[test]
    fn test_decision_display() {
        let decision = acceptance().decide(0.1, 0.5, 0.5, 0.9, false);
        assert_eq!(
            decision.to_string(),
            "RejectOffer (utility far below reservation value)"
        );
    }
}
