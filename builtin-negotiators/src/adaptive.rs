use rand::rngs::StdRng;
use rand::SeedableRng;

use boa_negotiator_component::static_lib::NegotiatorFactory;
use boa_negotiator_component::{NegotiationState, Negotiator, PerformanceStats, Response};
use boa_outcome_utils::{estimate_reservation, Outcome, SharedUtility, DEFAULT_RESERVATION};

use crate::acceptance::{Decision, MultiCriteriaAcceptance};
use crate::bidding::Bidding;
use crate::config::AdaptiveBoaConfig;
use crate::fallback::fallback_outcome;
use crate::opponent::OpponentModel;

pub const STRATEGY_NAME: &str = "Adaptive BOA Framework";

/// Negotiator composed of time-dependent bidding, frequency and trend based
/// opponent model and multi-criteria acceptance.
pub struct AdaptiveBoa {
    name: String,
    config: AdaptiveBoaConfig,

    bidding: Bidding,
    acceptance: MultiCriteriaAcceptance,
    opponent: OpponentModel,

    ufun: Option<SharedUtility>,
    reservation_value: f64,
    rng: StdRng,

    total_negotiations: u32,
    successful_negotiations: u32,
    achieved_utilities: Vec<f64>,
}

impl NegotiatorFactory for AdaptiveBoa {
    fn new(name: &str, config: serde_yaml::Value) -> anyhow::Result<AdaptiveBoa> {
        AdaptiveBoa::with_config(name, AdaptiveBoaConfig::from_yaml(config)?)
    }
}

impl AdaptiveBoa {
    pub fn with_config(name: &str, config: AdaptiveBoaConfig) -> anyhow::Result<AdaptiveBoa> {
        config.validate()?;

        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        Ok(AdaptiveBoa {
            name: name.to_string(),
            bidding: Bidding::new(&config),
            acceptance: MultiCriteriaAcceptance::new(config.acceptance.clone()),
            opponent: OpponentModel::new(config.history_size, config.opponent.clone()),
            config,
            ufun: None,
            reservation_value: DEFAULT_RESERVATION,
            rng,
            total_negotiations: 0,
            successful_negotiations: 0,
            achieved_utilities: vec![],
        })
    }

    pub fn reservation_value(&self) -> f64 {
        self.reservation_value
    }

    pub fn opponent_model(&self) -> &OpponentModel {
        &self.opponent
    }

    pub fn target_utility(&self, relative_time: f64) -> f64 {
        self.bidding
            .target_utility(relative_time, self.reservation_value)
    }

    fn fallback_offer(&mut self) -> Outcome {
        log::debug!(
            "[{}] No utility function or outcome space. Proposing random offer.",
            self.name
        );
        fallback_outcome(&mut self.rng)
    }

    fn decide(&mut self, offer: &Outcome, relative_time: f64) -> (Decision, Option<f64>) {
        let ufun = match &self.ufun {
            Some(ufun) => ufun.clone(),
            None => {
                self.opponent.observe_received(offer, None);
                return (self.acceptance.random_decision(&mut self.rng), None);
            }
        };

        let utility = ufun.utility(offer);
        self.opponent.observe_received(offer, Some(&*ufun));

        let decision = self.acceptance.decide(
            utility,
            relative_time,
            self.reservation_value,
            self.target_utility(relative_time),
            self.opponent.is_conceding(),
        );
        (decision, Some(utility))
    }
}

impl Negotiator for AdaptiveBoa {
    fn name(&self) -> &str {
        &self.name
    }

    fn initialize(&mut self, ufun: Option<SharedUtility>) {
        self.opponent.reset();
        self.total_negotiations += 1;

        self.reservation_value = match (self.config.reservation_value, &ufun) {
            (Some(reservation), _) => reservation,
            (None, Some(ufun)) => estimate_reservation(ufun.as_ref(), &mut self.rng),
            (None, None) => DEFAULT_RESERVATION,
        };
        self.ufun = ufun;

        log::info!(
            "[{}] Starting negotiation {}. Reservation value: {:.3}{}.",
            self.name,
            self.total_negotiations,
            self.reservation_value,
            match self.ufun {
                Some(_) => "",
                None => " (no utility function)",
            }
        );
    }

    fn propose(&mut self, state: &NegotiationState) -> Option<Outcome> {
        let ufun = match &self.ufun {
            Some(ufun) => ufun.clone(),
            None => {
                let offer = self.fallback_offer();
                self.opponent.record_own(&offer);
                return Some(offer);
            }
        };
        let space = match ufun.outcome_space() {
            Some(space) => space,
            None => {
                let offer = self.fallback_offer();
                self.opponent.record_own(&offer);
                return Some(offer);
            }
        };

        let target = self.target_utility(state.relative_time);
        let candidates = self
            .bidding
            .candidates(ufun.as_ref(), space, target, &mut self.rng);
        let offer = self
            .bidding
            .select(ufun.as_ref(), candidates, self.opponent.own_offers())
            .or_else(|| ufun.random_outcome(&mut self.rng))
            .unwrap_or_else(|| space.random_outcome(&mut self.rng));

        log::debug!(
            "[{}] Step {}, time {:.2}: target utility {:.3}, proposing {} (utility {:.3}).",
            self.name,
            state.step,
            state.relative_time,
            target,
            offer,
            ufun.utility(&offer)
        );

        self.opponent.record_own(&offer);
        Some(offer)
    }

    fn respond(&mut self, state: &NegotiationState) -> Response {
        let offer = match &state.current_offer {
            Some(offer) => offer,
            None => {
                log::debug!("[{}] Nothing to respond to. Rejecting.", self.name);
                return Response::Reject;
            }
        };

        let (decision, utility) = self.decide(offer, state.relative_time);
        if decision.response == Response::Accept {
            self.successful_negotiations += 1;
            if let Some(utility) = utility {
                self.achieved_utilities.push(utility);
            }
        }

        log::debug!(
            "[{}] Step {}, time {:.2}: {} offer {} (utility {}).",
            self.name,
            state.step,
            state.relative_time,
            decision,
            offer,
            utility
                .map(|utility| format!("{:.3}", utility))
                .unwrap_or_else(|| "unknown".to_string())
        );
        decision.response
    }

    fn performance_stats(&self) -> PerformanceStats {
        let average_utility = match self.achieved_utilities.len() {
            0 => 0.0,
            n => self.achieved_utilities.iter().sum::<f64>() / n as f64,
        };

        PerformanceStats {
            name: self.name.clone(),
            strategy: STRATEGY_NAME.to_string(),
            total_negotiations: self.total_negotiations,
            successful_negotiations: self.successful_negotiations,
            success_rate: self.successful_negotiations as f64
                / self.total_negotiations.max(1) as f64,
            average_utility,
            reservation_value: self.reservation_value,
            estimated_opponent_reservation: self.opponent.estimated_reservation(),
        }
    }
}
