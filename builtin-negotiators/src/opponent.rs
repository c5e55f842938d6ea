use std::collections::VecDeque;

use boa_outcome_utils::{FrequencyEstimate, IssueFrequencies, Outcome, OutcomeSpace, UtilityFunction};

use crate::config::OpponentConfig;

/// What we learned about opponent during current negotiation.
#[derive(Clone, Debug)]
pub struct OpponentModel {
    history_size: usize,
    config: OpponentConfig,

    received: VecDeque<Outcome>,
    made: VecDeque<Outcome>,
    /// Opponent utility estimates in order of arrival.
    utility_trace: Vec<f64>,
    frequencies: IssueFrequencies,
}

impl OpponentModel {
    pub fn new(history_size: usize, config: OpponentConfig) -> OpponentModel {
        OpponentModel {
            history_size,
            config,
            received: VecDeque::new(),
            made: VecDeque::new(),
            utility_trace: Vec::new(),
            frequencies: IssueFrequencies::new(),
        }
    }

    pub fn reset(&mut self) {
        self.received.clear();
        self.made.clear();
        self.utility_trace.clear();
        self.frequencies = IssueFrequencies::new();
    }

    /// Registers offer made by opponent. We don't know opponent utility function,
    /// so we assume preferences opposite to ours: estimate is `1 - our utility`.
    pub fn observe_received(&mut self, offer: &Outcome, ufun: Option<&dyn UtilityFunction>) {
        push_bounded(&mut self.received, offer.clone(), self.history_size);
        self.frequencies.observe(offer);

        if let Some(ufun) = ufun {
            self.record_estimate(1.0 - ufun.utility(offer));
        }
    }

    pub fn record_estimate(&mut self, utility: f64) {
        self.utility_trace.push(utility);
    }

    pub fn record_own(&mut self, offer: &Outcome) {
        push_bounded(&mut self.made, offer.clone(), self.history_size);
    }

    /// Opponent is conceding, if the latest estimate in the window is lower than
    /// the earliest one. Middle values are not inspected.
    pub fn is_conceding(&self) -> bool {
        let window = self.config.conceding_window;
        if self.utility_trace.len() < window {
            return false;
        }

        let recent = &self.utility_trace[self.utility_trace.len() - window..];
        match (recent.first(), recent.last()) {
            (Some(first), Some(last)) => last < first,
            _ => false,
        }
    }

    pub fn estimated_reservation(&self) -> f64 {
        match self.utility_trace.is_empty() {
            true => 0.0,
            false => self
                .utility_trace
                .iter()
                .cloned()
                .fold(f64::INFINITY, f64::min),
        }
    }

    pub fn estimated_preferences(&self, space: &OutcomeSpace) -> FrequencyEstimate {
        self.frequencies.estimate(space, self.config.weight_smoothing)
    }

    pub fn received(&self) -> &VecDeque<Outcome> {
        &self.received
    }

    pub fn own_offers(&self) -> &VecDeque<Outcome> {
        &self.made
    }

    pub fn utility_trace(&self) -> &[f64] {
        &self.utility_trace
    }
}

fn push_bounded(history: &mut VecDeque<Outcome>, offer: Outcome, limit: usize) {
    history.push_back(offer);
    while history.len() > limit {
        history.pop_front();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use boa_outcome_utils::{Issue, TableUtility};
    use test_case::test_case;

    fn model() -> OpponentModel {
        OpponentModel::new(3, OpponentConfig::default())
    }

    #[test_case(&[0.8, 0.6, 0.4], true; "decreasing")]
    #[test_case(&[0.4, 0.6, 0.8], false; "increasing")]
    #[test_case(&[0.5, 0.5, 0.5], false; "flat")]
    #[test_case(&[0.9, 0.2], false; "too short")]
    #[test_case(&[0.1, 0.9, 0.8, 0.7], true; "only latest window counts")]
    #[test_case(&[0.9, 0.8, 0.7, 0.9], false; "recovered")]
    fn test_is_conceding(trace: &[f64], expected: bool) {
        let mut model = model();
        for utility in trace {
            model.record_estimate(*utility);
        }
        assert_eq!(model.is_conceding(), expected);
    }

    #[test]
    fn test_estimated_reservation() {
        let mut model = model();
        assert_eq!(model.estimated_reservation(), 0.0);

        model.record_estimate(0.7);
        model.record_estimate(0.45);
        model.record_estimate(0.6);
        assert_eq!(model.estimated_reservation(), 0.45);

        model.reset();
        assert_eq!(model.estimated_reservation(), 0.0);
        assert!(model.utility_trace().is_empty());
    }

    #[test]
    fn test_history_is_bounded() {
        let mut model = model();
        for value in &["Hotel", "Restaurant", "Club", "Hotel"] {
            let offer = Outcome::new().with("venue", value);
            model.observe_received(&offer, None);
            model.record_own(&offer);
        }

        assert_eq!(model.received().len(), 3);
        assert_eq!(model.own_offers().len(), 3);
        assert_eq!(
            model.received().front(),
            Some(&Outcome::new().with("venue", "Restaurant"))
        );
        // Without utility function nothing is estimated.
        assert!(model.utility_trace().is_empty());
    }

    #[test]
    fn test_observe_with_utility() {
        let ufun = TableUtility::builder()
            .weight("venue", 1.0)
            .scores("venue", &[("Hotel", 1.0), ("Club", 0.2)])
            .build()
            .unwrap();

        let mut model = model();
        model.observe_received(&Outcome::new().with("venue", "Club"), Some(&ufun));
        model.observe_received(&Outcome::new().with("venue", "Hotel"), Some(&ufun));
        let trace = model.utility_trace();
        assert_eq!(trace.len(), 2);
        assert!((trace[0] - 0.8).abs() < 1e-9);
        assert_eq!(trace[1], 0.0);
    }

    #[test]
    fn test_estimated_preferences() {
        let space = OutcomeSpace::new(vec![
            Issue::new("venue", &["Hotel", "Club"]),
            Issue::new("food", &["Buffet", "Plated"]),
        ])
        .unwrap();

        let mut model = model();
        for food in &["Buffet", "Plated", "Buffet", "Plated"] {
            model.observe_received(
                &Outcome::new().with("venue", "Hotel").with("food", food),
                None,
            );
        }

        let estimate = model.estimated_preferences(&space);
        assert!(estimate.weights["venue"] > estimate.weights["food"]);
        assert_eq!(estimate.evaluations["venue"]["Hotel"], 1.0);
        assert_eq!(estimate.evaluations["venue"]["Club"], 0.0);
    }
}
