use rand::seq::SliceRandom;
use rand::Rng;
use std::collections::VecDeque;

use boa_outcome_utils::{Issue, Outcome, OutcomeSpace, UtilityFunction};

use crate::config::{AdaptiveBoaConfig, BiddingConfig};

/// Time-dependent bidding: computes utility we aim at and searches outcome
/// space for offers close to it.
#[derive(Clone, Debug)]
pub struct Bidding {
    concession_factor: f64,
    time_pressure_threshold: f64,
    exploration_rate: f64,
    config: BiddingConfig,
}

impl Bidding {
    pub fn new(config: &AdaptiveBoaConfig) -> Bidding {
        Bidding {
            concession_factor: config.concession_factor,
            time_pressure_threshold: config.time_pressure_threshold,
            exploration_rate: config.exploration_rate,
            config: config.bidding.clone(),
        }
    }

    /// Quadratic, slow concession before time pressure threshold,
    /// linear afterwards. Never below `reservation`.
    pub fn target_utility(&self, relative_time: f64, reservation: f64) -> f64 {
        let t = relative_time.clamp(0.0, 1.0);
        let target = if t < self.time_pressure_threshold {
            1.0 - self.concession_factor * t * t
        } else {
            (1.0 - self.concession_factor * t).max(reservation)
        };
        target.max(reservation)
    }

    /// Samples outcome space looking for offers within tolerance band below
    /// `target`. Falls back to compromise offers if sampling found nothing.
    pub fn candidates<R: Rng + ?Sized>(
        &self,
        ufun: &dyn UtilityFunction,
        space: &OutcomeSpace,
        target: f64,
        rng: &mut R,
    ) -> Vec<Outcome> {
        let threshold = target * self.config.tolerance;
        let candidates = space
            .sample(rng)
            .take(self.config.max_attempts)
            .filter(|outcome| ufun.utility(outcome) >= threshold)
            .take(self.config.max_candidates)
            .collect::<Vec<_>>();

        if !candidates.is_empty() {
            return candidates;
        }

        log::debug!(
            "No outcome reached {:.3} in {} attempts. Using compromise offers.",
            threshold,
            self.config.max_attempts
        );
        self.compromise_offers(ufun, space, rng)
    }

    /// Random outcomes restricted to middle-ground values of each issue.
    pub fn compromise_offers<R: Rng + ?Sized>(
        &self,
        ufun: &dyn UtilityFunction,
        space: &OutcomeSpace,
        rng: &mut R,
    ) -> Vec<Outcome> {
        let ranges = space
            .issues()
            .iter()
            .map(|issue| (issue.name.as_str(), self.compromise_range(ufun, issue)))
            .collect::<Vec<_>>();

        (0..self.config.compromise_offers)
            .map(|_| {
                ranges
                    .iter()
                    .filter_map(|(issue, values)| {
                        values.choose(rng).map(|value| (*issue, value.as_str()))
                    })
                    .collect()
            })
            .collect()
    }

    /// Values allowed in compromise offers: configured explicitly, or all values
    /// except those we like the least.
    pub fn compromise_range(&self, ufun: &dyn UtilityFunction, issue: &Issue) -> Vec<String> {
        if let Some(values) = self.config.compromise.get(&issue.name) {
            if !values.is_empty() {
                return values.clone();
            }
        }

        let scores = issue
            .values
            .iter()
            .map(|value| ufun.value_score(&issue.name, value))
            .collect::<Vec<_>>();
        let worst = scores.iter().cloned().fold(f64::INFINITY, f64::min);

        let range = issue
            .values
            .iter()
            .zip(scores.iter())
            .filter(|(_, score)| **score > worst)
            .map(|(value, _)| value.clone())
            .collect::<Vec<_>>();

        match range.is_empty() {
            true => issue.values.clone(),
            false => range,
        }
    }

    /// 1.0 for offer we haven't made recently, less for each repetition
    /// among our latest offers.
    pub fn novelty(&self, candidate: &Outcome, own_offers: &VecDeque<Outcome>) -> f64 {
        let repeats = own_offers
            .iter()
            .rev()
            .take(self.config.novelty_window)
            .filter(|offer| *offer == candidate)
            .count();
        (1.0 - self.config.novelty_penalty * repeats as f64).max(0.0)
    }

    /// Best candidate by utility with bonus for novelty. On equal scores
    /// the earliest candidate wins.
    pub fn select(
        &self,
        ufun: &dyn UtilityFunction,
        candidates: Vec<Outcome>,
        own_offers: &VecDeque<Outcome>,
    ) -> Option<Outcome> {
        let mut best: Option<(f64, Outcome)> = None;
        for candidate in candidates {
            let score = ufun.utility(&candidate)
                + self.exploration_rate * self.novelty(&candidate, own_offers);

            let better = best
                .as_ref()
                .map(|(best_score, _)| score > *best_score)
                .unwrap_or(true);
            if better {
                best = Some((score, candidate));
            }
        }
        best.map(|(_, offer)| offer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use boa_outcome_utils::TableUtility;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use test_case::test_case;

    fn bidding() -> Bidding {
        Bidding::new(&AdaptiveBoaConfig::default())
    }

    fn space() -> OutcomeSpace {
        OutcomeSpace::new(vec![
            Issue::new("venue", &["Hotel", "Restaurant", "Club"]),
            Issue::new("food", &["Buffet", "Plated", "Cocktail"]),
        ])
        .unwrap()
    }

    fn ufun() -> TableUtility {
        TableUtility::builder()
            .weight("venue", 0.5)
            .weight("food", 0.5)
            .scores("venue", &[("Hotel", 1.0), ("Restaurant", 0.7), ("Club", 0.4)])
            .scores("food", &[("Buffet", 0.6), ("Plated", 1.0), ("Cocktail", 0.8)])
            .space(space())
            .build()
            .unwrap()
    }

    fn outcome(venue: &str, food: &str) -> Outcome {
        Outcome::new().with("venue", venue).with("food", food)
    }

    #[test_case(0.0, 0.3, 1.0; "start")]
    #[test_case(0.5, 0.3, 1.0 - 0.3 * 0.25; "quadratic phase")]
    #[test_case(0.8, 0.3, 1.0 - 0.3 * 0.8; "linear phase")]
    #[test_case(1.0, 0.8, 0.8; "floored at reservation")]
    #[test_case(0.5, 0.95, 0.95; "reservation above curve")]
    fn test_target_utility(t: f64, reservation: f64, expected: f64) {
        assert!((bidding().target_utility(t, reservation) - expected).abs() < 1e-9);
    }

    #[test_case(0.0; "no reservation")]
    #[test_case(0.3; "default reservation")]
    #[test_case(0.75; "high reservation")]
    fn test_target_utility_non_increasing(reservation: f64) {
        let bidding = bidding();
        let mut previous = f64::INFINITY;
        for step in 0..=1000 {
            let target = bidding.target_utility(step as f64 / 1000.0, reservation);
            assert!(target <= previous);
            assert!(target >= reservation);
            previous = target;
        }
    }

    #[test]
    fn test_candidates_within_tolerance() {
        let mut rng = StdRng::seed_from_u64(11);
        let ufun = ufun();
        let candidates = bidding().candidates(&ufun, &space(), 0.9, &mut rng);

        assert!(!candidates.is_empty());
        assert!(candidates.len() <= 10);
        assert!(candidates.iter().all(|c| ufun.utility(c) >= 0.9 * 0.8));
    }

    #[test]
    fn test_unreachable_target_gives_compromise() {
        let mut rng = StdRng::seed_from_u64(11);
        let ufun = ufun();
        let candidates = bidding().candidates(&ufun, &space(), 2.0, &mut rng);

        assert_eq!(candidates.len(), 5);
        for candidate in candidates {
            assert_ne!(candidate.get("venue"), Some("Club"));
            assert_ne!(candidate.get("food"), Some("Buffet"));
        }
    }

    #[test]
    fn test_compromise_range_from_config() {
        let mut config = AdaptiveBoaConfig::default();
        config
            .bidding
            .compromise
            .insert("venue".to_string(), vec!["Club".to_string()]);
        let bidding = Bidding::new(&config);

        let issue = Issue::new("venue", &["Hotel", "Restaurant", "Club"]);
        assert_eq!(bidding.compromise_range(&ufun(), &issue), vec!["Club"]);

        let flat = Issue::new("music", &["DJ", "Band"]);
        assert_eq!(bidding.compromise_range(&ufun(), &flat), vec!["DJ", "Band"]);
    }

    #[test]
    fn test_novelty() {
        let bidding = bidding();
        let mut own = VecDeque::new();
        assert_eq!(bidding.novelty(&outcome("Hotel", "Plated"), &own), 1.0);

        own.push_back(outcome("Hotel", "Plated"));
        own.push_back(outcome("Club", "Plated"));
        own.push_back(outcome("Hotel", "Plated"));
        assert!((bidding.novelty(&outcome("Hotel", "Plated"), &own) - 0.6).abs() < 1e-9);

        for _ in 0..10 {
            own.push_back(outcome("Hotel", "Plated"));
        }
        assert_eq!(bidding.novelty(&outcome("Hotel", "Plated"), &own), 0.0);
    }

    #[test]
    fn test_novelty_ignores_old_offers() {
        let bidding = bidding();
        let mut own = VecDeque::new();
        own.push_back(outcome("Hotel", "Plated"));
        for _ in 0..5 {
            own.push_back(outcome("Club", "Buffet"));
        }
        assert_eq!(bidding.novelty(&outcome("Hotel", "Plated"), &own), 1.0);
    }

    #[test]
    fn test_select_best_utility() {
        let bidding = bidding();
        let ufun = ufun();

        // 0.85 + 0.1 against 0.9 + 0.1
        let candidates = vec![outcome("Restaurant", "Plated"), outcome("Hotel", "Cocktail")];
        assert_eq!(
            bidding.select(&ufun, candidates, &VecDeque::new()),
            Some(outcome("Hotel", "Cocktail"))
        );
        assert_eq!(bidding.select(&ufun, vec![], &VecDeque::new()), None);
    }

    #[test]
    fn test_select_avoids_repeated_offers() {
        let mut config = AdaptiveBoaConfig::default();
        config.exploration_rate = 0.5;
        let bidding = Bidding::new(&config);
        let ufun = ufun();

        let own = std::iter::repeat(outcome("Hotel", "Plated"))
            .take(5)
            .collect::<VecDeque<_>>();
        // 1.0 + 0.0 against 0.9 + 0.5
        let candidates = vec![outcome("Hotel", "Plated"), outcome("Hotel", "Cocktail")];
        assert_eq!(
            bidding.select(&ufun, candidates, &own),
            Some(outcome("Hotel", "Cocktail"))
        );
    }

    #[test]
    fn test_select_stable_on_equal_scores() {
        let ufun = TableUtility::builder()
            .weight("venue", 0.5)
            .weight("food", 0.5)
            .scores("venue", &[("Hotel", 1.0), ("Restaurant", 1.0), ("Club", 0.4)])
            .scores("food", &[("Buffet", 0.6), ("Plated", 1.0), ("Cocktail", 0.8)])
            .build()
            .unwrap();

        let candidates = vec![outcome("Restaurant", "Plated"), outcome("Hotel", "Plated")];
        assert_eq!(
            bidding().select(&ufun, candidates, &VecDeque::new()),
            Some(outcome("Restaurant", "Plated"))
        );
    }
}
