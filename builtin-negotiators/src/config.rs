use anyhow::bail;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Configuration of `AdaptiveBoa` negotiator. Every field has default value,
/// so empty yaml mapping is valid configuration.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AdaptiveBoaConfig {
    /// How fast target utility drops with time.
    pub concession_factor: f64,
    /// Fraction of negotiation time after which concession becomes linear.
    pub time_pressure_threshold: f64,
    /// Weight of novelty when choosing between candidate offers.
    pub exploration_rate: f64,
    /// Reservation value. Estimated from utility function if not set.
    pub reservation_value: Option<f64>,
    /// Number of own and opponent offers remembered.
    pub history_size: usize,
    /// Seed for reproducible negotiations.
    pub seed: Option<u64>,
    pub bidding: BiddingConfig,
    pub acceptance: AcceptanceConfig,
    pub opponent: OpponentConfig,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BiddingConfig {
    pub max_attempts: usize,
    pub max_candidates: usize,
    /// Candidate must reach `tolerance * target` utility.
    pub tolerance: f64,
    pub compromise_offers: usize,
    /// Number of our latest offers checked when computing novelty.
    pub novelty_window: usize,
    pub novelty_penalty: f64,
    /// Explicit compromise values per issue. Issues not listed here
    /// exclude their worst-scored values.
    pub compromise: BTreeMap<String, Vec<String>>,
}

/// Thresholds are expressed as fractions of reservation value, except
/// `next_offer_factor`, which is fraction of our next target utility.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AcceptanceConfig {
    pub reject_factor: f64,
    pub emergency_time: f64,
    pub emergency_factor: f64,
    pub late_time: f64,
    pub late_factor: f64,
    pub next_offer_factor: f64,
    pub conceding_factor: f64,
    /// Used only when there is no utility function.
    pub random_accept_probability: f64,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OpponentConfig {
    /// Number of latest utility estimates inspected by concession detector.
    pub conceding_window: usize,
    /// Smoothing used by frequency based preference estimation.
    pub weight_smoothing: f64,
}

impl Default for AdaptiveBoaConfig {
    fn default() -> Self {
        AdaptiveBoaConfig {
            concession_factor: 0.3,
            time_pressure_threshold: 0.75,
            exploration_rate: 0.1,
            reservation_value: None,
            history_size: 50,
            seed: None,
            bidding: BiddingConfig::default(),
            acceptance: AcceptanceConfig::default(),
            opponent: OpponentConfig::default(),
        }
    }
}

impl Default for BiddingConfig {
    fn default() -> Self {
        BiddingConfig {
            max_attempts: 50,
            max_candidates: 10,
            tolerance: 0.8,
            compromise_offers: 5,
            novelty_window: 5,
            novelty_penalty: 0.2,
            compromise: BTreeMap::new(),
        }
    }
}

impl Default for AcceptanceConfig {
    fn default() -> Self {
        AcceptanceConfig {
            reject_factor: 0.8,
            emergency_time: 0.95,
            emergency_factor: 0.4,
            late_time: 0.85,
            late_factor: 0.6,
            next_offer_factor: 0.9,
            conceding_factor: 0.9,
            random_accept_probability: 0.3,
        }
    }
}

impl Default for OpponentConfig {
    fn default() -> Self {
        OpponentConfig {
            conceding_window: 3,
            weight_smoothing: 0.1,
        }
    }
}

fn check_unit(name: &str, value: f64) -> anyhow::Result<()> {
    if !(0.0..=1.0).contains(&value) {
        bail!("'{}' must be in range [0, 1], got {}", name, value)
    }
    Ok(())
}

fn check_non_negative(name: &str, value: f64) -> anyhow::Result<()> {
    if !value.is_finite() || value < 0.0 {
        bail!("'{}' must be finite and non-negative, got {}", name, value)
    }
    Ok(())
}

impl AdaptiveBoaConfig {
    pub fn from_yaml(config: serde_yaml::Value) -> anyhow::Result<AdaptiveBoaConfig> {
        let config = match config {
            serde_yaml::Value::Null => AdaptiveBoaConfig::default(),
            config => serde_yaml::from_value(config)?,
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        check_non_negative("concession_factor", self.concession_factor)?;
        check_unit("time_pressure_threshold", self.time_pressure_threshold)?;
        check_non_negative("exploration_rate", self.exploration_rate)?;
        if let Some(reservation) = self.reservation_value {
            check_unit("reservation_value", reservation)?;
        }
        if self.history_size == 0 {
            bail!("'history_size' must be positive")
        }

        check_unit("bidding.tolerance", self.bidding.tolerance)?;
        check_non_negative("bidding.novelty_penalty", self.bidding.novelty_penalty)?;

        let acceptance = &self.acceptance;
        check_non_negative("acceptance.reject_factor", acceptance.reject_factor)?;
        check_unit("acceptance.emergency_time", acceptance.emergency_time)?;
        check_non_negative("acceptance.emergency_factor", acceptance.emergency_factor)?;
        check_unit("acceptance.late_time", acceptance.late_time)?;
        check_non_negative("acceptance.late_factor", acceptance.late_factor)?;
        check_non_negative("acceptance.next_offer_factor", acceptance.next_offer_factor)?;
        check_non_negative("acceptance.conceding_factor", acceptance.conceding_factor)?;
        check_unit(
            "acceptance.random_accept_probability",
            acceptance.random_accept_probability,
        )?;
        if acceptance.late_time > acceptance.emergency_time {
            bail!(
                "'acceptance.late_time' ({}) can't be later than 'acceptance.emergency_time' ({})",
                acceptance.late_time,
                acceptance.emergency_time
            )
        }

        if self.opponent.conceding_window < 2 {
            bail!("'opponent.conceding_window' must be at least 2")
        }
        check_non_negative("opponent.weight_smoothing", self.opponent.weight_smoothing)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_defaults_from_null() {
        let config = AdaptiveBoaConfig::from_yaml(serde_yaml::Value::Null).unwrap();
        assert_eq!(config, AdaptiveBoaConfig::default());
    }

    #[test]
    fn test_partial_config() {
        let config = AdaptiveBoaConfig::from_yaml(
            serde_yaml::from_str(
                r#"
concession_factor: 0.5
seed: 12
acceptance:
  late_factor: 0.7
bidding:
  compromise:
    venue: [Hotel, Restaurant]
"#,
            )
            .unwrap(),
        )
        .unwrap();

        assert_eq!(config.concession_factor, 0.5);
        assert_eq!(config.seed, Some(12));
        assert_eq!(config.acceptance.late_factor, 0.7);
        assert_eq!(config.acceptance.emergency_factor, 0.4);
        assert_eq!(config.bidding.compromise["venue"], vec!["Hotel", "Restaurant"]);
        assert_eq!(config.history_size, 50);
    }

    #[test]
    fn test_invalid_config() {
        let invalid = |yaml: &str| {
            AdaptiveBoaConfig::from_yaml(serde_yaml::from_str(yaml).unwrap()).is_err()
        };

        assert!(invalid("concession_factor: -0.1"));
        assert!(invalid("time_pressure_threshold: 1.5"));
        assert!(invalid("reservation_value: 2.0"));
        assert!(invalid("history_size: 0"));
        assert!(invalid("acceptance: { late_time: 0.99 }"));
        assert!(invalid("opponent: { conceding_window: 1 }"));
    }
}
