use derive_more::Display;
use serde::Serialize;

use boa_outcome_utils::{Outcome, UtilityFunction};

use crate::record::party_utilities;

/// Outcome is considered good for party above this utility.
pub const GOOD_UTILITY: f64 = 0.7;

#[derive(Clone, Copy, Debug, Display, PartialEq, Eq, Serialize)]
pub enum ConflictLevel {
    High,
    Medium,
    Low,
}

impl ConflictLevel {
    /// Undefined correlation (constant utility of any party) means there is
    /// no conflict to speak of.
    pub fn from_correlation(correlation: Option<f64>) -> ConflictLevel {
        match correlation {
            Some(c) if c < -0.5 => ConflictLevel::High,
            Some(c) if c < 0.5 => ConflictLevel::Medium,
            _ => ConflictLevel::Low,
        }
    }
}

/// How much preferences of both parties oppose each other.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct SensitivityReport {
    /// Pearson correlation of utilities over outcome set.
    pub correlation: Option<f64>,
    pub conflict_level: ConflictLevel,
    /// Mean utility of second party over outcomes good for the first.
    pub second_when_first_good: f64,
    pub first_when_second_good: f64,
}

/// `None` for less than two points or when any of the series is constant.
pub fn pearson_correlation(xs: &[f64], ys: &[f64]) -> Option<f64> {
    let n = xs.len().min(ys.len());
    if n < 2 {
        return None;
    }
    let (xs, ys) = (&xs[..n], &ys[..n]);

    let mean_x = xs.iter().sum::<f64>() / n as f64;
    let mean_y = ys.iter().sum::<f64>() / n as f64;

    let (mut covariance, mut var_x, mut var_y) = (0.0, 0.0, 0.0);
    for (x, y) in xs.iter().zip(ys.iter()) {
        let (dx, dy) = (x - mean_x, y - mean_y);
        covariance += dx * dy;
        var_x += dx * dx;
        var_y += dy * dy;
    }

    if var_x <= 0.0 || var_y <= 0.0 {
        return None;
    }
    Some((covariance / (var_x * var_y).sqrt()).clamp(-1.0, 1.0))
}

fn mean_where(values: &[f64], filter: &[f64]) -> f64 {
    let selected = values
        .iter()
        .zip(filter.iter())
        .filter(|(_, other)| **other > GOOD_UTILITY)
        .map(|(value, _)| *value)
        .collect::<Vec<_>>();
    match selected.len() {
        0 => 0.0,
        n => selected.iter().sum::<f64>() / n as f64,
    }
}

pub fn sensitivity(
    outcomes: &[Outcome],
    first: Option<&dyn UtilityFunction>,
    second: Option<&dyn UtilityFunction>,
) -> SensitivityReport {
    let (firsts, seconds): (Vec<f64>, Vec<f64>) = outcomes
        .iter()
        .map(|outcome| {
            let utilities = party_utilities(outcome, first, second);
            (utilities.first, utilities.second)
        })
        .unzip();

    let correlation = pearson_correlation(&firsts, &seconds);
    SensitivityReport {
        correlation,
        conflict_level: ConflictLevel::from_correlation(correlation),
        second_when_first_good: mean_where(&seconds, &firsts),
        first_when_second_good: mean_where(&firsts, &seconds),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case(&[1.0, 2.0, 3.0], &[2.0, 4.0, 6.0], Some(1.0); "positive")]
    #[test_case(&[1.0, 2.0, 3.0], &[3.0, 2.0, 1.0], Some(-1.0); "negative")]
    #[test_case(&[1.0, 1.0, 1.0], &[3.0, 2.0, 1.0], None; "constant")]
    #[test_case(&[1.0], &[3.0], None; "single point")]
    fn test_pearson_correlation(xs: &[f64], ys: &[f64], expected: Option<f64>) {
        match (pearson_correlation(xs, ys), expected) {
            (Some(c), Some(e)) => assert!((c - e).abs() < 1e-9),
            (c, e) => assert_eq!(c, e),
        }
    }

    #[test_case(Some(-0.9), ConflictLevel::High; "strong negative")]
    #[test_case(Some(-0.5), ConflictLevel::Medium; "lower bound of medium")]
    #[test_case(Some(0.49), ConflictLevel::Medium; "weak positive")]
    #[test_case(Some(0.5), ConflictLevel::Low; "lower bound of low")]
    #[test_case(None, ConflictLevel::Low; "undefined")]
    fn test_conflict_level(correlation: Option<f64>, expected: ConflictLevel) {
        assert_eq!(ConflictLevel::from_correlation(correlation), expected);
    }

    #[test]
    fn test_mean_where() {
        let values = [0.1, 0.2, 0.3];
        assert!((mean_where(&values, &[0.8, 0.9, 0.1]) - 0.15).abs() < 1e-9);
        assert_eq!(mean_where(&values, &[0.1, 0.1, 0.1]), 0.0);
    }
}
