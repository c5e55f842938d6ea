use rand::RngCore;

use crate::utility::UtilityFunction;

/// Used when there is nothing to estimate reservation value from.
pub const DEFAULT_RESERVATION: f64 = 0.3;
pub const RESERVATION_SAMPLES: usize = 100;
pub const RESERVATION_PERCENTILE: f64 = 15.0;

/// Percentile with linear interpolation between closest ranks.
/// Non-finite values are skipped.
pub fn percentile(values: &[f64], pct: f64) -> Option<f64> {
    let mut sorted = values
        .iter()
        .cloned()
        .filter(|value| value.is_finite())
        .collect::<Vec<_>>();
    if sorted.is_empty() {
        return None;
    }
    sorted.sort_by(f64::total_cmp);

    let rank = pct.clamp(0.0, 100.0) / 100.0 * (sorted.len() - 1) as f64;
    let low = rank.floor() as usize;
    let high = rank.ceil() as usize;
    Some(sorted[low] + (sorted[high] - sorted[low]) * (rank - low as f64))
}

/// Estimates the lowest utility worth accepting as low percentile of
/// utilities of randomly sampled outcomes.
pub fn estimate_reservation(ufun: &dyn UtilityFunction, rng: &mut dyn RngCore) -> f64 {
    let space = match ufun.outcome_space() {
        Some(space) => space,
        None => {
            log::debug!(
                "No outcome space to sample. Using default reservation value {}.",
                DEFAULT_RESERVATION
            );
            return DEFAULT_RESERVATION;
        }
    };

    let utilities = space
        .sample(rng)
        .take(RESERVATION_SAMPLES)
        .map(|outcome| ufun.utility(&outcome))
        .collect::<Vec<_>>();

    percentile(&utilities, RESERVATION_PERCENTILE).unwrap_or(DEFAULT_RESERVATION)
}
