/// Conversion between fitted strengths and the familiar head-to-head display scale.
///
/// Display ratings are a presentation transform only; nothing here feeds back
/// into the fitting loop.
use std::collections::BTreeMap;

use crate::constants::{BASE_DISPLAY_RATING, DISPLAY_SCALE};
use crate::error::EstimateError;
use crate::types::CompetitorId;

/// Map strengths onto the display scale, centered on their geometric mean.
///
/// Zero strengths (competitors that played but never scored) are left out of the
/// log-sum, the divisor stays the full roster size, and they display at the baseline.
pub fn to_display_ratings(strengths: &[f64]) -> Vec<i32> {
    if strengths.is_empty() {
        return Vec::new();
    }

    let log_sum: f64 = strengths.iter().filter(|&&s| s > 0.0).map(|s| s.ln()).sum();
    let reference = (log_sum / strengths.len() as f64).exp();

    strengths
        .iter()
        .map(|&s| {
            if s > 0.0 && reference > 0.0 {
                // f64::round rounds half away from zero
                (BASE_DISPLAY_RATING + DISPLAY_SCALE * (s / reference).log10()).round() as i32
            } else {
                BASE_DISPLAY_RATING as i32
            }
        })
        .collect()
}

/// Probability that the competitor rated `rating_a` beats the one rated `rating_b`.
pub fn expected_score(rating_a: i32, rating_b: i32) -> f64 {
    1.0 / (1.0 + 10f64.powf(f64::from(rating_b - rating_a) / DISPLAY_SCALE))
}

/// Probability that `a` beats `b` given a display-rating map.
pub fn predict_win_probability(
    ratings: &BTreeMap<CompetitorId, i32>,
    a: &str,
    b: &str,
) -> Result<f64, EstimateError> {
    let rating = |id: &str| {
        ratings
            .get(id)
            .copied()
            .ok_or_else(|| EstimateError::UnknownCompetitor(id.to_string()))
    };
    Ok(expected_score(rating(a)?, rating(b)?))
}
