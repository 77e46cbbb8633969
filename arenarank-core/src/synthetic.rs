/// Synthetic match histories drawn from known Bradley-Terry strengths.
///
/// The RNG is always supplied by the caller; seed it for reproducible runs.
use rand::Rng;

use crate::types::{CompetitorId, MatchOutcome, Outcome};

/// Ground-truth strengths `2^z`, `z ~ N(0, 1)`, normalized to geometric mean 1.
pub fn random_strengths<R: Rng>(rng: &mut R, n: usize) -> Vec<f64> {
    if n == 0 {
        return Vec::new();
    }

    // Box-Muller for N(0,1) samples
    let mut strengths: Vec<f64> = (0..n)
        .map(|_| {
            let u1: f64 = rng.random::<f64>().max(1e-10);
            let u2: f64 = rng.random();
            let z = (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos();
            2.0_f64.powf(z)
        })
        .collect();

    let log_mean = strengths.iter().map(|s| s.ln()).sum::<f64>() / n as f64;
    for s in &mut strengths {
        *s /= log_mean.exp();
    }
    strengths
}

/// Draw `matches` outcomes between uniformly chosen distinct pairs.
///
/// Each match is a tie with probability `tie_rate`; otherwise `a` wins with
/// probability `s_a / (s_a + s_b)`.
///
/// Panics if `roster` and `strengths` differ in length, or if the roster has
/// fewer than two competitors while `matches > 0`.
pub fn generate_history<R: Rng>(
    rng: &mut R,
    roster: &[CompetitorId],
    strengths: &[f64],
    matches: usize,
    tie_rate: f64,
) -> Vec<MatchOutcome> {
    assert_eq!(roster.len(), strengths.len(), "one strength per competitor");
    if matches == 0 {
        return Vec::new();
    }
    assert!(roster.len() >= 2, "need at least two competitors to play a match");

    let tie_rate = tie_rate.clamp(0.0, 1.0);
    let n = roster.len();

    (0..matches)
        .map(|_| {
            let a = rng.random_range(0..n);
            // offset in 1..n keeps b != a
            let b = (a + rng.random_range(1..n)) % n;

            let result = if rng.random_bool(tie_rate) {
                Outcome::Tie
            } else if rng.random_bool(strengths[a] / (strengths[a] + strengths[b])) {
                Outcome::A
            } else {
                Outcome::B
            };

            MatchOutcome::new(roster[a].clone(), roster[b].clone(), result)
        })
        .collect()
}
