/// Iterative Maximum Likelihood Estimation for the Bradley-Terry model.
///
/// Zermelo / minorization-maximization fixed point with a synchronous (Jacobi)
/// sweep: every update in a sweep reads the previous sweep's strengths.
/// Internal module — operates on pre-mapped `usize` indices, not caller IDs.
use tracing::trace;

use crate::constants::INITIAL_STRENGTH;
use crate::tally::PairwiseTally;

pub(crate) struct BradleyTerry {
    tally: PairwiseTally,
    /// Total win-equivalents per competitor (precomputed, constant across sweeps).
    total_wins: Vec<f64>,
    /// Current strengths. Sum to `len()` after every sweep.
    pub scores: Vec<f64>,
}

/// Outcome of the fixed-point loop.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct Convergence {
    pub iterations: usize,
    pub converged: bool,
    /// Largest per-competitor change in the last sweep.
    pub max_change: f64,
}

impl BradleyTerry {
    pub fn new(tally: PairwiseTally) -> Self {
        let n = tally.len();
        let total_wins = (0..n).map(|i| tally.total_wins(i)).collect();

        BradleyTerry {
            tally,
            total_wins,
            scores: vec![INITIAL_STRENGTH; n],
        }
    }

    pub fn len(&self) -> usize {
        self.scores.len()
    }

    /// One sweep. Returns the new (unnormalized) strengths and the largest
    /// absolute change against the current snapshot.
    fn run_iteration(&self) -> (Vec<f64>, f64) {
        let n = self.len();
        let mut new_scores = vec![0.0; n];
        let mut max_change = 0.0_f64;

        for i in 0..n {
            let score_i = self.scores[i];
            let mut denominator = 0.0;

            for (j, &games) in self.tally.counts_row(i).iter().enumerate() {
                if j == i || games == 0 {
                    continue;
                }
                let pair_strength = score_i + self.scores[j];
                if pair_strength > 0.0 {
                    denominator += games as f64 / pair_strength;
                }
            }

            new_scores[i] = if denominator > 0.0 {
                self.total_wins[i] / denominator
            } else {
                score_i
            };

            max_change = max_change.max((new_scores[i] - score_i).abs());
        }

        (new_scores, max_change)
    }

    /// Rescale so strengths sum to the roster size. The likelihood is invariant
    /// under a common positive factor, so this pins the scale.
    fn normalize_scores(scores: &mut [f64]) {
        let sum: f64 = scores.iter().sum();
        let factor = if sum > 0.0 { scores.len() as f64 / sum } else { 1.0 };
        for score in scores.iter_mut() {
            *score *= factor;
        }
    }

    /// Run one sweep followed by renormalization. Returns the sweep's max change.
    pub fn step(&mut self) -> f64 {
        let (mut new_scores, max_change) = self.run_iteration();
        Self::normalize_scores(&mut new_scores);
        self.scores = new_scores;
        max_change
    }

    /// Iterate until the max change drops below `threshold` or `max_iterations` sweeps are done.
    pub fn calculate_scores(&mut self, max_iterations: usize, threshold: f64) -> Convergence {
        let mut iterations = 0;
        let mut max_change = 0.0;

        while iterations < max_iterations {
            max_change = self.step();
            iterations += 1;
            trace!(iteration = iterations, max_change, "bradley-terry sweep");

            if max_change < threshold {
                return Convergence { iterations, converged: true, max_change };
            }
        }

        Convergence { iterations, converged: false, max_change }
    }
}
