/// Rating estimator: roster + match history in, display ratings out.
///
/// Pure computation — no IO, no shared state. Every call to `estimate()` refits
/// from the full history; there is no incremental update.
///
/// Competitors are identified by caller-provided string IDs.
use std::collections::BTreeMap;

use tracing::debug;

use crate::bradley_terry::BradleyTerry;
use crate::constants::{DEFAULT_CONVERGENCE_THRESHOLD, DEFAULT_MAX_ITERATIONS, FULL_CONFIDENCE_MATCHES};
use crate::display::to_display_ratings;
use crate::error::EstimateError;
use crate::tally::PairwiseTally;
use crate::types::{CompetitorId, FitResult, IdMap, IndexedMatch, MatchOutcome};

/// Fitting options. Both fields must be positive.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EstimatorOptions {
    pub max_iterations: usize,
    pub convergence_threshold: f64,
}

impl Default for EstimatorOptions {
    fn default() -> Self {
        EstimatorOptions {
            max_iterations: DEFAULT_MAX_ITERATIONS,
            convergence_threshold: DEFAULT_CONVERGENCE_THRESHOLD,
        }
    }
}

impl EstimatorOptions {
    fn validate(&self) -> Result<(), EstimateError> {
        if self.max_iterations == 0 {
            return Err(EstimateError::InvalidOptions {
                reason: "max_iterations must be at least 1".to_string(),
            });
        }
        if !(self.convergence_threshold.is_finite() && self.convergence_threshold > 0.0) {
            return Err(EstimateError::InvalidOptions {
                reason: format!(
                    "convergence_threshold must be a positive number, got {}",
                    self.convergence_threshold
                ),
            });
        }
        Ok(())
    }
}

#[derive(Debug, Clone)]
pub struct RatingEstimator {
    id_map: IdMap,
    history: Vec<MatchOutcome>,
    indexed: Vec<IndexedMatch>,
    options: EstimatorOptions,
}

impl RatingEstimator {
    /// Build an estimator with default options.
    ///
    /// Fails if the roster repeats an id, or a match names an id outside the
    /// roster or the same competitor twice.
    pub fn new<S: AsRef<str>>(models: &[S], match_results: &[MatchOutcome]) -> Result<Self, EstimateError> {
        Self::with_options(models, match_results, EstimatorOptions::default())
    }

    pub fn with_options<S: AsRef<str>>(
        models: &[S],
        match_results: &[MatchOutcome],
        options: EstimatorOptions,
    ) -> Result<Self, EstimateError> {
        options.validate()?;
        let id_map = IdMap::from_ids(models)?;
        let indexed = id_map.convert_matches(match_results)?;

        Ok(RatingEstimator {
            id_map,
            history: match_results.to_vec(),
            indexed,
            options,
        })
    }

    pub fn models(&self) -> &[CompetitorId] {
        self.id_map.ids()
    }

    pub fn history(&self) -> &[MatchOutcome] {
        &self.history
    }

    pub fn options(&self) -> EstimatorOptions {
        self.options
    }

    /// Fit strengths and convert them to display ratings.
    pub fn estimate(&self) -> FitResult {
        let n = self.id_map.len();
        if n == 0 {
            return FitResult { ratings: BTreeMap::new(), iterations: 0, converged: true };
        }

        let mut bt = BradleyTerry::new(PairwiseTally::new(n, &self.indexed));
        let convergence = bt.calculate_scores(self.options.max_iterations, self.options.convergence_threshold);

        debug!(
            competitors = n,
            matches = self.indexed.len(),
            iterations = convergence.iterations,
            converged = convergence.converged,
            max_change = convergence.max_change,
            "bradley-terry fit finished"
        );

        let ratings = to_display_ratings(&bt.scores)
            .into_iter()
            .enumerate()
            .map(|(idx, rating)| (self.id_map.to_id(idx).to_string(), rating))
            .collect();

        FitResult {
            ratings,
            iterations: convergence.iterations,
            converged: convergence.converged,
        }
    }

    /// Matches in the stored history involving `competitor`.
    pub fn matches_played(&self, competitor: &str) -> usize {
        self.history.iter().filter(|m| m.involves(competitor)).count()
    }

    /// Sample-size confidence: linear in matches played, saturating at 1.0.
    /// Independent of the fitted rating.
    pub fn calculate_confidence(&self, competitor: &str) -> f64 {
        (self.matches_played(competitor) as f64 / FULL_CONFIDENCE_MATCHES).min(1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::display::predict_win_probability;
    use crate::types::Outcome;

    fn repeat(a: &str, b: &str, result: Outcome, times: usize) -> Vec<MatchOutcome> {
        (0..times).map(|_| MatchOutcome::new(a, b, result)).collect()
    }

    #[test]
    fn test_empty_roster_is_empty_result() {
        let estimator = RatingEstimator::new::<&str>(&[], &[]).unwrap();
        let result = estimator.estimate();
        assert!(result.ratings.is_empty());
        assert_eq!(result.iterations, 0);
    }

    #[test]
    fn test_no_history_fixed_point() {
        let estimator = RatingEstimator::new(&["a", "b", "c", "d"], &[]).unwrap();
        let result = estimator.estimate();

        assert!(result.converged);
        assert_eq!(result.iterations, 1);
        assert!(result.ratings.values().all(|&r| r == 1500));
        assert_eq!(result.ratings.len(), 4);
    }

    #[test]
    fn test_dominant_competitor_rates_higher() {
        let history = repeat("x", "y", Outcome::A, 25);
        let estimator = RatingEstimator::new(&["x", "y"], &history).unwrap();
        let result = estimator.estimate();

        assert!(result.ratings["x"] > result.ratings["y"]);
        assert!(predict_win_probability(&result.ratings, "x", "y").unwrap() > 0.5);
    }

    #[test]
    fn test_perfect_cycle_rates_everyone_equally() {
        let mut history = repeat("A", "B", Outcome::A, 10);
        history.extend(repeat("B", "C", Outcome::A, 10));
        history.extend(repeat("C", "A", Outcome::A, 10));

        let result = RatingEstimator::new(&["A", "B", "C"], &history).unwrap().estimate();

        assert!(result.converged);
        for rating in result.ratings.values() {
            assert_eq!(*rating, 1500);
        }
    }

    #[test]
    fn test_stronger_record_ranks_higher() {
        let mut history = repeat("a", "b", Outcome::A, 12);
        history.extend(repeat("a", "b", Outcome::B, 4));
        history.extend(repeat("b", "c", Outcome::A, 10));
        history.extend(repeat("b", "c", Outcome::B, 6));
        history.extend(repeat("c", "a", Outcome::A, 3));
        history.extend(repeat("c", "a", Outcome::B, 9));
        history.extend(repeat("a", "c", Outcome::Tie, 2));

        let result = RatingEstimator::new(&["a", "b", "c"], &history).unwrap().estimate();

        assert!(result.converged);
        assert!(result.ratings["a"] > result.ratings["b"]);
        assert!(result.ratings["b"] > result.ratings["c"]);
    }

    #[test]
    fn test_iterations_never_exceed_cap() {
        let mut history = repeat("a", "b", Outcome::A, 30);
        history.extend(repeat("a", "b", Outcome::B, 1));
        history.extend(repeat("b", "c", Outcome::A, 30));
        history.extend(repeat("b", "c", Outcome::B, 1));

        let options = EstimatorOptions { max_iterations: 5, convergence_threshold: 1e-12 };
        let result = RatingEstimator::with_options(&["a", "b", "c"], &history, options)
            .unwrap()
            .estimate();

        assert!(result.iterations <= 5);
        assert!(!result.converged);
    }

    #[test]
    fn test_confidence_saturates() {
        let mut history = repeat("a", "b", Outcome::A, 120);
        history.extend(repeat("c", "b", Outcome::Tie, 30));
        let estimator = RatingEstimator::new(&["a", "b", "c", "d"], &history).unwrap();

        assert_eq!(estimator.calculate_confidence("a"), 1.0);
        assert_eq!(estimator.calculate_confidence("b"), 1.0);
        assert!((estimator.calculate_confidence("c") - 0.3).abs() < 1e-12);
        assert_eq!(estimator.calculate_confidence("d"), 0.0);
    }

    #[test]
    fn test_rejects_bad_options() {
        let zero_cap = EstimatorOptions { max_iterations: 0, ..Default::default() };
        assert!(matches!(
            RatingEstimator::with_options(&["a"], &[], zero_cap),
            Err(EstimateError::InvalidOptions { .. })
        ));

        let nan_threshold = EstimatorOptions { convergence_threshold: f64::NAN, ..Default::default() };
        assert!(matches!(
            RatingEstimator::with_options(&["a"], &[], nan_threshold),
            Err(EstimateError::InvalidOptions { .. })
        ));
    }

    #[test]
    fn test_rejects_out_of_roster_match() {
        let history = vec![MatchOutcome::new("a", "zed", Outcome::A)];
        assert_eq!(
            RatingEstimator::new(&["a", "b"], &history).unwrap_err(),
            EstimateError::UnknownCompetitor("zed".into())
        );
    }
}
