/// arenarank-core: Pure-computation rating engine for head-to-head arenas.
///
/// Match history → Bradley-Terry strengths → display ratings (1500-centered, 400 points
/// per 10x strength). No IO, no HTTP, no persistence — just math.
///
/// Competitors are identified by caller-provided string IDs. The crate maps them to
/// dense array indices once, at construction; callers never see the indices.
///
/// # Quick start
///
/// ```rust
/// use arenarank_core::{predict_win_probability, MatchOutcome, Outcome, RatingEstimator};
///
/// let models = ["gpt", "claude", "gemini"];
/// let history = vec![
///     MatchOutcome::new("gpt", "claude", Outcome::B),
///     MatchOutcome::new("claude", "gemini", Outcome::A),
///     MatchOutcome::new("gemini", "gpt", Outcome::Tie),
/// ];
///
/// let estimator = RatingEstimator::new(&models, &history).unwrap();
/// let fit = estimator.estimate();
///
/// for (model, rating) in &fit.ratings {
///     println!("{model}: {rating}");
/// }
/// let p = predict_win_probability(&fit.ratings, "claude", "gpt").unwrap();
/// assert!(p > 0.5);
/// ```

mod bradley_terry;
pub mod constants;
pub mod display;
pub mod error;
pub mod estimator;
pub mod leaderboard;
pub mod synthetic;
mod tally;
pub mod types;
pub mod win_rate;

// Re-export primary public API at crate root.
pub use display::{expected_score, predict_win_probability, to_display_ratings};
pub use error::EstimateError;
pub use estimator::{EstimatorOptions, RatingEstimator};
pub use leaderboard::{Leaderboard, LeaderboardEntry};
pub use types::{CompetitorId, FitResult, MatchOutcome, Outcome, WinRecord};
pub use win_rate::calculate_win_rate;
