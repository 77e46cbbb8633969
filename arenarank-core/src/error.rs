//! Error types for estimator construction and rating lookups.

/// Input rejected before any fitting happens.
///
/// Non-convergence is not an error: it is reported through `FitResult::converged`.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum EstimateError {
    #[error("duplicate competitor id in roster: {0}")]
    DuplicateCompetitor(String),

    #[error("unknown competitor id: {0}")]
    UnknownCompetitor(String),

    #[error("competitor {0} cannot play against itself")]
    SelfMatch(String),

    #[error("invalid estimator options: {reason}")]
    InvalidOptions { reason: String },
}
