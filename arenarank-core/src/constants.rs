/// Initial Bradley-Terry strength assigned to every competitor before the first sweep.
/// Strengths are renormalized to sum to the roster size, so 1.0 is the neutral value.
pub const INITIAL_STRENGTH: f64 = 1.0;

/// Default cap on fixed-point sweeps. Doubles as the timeout: an oscillating
/// history stops here with `converged = false`.
pub const DEFAULT_MAX_ITERATIONS: usize = 200;

/// Default convergence threshold on the largest per-sweep strength change.
pub const DEFAULT_CONVERGENCE_THRESHOLD: f64 = 0.0001;

/// Display rating assigned to a competitor at the geometric-mean strength.
pub const BASE_DISPLAY_RATING: f64 = 1500.0;

/// Display points per factor of ten in strength ratio.
/// Matches the usual head-to-head convention: +400 means 10:1 odds.
pub const DISPLAY_SCALE: f64 = 400.0;

/// Matches after which `calculate_confidence` saturates at 1.0.
pub const FULL_CONFIDENCE_MATCHES: f64 = 100.0;
