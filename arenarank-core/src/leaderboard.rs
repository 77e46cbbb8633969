/// Leaderboard assembly: fitted rating joined with the observed record and
/// sample-size confidence for every roster member.
use crate::estimator::RatingEstimator;
use crate::types::CompetitorId;
use crate::win_rate::calculate_win_rate;

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LeaderboardEntry {
    /// 1-based position.
    pub rank: usize,
    pub competitor: CompetitorId,
    pub rating: i32,
    pub wins: u32,
    pub losses: u32,
    pub ties: u32,
    pub win_rate: f64,
    pub confidence: f64,
    pub total_matches: u32,
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Leaderboard {
    /// Sorted by rating descending; equal ratings keep roster order.
    pub entries: Vec<LeaderboardEntry>,
    /// Matches in the history the board was fitted on.
    pub total_matches: usize,
    pub iterations: usize,
    pub converged: bool,
}

impl Leaderboard {
    /// Fit `estimator` and rank its roster. `limit` truncates after sorting.
    pub fn from_estimator(estimator: &RatingEstimator, limit: Option<usize>) -> Self {
        let fit = estimator.estimate();
        let history = estimator.history();

        let mut entries: Vec<LeaderboardEntry> = estimator
            .models()
            .iter()
            .map(|id| {
                let record = calculate_win_rate(id, history);
                LeaderboardEntry {
                    rank: 0,
                    competitor: id.clone(),
                    rating: fit.ratings[id],
                    wins: record.wins,
                    losses: record.losses,
                    ties: record.ties,
                    win_rate: record.win_rate,
                    confidence: estimator.calculate_confidence(id),
                    total_matches: record.total_matches(),
                }
            })
            .collect();

        // stable: equal ratings keep roster order
        entries.sort_by(|a, b| b.rating.cmp(&a.rating));
        if let Some(limit) = limit {
            entries.truncate(limit);
        }
        for (i, entry) in entries.iter_mut().enumerate() {
            entry.rank = i + 1;
        }

        Leaderboard {
            entries,
            total_matches: history.len(),
            iterations: fit.iterations,
            converged: fit.converged,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{MatchOutcome, Outcome};

    fn history() -> Vec<MatchOutcome> {
        let mut history = Vec::new();
        for _ in 0..8 {
            history.push(MatchOutcome::new("mid", "low", Outcome::A));
            history.push(MatchOutcome::new("top", "mid", Outcome::A));
        }
        for _ in 0..2 {
            history.push(MatchOutcome::new("low", "mid", Outcome::A));
            history.push(MatchOutcome::new("mid", "top", Outcome::A));
            history.push(MatchOutcome::new("top", "low", Outcome::Tie));
        }
        history
    }

    #[test]
    fn test_sorted_and_ranked() {
        let estimator = RatingEstimator::new(&["low", "mid", "top"], &history()).unwrap();
        let board = Leaderboard::from_estimator(&estimator, None);

        let order: Vec<&str> = board.entries.iter().map(|e| e.competitor.as_str()).collect();
        assert_eq!(order, vec!["top", "mid", "low"]);
        assert_eq!(board.entries.iter().map(|e| e.rank).collect::<Vec<_>>(), vec![1, 2, 3]);
        assert_eq!(board.total_matches, 22);
        assert!(board.converged);

        let top = &board.entries[0];
        assert_eq!((top.wins, top.losses, top.ties), (8, 2, 2));
        assert_eq!(top.total_matches, 12);
        assert!((top.confidence - 0.12).abs() < 1e-12);
    }

    #[test]
    fn test_limit_truncates_after_sorting() {
        let estimator = RatingEstimator::new(&["low", "mid", "top"], &history()).unwrap();
        let board = Leaderboard::from_estimator(&estimator, Some(1));

        assert_eq!(board.entries.len(), 1);
        assert_eq!(board.entries[0].competitor, "top");
        assert_eq!(board.entries[0].rank, 1);
    }

    #[test]
    fn test_equal_ratings_keep_roster_order() {
        let estimator = RatingEstimator::new(&["b", "a", "c"], &[]).unwrap();
        let board = Leaderboard::from_estimator(&estimator, None);

        let order: Vec<&str> = board.entries.iter().map(|e| e.competitor.as_str()).collect();
        assert_eq!(order, vec!["b", "a", "c"]);
    }
}
