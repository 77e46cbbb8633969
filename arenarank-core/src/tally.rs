/// Dense pairwise win tallies and comparison counts.
///
/// Internal module — operates on pre-mapped `usize` indices, not caller IDs.
/// Both matrices are flat row-major `n * n` vectors; the diagonal stays zero.
use crate::types::{IndexedMatch, Outcome};

#[derive(Debug, Clone)]
pub(crate) struct PairwiseTally {
    n: usize,
    /// wins[i * n + j] = win-equivalents of i over j (win = 1.0, tie = 0.5).
    wins: Vec<f64>,
    /// counts[i * n + j] = matches played between i and j. Symmetric.
    counts: Vec<u32>,
}

impl PairwiseTally {
    pub fn new(n: usize, matches: &[IndexedMatch]) -> Self {
        let mut wins = vec![0.0; n * n];
        let mut counts = vec![0u32; n * n];

        for &(a, b, result) in matches {
            debug_assert!(a < n && b < n && a != b);

            match result {
                Outcome::A => wins[a * n + b] += 1.0,
                Outcome::B => wins[b * n + a] += 1.0,
                Outcome::Tie => {
                    wins[a * n + b] += 0.5;
                    wins[b * n + a] += 0.5;
                }
            }

            counts[a * n + b] += 1;
            counts[b * n + a] += 1;
        }

        PairwiseTally { n, wins, counts }
    }

    pub fn len(&self) -> usize {
        self.n
    }

    #[cfg(test)]
    pub fn wins(&self, i: usize, j: usize) -> f64 {
        self.wins[i * self.n + j]
    }

    #[cfg(test)]
    pub fn count(&self, i: usize, j: usize) -> u32 {
        self.counts[i * self.n + j]
    }

    /// Sum of i's win-equivalents over every other competitor.
    pub fn total_wins(&self, i: usize) -> f64 {
        self.wins[i * self.n..(i + 1) * self.n].iter().sum()
    }

    /// Row of comparison counts for competitor i.
    pub fn counts_row(&self, i: usize) -> &[u32] {
        &self.counts[i * self.n..(i + 1) * self.n]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn outcome_strategy() -> impl Strategy<Value = Outcome> {
        prop_oneof![Just(Outcome::A), Just(Outcome::B), Just(Outcome::Tie)]
    }

    fn history_strategy(n: usize) -> impl Strategy<Value = Vec<IndexedMatch>> {
        prop::collection::vec((0..n, 1..n, outcome_strategy()), 0..200).prop_map(move |raw| {
            raw.into_iter()
                // offset keeps b != a without rejecting samples
                .map(|(a, offset, result)| (a, (a + offset) % n, result))
                .collect()
        })
    }

    #[test]
    fn test_tie_splits_half_to_each_side() {
        let tally = PairwiseTally::new(2, &[(0, 1, Outcome::Tie)]);
        assert_eq!(tally.wins(0, 1), 0.5);
        assert_eq!(tally.wins(1, 0), 0.5);
        assert_eq!(tally.count(0, 1), 1);
    }

    #[test]
    fn test_decisive_results_credit_the_winner() {
        let matches = vec![(0, 1, Outcome::A), (0, 1, Outcome::B), (2, 0, Outcome::B)];
        let tally = PairwiseTally::new(3, &matches);

        assert_eq!(tally.wins(0, 1), 1.0);
        assert_eq!(tally.wins(1, 0), 1.0);
        assert_eq!(tally.wins(0, 2), 1.0);
        assert_eq!(tally.wins(2, 0), 0.0);
        assert_eq!(tally.total_wins(0), 2.0);
        assert_eq!(tally.counts_row(0), &[0, 2, 1]);
    }

    proptest! {
        #[test]
        fn prop_counts_are_symmetric(matches in history_strategy(5)) {
            let tally = PairwiseTally::new(5, &matches);
            for i in 0..5 {
                for j in 0..5 {
                    prop_assert_eq!(tally.count(i, j), tally.count(j, i));
                }
            }
        }

        #[test]
        fn prop_tallies_conserve_one_win_per_match(matches in history_strategy(5)) {
            let tally = PairwiseTally::new(5, &matches);
            for i in 0..5 {
                for j in 0..5 {
                    if i == j {
                        continue;
                    }
                    let pair_wins = tally.wins(i, j) + tally.wins(j, i);
                    prop_assert!((pair_wins - tally.count(i, j) as f64).abs() < 1e-12);
                }
            }
        }
    }
}
