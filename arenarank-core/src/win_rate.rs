/// Observed win/loss/tie record. A direct tally over the history, never derived
/// from a fitted model, so it serves as a cross-check on the ratings.
use crate::types::{MatchOutcome, Outcome, WinRecord};

pub fn calculate_win_rate(competitor: &str, history: &[MatchOutcome]) -> WinRecord {
    let mut record = WinRecord::default();

    for m in history {
        let won = if m.a == competitor {
            match m.result {
                Outcome::A => Some(true),
                Outcome::B => Some(false),
                Outcome::Tie => None,
            }
        } else if m.b == competitor {
            match m.result {
                Outcome::B => Some(true),
                Outcome::A => Some(false),
                Outcome::Tie => None,
            }
        } else {
            continue;
        };

        match won {
            Some(true) => record.wins += 1,
            Some(false) => record.losses += 1,
            None => record.ties += 1,
        }
    }

    let total = record.total_matches();
    if total > 0 {
        record.win_rate = (record.wins as f64 + 0.5 * record.ties as f64) / total as f64;
    }
    record
}
