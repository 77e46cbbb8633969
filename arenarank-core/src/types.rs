use std::collections::{BTreeMap, HashMap};

use crate::error::EstimateError;

/// Opaque competitor identifier (e.g. a model id).
pub type CompetitorId = String;

/// Result of a single match, relative to the order the two competitors were named in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Outcome {
    /// The first-named competitor (`a`) won.
    #[cfg_attr(feature = "serde", serde(rename = "A"))]
    A,
    /// The second-named competitor (`b`) won.
    #[cfg_attr(feature = "serde", serde(rename = "B"))]
    B,
    #[cfg_attr(feature = "serde", serde(rename = "tie"))]
    Tie,
}

/// One recorded match between two competitors.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MatchOutcome {
    pub a: CompetitorId,
    pub b: CompetitorId,
    pub result: Outcome,
}

impl MatchOutcome {
    pub fn new(a: impl Into<CompetitorId>, b: impl Into<CompetitorId>, result: Outcome) -> Self {
        MatchOutcome { a: a.into(), b: b.into(), result }
    }

    /// Whether `id` played in this match.
    pub fn involves(&self, id: &str) -> bool {
        self.a == id || self.b == id
    }
}

/// Fitted display ratings plus convergence metadata.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FitResult {
    pub ratings: BTreeMap<CompetitorId, i32>,
    /// Number of fixed-point sweeps performed.
    pub iterations: usize,
    /// `false` when `max_iterations` ran out before the change fell below the threshold.
    pub converged: bool,
}

/// Observed record of one competitor, independent of any fitted model.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WinRecord {
    pub wins: u32,
    pub losses: u32,
    pub ties: u32,
    /// `(wins + 0.5 * ties) / total`, or 0 with no matches.
    pub win_rate: f64,
}

impl WinRecord {
    pub fn total_matches(&self) -> u32 {
        self.wins + self.losses + self.ties
    }
}

/// Internal indexed match: (index of a, index of b, result).
pub(crate) type IndexedMatch = (usize, usize, Outcome);

/// Maps between caller-provided competitor ids and internal 0..N indices.
#[derive(Debug, Clone)]
pub(crate) struct IdMap {
    ids: Vec<CompetitorId>,
    id_to_idx: HashMap<CompetitorId, usize>,
}

impl IdMap {
    pub fn from_ids<S: AsRef<str>>(ids: &[S]) -> Result<Self, EstimateError> {
        let mut id_to_idx = HashMap::with_capacity(ids.len());
        for (idx, id) in ids.iter().enumerate() {
            let id = id.as_ref();
            if id_to_idx.insert(id.to_string(), idx).is_some() {
                return Err(EstimateError::DuplicateCompetitor(id.to_string()));
            }
        }
        Ok(IdMap {
            ids: ids.iter().map(|id| id.as_ref().to_string()).collect(),
            id_to_idx,
        })
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn to_idx(&self, id: &str) -> Result<usize, EstimateError> {
        self.id_to_idx
            .get(id)
            .copied()
            .ok_or_else(|| EstimateError::UnknownCompetitor(id.to_string()))
    }

    pub fn to_id(&self, idx: usize) -> &str {
        &self.ids[idx]
    }

    pub fn ids(&self) -> &[CompetitorId] {
        &self.ids
    }

    pub fn convert_matches(&self, matches: &[MatchOutcome]) -> Result<Vec<IndexedMatch>, EstimateError> {
        matches
            .iter()
            .map(|m| {
                if m.a == m.b {
                    return Err(EstimateError::SelfMatch(m.a.clone()));
                }
                Ok((self.to_idx(&m.a)?, self.to_idx(&m.b)?, m.result))
            })
            .collect()
    }
}
