/// History file format: roster plus match records, each optionally tagged with a category.
///
/// ```json
/// { "models": ["a", "b"], "matches": [{ "a": "a", "b": "b", "result": "A", "category": "admet" }] }
/// ```
use anyhow::{Context, Result};
use arenarank_core::MatchOutcome;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoryRecord {
    #[serde(flatten)]
    pub outcome: MatchOutcome,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoryFile {
    pub models: Vec<String>,
    #[serde(default)]
    pub matches: Vec<HistoryRecord>,
}

impl HistoryFile {
    /// Outcomes in file order, restricted to `category` when given.
    pub fn outcomes(&self, category: Option<&str>) -> Vec<MatchOutcome> {
        self.matches
            .iter()
            .filter(|r| category.is_none() || r.category.as_deref() == category)
            .map(|r| r.outcome.clone())
            .collect()
    }

    /// Match count per category. Untagged matches are not counted.
    pub fn category_counts(&self) -> BTreeMap<&str, usize> {
        let mut counts = BTreeMap::new();
        for category in self.matches.iter().filter_map(|r| r.category.as_deref()) {
            *counts.entry(category).or_insert(0) += 1;
        }
        counts
    }
}

pub fn parse_history(content: &str) -> Result<HistoryFile> {
    Ok(serde_json::from_str(content)?)
}

pub fn load_history(path: &Path) -> Result<HistoryFile> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read history file {}", path.display()))?;
    parse_history(&content).with_context(|| format!("Failed to parse history file {}", path.display()))
}
