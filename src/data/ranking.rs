use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::core::Year;

use super::bundle::HappinessRow;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankingEntry {
    pub country: String,
    pub score: f64,
}

/// Countries of one year ordered by happiness score, best first.
///
/// Order comes from the source table and is never recomputed; position + 1
/// is the rank.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HappinessRanking {
    year: Year,
    entries: Vec<RankingEntry>,
}

impl HappinessRanking {
    /// Builds the ranking from source rows, dropping rows whose score does not parse.
    #[must_use]
    pub fn from_rows(year: Year, rows: &[HappinessRow]) -> Self {
        let entries: Vec<RankingEntry> = rows
            .iter()
            .filter(|row| !row.country.trim().is_empty())
            .filter_map(|row| {
                row.score.parse().map(|score| RankingEntry {
                    country: row.country.clone(),
                    score,
                })
            })
            .collect();
        if entries.len() != rows.len() {
            warn!(
                %year,
                dropped = rows.len() - entries.len(),
                "dropping happiness rows without a country or a parsable score"
            );
        }
        Self { year, entries }
    }

    #[must_use]
    pub fn empty(year: Year) -> Self {
        Self {
            year,
            entries: Vec::new(),
        }
    }

    #[must_use]
    pub fn year(&self) -> Year {
        self.year
    }

    #[must_use]
    pub fn entries(&self) -> &[RankingEntry] {
        &self.entries
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// First `count` entries (the happiest countries).
    #[must_use]
    pub fn top(&self, count: usize) -> &[RankingEntry] {
        &self.entries[..count.min(self.entries.len())]
    }

    /// Last `count` entries, still in rank order (the unhappiest country last).
    #[must_use]
    pub fn bottom(&self, count: usize) -> &[RankingEntry] {
        let start = self.entries.len().saturating_sub(count);
        &self.entries[start..]
    }

    /// 1-based rank of `country`, if ranked this year.
    #[must_use]
    pub fn rank_of(&self, country: &str) -> Option<usize> {
        self.entries
            .iter()
            .position(|entry| entry.country == country)
            .map(|position| position + 1)
    }
}
