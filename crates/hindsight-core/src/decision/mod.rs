//! Decision records and the statistics derived from them.

pub mod model;

use model::Decision;
use serde::Serialize;

/// Counts shown at the top of the dashboard.
///
/// Purely presentational: recomputed from every fetched list, never cached.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct DashboardStats {
    pub total: usize,
    pub outcomes_recorded: usize,
    pub ai_analyses: usize,
}

impl DashboardStats {
    /// Compute the counts for a fetched list.
    pub fn from_decisions(decisions: &[Decision]) -> Self {
        Self {
            total: decisions.len(),
            outcomes_recorded: decisions.iter().filter(|d| d.has_outcome()).count(),
            ai_analyses: decisions.iter().filter(|d| d.has_analysis()).count(),
        }
    }
}

/// Trim free-text list entries and drop the blank ones.
pub fn clean_entries<I, S>(entries: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    entries
        .into_iter()
        .map(|s| s.as_ref().trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}
