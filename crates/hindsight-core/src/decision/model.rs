//! Decision domain models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};

/// A recorded decision as returned by the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Decision {
    #[serde(rename = "_id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    pub title: String,
    pub context: String,
    pub reasoning: String,
    #[serde(default)]
    pub assumptions: Vec<String>,
    pub expected_outcome: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub actual_outcome: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub success_level: Option<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unexpected_factors: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ai_analysis: Option<AiAnalysis>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Decision {
    /// Whether an actual outcome has been recorded. An empty string does not count.
    pub fn has_outcome(&self) -> bool {
        self.actual_outcome.as_deref().is_some_and(|s| !s.is_empty())
    }

    /// Whether the server has attached an AI analysis.
    pub fn has_analysis(&self) -> bool {
        self.ai_analysis.is_some()
    }

    /// The outcome can only be recorded once.
    pub fn can_record_outcome(&self) -> bool {
        !self.has_outcome()
    }

    /// Analysis is offered once an outcome exists and no analysis is attached yet.
    pub fn can_trigger_analysis(&self) -> bool {
        self.has_outcome() && !self.has_analysis()
    }

    /// Outcome badge text.
    pub fn status_label(&self) -> &'static str {
        if self.has_outcome() {
            "Completed"
        } else {
            "Pending Outcome"
        }
    }

    /// Analysis badge text.
    pub fn analysis_label(&self) -> &'static str {
        if self.has_analysis() {
            "Analyzed"
        } else {
            "Not Analyzed"
        }
    }
}

/// Server-computed comparison between expected and actual outcome.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AiAnalysis {
    #[serde(default)]
    pub comparison: String,
    #[serde(default)]
    pub invalid_assumptions: Vec<String>,
    #[serde(default)]
    pub lessons_learned: Vec<String>,
    #[serde(default)]
    pub suggestions: Vec<String>,
}

/// Payload for `POST /decisions`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewDecision {
    pub title: String,
    pub context: String,
    pub reasoning: String,
    pub assumptions: Vec<String>,
    pub expected_outcome: String,
}

/// Payload for `PUT /decisions/:id/outcome`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OutcomeUpdate {
    pub actual_outcome: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub success_level: Option<SuccessLevel>,
    #[serde(default)]
    pub unexpected_factors: Vec<String>,
}

/// Subjective 1-5 rating of how well the actual outcome matched expectations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "u8")]
pub struct SuccessLevel(u8);

impl SuccessLevel {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 5;

    /// Build a level, rejecting anything outside 1-5.
    pub fn new(level: i64) -> CoreResult<Self> {
        if (i64::from(Self::MIN)..=i64::from(Self::MAX)).contains(&level) {
            Ok(Self(level as u8))
        } else {
            Err(CoreError::InvalidSuccessLevel(level))
        }
    }

    pub fn value(self) -> u8 {
        self.0
    }

    pub fn label(self) -> &'static str {
        success_level_label(self.0)
    }

    /// All levels in ascending order, for pickers.
    pub fn all() -> impl Iterator<Item = SuccessLevel> {
        (Self::MIN..=Self::MAX).map(SuccessLevel)
    }
}

impl TryFrom<i64> for SuccessLevel {
    type Error = CoreError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<SuccessLevel> for u8 {
    fn from(level: SuccessLevel) -> Self {
        level.0
    }
}

impl std::fmt::Display for SuccessLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} - {}", self.0, self.label())
    }
}

/// Display text for a raw success level as stored on a decision.
pub fn success_level_label(level: u8) -> &'static str {
    match level {
        1 => "Complete Failure",
        2 => "Mostly Failed",
        3 => "Mixed Results",
        4 => "Mostly Successful",
        5 => "Complete Success",
        _ => "Unknown",
    }
}

/// Body returned by delete and analyze calls.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Acknowledgement {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}
