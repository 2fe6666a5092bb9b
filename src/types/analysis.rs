//! Per-post emotion score types

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Lowest score any emotion may carry
pub const MIN_SCORE: f64 = 0.0;
/// Highest score any emotion may carry
pub const MAX_SCORE: f64 = 100.0;

/// Raw model output: emotion name → score in `[0, 100]`
pub type RawScores = BTreeMap<String, f64>;

/// Derived scores: emotion name → rounded score in `[0, 100]`.
/// An emotion missing from the map means "no data", never zero.
pub type EmotionMap = BTreeMap<String, u32>;

/// Round a derived value to the nearest integer and keep it inside `[0, 100]`
pub fn round_score(value: f64) -> u32 {
    value.round().clamp(MIN_SCORE, MAX_SCORE) as u32
}

/// Whether a raw model score is usable
pub fn is_valid_score(value: f64) -> bool {
    value.is_finite() && (MIN_SCORE..=MAX_SCORE).contains(&value)
}

/// One model's scoring of one post
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PostAnalysis {
    pub post_id: String,
    pub user_id: String,
    pub model_id: String,
    pub timestamp: DateTime<Utc>,
    #[serde(default)]
    pub scores: RawScores,
}

/// Cross-model combined scores for a single post
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CombinedPostScore {
    pub post_id: String,
    pub user_id: String,
    pub timestamp: DateTime<Utc>,
    pub scores: EmotionMap,
}

impl CombinedPostScore {
    /// Calendar date of the post (UTC)
    pub fn date(&self) -> NaiveDate {
        self.timestamp.date_naive()
    }
}
