//! Derived, per-query output types

use serde::{Deserialize, Serialize};

use super::EmotionMap;

/// Mean and median per emotion over a set of combined post scores
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct AggregateResult {
    pub averages: EmotionMap,
    pub medians: EmotionMap,
}

impl AggregateResult {
    pub fn is_empty(&self) -> bool {
        self.averages.is_empty()
    }
}

/// A gauge evaluated against an average map
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct GaugeReading {
    pub name: String,
    pub low_label: String,
    pub high_label: String,
    pub value: u32,
    /// False when no referenced emotion had data and `value` is the neutral default
    pub has_signal: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct LeaderboardEntry {
    pub user_id: String,
    pub score: u32,
}

/// Extremal users for one emotion
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct Leaderboard {
    pub emotion: String,
    pub highest: Vec<LeaderboardEntry>,
    pub lowest: Vec<LeaderboardEntry>,
}

/// One calendar bucket of a trend series
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TrendPoint {
    /// `YYYY-MM-DD` (daily, weekly) or `YYYY-MM` (monthly)
    pub period_key: String,
    pub post_count: u64,
    pub averages: EmotionMap,
}

/// Summary statistics for one tracked account
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct UserSummary {
    pub user_id: String,
    pub post_count: u64,
    pub averages: EmotionMap,
    pub medians: EmotionMap,
}

/// Averages produced by a single model
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ModelSummary {
    pub model_id: String,
    pub post_count: u64,
    pub averages: EmotionMap,
}
