//! Dashboard configuration types (gauges and tracked emotions)

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use super::{Result, SentiboardError};

/// Number of entries shown on each side of a leaderboard by default
pub const DEFAULT_LEADERBOARD_SIZE: usize = 3;

/// A named composite of emotions shown as a single dial
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct GaugeDefinition {
    pub name: String,
    pub low_label: String,
    pub high_label: String,
    #[serde(default)]
    pub emotions: Vec<String>,
    /// Emotions that pull the gauge down (contribute `100 - value`)
    #[serde(default)]
    pub inverted_emotions: Vec<String>,
}

impl GaugeDefinition {
    pub fn new(name: &str, low_label: &str, high_label: &str) -> Self {
        Self {
            name: name.to_string(),
            low_label: low_label.to_string(),
            high_label: high_label.to_string(),
            emotions: Vec::new(),
            inverted_emotions: Vec::new(),
        }
    }

    pub fn with_emotions(mut self, emotions: &[&str]) -> Self {
        self.emotions = emotions.iter().map(|e| e.to_string()).collect();
        self
    }

    pub fn with_inverted(mut self, emotions: &[&str]) -> Self {
        self.inverted_emotions = emotions.iter().map(|e| e.to_string()).collect();
        self
    }

    /// Reject definitions the gauge math cannot interpret unambiguously.
    ///
    /// A definition with no emotions at all is valid and always reads neutral.
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(SentiboardError::InvalidArgument(
                "gauge name must not be empty".into(),
            ));
        }

        let mut regular: HashSet<&str> = HashSet::new();
        for emotion in &self.emotions {
            if !regular.insert(emotion.as_str()) {
                return Err(SentiboardError::InvalidArgument(format!(
                    "gauge '{}' lists emotion '{}' twice",
                    self.name, emotion
                )));
            }
        }

        let mut inverted: HashSet<&str> = HashSet::new();
        for emotion in &self.inverted_emotions {
            if regular.contains(emotion.as_str()) {
                return Err(SentiboardError::InvalidArgument(format!(
                    "gauge '{}' lists emotion '{}' as both regular and inverted",
                    self.name, emotion
                )));
            }
            if !inverted.insert(emotion.as_str()) {
                return Err(SentiboardError::InvalidArgument(format!(
                    "gauge '{}' lists inverted emotion '{}' twice",
                    self.name, emotion
                )));
            }
        }

        Ok(())
    }
}

/// A tracked emotion and its display color
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EmotionConfig {
    pub name: String,
    /// CSS-style color, e.g. "#f5c518"
    #[serde(default)]
    pub color: Option<String>,
}

impl EmotionConfig {
    pub fn new(name: &str, color: &str) -> Self {
        Self {
            name: name.to_string(),
            color: Some(color.to_string()),
        }
    }
}

/// Admin-owned configuration passed explicitly into each computation
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DashboardConfig {
    #[serde(default)]
    pub emotions: Vec<EmotionConfig>,
    #[serde(default)]
    pub gauges: Vec<GaugeDefinition>,
    #[serde(default = "default_leaderboard_size")]
    pub leaderboard_size: usize,
}

fn default_leaderboard_size() -> usize {
    DEFAULT_LEADERBOARD_SIZE
}

impl DashboardConfig {
    /// Validate every gauge and the leaderboard size
    pub fn validate(&self) -> Result<()> {
        if self.leaderboard_size == 0 {
            return Err(SentiboardError::InvalidArgument(
                "leaderboardSize must be a positive integer".into(),
            ));
        }
        for gauge in &self.gauges {
            gauge.validate()?;
        }
        Ok(())
    }

    /// Names of the tracked emotions, in configuration order
    pub fn emotion_names(&self) -> Vec<&str> {
        self.emotions.iter().map(|e| e.name.as_str()).collect()
    }
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            emotions: vec![
                EmotionConfig::new("joy", "#f5c518"),
                EmotionConfig::new("sadness", "#4a78c2"),
                EmotionConfig::new("anger", "#d9412b"),
                EmotionConfig::new("fear", "#7b4fa0"),
                EmotionConfig::new("surprise", "#f08a24"),
                EmotionConfig::new("disgust", "#5b8c3a"),
            ],
            gauges: vec![
                GaugeDefinition::new("Mood", "Gloomy", "Cheerful")
                    .with_emotions(&["joy"])
                    .with_inverted(&["sadness"]),
                GaugeDefinition::new("Temper", "Calm", "Heated")
                    .with_emotions(&["anger", "disgust"]),
                GaugeDefinition::new("Anxiety", "Relaxed", "Anxious")
                    .with_emotions(&["fear", "surprise"]),
            ],
            leaderboard_size: DEFAULT_LEADERBOARD_SIZE,
        }
    }
}
