//! Loading stored analyses and dashboard configuration from disk

mod config;

pub use config::ConfigLoader;

use chrono::{DateTime, Utc};
use rayon::prelude::*;
use serde::Deserialize;
use std::collections::{BTreeMap, HashSet};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

use crate::types::{is_valid_score, PostAnalysis, RawScores, Result, SentiboardError};

/// One stored JSONL line (timestamp borrowed from the line buffer)
#[derive(Deserialize)]
struct AnalysisLine<'a> {
    #[serde(rename = "postId")]
    post_id: String,
    #[serde(rename = "userId")]
    user_id: String,
    #[serde(rename = "modelId")]
    model_id: String,
    timestamp: &'a str,
    #[serde(default)]
    scores: BTreeMap<String, f64>,
}

/// Reads `PostAnalysis` rows from JSON Lines files under a data directory
pub struct AnalysisLoader {
    data_dir: PathBuf,
}

impl AnalysisLoader {
    pub fn with_data_dir(data_dir: PathBuf) -> Self {
        Self { data_dir }
    }

    /// Glob pattern for stored analysis files
    fn file_pattern(&self) -> &str {
        "**/*.jsonl"
    }

    /// Collect all files matching the glob pattern
    pub fn collect_files(&self) -> Vec<PathBuf> {
        let pattern = self.data_dir.join(self.file_pattern());
        let mut files: Vec<PathBuf> = glob::glob(&pattern.to_string_lossy())
            .map(|paths| paths.filter_map(|e| e.ok()).collect())
            .unwrap_or_default();
        files.sort();
        files
    }

    /// Load every analysis in parallel, drop duplicate `(postId, modelId)` rows,
    /// and sort by `(timestamp, postId, modelId)`
    pub fn load_all(&self) -> Result<Vec<PostAnalysis>> {
        let files = self.collect_files();
        let all: Vec<PostAnalysis> = files
            .par_iter()
            .flat_map(|f| match self.parse_file(f) {
                Ok(analyses) => analyses,
                Err(e) => {
                    tracing::warn!(path = %f.display(), error = %e, "failed to read analysis file");
                    Vec::new()
                }
            })
            .collect();

        // Files are visited in sorted order, so the first copy of a row wins
        let mut seen: HashSet<(String, String)> = HashSet::new();
        let mut analyses: Vec<PostAnalysis> = all
            .into_iter()
            .filter(|a| seen.insert((a.post_id.clone(), a.model_id.clone())))
            .collect();
        analyses.sort_by(|a, b| {
            a.timestamp
                .cmp(&b.timestamp)
                .then_with(|| a.post_id.cmp(&b.post_id))
                .then_with(|| a.model_id.cmp(&b.model_id))
        });

        tracing::info!(
            files = files.len(),
            analyses = analyses.len(),
            dir = %self.data_dir.display(),
            "loaded post analyses"
        );
        Ok(analyses)
    }

    /// Parse a single JSONL file, skipping unreadable lines
    pub fn parse_file(&self, path: &Path) -> Result<Vec<PostAnalysis>> {
        let file = File::open(path).map_err(SentiboardError::Io)?;
        let reader = BufReader::new(file);
        let mut analyses = Vec::new();

        // Split on raw bytes so non-UTF-8 lines reach the parser and get reported
        for (index, line_result) in reader.split(b'\n').enumerate() {
            let mut line_bytes = match line_result {
                Ok(l) => l,
                Err(e) => {
                    tracing::warn!(
                        path = %path.display(),
                        line = index + 1,
                        error = %e,
                        "skipping unreadable analysis line"
                    );
                    continue;
                }
            };
            if line_bytes.iter().all(u8::is_ascii_whitespace) {
                continue;
            }

            match Self::parse_line(&mut line_bytes) {
                Ok(analysis) => analyses.push(analysis),
                Err(e) => {
                    tracing::warn!(
                        path = %path.display(),
                        line = index + 1,
                        error = %e,
                        "skipping analysis line"
                    );
                }
            }
        }

        Ok(analyses)
    }

    /// Parse one line; out-of-range scores are dropped, not fatal
    fn parse_line(line: &mut [u8]) -> Result<PostAnalysis> {
        let data: AnalysisLine =
            simd_json::from_slice(line).map_err(|e| SentiboardError::Parse(e.to_string()))?;

        let timestamp = DateTime::parse_from_rfc3339(data.timestamp)
            .map(|dt| dt.with_timezone(&Utc))
            .map_err(|_| {
                SentiboardError::Parse(format!("invalid timestamp '{}'", data.timestamp))
            })?;

        let mut scores = RawScores::new();
        for (emotion, value) in data.scores {
            if is_valid_score(value) {
                scores.insert(emotion, value);
            } else {
                tracing::warn!(
                    post = %data.post_id,
                    model = %data.model_id,
                    %emotion,
                    value,
                    "dropping out-of-range score"
                );
            }
        }

        Ok(PostAnalysis {
            post_id: data.post_id,
            user_id: data.user_id,
            model_id: data.model_id,
            timestamp,
            scores,
        })
    }
}
