//! Collapses per-model analyses into one score map per post

use chrono::{DateTime, Utc};
use std::collections::{BTreeMap, HashMap};

use crate::types::{is_valid_score, round_score, CombinedPostScore, EmotionMap, PostAnalysis};

/// Running sum and count for one emotion
#[derive(Debug, Default, Clone, Copy)]
pub(crate) struct ScoreAccumulator {
    sum: f64,
    count: u32,
}

impl ScoreAccumulator {
    pub(crate) fn add(&mut self, value: f64) {
        self.sum += value;
        self.count = self.count.saturating_add(1);
    }

    pub(crate) fn mean(&self) -> Option<u32> {
        (self.count > 0).then(|| round_score(self.sum / self.count as f64))
    }
}

struct PostGroup<'a> {
    user_id: &'a str,
    timestamp: DateTime<Utc>,
    emotions: BTreeMap<&'a str, ScoreAccumulator>,
}

/// Combines multi-model analyses into per-post scores
pub struct ScoreCombiner;

impl ScoreCombiner {
    /// Group analyses by post and average each emotion across models.
    ///
    /// With `model_filter`, only that model's analyses are used. Posts with no
    /// analyses left after filtering are dropped. Output is sorted by
    /// `(timestamp, post_id)`.
    pub fn combine<'a, I>(analyses: I, model_filter: Option<&str>) -> Vec<CombinedPostScore>
    where
        I: IntoIterator<Item = &'a PostAnalysis>,
    {
        let mut groups: HashMap<&'a str, PostGroup<'a>> = HashMap::new();
        let mut skipped = 0usize;

        for analysis in analyses {
            if model_filter.is_some_and(|m| m != analysis.model_id) {
                continue;
            }

            let group = groups
                .entry(analysis.post_id.as_str())
                .or_insert_with(|| PostGroup {
                    user_id: analysis.user_id.as_str(),
                    timestamp: analysis.timestamp,
                    emotions: BTreeMap::new(),
                });
            // Owner and timestamp come from the earliest row, smallest user_id on ties
            let earlier = (analysis.timestamp, analysis.user_id.as_str())
                < (group.timestamp, group.user_id);
            if earlier {
                group.timestamp = analysis.timestamp;
                group.user_id = analysis.user_id.as_str();
            }

            for (emotion, &value) in &analysis.scores {
                if !is_valid_score(value) {
                    skipped += 1;
                    continue;
                }
                group
                    .emotions
                    .entry(emotion.as_str())
                    .or_default()
                    .add(value);
            }
        }

        if skipped > 0 {
            tracing::warn!(skipped, "ignored out-of-range emotion scores");
        }

        let mut result: Vec<CombinedPostScore> = groups
            .into_iter()
            .map(|(post_id, group)| CombinedPostScore {
                post_id: post_id.to_string(),
                user_id: group.user_id.to_string(),
                timestamp: group.timestamp,
                scores: Self::finish(&group.emotions),
            })
            .collect();
        result.sort_by(|a, b| {
            a.timestamp
                .cmp(&b.timestamp)
                .then_with(|| a.post_id.cmp(&b.post_id))
        });

        tracing::debug!(posts = result.len(), model = ?model_filter, "combined post scores");
        result
    }

    fn finish(emotions: &BTreeMap<&str, ScoreAccumulator>) -> EmotionMap {
        emotions
            .iter()
            .filter_map(|(emotion, acc)| acc.mean().map(|m| (emotion.to_string(), m)))
            .collect()
    }
}
