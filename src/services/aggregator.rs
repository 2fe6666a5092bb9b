//! Aggregator service for computing mean and median emotion scores

use std::collections::BTreeMap;

use crate::types::{round_score, AggregateResult, CombinedPostScore, EmotionMap};

/// Aggregator over combined per-post scores
pub struct ScoreAggregator;

impl ScoreAggregator {
    /// Mean and median per emotion (emotions with no data are absent)
    pub fn aggregate<'a, I>(posts: I) -> AggregateResult
    where
        I: IntoIterator<Item = &'a CombinedPostScore>,
    {
        let values = Self::collect_values(posts);

        let mut result = AggregateResult::default();
        for (emotion, mut scores) in values {
            let avg = Self::mean(&scores);
            if let (Some(avg), Some(med)) = (avg, Self::median(&mut scores)) {
                result.averages.insert(emotion.to_string(), avg);
                result.medians.insert(emotion.to_string(), med);
            }
        }
        result
    }

    /// Mean per emotion only (no median sort)
    pub fn averages<'a, I>(posts: I) -> EmotionMap
    where
        I: IntoIterator<Item = &'a CombinedPostScore>,
    {
        Self::collect_values(posts)
            .into_iter()
            .filter_map(|(emotion, scores)| Self::mean(&scores).map(|m| (emotion.to_string(), m)))
            .collect()
    }

    /// Rounded arithmetic mean, `None` for no values
    pub fn mean(values: &[u32]) -> Option<u32> {
        if values.is_empty() {
            return None;
        }
        let sum: u64 = values.iter().map(|&v| u64::from(v)).sum();
        Some(round_score(sum as f64 / values.len() as f64))
    }

    /// Median; for an even count the rounded mean of the two middle values.
    /// Sorts `values` in place.
    pub fn median(values: &mut [u32]) -> Option<u32> {
        if values.is_empty() {
            return None;
        }
        values.sort_unstable();

        let mid = values.len() / 2;
        if values.len() % 2 == 1 {
            Some(values[mid])
        } else {
            let pair = u64::from(values[mid - 1]) + u64::from(values[mid]);
            Some(round_score(pair as f64 / 2.0))
        }
    }

    fn collect_values<'a, I>(posts: I) -> BTreeMap<&'a str, Vec<u32>>
    where
        I: IntoIterator<Item = &'a CombinedPostScore>,
    {
        let mut values: BTreeMap<&'a str, Vec<u32>> = BTreeMap::new();
        for post in posts {
            for (emotion, &score) in &post.scores {
                values.entry(emotion.as_str()).or_default().push(score);
            }
        }
        values
    }
}
