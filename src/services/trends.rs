//! Calendar-bucketed trend series

use chrono::{Datelike, Duration, NaiveDate};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use super::ScoreAggregator;
use crate::types::{CombinedPostScore, Result, SentiboardError, TrendPoint};

/// Calendar bucket size for a trend series
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrendGranularity {
    #[default]
    Daily,
    Weekly,
    Monthly,
}

impl TrendGranularity {
    pub const ALL: [TrendGranularity; 3] = [Self::Daily, Self::Weekly, Self::Monthly];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Daily => "daily",
            Self::Weekly => "weekly",
            Self::Monthly => "monthly",
        }
    }

    /// First day of the bucket containing `date` (weeks start on Monday)
    pub fn bucket_start(&self, date: NaiveDate) -> NaiveDate {
        match self {
            Self::Daily => date,
            Self::Weekly => {
                date - Duration::days(i64::from(date.weekday().num_days_from_monday()))
            }
            Self::Monthly => date.with_day(1).unwrap_or(date),
        }
    }

    /// Period key for a bucket start date
    pub fn period_key(&self, start: NaiveDate) -> String {
        match self {
            Self::Daily | Self::Weekly => start.format("%Y-%m-%d").to_string(),
            Self::Monthly => start.format("%Y-%m").to_string(),
        }
    }
}

impl fmt::Display for TrendGranularity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TrendGranularity {
    type Err = SentiboardError;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|g| g.as_str() == s)
            .ok_or_else(|| {
                SentiboardError::InvalidArgument(format!(
                    "unknown trend granularity '{}' (expected daily, weekly or monthly)",
                    s
                ))
            })
    }
}

/// Builds sparse, chronologically ordered trend series
pub struct TrendSeriesBuilder;

impl TrendSeriesBuilder {
    /// One point per bucket that has at least one post, oldest first.
    /// Empty buckets are never emitted.
    pub fn build(posts: &[CombinedPostScore], granularity: TrendGranularity) -> Vec<TrendPoint> {
        let mut buckets: BTreeMap<NaiveDate, Vec<&CombinedPostScore>> = BTreeMap::new();
        for post in posts {
            buckets
                .entry(granularity.bucket_start(post.date()))
                .or_default()
                .push(post);
        }

        let points: Vec<TrendPoint> = buckets
            .into_iter()
            .map(|(start, members)| TrendPoint {
                period_key: granularity.period_key(start),
                post_count: members.len() as u64,
                averages: ScoreAggregator::averages(members),
            })
            .collect();

        tracing::debug!(%granularity, points = points.len(), "built trend series");
        points
    }
}
