//! Named recency windows applied before aggregation

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::types::{PostAnalysis, Result, SentiboardError};

/// A named recency filter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimeBucket {
    Weekly,
    Monthly,
    Yearly,
    #[default]
    AllTime,
}

impl TimeBucket {
    pub const ALL: [TimeBucket; 4] = [Self::Weekly, Self::Monthly, Self::Yearly, Self::AllTime];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Weekly => "weekly",
            Self::Monthly => "monthly",
            Self::Yearly => "yearly",
            Self::AllTime => "all_time",
        }
    }

    /// Window length, `None` for all-time
    pub fn span(&self) -> Option<Duration> {
        match self {
            Self::Weekly => Some(Duration::days(7)),
            Self::Monthly => Some(Duration::days(30)),
            Self::Yearly => Some(Duration::days(365)),
            Self::AllTime => None,
        }
    }
}

impl fmt::Display for TimeBucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TimeBucket {
    type Err = SentiboardError;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|b| b.as_str() == s)
            .ok_or_else(|| {
                SentiboardError::InvalidArgument(format!(
                    "unknown time bucket '{}' (expected weekly, monthly, yearly or all_time)",
                    s
                ))
            })
    }
}

/// Maps time buckets to inclusive lower-bound timestamps
pub struct TimeWindowResolver;

impl TimeWindowResolver {
    /// Inclusive lower bound for `bucket`, or `None` when unbounded
    pub fn resolve(bucket: TimeBucket, now: DateTime<Utc>) -> Option<DateTime<Utc>> {
        bucket.span().map(|span| now - span)
    }

    /// Resolve a bucket given by name
    pub fn resolve_named(bucket: &str, now: DateTime<Utc>) -> Result<Option<DateTime<Utc>>> {
        let bucket: TimeBucket = bucket.parse()?;
        Ok(Self::resolve(bucket, now))
    }

    /// Keep analyses at or after `since`; `None` keeps everything
    pub fn filter_since(
        analyses: &[PostAnalysis],
        since: Option<DateTime<Utc>>,
    ) -> Vec<&PostAnalysis> {
        match since {
            Some(lower) => analyses.iter().filter(|a| a.timestamp >= lower).collect(),
            None => analyses.iter().collect(),
        }
    }
}
