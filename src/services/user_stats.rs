//! Per-user summary statistics

use rayon::prelude::*;
use std::collections::BTreeMap;

use super::ScoreAggregator;
use crate::types::{CombinedPostScore, UserSummary};

/// Computes summary statistics per tracked account
pub struct UserStats;

impl UserStats {
    /// One summary per user appearing in `posts`, sorted by `user_id`
    pub fn summarize(posts: &[CombinedPostScore]) -> Vec<UserSummary> {
        let mut by_user: BTreeMap<&str, Vec<&CombinedPostScore>> = BTreeMap::new();
        for post in posts {
            by_user.entry(post.user_id.as_str()).or_default().push(post);
        }

        let groups: Vec<(&str, Vec<&CombinedPostScore>)> = by_user.into_iter().collect();
        let summaries: Vec<UserSummary> = groups
            .par_iter()
            .map(|(user_id, user_posts)| Self::build(user_id, user_posts))
            .collect();

        tracing::debug!(users = summaries.len(), "summarized users");
        summaries
    }

    /// Summary for a single user, `None` if they have no posts
    pub fn summarize_user(user_id: &str, posts: &[CombinedPostScore]) -> Option<UserSummary> {
        let user_posts: Vec<&CombinedPostScore> =
            posts.iter().filter(|p| p.user_id == user_id).collect();
        if user_posts.is_empty() {
            return None;
        }
        Some(Self::build(user_id, &user_posts))
    }

    fn build(user_id: &str, posts: &[&CombinedPostScore]) -> UserSummary {
        let aggregate = ScoreAggregator::aggregate(posts.iter().copied());
        UserSummary {
            user_id: user_id.to_string(),
            post_count: posts.len() as u64,
            averages: aggregate.averages,
            medians: aggregate.medians,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn make_post(id: &str, user: &str, joy: u32) -> CombinedPostScore {
        CombinedPostScore {
            post_id: id.into(),
            user_id: user.into(),
            timestamp: Utc.with_ymd_and_hms(2024, 2, 1, 9, 0, 0).unwrap(),
            scores: [("joy".to_string(), joy)].into_iter().collect(),
        }
    }

    #[test]
    fn test_summarize_empty() {
        assert!(UserStats::summarize(&[]).is_empty());
    }

    #[test]
    fn test_summarize_groups_and_sorts_by_user() {
        let posts = vec![
            make_post("p1", "zoe", 10),
            make_post("p2", "adam", 20),
            make_post("p3", "zoe", 30),
            make_post("p4", "zoe", 80),
        ];

        let summaries = UserStats::summarize(&posts);

        assert_eq!(summaries.len(), 2);
        assert_eq!(summaries[0].user_id, "adam");
        assert_eq!(summaries[0].post_count, 1);
        assert_eq!(summaries[1].user_id, "zoe");
        assert_eq!(summaries[1].post_count, 3);
        assert_eq!(summaries[1].averages.get("joy"), Some(&40));
        assert_eq!(summaries[1].medians.get("joy"), Some(&30));
    }

    #[test]
    fn test_summarize_user_found() {
        let posts = vec![make_post("p1", "zoe", 10), make_post("p2", "adam", 20)];
        let summary = UserStats::summarize_user("adam", &posts).unwrap();
        assert_eq!(summary.averages.get("joy"), Some(&20));
    }

    #[test]
    fn test_summarize_user_missing() {
        let posts = vec![make_post("p1", "zoe", 10)];
        assert!(UserStats::summarize_user("nobody", &posts).is_none());
    }
}
