//! Per-emotion user rankings

use crate::types::{Leaderboard, LeaderboardEntry, Result, SentiboardError, UserSummary};

/// A user's aggregate score for the emotion being ranked
#[derive(Debug, Clone, PartialEq)]
pub struct PopulationMember {
    pub user_id: String,
    pub score: Option<u32>,
}

impl PopulationMember {
    pub fn new(user_id: &str, score: Option<u32>) -> Self {
        Self {
            user_id: user_id.to_string(),
            score,
        }
    }
}

/// Ranks users by one emotion and picks both extremes
pub struct LeaderboardBuilder;

impl LeaderboardBuilder {
    /// Project per-user summaries onto one emotion's average
    pub fn population_for(emotion: &str, summaries: &[UserSummary]) -> Vec<PopulationMember> {
        summaries
            .iter()
            .map(|s| PopulationMember::new(&s.user_id, s.averages.get(emotion).copied()))
            .collect()
    }

    /// Top and bottom `top_k` users for `emotion`.
    ///
    /// Members with an absent or zero score are excluded from both lists.
    /// Ties are broken by `user_id` ascending on both sides.
    pub fn build(
        emotion: &str,
        population: &[PopulationMember],
        top_k: usize,
    ) -> Result<Leaderboard> {
        if top_k == 0 {
            return Err(SentiboardError::InvalidArgument(
                "top_k must be a positive integer".into(),
            ));
        }

        // A stored 0 cannot be told apart from "not scored", so both are dropped
        let mut ranked: Vec<LeaderboardEntry> = population
            .iter()
            .filter_map(|m| match m.score {
                Some(score) if score > 0 => Some(LeaderboardEntry {
                    user_id: m.user_id.clone(),
                    score,
                }),
                _ => None,
            })
            .collect();

        ranked.sort_by(|a, b| b.score.cmp(&a.score).then_with(|| a.user_id.cmp(&b.user_id)));
        let highest: Vec<LeaderboardEntry> = ranked.iter().take(top_k).cloned().collect();

        ranked.sort_by(|a, b| a.score.cmp(&b.score).then_with(|| a.user_id.cmp(&b.user_id)));
        ranked.truncate(top_k);

        Ok(Leaderboard {
            emotion: emotion.to_string(),
            highest,
            lowest: ranked,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::EmotionMap;

    fn ids(entries: &[LeaderboardEntry]) -> Vec<&str> {
        entries.iter().map(|e| e.user_id.as_str()).collect()
    }

    #[test]
    fn test_build_empty_population() {
        let board = LeaderboardBuilder::build("joy", &[], 3).unwrap();
        assert_eq!(board.emotion, "joy");
        assert!(board.highest.is_empty());
        assert!(board.lowest.is_empty());
    }

    #[test]
    fn test_build_zero_top_k_rejected() {
        let err = LeaderboardBuilder::build("joy", &[], 0).unwrap_err();
        assert!(matches!(err, SentiboardError::InvalidArgument(_)));
    }

    #[test]
    fn test_build_highest_and_lowest() {
        let population = vec![
            PopulationMember::new("a", Some(10)),
            PopulationMember::new("b", Some(90)),
            PopulationMember::new("c", Some(50)),
            PopulationMember::new("d", Some(70)),
            PopulationMember::new("e", Some(30)),
        ];

        let board = LeaderboardBuilder::build("joy", &population, 3).unwrap();

        assert_eq!(ids(&board.highest), vec!["b", "d", "c"]);
        assert_eq!(ids(&board.lowest), vec!["a", "e", "c"]);
        assert_eq!(board.highest[0].score, 90);
    }

    #[test]
    fn test_build_excludes_zero_and_absent() {
        let population = vec![
            PopulationMember::new("zero", Some(0)),
            PopulationMember::new("none", None),
            PopulationMember::new("real", Some(5)),
        ];

        let board = LeaderboardBuilder::build("anger", &population, 3).unwrap();

        assert_eq!(ids(&board.highest), vec!["real"]);
        assert_eq!(ids(&board.lowest), vec!["real"]);
    }

    #[test]
    fn test_build_ties_broken_by_user_id() {
        let population = vec![
            PopulationMember::new("carol", Some(40)),
            PopulationMember::new("alice", Some(40)),
            PopulationMember::new("bob", Some(40)),
        ];

        let board = LeaderboardBuilder::build("fear", &population, 2).unwrap();

        assert_eq!(ids(&board.highest), vec!["alice", "bob"]);
        assert_eq!(ids(&board.lowest), vec!["alice", "bob"]);
    }

    #[test]
    fn test_build_top_k_larger_than_population() {
        let population = vec![
            PopulationMember::new("a", Some(1)),
            PopulationMember::new("b", Some(2)),
        ];
        let board = LeaderboardBuilder::build("joy", &population, 10).unwrap();
        assert_eq!(board.highest.len(), 2);
        assert_eq!(board.lowest.len(), 2);
    }

    #[test]
    fn test_population_for_projects_emotion() {
        let make = |user: &str, pairs: &[(&str, u32)]| UserSummary {
            user_id: user.into(),
            post_count: 1,
            averages: pairs.iter().map(|(e, v)| (e.to_string(), *v)).collect(),
            medians: EmotionMap::new(),
        };
        let summaries = vec![make("a", &[("joy", 40)]), make("b", &[("anger", 10)])];

        let population = LeaderboardBuilder::population_for("joy", &summaries);

        assert_eq!(
            population,
            vec![
                PopulationMember::new("a", Some(40)),
                PopulationMember::new("b", None),
            ]
        );
    }
}
