//! Dashboard composition: time window → combine → aggregate → gauges/leaderboards
//!
//! Every call recomputes from the record slice it was given; nothing is cached.

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::{
    GaugeCalculator, LeaderboardBuilder, ModelBreakdown, ScoreAggregator, ScoreCombiner,
    TimeBucket, TimeWindowResolver, TrendGranularity, TrendSeriesBuilder, UserStats,
};
use crate::types::{
    AggregateResult, CombinedPostScore, DashboardConfig, EmotionMap, GaugeReading, Leaderboard,
    ModelSummary, PostAnalysis, RawScores, Result, TrendPoint, UserSummary,
};

/// Filters shared by every dashboard view
#[derive(Debug, Clone)]
pub struct DashboardQuery {
    pub bucket: TimeBucket,
    /// Restrict to one model ("single model" mode); `None` combines all models
    pub model: Option<String>,
    pub now: DateTime<Utc>,
}

impl DashboardQuery {
    pub fn new(bucket: TimeBucket, now: DateTime<Utc>) -> Self {
        Self {
            bucket,
            model: None,
            now,
        }
    }

    pub fn with_model(mut self, model: Option<String>) -> Self {
        self.model = model;
        self
    }
}

/// Global view over the whole tracked population
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardOverview {
    pub bucket: TimeBucket,
    pub model: Option<String>,
    pub post_count: u64,
    pub user_count: u64,
    pub aggregate: AggregateResult,
    pub gauges: Vec<GaugeReading>,
    pub leaderboards: Vec<Leaderboard>,
}

/// One account's statistics
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserReport {
    pub summary: UserSummary,
    pub gauges: Vec<GaugeReading>,
    pub trend: Vec<TrendPoint>,
}

/// One model's raw scores for a post
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ModelScores {
    pub model_id: String,
    pub scores: RawScores,
}

/// A single post with every model's scores and the combined result
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PostReport {
    pub post_id: String,
    pub user_id: String,
    pub timestamp: DateTime<Utc>,
    pub models: Vec<ModelScores>,
    pub combined: EmotionMap,
    pub gauges: Vec<GaugeReading>,
}

/// Request-scoped composition of the aggregation components
pub struct DashboardService<'a> {
    config: &'a DashboardConfig,
    analyses: &'a [PostAnalysis],
}

impl<'a> DashboardService<'a> {
    /// Create a service over already-loaded records; the config is validated here
    pub fn new(config: &'a DashboardConfig, analyses: &'a [PostAnalysis]) -> Result<Self> {
        config.validate()?;
        Ok(Self { config, analyses })
    }

    /// Records inside the query's time window
    fn window(&self, query: &DashboardQuery) -> Vec<&'a PostAnalysis> {
        let since = TimeWindowResolver::resolve(query.bucket, query.now);
        TimeWindowResolver::filter_since(self.analyses, since)
    }

    /// Combined per-post scores inside the query's window
    pub fn combined(&self, query: &DashboardQuery) -> Vec<CombinedPostScore> {
        ScoreCombiner::combine(self.window(query), query.model.as_deref())
    }

    /// Emotions that get a leaderboard: configured ones, else every observed one
    fn leaderboard_emotions(&self, aggregate: &AggregateResult) -> Vec<String> {
        if self.config.emotions.is_empty() {
            aggregate.averages.keys().cloned().collect()
        } else {
            self.config
                .emotion_names()
                .into_iter()
                .map(String::from)
                .collect()
        }
    }

    pub fn overview(&self, query: &DashboardQuery) -> Result<DashboardOverview> {
        let posts = self.combined(query);
        let aggregate = ScoreAggregator::aggregate(&posts);
        let gauges = GaugeCalculator::compute_all(&self.config.gauges, &aggregate.averages);
        let users = UserStats::summarize(&posts);

        let leaderboards = self
            .leaderboard_emotions(&aggregate)
            .iter()
            .map(|emotion| {
                let population = LeaderboardBuilder::population_for(emotion, &users);
                LeaderboardBuilder::build(emotion, &population, self.config.leaderboard_size)
            })
            .collect::<Result<Vec<_>>>()?;

        tracing::info!(
            bucket = %query.bucket,
            posts = posts.len(),
            users = users.len(),
            "computed dashboard overview"
        );

        Ok(DashboardOverview {
            bucket: query.bucket,
            model: query.model.clone(),
            post_count: posts.len() as u64,
            user_count: users.len() as u64,
            aggregate,
            gauges,
            leaderboards,
        })
    }

    /// Leaderboard for one emotion with an explicit size
    pub fn leaderboard(
        &self,
        emotion: &str,
        query: &DashboardQuery,
        top_k: usize,
    ) -> Result<Leaderboard> {
        let users = UserStats::summarize(&self.combined(query));
        let population = LeaderboardBuilder::population_for(emotion, &users);
        LeaderboardBuilder::build(emotion, &population, top_k)
    }

    /// Trend series for the whole population or one user
    pub fn trends(
        &self,
        query: &DashboardQuery,
        granularity: TrendGranularity,
        user_id: Option<&str>,
    ) -> Vec<TrendPoint> {
        let mut posts = self.combined(query);
        if let Some(user_id) = user_id {
            posts.retain(|p| p.user_id == user_id);
        }
        TrendSeriesBuilder::build(&posts, granularity)
    }

    /// Per-user statistics, gauges and daily trend; `None` if the user has no posts
    pub fn user_report(&self, user_id: &str, query: &DashboardQuery) -> Option<UserReport> {
        let posts: Vec<CombinedPostScore> = self
            .combined(query)
            .into_iter()
            .filter(|p| p.user_id == user_id)
            .collect();
        let summary = UserStats::summarize_user(user_id, &posts)?;
        let gauges = GaugeCalculator::compute_all(&self.config.gauges, &summary.averages);
        let trend = TrendSeriesBuilder::build(&posts, TrendGranularity::Daily);

        Some(UserReport {
            summary,
            gauges,
            trend,
        })
    }

    /// Every model's scores for one post, regardless of time window
    pub fn post_report(&self, post_id: &str) -> Option<PostReport> {
        let analyses: Vec<&PostAnalysis> = self
            .analyses
            .iter()
            .filter(|a| a.post_id == post_id)
            .collect();
        let combined = ScoreCombiner::combine(analyses.iter().copied(), None)
            .into_iter()
            .next()?;

        let mut models: Vec<ModelScores> = analyses
            .iter()
            .map(|a| ModelScores {
                model_id: a.model_id.clone(),
                scores: a.scores.clone(),
            })
            .collect();
        models.sort_by(|a, b| a.model_id.cmp(&b.model_id));

        let gauges = GaugeCalculator::compute_all(&self.config.gauges, &combined.scores);

        Some(PostReport {
            post_id: combined.post_id,
            user_id: combined.user_id,
            timestamp: combined.timestamp,
            models,
            combined: combined.scores,
            gauges,
        })
    }

    /// Per-model averages inside the query's window (the query's model filter is ignored)
    pub fn models(&self, query: &DashboardQuery) -> Vec<ModelSummary> {
        ModelBreakdown::by_model(&self.window(query))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{GaugeDefinition, SentiboardError};
    use chrono::{Duration, TimeZone};

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 30, 12, 0, 0).unwrap()
    }

    fn make_analysis(
        post: &str,
        user: &str,
        model: &str,
        days_ago: i64,
        scores: &[(&str, f64)],
    ) -> PostAnalysis {
        PostAnalysis {
            post_id: post.into(),
            user_id: user.into(),
            model_id: model.into(),
            timestamp: now() - Duration::days(days_ago),
            scores: scores.iter().map(|(e, v)| (e.to_string(), *v)).collect(),
        }
    }

    fn fixture() -> Vec<PostAnalysis> {
        vec![
            make_analysis("p1", "alice", "gpt", 1, &[("joy", 80.0), ("sadness", 10.0)]),
            make_analysis("p1", "alice", "claude", 1, &[("joy", 60.0), ("sadness", 30.0)]),
            make_analysis("p2", "bob", "gpt", 3, &[("joy", 20.0), ("anger", 70.0)]),
            make_analysis("p3", "carol", "gpt", 100, &[("joy", 50.0), ("anger", 0.0)]),
            make_analysis("p4", "bob", "claude", 400, &[("joy", 90.0)]),
        ]
    }

    fn config() -> DashboardConfig {
        DashboardConfig {
            emotions: vec![],
            gauges: vec![
                GaugeDefinition::new("Mood", "Gloomy", "Cheerful")
                    .with_emotions(&["joy"])
                    .with_inverted(&["sadness"]),
                GaugeDefinition::new("Fear", "Calm", "Scared").with_emotions(&["fear"]),
            ],
            leaderboard_size: 3,
        }
    }

    #[test]
    fn test_new_rejects_invalid_config() {
        let bad = DashboardConfig {
            leaderboard_size: 0,
            ..config()
        };
        let analyses = fixture();
        assert!(matches!(
            DashboardService::new(&bad, &analyses),
            Err(SentiboardError::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_overview_weekly_window() {
        let config = config();
        let analyses = fixture();
        let service = DashboardService::new(&config, &analyses).unwrap();

        let overview = service
            .overview(&DashboardQuery::new(TimeBucket::Weekly, now()))
            .unwrap();

        // p1 (combined joy 70, sadness 20) and p2 (joy 20) fall in the week
        assert_eq!(overview.post_count, 2);
        assert_eq!(overview.user_count, 2);
        assert_eq!(overview.aggregate.averages.get("joy"), Some(&45));
        assert_eq!(overview.aggregate.averages.get("sadness"), Some(&20));
        // Mood = (45 + (100 - 20)) / 2 = 62.5 → 63
        assert_eq!(overview.gauges[0].value, 63);
        assert!(overview.gauges[0].has_signal);
        assert!(!overview.gauges[1].has_signal);
    }

    #[test]
    fn test_overview_all_time_counts_every_post() {
        let config = config();
        let analyses = fixture();
        let service = DashboardService::new(&config, &analyses).unwrap();

        let overview = service
            .overview(&DashboardQuery::new(TimeBucket::AllTime, now()))
            .unwrap();

        assert_eq!(overview.post_count, 4);
        assert_eq!(overview.user_count, 3);
    }

    #[test]
    fn test_overview_leaderboards_for_observed_emotions() {
        let config = config();
        let analyses = fixture();
        let service = DashboardService::new(&config, &analyses).unwrap();

        let overview = service
            .overview(&DashboardQuery::new(TimeBucket::Yearly, now()))
            .unwrap();

        let anger = overview
            .leaderboards
            .iter()
            .find(|l| l.emotion == "anger")
            .unwrap();
        // carol's anger is 0 and never ranks
        assert_eq!(anger.highest.len(), 1);
        assert_eq!(anger.highest[0].user_id, "bob");
        assert!(anger.lowest.iter().all(|e| e.user_id != "carol"));
    }

    #[test]
    fn test_overview_single_model_mode() {
        let config = config();
        let analyses = fixture();
        let service = DashboardService::new(&config, &analyses).unwrap();

        let query =
            DashboardQuery::new(TimeBucket::Weekly, now()).with_model(Some("claude".into()));
        let overview = service.overview(&query).unwrap();

        assert_eq!(overview.post_count, 1);
        assert_eq!(overview.aggregate.averages.get("joy"), Some(&60));
        assert_eq!(overview.model.as_deref(), Some("claude"));
    }

    #[test]
    fn test_leaderboard_rejects_zero_top_k() {
        let config = config();
        let analyses = fixture();
        let service = DashboardService::new(&config, &analyses).unwrap();
        let query = DashboardQuery::new(TimeBucket::AllTime, now());
        assert!(service.leaderboard("joy", &query, 0).is_err());
    }

    #[test]
    fn test_leaderboard_all_time_joy() {
        let config = config();
        let analyses = fixture();
        let service = DashboardService::new(&config, &analyses).unwrap();
        let query = DashboardQuery::new(TimeBucket::AllTime, now());

        let board = service.leaderboard("joy", &query, 1).unwrap();

        // bob: (20 + 90) / 2 = 55, alice: 70, carol: 50
        assert_eq!(board.highest[0].user_id, "alice");
        assert_eq!(board.lowest[0].user_id, "carol");
    }

    #[test]
    fn test_trends_for_one_user() {
        let config = config();
        let analyses = fixture();
        let service = DashboardService::new(&config, &analyses).unwrap();
        let query = DashboardQuery::new(TimeBucket::AllTime, now());

        let points = service.trends(&query, TrendGranularity::Daily, Some("bob"));

        assert_eq!(points.len(), 2);
        assert!(points[0].period_key < points[1].period_key);
    }

    #[test]
    fn test_user_report() {
        let config = config();
        let analyses = fixture();
        let service = DashboardService::new(&config, &analyses).unwrap();
        let query = DashboardQuery::new(TimeBucket::AllTime, now());

        let report = service.user_report("alice", &query).unwrap();

        assert_eq!(report.summary.post_count, 1);
        assert_eq!(report.summary.averages.get("joy"), Some(&70));
        assert_eq!(report.trend.len(), 1);
        assert_eq!(report.gauges.len(), 2);
        assert!(service.user_report("nobody", &query).is_none());
    }

    #[test]
    fn test_post_report() {
        let config = config();
        let analyses = fixture();
        let service = DashboardService::new(&config, &analyses).unwrap();

        let report = service.post_report("p1").unwrap();

        assert_eq!(report.user_id, "alice");
        assert_eq!(report.models.len(), 2);
        assert_eq!(report.models[0].model_id, "claude");
        assert_eq!(report.combined.get("joy"), Some(&70));
        assert_eq!(report.combined.get("sadness"), Some(&20));
        assert!(service.post_report("missing").is_none());
    }

    #[test]
    fn test_models_within_window() {
        let config = config();
        let analyses = fixture();
        let service = DashboardService::new(&config, &analyses).unwrap();

        let models = service.models(&DashboardQuery::new(TimeBucket::Weekly, now()));

        assert_eq!(models.len(), 2);
        assert_eq!(models[0].model_id, "claude");
        assert_eq!(models[1].model_id, "gpt");
        assert_eq!(models[1].post_count, 2);
        assert_eq!(models[1].averages.get("joy"), Some(&50));
    }
}
