//! Services for emotion score aggregation

pub mod aggregator;
pub mod combiner;
pub mod dashboard;
pub mod gauge;
pub mod leaderboard;
pub mod model_breakdown;
pub mod time_window;
pub mod trends;
pub mod user_stats;

pub use aggregator::ScoreAggregator;
pub use combiner::ScoreCombiner;
pub use dashboard::{DashboardOverview, DashboardQuery, DashboardService, PostReport, UserReport};
pub use gauge::{GaugeCalculator, NEUTRAL_GAUGE};
pub use leaderboard::{LeaderboardBuilder, PopulationMember};
pub use model_breakdown::ModelBreakdown;
pub use time_window::{TimeBucket, TimeWindowResolver};
pub use trends::{TrendGranularity, TrendSeriesBuilder};
pub use user_stats::UserStats;
