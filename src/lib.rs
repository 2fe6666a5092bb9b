//! sentiboard: turns multi-model emotion scores for social-media posts into
//! gauges, leaderboards, per-user statistics and trend series.

pub mod cli;
pub mod loader;
pub mod services;
pub mod types;
