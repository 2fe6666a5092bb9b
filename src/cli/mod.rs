use anyhow::{bail, Context};
use chrono::Utc;
use clap::{Args, Parser, Subcommand};
use serde::Serialize;
use std::path::PathBuf;

use crate::loader::{AnalysisLoader, ConfigLoader};
use crate::services::{
    DashboardOverview, DashboardQuery, DashboardService, PostReport, TimeBucket,
    TrendGranularity, UserReport,
};
use crate::types::{EmotionMap, GaugeReading, Leaderboard, ModelSummary, TrendPoint};

/// Multi-model emotion score dashboard engine
#[derive(Parser)]
#[command(name = "sentiboard")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Directory containing stored analyses (*.jsonl, searched recursively)
    #[arg(long, global = true, default_value = "data")]
    data: PathBuf,

    /// Dashboard config file [default: ~/.sentiboard/config.json]
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

/// Time window and model filter shared by most commands
#[derive(Args, Debug, Clone)]
struct WindowArgs {
    /// Recency window: weekly, monthly, yearly or all_time
    #[arg(long, default_value = "all_time")]
    bucket: TimeBucket,

    /// Only use this model's scores instead of combining all models
    #[arg(long)]
    model: Option<String>,
}

impl WindowArgs {
    fn query(&self) -> DashboardQuery {
        DashboardQuery::new(self.bucket, Utc::now()).with_model(self.model.clone())
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Population averages, medians, gauges and leaderboards
    Overview {
        #[command(flatten)]
        window: WindowArgs,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Highest and lowest users for one emotion
    Leaderboard {
        /// Emotion to rank by
        #[arg(long)]
        emotion: String,
        /// Entries per side [default: config leaderboardSize]
        #[arg(long)]
        top: Option<usize>,
        #[command(flatten)]
        window: WindowArgs,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Calendar-bucketed averages over time
    Trends {
        /// Bucket size: daily, weekly or monthly
        #[arg(long, default_value = "daily")]
        granularity: TrendGranularity,
        /// Restrict to one user
        #[arg(long)]
        user: Option<String>,
        #[command(flatten)]
        window: WindowArgs,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Summary statistics for one user
    User {
        user_id: String,
        #[command(flatten)]
        window: WindowArgs,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Per-model and combined scores for one post
    Post {
        post_id: String,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Averages broken down by model
    Models {
        /// Recency window: weekly, monthly, yearly or all_time
        #[arg(long, default_value = "all_time")]
        bucket: TimeBucket,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

impl Cli {
    pub fn run(self) -> anyhow::Result<()> {
        let config_loader = match &self.config {
            Some(path) => ConfigLoader::with_path(path.clone()),
            None => ConfigLoader::new()?,
        };
        let config = config_loader
            .load()
            .with_context(|| format!("loading config {}", config_loader.path().display()))?;
        let analyses = AnalysisLoader::with_data_dir(self.data.clone()).load_all()?;
        let service = DashboardService::new(&config, &analyses)?;

        match self.command {
            Commands::Overview { window, json } => {
                let overview = service.overview(&window.query())?;
                if json {
                    print_json(&overview)
                } else {
                    print_overview(&overview);
                    Ok(())
                }
            }
            Commands::Leaderboard {
                emotion,
                top,
                window,
                json,
            } => {
                let top_k = top.unwrap_or(config.leaderboard_size);
                let board = service.leaderboard(&emotion, &window.query(), top_k)?;
                if json {
                    print_json(&board)
                } else {
                    print_leaderboard(&board);
                    Ok(())
                }
            }
            Commands::Trends {
                granularity,
                user,
                window,
                json,
            } => {
                let points = service.trends(&window.query(), granularity, user.as_deref());
                if json {
                    print_json(&points)
                } else {
                    print_trends(&points);
                    Ok(())
                }
            }
            Commands::User {
                user_id,
                window,
                json,
            } => {
                let Some(report) = service.user_report(&user_id, &window.query()) else {
                    bail!("no posts found for user '{}'", user_id);
                };
                if json {
                    print_json(&report)
                } else {
                    print_user(&report);
                    Ok(())
                }
            }
            Commands::Post { post_id, json } => {
                let Some(report) = service.post_report(&post_id) else {
                    bail!("no analyses found for post '{}'", post_id);
                };
                if json {
                    print_json(&report)
                } else {
                    print_post(&report);
                    Ok(())
                }
            }
            Commands::Models { bucket, json } => {
                let models = service.models(&DashboardQuery::new(bucket, Utc::now()));
                if json {
                    print_json(&models)
                } else {
                    print_models(&models);
                    Ok(())
                }
            }
        }
    }
}

fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// "joy=70 sadness=20", or "-" when empty
pub fn format_emotions(map: &EmotionMap) -> String {
    if map.is_empty() {
        return "-".to_string();
    }
    map.iter()
        .map(|(emotion, value)| format!("{}={}", emotion, value))
        .collect::<Vec<_>>()
        .join(" ")
}

fn format_gauge(gauge: &GaugeReading) -> String {
    let marker = if gauge.has_signal { "" } else { " (no data)" };
    format!(
        "{:<12} {:>3}  [{} ↔ {}]{}",
        gauge.name, gauge.value, gauge.low_label, gauge.high_label, marker
    )
}

fn print_overview(overview: &DashboardOverview) {
    println!(
        "Window: {}  Model: {}  Posts: {}  Users: {}",
        overview.bucket,
        overview.model.as_deref().unwrap_or("combined"),
        overview.post_count,
        overview.user_count
    );
    println!("Averages: {}", format_emotions(&overview.aggregate.averages));
    println!("Medians:  {}", format_emotions(&overview.aggregate.medians));
    println!();
    for gauge in &overview.gauges {
        println!("{}", format_gauge(gauge));
    }
    for board in &overview.leaderboards {
        println!();
        print_leaderboard(board);
    }
}

fn print_leaderboard(board: &Leaderboard) {
    println!("== {} ==", board.emotion);
    if board.highest.is_empty() {
        println!("  (no data)");
        return;
    }
    println!("  Highest:");
    for (rank, entry) in board.highest.iter().enumerate() {
        println!("    {}. {:<20} {:>3}", rank + 1, entry.user_id, entry.score);
    }
    println!("  Lowest:");
    for (rank, entry) in board.lowest.iter().enumerate() {
        println!("    {}. {:<20} {:>3}", rank + 1, entry.user_id, entry.score);
    }
}

fn print_trends(points: &[TrendPoint]) {
    if points.is_empty() {
        println!("No posts in range");
        return;
    }
    for point in points {
        println!(
            "{:<10} {:>5} posts  {}",
            point.period_key,
            point.post_count,
            format_emotions(&point.averages)
        );
    }
}

fn print_user(report: &UserReport) {
    let summary = &report.summary;
    println!("User: {}  Posts: {}", summary.user_id, summary.post_count);
    println!("Averages: {}", format_emotions(&summary.averages));
    println!("Medians:  {}", format_emotions(&summary.medians));
    println!();
    for gauge in &report.gauges {
        println!("{}", format_gauge(gauge));
    }
    println!();
    print_trends(&report.trend);
}

fn print_post(report: &PostReport) {
    println!(
        "Post: {}  User: {}  At: {}",
        report.post_id,
        report.user_id,
        report.timestamp.to_rfc3339()
    );
    for model in &report.models {
        let scores = model
            .scores
            .iter()
            .map(|(emotion, value)| format!("{}={}", emotion, value))
            .collect::<Vec<_>>()
            .join(" ");
        println!("  {:<16} {}", model.model_id, scores);
    }
    println!("  {:<16} {}", "combined", format_emotions(&report.combined));
    println!();
    for gauge in &report.gauges {
        println!("{}", format_gauge(gauge));
    }
}

fn print_models(models: &[ModelSummary]) {
    if models.is_empty() {
        println!("No posts in range");
        return;
    }
    for model in models {
        println!(
            "{:<16} {:>5} posts  {}",
            model.model_id,
            model.post_count,
            format_emotions(&model.averages)
        );
    }
}
