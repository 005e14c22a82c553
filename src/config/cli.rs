use crate::config::toml_config::SyncConfig;
use chrono::{DateTime, Utc};
use clap::Parser;

#[derive(Debug, Clone, Parser)]
#[command(name = "commit-board-sync")]
#[command(about = "Post commit message directives as Trello card comments and moves")]
pub struct CliArgs {
    /// Path to TOML configuration file
    #[arg(short, long, default_value = "sync-config.toml")]
    pub config: String,

    /// Override the repository path from config
    #[arg(long)]
    pub repo: Option<String>,

    /// Only commits after this RFC 3339 time (e.g. 2024-05-01T09:00:00Z)
    #[arg(long, conflicts_with = "since_hours")]
    pub since: Option<DateTime<Utc>>,

    /// Only commits from the last N hours
    #[arg(long)]
    pub since_hours: Option<u64>,

    /// Parse commits and show the comments without touching Trello
    #[arg(long)]
    pub dry_run: bool,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

impl CliArgs {
    /// 命令列參數覆蓋設定檔
    pub fn apply_overrides(&self, config: &mut SyncConfig) {
        if let Some(repo) = &self.repo {
            config.repository.path = repo.clone();
            tracing::info!("🔧 Repository overridden to: {}", repo);
        }
        if let Some(hours) = self.since_hours {
            config.sync.since_hours = Some(hours);
            tracing::info!("🔧 Lookback overridden to: {}h", hours);
        }
    }
}
