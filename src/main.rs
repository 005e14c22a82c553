use clap::Parser;
use commit_board_sync::utils::error::ErrorSeverity;
use commit_board_sync::utils::{logger, validation::Validate};
use commit_board_sync::{
    CliArgs, CommentFormat, GitCommitSource, RevisionAuthorFormat, SyncConfig, SyncEngine,
    SyncError, TrelloClient,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = CliArgs::parse();

    // 載入 TOML 配置
    let mut config = match SyncConfig::from_file(&args.config) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("❌ Failed to load config file '{}': {}", args.config, e);
            eprintln!("💡 Make sure the file exists and is valid TOML format");
            std::process::exit(1);
        }
    };

    // 初始化日誌
    // 格式錯誤會在下面的驗證回報
    logger::init_logger(args.verbose, config.logging_format().unwrap_or_default());
    tracing::info!("🚀 Starting commit-board-sync");
    tracing::info!("📁 Loaded configuration from: {}", args.config);

    args.apply_overrides(&mut config);

    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(1);
    }

    if let Err(e) = run(&args, &config).await {
        tracing::error!(
            "❌ Sync failed: {} (Category: {:?}, Severity: {:?})",
            e,
            e.category(),
            e.severity()
        );
        tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        eprintln!("💡 {}", e.recovery_suggestion());

        // 根據錯誤嚴重程度決定退出碼
        let exit_code = match e.severity() {
            ErrorSeverity::Low => 0,
            ErrorSeverity::Medium => 2,
            ErrorSeverity::High => 1,
            ErrorSeverity::Critical => 3,
        };
        if exit_code > 0 {
            std::process::exit(exit_code);
        }
    }

    Ok(())
}

async fn run(args: &CliArgs, config: &SyncConfig) -> Result<(), SyncError> {
    let source =
        GitCommitSource::open(config.repo_path())?.with_timeout(config.repository_timeout());
    let trello = TrelloClient::connect(config.trello_settings()).await?;

    let mut engine = SyncEngine::new(source, trello)
        .with_verbs(config.verb_registry())
        .with_failure_policy(config.board_failure_policy()?)
        .with_lookback(config.lookback()?);

    if args.dry_run {
        tracing::info!("🔍 DRY RUN MODE - nothing will be posted");
        engine.check_commits(args.since).await?;
        print_pending(engine.comments());
        return Ok(());
    }

    let report = engine.run(args.since).await?;

    println!(
        "✅ Posted {} comments and moved {} cards",
        report.comments_posted, report.cards_moved
    );
    if !report.failed_boards.is_empty() {
        println!("⚠️ Skipped boards: {}", report.failed_boards.join(", "));
    }

    Ok(())
}

fn print_pending(comments: &[commit_board_sync::Comment]) {
    println!("🔍 {} pending comments:", comments.len());
    for comment in comments {
        let mut line = format!(
            "  {} #{}: {}",
            comment.board_name,
            comment.card_id,
            RevisionAuthorFormat.render(comment)
        );
        if let Some(list) = &comment.list_name {
            line.push_str(&format!(" -> {}", list));
        }
        println!("{}", line);
    }
}
