//! Pressroom CLI - publish posts and articles from the command line.
//!
//! Dry run is the default. Pass `--live` (or set `PRESSROOM_DRY_RUN=false`)
//! to actually publish.

use clap::{Args, Parser, Subcommand};
use pressroom::core::{Article, ArticleRequest, ContentFormat, MediaType, PostRequest};
use pressroom::{Pressroom, PressroomConfig, init_observability, shutdown_observability};
use std::path::PathBuf;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

/// Command-line arguments.
#[derive(Parser, Debug)]
#[command(name = "pressroom")]
#[command(about = "Deduplicated, dry-run-by-default publishing to X, Facebook, LinkedIn and Medium")]
#[command(version)]
struct Cli {
    /// Path to a TOML configuration file
    #[arg(short, long, env = "PRESSROOM_CONFIG")]
    config: Option<PathBuf>,

    /// Publish for real
    #[arg(long, conflicts_with = "dry_run")]
    live: bool,

    /// Only test connections (default)
    #[arg(long)]
    dry_run: bool,

    /// Emit logs as JSON
    #[arg(long)]
    json_logs: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Publish a short post
    Post(PostArgs),
    /// Publish a long-form article
    Article(ArticleArgs),
    /// Test the connection of every configured platform
    Check,
    /// Show configuration and platform readiness
    Status,
}

#[derive(Args, Debug)]
struct PostArgs {
    /// Post text
    text: String,

    /// Target platform; repeat for several
    #[arg(short, long = "platform", required = true)]
    platforms: Vec<String>,

    /// Media URL to attach
    #[arg(long)]
    media_url: Option<String>,

    /// Media type (image or video)
    #[arg(long)]
    media_type: Option<MediaType>,
}

#[derive(Args, Debug)]
struct ArticleArgs {
    /// Article title
    #[arg(short, long)]
    title: String,

    /// Article body
    #[arg(long, conflicts_with = "body_file", required_unless_present = "body_file")]
    body: Option<String>,

    /// Read the article body from a file
    #[arg(long)]
    body_file: Option<PathBuf>,

    /// Tag; repeat for several
    #[arg(long = "tag")]
    tags: Vec<String>,

    /// Canonical URL of the original article
    #[arg(long)]
    canonical_url: Option<String>,

    /// Body markup (markdown or html)
    #[arg(long, default_value = "markdown")]
    format: ContentFormat,

    /// Target platform; repeat for several
    #[arg(short, long = "platform", required = true)]
    platforms: Vec<String>,
}

fn init_tracing(json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    if json {
        tracing_subscriber::fmt().json().with_env_filter(filter).init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();
    init_tracing(cli.json_logs);

    if let Err(e) = init_observability("pressroom", 30) {
        warn!(error = %e, "Metrics export unavailable");
    }

    let mut config = PressroomConfig::load(cli.config.as_deref())?;
    if cli.live {
        config.dry_run = false;
    } else if cli.dry_run {
        config.dry_run = true;
    }
    if config.dry_run {
        info!("DRY RUN MODE - connections are tested, nothing is published");
    }

    let pressroom = Pressroom::from_config(&config);
    let result = run(&pressroom, &config, cli.command).await;
    shutdown_observability();
    result
}

async fn run(
    pressroom: &Pressroom,
    config: &PressroomConfig,
    command: Command,
) -> Result<(), Box<dyn std::error::Error>> {
    match command {
        Command::Post(args) => {
            let mut failures = 0usize;
            for platform in &args.platforms {
                let request = PostRequest::builder()
                    .content(args.text.clone())
                    .platform(platform.clone())
                    .media_url(args.media_url.clone())
                    .media_type(args.media_type)
                    .build()?;
                match pressroom.social().publish(&request).await {
                    Ok(disposition) => println!("{}: {}", platform, disposition),
                    Err(e) => {
                        error!(platform = %platform, error = %e, "Publish failed");
                        println!("{}: failed ({})", platform, e.kind);
                        failures += 1;
                    }
                }
            }
            finish(failures)
        }
        Command::Article(args) => {
            let body = match (&args.body, &args.body_file) {
                (Some(body), _) => body.clone(),
                (None, Some(path)) => std::fs::read_to_string(path)
                    .map_err(|e| format!("Failed to read {}: {}", path.display(), e))?,
                (None, None) => return Err("An article body is required".into()),
            };
            let article = Article::builder()
                .title(args.title.clone())
                .body(body)
                .tags(args.tags.clone())
                .canonical_url(args.canonical_url.clone())
                .content_format(args.format)
                .build()?;

            let mut failures = 0usize;
            for platform in &args.platforms {
                let request = ArticleRequest::new(article.clone(), platform.clone());
                match pressroom.article().publish(&request).await {
                    Ok(disposition) => println!("{}: {}", platform, disposition),
                    Err(e) => {
                        error!(platform = %platform, error = %e, "Article publish failed");
                        println!("{}: failed ({})", platform, e.kind);
                        failures += 1;
                    }
                }
            }
            finish(failures)
        }
        Command::Check => {
            let reports = pressroom.check_connections().await;
            println!("{}", serde_json::to_string_pretty(&reports)?);
            Ok(())
        }
        Command::Status => {
            println!("dry_run: {}", config.dry_run);
            println!("dedup retention: {}h", config.dedup.retention_hours());
            for (kind, ready) in pressroom.registry().readiness() {
                let state = if ready { "configured" } else { "not configured" };
                println!("{:<10} {}", kind.display_name(), state);
            }
            Ok(())
        }
    }
}

fn finish(failures: usize) -> Result<(), Box<dyn std::error::Error>> {
    if failures == 0 {
        Ok(())
    } else {
        Err(format!("{} publish attempt(s) failed", failures).into())
    }
}
