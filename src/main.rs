use std::sync::Arc;

use clap::Parser;
use clap::Subcommand;
use tracing::info;
use tubepulse::config::AppConfig;
use tubepulse::database::Database;
use tubepulse::ingest::IngestService;
use tubepulse::llm::LlmService;
use tubepulse::report::ReportService;
use tubepulse::sentiment::SentimentScorer;
use tubepulse::youtube::TranscriptClient;
use tubepulse::youtube::YouTubeClient;
use tubepulse::Result;

#[derive(Parser)]
#[command(name = "tubepulse")]
#[command(about = "TubePulse CLI for YouTube audience sentiment analysis")]
#[command(version)]
struct Cli {
    /// Enable verbose debug logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize the database schema
    Init,
    /// Start the API server
    Serve {
        /// Host to bind
        #[arg(long, default_value = "127.0.0.1")]
        host: String,
        /// Port to bind
        #[arg(short, long, default_value = "3000")]
        port: u16,
        /// Enable permissive CORS for browser dashboards
        #[arg(long)]
        cors: bool,
    },
    /// Fetch, label and store comments for a video
    Fetch {
        /// YouTube video identifier
        video_id: String,
    },
    /// Print video details
    Details {
        /// YouTube video identifier
        video_id: String,
    },
    /// Print the aggregate summary for a video's stored comments
    Summary {
        /// YouTube video identifier
        video_id: String,
    },
    /// Build the creator wellbeing report for a video
    Health {
        /// YouTube video identifier
        video_id: String,
    },
    /// Generate the LLM content analysis for a video
    Analyze {
        /// YouTube video identifier
        video_id: String,
    },
    /// Remove expired cache entries
    CachePurge,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = AppConfig::load()?;
    if cli.verbose {
        tubepulse::logging::init_logging_with_level("debug")?;
    } else {
        tubepulse::logging::init_logging_with_config(Some(&config))?;
    }

    match cli.command {
        Commands::Init => {
            let database = Database::from_config(&config).await?;
            database.init_schema().await?;
            println!("Database schema initialized");
        }
        Commands::Serve { host, port, cors } => {
            tubepulse::api::serve_api(&config, host, port, cors).await?;
        }
        Commands::Fetch { video_id } => {
            let ingest = build_ingest(&config).await?;
            let outcome = ingest.refresh_comments(&video_id).await?;
            info!(
                "Fetched {} comments, stored {} ({} labeled by fallback)",
                outcome.fetched, outcome.stored, outcome.degraded_labels
            );
            println!("{}", serde_json::to_string_pretty(&outcome)?);
        }
        Commands::Details { video_id } => {
            let youtube = YouTubeClient::from_config(&config)?;
            let details = youtube.video_details(&video_id).await?;
            println!("{}", serde_json::to_string_pretty(&details)?);
        }
        Commands::Summary { video_id } => {
            let reports = build_reports(&config).await?;
            let summary = reports.summary(&video_id).await?;
            println!("{}", serde_json::to_string_pretty(&summary)?);
        }
        Commands::Health { video_id } => {
            let reports = build_reports(&config).await?;
            let report = reports.health_report(&video_id).await?;
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
        Commands::Analyze { video_id } => {
            let reports = build_reports(&config).await?;
            let analysis = reports.content_analysis(&video_id).await?;
            println!("{}", serde_json::to_string_pretty(&analysis)?);
        }
        Commands::CachePurge => {
            let database = Database::from_config(&config).await?;
            database.verify_schema_or_error().await?;
            let removed = database.purge_expired_cache().await?;
            println!("Purged {removed} expired cache entries");
        }
    }

    Ok(())
}

async fn build_ingest(config: &AppConfig) -> Result<IngestService> {
    let database = Arc::new(Database::from_config(config).await?);
    database.verify_schema_or_error().await?;

    Ok(IngestService::new(
        Arc::new(YouTubeClient::from_config(config)?),
        Arc::new(LlmService::new(config)?),
        SentimentScorer::default(),
        database,
        config.ingest.clone(),
    ))
}

async fn build_reports(config: &AppConfig) -> Result<ReportService> {
    let database = Arc::new(Database::from_config(config).await?);
    database.verify_schema_or_error().await?;

    Ok(ReportService::new(
        database,
        Arc::new(YouTubeClient::from_config(config)?),
        Arc::new(TranscriptClient::from_config(config)?),
        Arc::new(LlmService::new(config)?),
        SentimentScorer::default(),
        config.cache.clone(),
    ))
}
