//! HTTP server implementation

use std::sync::Arc;

use axum::Router;
use tower_http::compression::CompressionLayer;
use tower_http::cors::Any;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::api::handlers::AppState;
use crate::api::routes;
use crate::config::AppConfig;
use crate::database::Database;
use crate::ingest::IngestService;
use crate::llm::LlmService;
use crate::report::ReportService;
use crate::sentiment::SentimentScorer;
use crate::youtube::TranscriptClient;
use crate::youtube::YouTubeClient;
use crate::Result;

/// Start the API server
pub async fn serve_api(
    config: &AppConfig,
    host: String,
    port: u16,
    enable_cors: bool,
) -> Result<()> {
    info!("🚀 Starting TubePulse API server...");

    // Initialize services
    let database = Arc::new(Database::from_config(config).await?);
    database.verify_schema_or_error().await?;

    let youtube = Arc::new(YouTubeClient::from_config(config)?);
    let transcript = Arc::new(TranscriptClient::from_config(config)?);
    let llm = Arc::new(LlmService::new(config)?);
    let scorer = SentimentScorer::default();

    let ingest = Arc::new(IngestService::new(
        youtube.clone(),
        llm.clone(),
        scorer.clone(),
        database.clone(),
        config.ingest.clone(),
    ));
    let reports = Arc::new(ReportService::new(
        database.clone(),
        youtube.clone(),
        transcript,
        llm,
        scorer,
        config.cache.clone(),
    ));

    let state = AppState {
        database,
        youtube,
        ingest,
        reports,
    };

    // Build API routes
    let api_router = routes::api_routes(state);
    let mut app = Router::new().nest("/api", api_router);

    // Add middleware layers
    app = app
        .layer(TraceLayer::new_for_http())
        .layer(CompressionLayer::new());

    // Add CORS if enabled
    if enable_cors {
        info!("✅ CORS enabled");
        let cors = CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any);
        app = app.layer(cors);
    }

    // Start server
    let addr = format!("{host}:{port}");
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    info!("🌐 API server listening on http://{}", addr);
    info!("📋 RESTful API available at http://{}/api", addr);
    info!("");
    info!("Available endpoints:");
    info!("  GET    /api/health                          - Health check");
    info!("  GET    /api/videos/:id                      - Video details");
    info!("  GET    /api/videos/:id/comments             - Stored comments");
    info!("  POST   /api/videos/:id/comments/fetch       - Fetch and label comments");
    info!("  GET    /api/videos/:id/summary              - Aggregate summary");
    info!("  GET    /api/videos/:id/health-report        - Creator wellbeing report");
    info!("  GET    /api/videos/:id/analysis             - LLM content analysis");
    info!("  POST   /api/chat                            - Creator chat");
    info!("  GET    /api/cache?key=                      - Cache lookup");
    info!("  POST   /api/cache                           - Cache store");
    info!("  DELETE /api/cache?key=                      - Cache invalidation");
    info!("  GET    /api/stats                           - Stored-comment statistics");

    axum::serve(listener, app).await?;

    Ok(())
}
