//! PlainLaw API Server
//!
//! A web service that simplifies legal documents. Provides REST API
//! endpoints for:
//!
//! - Document simplification (summary, keyword extraction, readability,
//!   keyword highlighting, document-type classification)
//! - Free-form question answering against a document
//!
//! ## Architecture
//!
//! The server is thin orchestration over pretrained models reached through
//! a hosted inference API:
//!
//! - Summarization, zero-shot classification, and question answering are
//!   delegated to `plainlaw-core`'s `HostedModelService`
//! - The bespoke pipeline pieces (TF-IDF keywords, readability bands,
//!   highlighting, classification overrides) run in-process per request
//! - No persistence; every request is self-contained

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};
use clap::Parser;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{info, Level};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use plainlaw_core::{HostedModelService, InferenceConfig};

mod error;
mod handlers;
mod state;

use handlers::{handle_ask, handle_health, handle_simplify};
use state::AppState;

/// Command-line arguments for the PlainLaw server
#[derive(Parser, Debug)]
#[command(name = "plainlaw-api")]
#[command(about = "PlainLaw server for legal document simplification")]
struct Args {
    /// Port to listen on
    #[arg(short, long, default_value = "3000")]
    port: u16,

    /// Host address to bind to
    #[arg(long, default_value = "0.0.0.0")]
    host: String,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    let args = Args::parse();

    // Initialize logging
    let log_level = if args.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };

    tracing_subscriber::registry()
        .with(EnvFilter::from_default_env().add_directive(log_level.into()))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting PlainLaw API on {}:{}", args.host, args.port);

    // One model client for the process lifetime, shared by every request
    let models = HostedModelService::new(InferenceConfig::from_env());
    let state = AppState::new(Arc::new(models));

    // Configure CORS
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // Build router
    let app = Router::new()
        // Health check
        .route("/health", get(handle_health))
        // API endpoints
        .route("/api/simplify", post(handle_simplify))
        .route("/api/ask", post(handle_ask))
        // Apply middleware
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state);

    // Start server
    let addr: SocketAddr = format!("{}:{}", args.host, args.port).parse()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;

    info!("Server listening on http://{}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
