mod analysis;
mod ats;
mod config;
mod errors;
mod models;
mod profile;
mod routes;
mod session;
mod state;

use anyhow::Result;
use chrono::Duration;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::analysis::job_analyzer::{JobAnalyzer, KeywordJobAnalyzer};
use crate::config::{AnalyzerBackend, Config};
use crate::routes::build_router;
use crate::session::store::SessionStore;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on invalid env values)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!(
                "{}={}",
                env!("CARGO_PKG_NAME").replace('-', "_"),
                &config.rust_log
            ))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting CV Builder API v{}", env!("CARGO_PKG_VERSION"));

    let analyzer = build_analyzer(&config.job_analyzer);
    let sessions = SessionStore::new(
        config.max_sessions,
        Duration::seconds(config.session_ttl_secs),
    );
    info!(
        "Session store ready (max {} sessions, idle TTL {}s)",
        config.max_sessions, config.session_ttl_secs
    );

    let state = AppState {
        config: config.clone(),
        sessions,
        analyzer,
    };

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

fn build_analyzer(backend: &AnalyzerBackend) -> Arc<dyn JobAnalyzer> {
    match backend {
        AnalyzerBackend::Keyword => {
            info!("Job analyzer: keyword");
            Arc::new(KeywordJobAnalyzer)
        }
    }
}
