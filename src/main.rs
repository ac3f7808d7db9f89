//! Wildlife Guardian - USSD incident reporting gateway
//!
//! Field reporters file poaching and emergency reports over USSD; every
//! report is stored and relayed to rangers by SMS.

mod api;
mod config;
mod reports;
mod session;
mod sms;

use api::{create_router, AppState};
use config::Config;
use reports::{MemoryReportSink, ReportSink, SqliteReportSink};
use sms::Dispatcher;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "wildlife_guardian=info,tower_http=debug".into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .json()
                .with_current_span(false)
                .with_span_list(false),
        )
        .init();

    // Configuration
    let config = Config::from_env()?;
    tracing::info!(
        account = ?config.account,
        environment = ?config.account.environment(),
        recipients = config.recipients.len(),
        "Configuration loaded"
    );

    if config.recipients.is_empty() {
        tracing::warn!("No rangers configured. Set RANGERS to a comma-separated list of phone numbers.");
    }

    // Report storage
    let reports: Arc<dyn ReportSink> = match &config.db_path {
        Some(path) => {
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            tracing::info!(path = %path.display(), "Opening report database");
            Arc::new(SqliteReportSink::open(path)?)
        }
        None => {
            tracing::info!("Keeping reports in memory; they are lost on restart");
            Arc::new(MemoryReportSink::new())
        }
    };

    // SMS channels, resolved once for the life of the process
    let dispatcher = Dispatcher::from_account(&config.account, config.primary_enabled)?;

    let state = AppState::new(reports, dispatcher, config.recipients.clone());

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let app = create_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(cors);

    // Start server
    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    tracing::info!("Wildlife Guardian listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
