//! HTTP request handlers

use super::types::{ErrorResponse, HealthResponse, UssdRequest, UssdResponse};
use super::AppState;
use crate::session::{interpret, Report, SessionContext};
use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Form, Json, Router,
};
use chrono::Utc;

/// Create the API router
pub fn create_router(state: AppState) -> Router {
    Router::new()
        // USSD aggregator callback
        .route("/ussd", post(ussd))
        // Read-only report listing for inspection
        .route("/reports", get(list_reports))
        .route("/health", get(health))
        .with_state(state)
}

// ============================================================
// USSD Session Turn
// ============================================================

async fn ussd(State(state): State<AppState>, Form(req): Form<UssdRequest>) -> UssdResponse {
    let context = SessionContext::new(req.phone_number.trim(), Utc::now());
    let outcome = interpret(&req.text, &context);

    tracing::debug!(
        session_id = %req.session_id,
        service_code = %req.service_code,
        state = ?outcome.state,
        "USSD turn interpreted"
    );

    if let Some(report) = &outcome.report {
        file_report(&state, report).await;
    }

    UssdResponse::from(&outcome)
}

/// Store the report and alert rangers.
///
/// Neither step can fail the session: the reporter gets the confirmation
/// whatever happens here.
async fn file_report(state: &AppState, report: &Report) {
    tracing::info!(
        reporter = %report.reporter,
        kind = %report.kind,
        location = %report.location,
        "Report filed"
    );

    if let Err(e) = state.reports.append(report.clone()).await {
        tracing::error!(error = %e, "Failed to store report");
    }

    let result = state
        .dispatcher
        .dispatch(&report.alert_message(), state.recipients.as_slice())
        .await;

    if !result.succeeded {
        tracing::error!(
            channel = result.channel.as_str(),
            detail = %result.detail,
            "Failed to notify rangers"
        );
    }
}

// ============================================================
// Inspection
// ============================================================

async fn list_reports(State(state): State<AppState>) -> Result<Json<Vec<Report>>, AppError> {
    let reports = state
        .reports
        .list()
        .await
        .map_err(|e| AppError::Internal(e.to_string()))?;
    Ok(Json(reports))
}

async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        primary_channel: state.dispatcher.primary_available(),
        recipients: state.recipients.len(),
    })
}

// ============================================================
// Error Handling
// ============================================================

#[derive(Debug)]
enum AppError {
    Internal(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
        };

        let body = Json(ErrorResponse::new(message));
        (status, body).into_response()
    }
}
