/// HTTP server module
///
/// Provides the webhook entry point that triggers a reconciliation run,
/// plus health and status endpoints. The trigger is fire-and-forget from
/// the caller's perspective: the response is always an acknowledgement,
/// and job failures are logged as the error-reporting sink.

use anyhow::{Context, Result};
use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
    response::Json,
    routing::{get, post},
    Router,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::config::Config;
use crate::job::{ReconcileJob, RunReport};

#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub job: Arc<ReconcileJob>,
    pub run_status: Arc<RwLock<RunStatus>>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RunStatus {
    pub last_run: Option<DateTime<Utc>>,
    pub last_report: Option<RunReport>,
    pub last_error: Option<String>,
    pub total_runs: u32,
}

/// Create and configure the HTTP server router
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/run", post(run_endpoint))
        .route("/run-status", get(run_status_endpoint))
        .with_state(state)
}

/// Health check endpoint
async fn health_check() -> Result<Json<serde_json::Value>, StatusCode> {
    Ok(Json(serde_json::json!({
        "status": "ok",
        "service": "metric_rain_bot",
        "timestamp": Utc::now().to_rfc3339()
    })))
}

/// Trigger endpoint: run one reconciliation pass
async fn run_endpoint(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<serde_json::Value>, StatusCode> {
    // Check authentication if a webhook secret is set
    if let Some(secret) = &state.config.webhook_secret {
        let auth_header = headers
            .get("authorization")
            .and_then(|h| h.to_str().ok())
            .unwrap_or("");

        let token = match auth_header.strip_prefix("Bearer ") {
            Some(t) => t,
            None => return Err(StatusCode::UNAUTHORIZED),
        };
        if token != secret.as_str() {
            return Err(StatusCode::UNAUTHORIZED);
        }
    }

    log::info!("Run triggered via HTTP endpoint");

    // The caller gets an acknowledgement either way; the outcome is
    // recorded on the status struct and logged
    match state.job.run().await {
        Ok(report) => {
            let mut status = state.run_status.write().await;
            status.last_run = Some(Utc::now());
            status.last_report = Some(report.clone());
            status.last_error = None;
            status.total_runs += 1;

            Ok(Json(serde_json::json!({
                "status": "acknowledged",
                "outcome": "success",
                "replies_posted": report.replies_posted,
                "posts_scanned": report.posts_scanned,
            })))
        }
        Err(e) => {
            log::error!("Run failed: {}", e);

            let mut status = state.run_status.write().await;
            status.last_run = Some(Utc::now());
            status.last_error = Some(e.to_string());
            status.total_runs += 1;

            Ok(Json(serde_json::json!({
                "status": "acknowledged",
                "outcome": "error",
            })))
        }
    }
}

/// Get the outcome of the most recent run
async fn run_status_endpoint(
    State(state): State<AppState>,
) -> Result<Json<serde_json::Value>, StatusCode> {
    let status = state.run_status.read().await;

    Ok(Json(serde_json::json!({
        "last_run": status.last_run.map(|d| d.to_rfc3339()),
        "total_runs": status.total_runs,
        "last_error": status.last_error,
        "last_report": status.last_report,
    })))
}

/// Start the HTTP server
pub async fn start_server(state: AppState, port: u16) -> Result<()> {
    let app = create_router(state);

    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{}", port))
        .await
        .context("Failed to bind HTTP server")?;

    log::info!("HTTP server listening on port {}", port);

    axum::serve(listener, app)
        .await
        .context("HTTP server error")?;

    Ok(())
}
