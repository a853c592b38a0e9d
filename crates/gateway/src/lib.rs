//! HTTP gateway for r2skill.
//!
//! The voice platform POSTs request envelopes to `/skill` and receives
//! response envelopes back. `/health` is for load balancers and probes.
//!
//! Built on Axum.

use axum::extract::DefaultBodyLimit;
use axum::{
    Router,
    extract::State,
    http::StatusCode,
    response::Json,
    routing::{get, post},
};
use serde::Serialize;
use std::sync::Arc;
use tracing::{error, info};

use r2skill_core::envelope::RequestEnvelope;
use r2skill_core::response::ResponseEnvelope;
use r2skill_runtime::Skill;

/// Request envelopes are small; anything larger is rejected before parsing.
pub const BODY_LIMIT: usize = 256 * 1024;

type SharedSkill = Arc<Skill>;

/// Build the Axum router with all gateway routes.
pub fn build_router(skill: SharedSkill) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .route("/skill", post(skill_handler))
        .layer(DefaultBodyLimit::max(BODY_LIMIT))
        .layer(tower_http::trace::TraceLayer::new_for_http())
        .with_state(skill)
}

/// Start the gateway HTTP server.
///
/// Opens the configured attribute store and assembles the production skill
/// once; every request shares them.
pub async fn start(config: r2skill_config::AppConfig) -> Result<(), Box<dyn std::error::Error>> {
    let addr = format!("{}:{}", config.gateway.host, config.gateway.port);

    let store = r2skill_persistence::build_from_config(&config).await?;
    let skill = Arc::new(r2skill_runtime::build_skill(&config, store)?);
    let app = build_router(skill);

    info!(addr = %addr, backend = %config.persistence.backend, "Gateway starting");
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Gateway stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!(error = %e, "Failed to listen for shutdown signal");
    }
}

// --- Handlers ---

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    version: &'static str,
}

async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}

#[derive(Serialize)]
struct ErrorResponse {
    error: String,
}

async fn skill_handler(
    State(skill): State<SharedSkill>,
    Json(envelope): Json<RequestEnvelope>,
) -> Result<Json<ResponseEnvelope>, (StatusCode, Json<ErrorResponse>)> {
    match skill.invoke(envelope).await {
        Ok(reply) => Ok(Json(reply)),
        Err(e) => {
            error!(error = %e, "Skill invocation failed");
            Err((
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: e.to_string(),
                }),
            ))
        }
    }
}
