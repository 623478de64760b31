//! HTTP handlers for `/status`, `/simulate` and `/chat`.
//!
//! Handlers never fail the connection: every outcome, including bad input
//! and script failures, becomes a JSON body with a matching status code.

pub mod error;
pub mod types;

use axum::{Json, body::Bytes, extract::State, http::StatusCode};
use std::sync::Arc;

use crate::scripts::ResolveError;
use crate::server::Gateway;
use error::ApiError;
use types::{ChatRequest, ChatResult, SimulationRequest, SimulationResult, StatusInfo};

/// GET /status
pub async fn status() -> Json<StatusInfo> {
    Json(StatusInfo::now())
}

/// POST /simulate
pub async fn simulate(
    State(gateway): State<Arc<Gateway>>,
    body: Bytes,
) -> Result<(StatusCode, Json<SimulationResult>), ApiError> {
    let request: SimulationRequest = serde_json::from_slice(&body)?;
    let script_name = request.script_or(&gateway.config().default_script);
    let (status, result) = run_simulation(&gateway, script_name).await;
    Ok((status, Json(result)))
}

async fn run_simulation(gateway: &Gateway, script_name: &str) -> (StatusCode, SimulationResult) {
    let script_path = match gateway.resolver().resolve(script_name).await {
        Ok(path) => path,
        Err(e) => {
            let status = match e {
                ResolveError::InvalidName(_) => StatusCode::BAD_REQUEST,
                ResolveError::NotFound(_) => StatusCode::NOT_FOUND,
            };
            tracing::warn!(script = script_name, error = %e, "rejected simulation request");
            return (status, SimulationResult::failure(script_name, e.to_string()));
        }
    };

    tracing::info!(script = script_name, "starting simulation");
    let interpreter = &gateway.config().interpreter;

    match gateway.runner().run(interpreter, &script_path).await {
        Ok(output) => {
            tracing::info!(script = script_name, output_bytes = output.len(), "simulation finished");
            (StatusCode::OK, SimulationResult::success(script_name, output))
        }
        Err(e) => {
            tracing::error!(script = script_name, error = %e, "simulation failed");
            let message = format!("Execution error: {}\n{}", e, e.output());
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                SimulationResult::failure(script_name, message),
            )
        }
    }
}

/// POST /chat
///
/// Echo stub: no model is consulted.
pub async fn chat(body: Bytes) -> Result<(StatusCode, Json<ChatResult>), ApiError> {
    let request: ChatRequest = serde_json::from_slice(&body)?;

    if request.message.is_empty() {
        return Ok((StatusCode::BAD_REQUEST, Json(ChatResult::rejected())));
    }

    tracing::info!(message_len = request.message.len(), "chat message received");
    Ok((StatusCode::OK, Json(ChatResult::echo(&request.message))))
}

/// Wrong-method fallback for GET-only paths.
pub async fn get_only() -> ApiError {
    ApiError::MethodNotAllowed { allow: "GET,HEAD" }
}

/// Wrong-method fallback for POST-only paths.
pub async fn post_only() -> ApiError {
    ApiError::MethodNotAllowed { allow: "POST" }
}

/// Fallback for unknown paths.
pub async fn not_found() -> ApiError {
    ApiError::RouteNotFound
}
