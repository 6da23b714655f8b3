//! Request handlers and error mapping.

use crate::SharedState;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::Json;
use gargi_core::chat::{ChatRequest, ChatResponse};
use gargi_core::error::{Error, ProxyError};
use serde::Serialize;
use serde_json::Value;
use tracing::{error, info, warn};

#[derive(Debug, Serialize)]
pub(crate) struct ErrorResponse {
    error: String,
}

pub(crate) type ApiError = (StatusCode, Json<ErrorResponse>);

/// Map a domain error onto a status code and `{"error": ...}` body.
pub(crate) fn error_response(err: Error) -> ApiError {
    let status = match &err {
        Error::InvalidRequest(_) => StatusCode::BAD_REQUEST,
        Error::Proxy(ProxyError::UnknownResource(_)) => StatusCode::NOT_FOUND,
        Error::Proxy(ProxyError::Upstream(_)) => StatusCode::BAD_GATEWAY,
        Error::Config { .. }
        | Error::Model(_)
        | Error::Serialization(_)
        | Error::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
    };

    if status.is_server_error() {
        error!(status = status.as_u16(), error = %err, "Request failed");
    } else {
        warn!(status = status.as_u16(), error = %err, "Request rejected");
    }

    (
        status,
        Json(ErrorResponse {
            error: err.to_string(),
        }),
    )
}

/// A chat body axum could not extract. Oversized bodies keep their 413,
/// anything else is an invalid request.
fn rejection_response(rejection: JsonRejection) -> ApiError {
    let status = rejection.status();
    if status == StatusCode::PAYLOAD_TOO_LARGE {
        warn!(status = status.as_u16(), "Request body too large");
        return (
            status,
            Json(ErrorResponse {
                error: rejection.body_text(),
            }),
        );
    }
    error_response(Error::InvalidRequest(rejection.body_text()))
}

#[derive(Serialize)]
pub(crate) struct RootResponse {
    message: &'static str,
}

pub(crate) async fn root_handler() -> Json<RootResponse> {
    Json(RootResponse {
        message: "India Energy API is running!",
    })
}

#[derive(Serialize)]
pub(crate) struct HealthResponse {
    status: &'static str,
    version: &'static str,
    uptime_secs: i64,
}

pub(crate) async fn health_handler(State(state): State<SharedState>) -> Json<HealthResponse> {
    let uptime = chrono::Utc::now() - state.start_time;
    Json(HealthResponse {
        status: "healthy",
        version: env!("CARGO_PKG_VERSION"),
        uptime_secs: uptime.num_seconds(),
    })
}

pub(crate) async fn npp_handler(
    State(state): State<SharedState>,
    Path(name): Path<String>,
) -> Result<Json<Value>, ApiError> {
    state
        .proxy
        .get_resource(&name)
        .await
        .map(Json)
        .map_err(|e| error_response(Error::Proxy(e)))
}

pub(crate) async fn chat_handler(
    State(state): State<SharedState>,
    payload: Result<Json<ChatRequest>, JsonRejection>,
) -> Result<Json<ChatResponse>, ApiError> {
    let Json(payload) = payload.map_err(rejection_response)?;
    info!(
        query_len = payload.query.len(),
        web = payload.use_web_search,
        "Chat request"
    );

    state
        .orchestrator
        .handle(payload)
        .await
        .map(Json)
        .map_err(error_response)
}
