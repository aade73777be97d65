//! Tool-calling HTTP surface
//!
//! Exposes the media service as named tools over axum:
//!
//! - `GET /healthz` liveness check, unauthenticated
//! - `GET /tools` tool descriptors
//! - `POST /tools/{name}` invoke a tool with a JSON argument object
//!
//! Every `/tools` route requires `Authorization: Bearer <MCP_SERVER_API_KEY>`.
//!
//! ## Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use siumai_media_gateway::{config::Settings, server, service::MediaService};
//!
//! let settings = Settings::from_env()?;
//! let service = Arc::new(MediaService::new(settings.provider, settings.storage)?);
//! let app = server::router(service, &settings.server);
//! let listener = tokio::net::TcpListener::bind(settings.server.bind_address()).await?;
//! axum::serve(listener, app).await?;
//! ```

pub mod auth;
pub mod tools;

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Router, middleware};
use secrecy::SecretString;
use serde_json::json;
use std::sync::Arc;

use crate::config::ServerConfig;
use crate::error::{ErrorCategory, GatewayError};
use crate::service::MediaService;

/// Shared handler state.
#[derive(Clone)]
pub struct AppState {
    pub service: Arc<MediaService>,
    pub api_key: SecretString,
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("service", &self.service)
            .field("api_key", &"[REDACTED]")
            .finish()
    }
}

/// Build the router for a running service.
pub fn router(service: Arc<MediaService>, config: &ServerConfig) -> Router {
    let state = AppState {
        service,
        api_key: config.api_key.clone(),
    };

    let protected = Router::new()
        .route("/tools", get(tools::list_tools))
        .route("/tools/{name}", post(tools::call_tool))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth::require_bearer,
        ));

    Router::new()
        .route("/healthz", get(healthz))
        .merge(protected)
        .with_state(state)
}

async fn healthz() -> &'static str {
    "ok"
}

/// Failure returned by a tool handler.
#[derive(Debug)]
pub enum ToolError {
    /// The service reported an error.
    Gateway(GatewayError),
    /// No tool with this name exists.
    UnknownTool(String),
    /// The request body is not a JSON object matching the tool's arguments.
    InvalidArguments(String),
}

impl From<GatewayError> for ToolError {
    fn from(err: GatewayError) -> Self {
        Self::Gateway(err)
    }
}

/// HTTP status for a gateway error category.
pub fn status_for(category: ErrorCategory) -> StatusCode {
    match category {
        ErrorCategory::Validation | ErrorCategory::Unsupported => StatusCode::BAD_REQUEST,
        ErrorCategory::Storage => StatusCode::SERVICE_UNAVAILABLE,
        ErrorCategory::Provider | ErrorCategory::Network => StatusCode::BAD_GATEWAY,
        ErrorCategory::Parsing | ErrorCategory::Configuration | ErrorCategory::Lifecycle => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}

pub(crate) fn error_body(status: StatusCode, kind: &str, message: String) -> Response {
    (
        status,
        Json(json!({ "error": { "kind": kind, "message": message } })),
    )
        .into_response()
}

impl IntoResponse for ToolError {
    fn into_response(self) -> Response {
        match self {
            Self::Gateway(err) => {
                let category = err.category();
                let status = status_for(category);
                if status.is_server_error() {
                    tracing::error!(kind = category.as_str(), "Tool call failed: {err}");
                } else {
                    tracing::info!(kind = category.as_str(), "Tool call rejected: {err}");
                }
                error_body(status, category.as_str(), err.to_string())
            }
            Self::UnknownTool(name) => error_body(
                StatusCode::NOT_FOUND,
                "not_found",
                format!("Unknown tool: {name}"),
            ),
            Self::InvalidArguments(message) => {
                error_body(StatusCode::BAD_REQUEST, "validation", message)
            }
        }
    }
}
