//! HTTP API module.
//!
//! Maps the task operations onto routes and owns the middleware stack:
//! request tracing, the cross-origin policy, and the per-request crash
//! barrier.

mod errors;
mod handlers;
mod responses;

pub use errors::{ApiError, ErrorResponse};
pub use handlers::{ApiState, SetStateRequest};
pub use responses::*;

use axum::{
    http::{header, HeaderName, Method},
    response::IntoResponse,
    routing::{get, put},
    Router,
};
use std::net::SocketAddr;
use tokio::net::TcpListener;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::storage::TaskStore;

/// Configuration for the API server.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Host to bind to.
    pub host: String,
    /// Port to bind to.
    pub port: u16,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
        }
    }
}

impl ApiConfig {
    /// Create a new API config with custom host and port.
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
        }
    }

    /// Get the socket address.
    pub fn socket_addr(&self) -> SocketAddr {
        format!("{}:{}", self.host, self.port)
            .parse()
            .expect("invalid socket address")
    }
}

/// Build the API router with all endpoints.
pub fn build_router<S: TaskStore + 'static>(state: ApiState<S>) -> Router {
    Router::new()
        // Health check
        .route("/health", get(handlers::health))
        // Tasks
        .route(
            "/tasks",
            get(handlers::list_tasks::<S>).post(handlers::create_task::<S>),
        )
        .route(
            "/tasks/{id}",
            put(handlers::set_task_state::<S>).delete(handlers::delete_task::<S>),
        )
        // Middleware
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer())
        .layer(CatchPanicLayer::custom(handle_panic))
        .with_state(state)
}

/// Permissive cross-origin policy, applied uniformly to all routes.
fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([
            Method::GET,
            Method::HEAD,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([
            HeaderName::from_static("x-requested-with"),
            header::CONTENT_TYPE,
            header::AUTHORIZATION,
        ])
}

/// Convert an unhandled fault in a handler into a generic 500 so one
/// request can neither take down the process nor leak internals.
fn handle_panic(err: Box<dyn std::any::Any + Send + 'static>) -> axum::response::Response {
    let detail = if let Some(s) = err.downcast_ref::<String>() {
        s.as_str()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        s
    } else {
        "unknown panic"
    };
    tracing::error!("request handler panicked: {}", detail);
    ApiError::Internal("internal server error".to_string()).into_response()
}

/// Bind the listener and serve until ctrl-c.
pub async fn serve<S: TaskStore + 'static>(
    config: ApiConfig,
    state: ApiState<S>,
) -> std::io::Result<()> {
    let router = build_router(state);
    let addr = config.socket_addr();

    let listener = TcpListener::bind(addr).await?;
    tracing::info!("API server listening on http://{}", addr);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_ok() {
        tracing::info!("shutdown signal received");
    }
}
