//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create the Axum Router with the inspection handler on every path
//! - Wire up middleware (raw header capture, request ID, tracing, timeout)
//! - Bind the listener and serve until shutdown
//! - Turn each request into a block or allow response

use std::time::Duration;

use axum::{
    body::Body,
    extract::State,
    http::{request::Parts, Method, Request},
    middleware,
    response::{IntoResponse, Response},
    routing::get,
    Router,
};
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::{
    request_id::{PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::config::FirewallConfig;
use crate::error::FirewallError;
use crate::http::request::{self, MakeRequestUuid, X_REQUEST_ID};
use crate::http::response;
use crate::inspection::Decision;
use crate::lifecycle::ShutdownSignal;
use crate::net::{HeadRecorder, RecordingListener};

/// Application state injected into handlers.
#[derive(Debug, Clone)]
pub struct AppState {
    pub max_body_size: usize,
}

/// HTTP server that fronts every request with the pattern inspector.
pub struct FirewallServer {
    router: Router,
    config: FirewallConfig,
}

impl FirewallServer {
    /// Create a new server with the given configuration.
    pub fn new(config: FirewallConfig) -> Self {
        let state = AppState {
            max_body_size: config.limits.max_body_size,
        };
        let router = Self::build_router(&config, state);
        Self { router, config }
    }

    /// Build the Axum router with all middleware layers.
    #[allow(deprecated)]
    fn build_router(config: &FirewallConfig, state: AppState) -> Router {
        Router::new()
            .route("/", get(inspect_handler).post(inspect_handler))
            .route("/{*path}", get(inspect_handler).post(inspect_handler))
            .with_state(state)
            .layer(
                ServiceBuilder::new()
                    .layer(SetRequestIdLayer::new(X_REQUEST_ID, MakeRequestUuid))
                    .layer(TraceLayer::new_for_http())
                    .layer(PropagateRequestIdLayer::new(X_REQUEST_ID))
                    .layer(TimeoutLayer::new(Duration::from_secs(
                        config.limits.request_timeout_secs,
                    ))),
            )
            // Outermost, so every request on a connection takes its raw head in turn.
            .layer(middleware::from_fn(request::capture_wire_headers))
    }

    /// The fully layered router, for serving in-process.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Bind a TCP listener on the configured host and port.
    pub async fn bind(&self) -> Result<TcpListener, FirewallError> {
        let address = self.config.listener.socket_addr()?;
        TcpListener::bind(address)
            .await
            .map_err(|source| FirewallError::Bind { address, source })
    }

    /// Serve on `listener` until `shutdown` fires or the process is signalled.
    pub async fn run(
        self,
        listener: TcpListener,
        shutdown: ShutdownSignal,
    ) -> Result<(), FirewallError> {
        let addr = listener.local_addr().map_err(FirewallError::Serve)?;
        tracing::info!(address = %addr, "Firewall HTTP server running");

        let app = self
            .router
            .into_make_service_with_connect_info::<HeadRecorder>();
        axum::serve(RecordingListener::new(listener), app)
            .with_graceful_shutdown(shutdown.recv())
            .await
            .map_err(FirewallError::Serve)?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}

/// Inspect a request and answer 200 or 403.
///
/// GET (and HEAD) requests are judged on query and headers; POST requests
/// also have their body read and scanned.
async fn inspect_handler(State(state): State<AppState>, req: Request<Body>) -> Response {
    let (parts, body) = req.into_parts();
    let mut inspected = request::inspected_head(&parts);

    if parts.method == Method::POST {
        let declared = request::declared_content_length(&parts.headers);

        if declared > state.max_body_size {
            // Query and headers still take precedence over the size check.
            let decision = inspected.decision();
            if decision.is_blocked() {
                record_decision(&parts, decision);
                return decision.into_response();
            }
            tracing::warn!(
                request_id = %request::request_id(&parts.headers),
                declared,
                limit = state.max_body_size,
                "Request body exceeds limit"
            );
            return response::body_too_large();
        }

        inspected.body = Some(request::read_body(body, declared).await);
    }

    let decision = inspected.decision();
    record_decision(&parts, decision);
    decision.into_response()
}

fn record_decision(parts: &Parts, decision: Decision) {
    let request_id = request::request_id(&parts.headers);
    match decision {
        Decision::Blocked(field) => tracing::warn!(
            request_id = %request_id,
            method = %parts.method,
            path = %parts.uri.path(),
            field = %field,
            "Blocked suspicious request"
        ),
        Decision::Allowed => tracing::debug!(
            request_id = %request_id,
            method = %parts.method,
            path = %parts.uri.path(),
            "Request allowed"
        ),
    }
}
