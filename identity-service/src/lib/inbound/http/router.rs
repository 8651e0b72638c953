use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::http::Request;
use axum::http::Response;
use axum::routing::post;
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::Span;

use super::handlers::signin::signin;
use super::handlers::signup::signup;
use crate::identity::ports::IdentityServicePort;

pub struct AppState<S: IdentityServicePort> {
    pub identity_service: Arc<S>,
}

// Manual impl: deriving would require S: Clone, but only the Arc is cloned
impl<S: IdentityServicePort> Clone for AppState<S> {
    fn clone(&self) -> Self {
        Self {
            identity_service: Arc::clone(&self.identity_service),
        }
    }
}

pub fn create_router<S: IdentityServicePort>(identity_service: Arc<S>) -> Router {
    let state = AppState { identity_service };

    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(|request: &Request<Body>| {
            tracing::info_span!(
                "http_request",
                method = %request.method(),
                uri = %request.uri(),
                version = ?request.version(),
            )
        })
        .on_request(|request: &Request<Body>, _span: &Span| {
            tracing::info!(
                method = %request.method(),
                uri = %request.uri(),
                "Request started"
            );
        })
        .on_response(
            |response: &Response<Body>, latency: Duration, _span: &Span| {
                tracing::info!(
                    status = response.status().as_u16(),
                    latency_ms = latency.as_millis(),
                    "Request completed"
                );
            },
        );

    Router::new()
        .route("/api/auth/signup", post(signup::<S>))
        .route("/api/auth/signin", post(signin::<S>))
        .layer(trace_layer)
        .layer(CorsLayer::permissive())
        .with_state(state)
}
