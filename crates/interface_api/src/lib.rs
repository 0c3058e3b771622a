//! HTTP API Layer
//!
//! This crate provides the REST API for the claim adjudicator using Axum.
//!
//! # Architecture
//!
//! - **Handlers**: Adjudication, bill extraction and health endpoints
//! - **Middleware**: Request ids, tracing, request logging
//! - **DTOs**: Request/Response data transfer objects
//! - **Error Handling**: Consistent error responses
//!
//! # Example
//!
//! ```rust,ignore
//! use interface_api::create_router;
//!
//! let app = create_router(Arc::new(adjudicator), config);
//! axum::serve(listener, app).await?;
//! ```

pub mod config;
pub mod error;
pub mod middleware;
pub mod handlers;
pub mod dto;

use std::sync::Arc;

use axum::{
    Router,
    routing::{get, post},
    middleware as axum_middleware,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::trace::TraceLayer;

use domain_claims::service::ClaimAdjudicator;

use crate::config::ApiConfig;
use crate::handlers::{claims, health};
use crate::middleware::request_logging;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub adjudicator: Arc<ClaimAdjudicator>,
    pub config: ApiConfig,
}

/// Creates the main API router
///
/// # Arguments
///
/// * `adjudicator` - Fully wired claim adjudicator
/// * `config` - API configuration
///
/// # Returns
///
/// Configured Axum router with all routes and middleware
pub fn create_router(adjudicator: Arc<ClaimAdjudicator>, config: ApiConfig) -> Router {
    let state = AppState { adjudicator, config };

    let health_routes = Router::new()
        .route("/health", get(health::health_check))
        .route("/health/ready", get(health::readiness_check));

    let api_routes = Router::new()
        .route("/claims/adjudicate", post(claims::adjudicate_claim))
        .route("/bills/extract", post(claims::extract_bill));

    Router::new()
        .merge(health_routes)
        .nest("/api/v1", api_routes)
        .layer(axum_middleware::from_fn(request_logging))
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
        .with_state(state)
}
