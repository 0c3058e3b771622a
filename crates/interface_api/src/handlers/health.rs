//! Health check handlers

use axum::{extract::State, Json};
use serde::Serialize;

use crate::AppState;

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

#[derive(Serialize)]
pub struct CollaboratorStatus {
    pub name: String,
    pub configured: bool,
}

#[derive(Serialize)]
pub struct ReadinessResponse {
    pub status: String,
    pub version: String,
    pub collaborators: Vec<CollaboratorStatus>,
}

/// Health check endpoint
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// Readiness check
///
/// Pattern extraction always works, so the service is ready even with no
/// inference collaborator configured; the response says which ones are.
pub async fn readiness_check(State(state): State<AppState>) -> Json<ReadinessResponse> {
    let collaborators = state
        .adjudicator
        .resolver()
        .collaborators()
        .into_iter()
        .map(|(name, configured)| CollaboratorStatus {
            name: name.to_string(),
            configured,
        })
        .collect();

    Json(ReadinessResponse {
        status: "ready".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        collaborators,
    })
}
