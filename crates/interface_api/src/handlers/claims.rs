//! Claims handlers

use axum::{extract::rejection::JsonRejection, extract::State, Json};
use tracing::info;

use crate::dto::claims::*;
use crate::{error::ApiError, AppState};

/// Adjudicates a claim against its bill text
pub async fn adjudicate_claim(
    State(state): State<AppState>,
    request: Result<Json<AdjudicateRequest>, JsonRejection>,
) -> Result<Json<AdjudicationResponse>, ApiError> {
    let Json(request) = request?;

    let adjudication = state
        .adjudicator
        .adjudicate(&request.submission, &request.bill_text)
        .await?;

    let response = AdjudicationResponse::from(adjudication);
    info!(
        adjudication_id = %response.adjudication_id,
        verdict = %response.verdict,
        "Adjudication returned"
    );
    Ok(Json(response))
}

/// Extracts diagnosis and expense from bill text without deciding a claim
pub async fn extract_bill(
    State(state): State<AppState>,
    request: Result<Json<ExtractBillRequest>, JsonRejection>,
) -> Result<Json<BillResponse>, ApiError> {
    let Json(request) = request?;

    let resolution = state.adjudicator.extract(&request.bill_text).await?;
    Ok(Json(BillResponse::from(&resolution)))
}
