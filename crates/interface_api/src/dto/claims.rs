//! Claims DTOs

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use domain_claims::adjudication::{ClaimAssessment, DecisionBasis, Verdict};
use domain_claims::bill::{BillResolution, ExtractionStage};
use domain_claims::service::Adjudication;
use domain_claims::submission::{ClaimSubmission, MissingField};

/// Claim form fields plus the bill's extracted text
#[derive(Debug, Deserialize)]
pub struct AdjudicateRequest {
    #[serde(flatten)]
    pub submission: ClaimSubmission,
    #[serde(default)]
    pub bill_text: String,
}

#[derive(Debug, Deserialize)]
pub struct ExtractBillRequest {
    #[serde(default)]
    pub bill_text: String,
}

/// Resolved bill facts and where each came from
#[derive(Debug, Serialize)]
pub struct BillResponse {
    pub disease: String,
    pub expense: Decimal,
    pub disease_source: Option<ExtractionStage>,
    pub expense_source: Option<ExtractionStage>,
}

impl From<&BillResolution> for BillResponse {
    fn from(resolution: &BillResolution) -> Self {
        Self {
            disease: resolution.bill.disease.clone(),
            expense: resolution.bill.expense,
            disease_source: resolution.disease_source,
            expense_source: resolution.expense_source,
        }
    }
}

/// Checks behind the decision
#[derive(Debug, Serialize)]
pub struct VerificationResponse {
    pub claimed_amount: Decimal,
    pub bill_expense: Decimal,
    pub tolerance: Decimal,
    pub info_complete: bool,
    pub covered: bool,
    pub amount_valid: bool,
    pub amounts_match: bool,
    pub missing_fields: Vec<MissingField>,
    pub matched_exclusion: Option<String>,
}

impl From<&ClaimAssessment> for VerificationResponse {
    fn from(assessment: &ClaimAssessment) -> Self {
        Self {
            claimed_amount: assessment.claimed_amount,
            bill_expense: assessment.bill_expense,
            tolerance: assessment.tolerance,
            info_complete: assessment.info_complete,
            covered: assessment.covered,
            amount_valid: assessment.amount_valid,
            amounts_match: assessment.amounts_match,
            missing_fields: assessment.missing_fields.clone(),
            matched_exclusion: assessment.matched_exclusion.clone(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct AdjudicationResponse {
    pub adjudication_id: Uuid,
    pub adjudicated_at: DateTime<Utc>,
    pub verdict: Verdict,
    pub basis: DecisionBasis,
    pub reason: String,
    pub approved_amount: Option<Decimal>,
    pub bill: BillResponse,
    pub verification: VerificationResponse,
    pub report: String,
}

impl From<Adjudication> for AdjudicationResponse {
    fn from(adjudication: Adjudication) -> Self {
        let decision = &adjudication.assessment.decision;
        Self {
            adjudication_id: Uuid::now_v7(),
            adjudicated_at: Utc::now(),
            verdict: decision.verdict,
            basis: decision.basis,
            reason: decision.reason.clone(),
            approved_amount: decision.approved_amount,
            bill: BillResponse::from(&adjudication.resolution),
            verification: VerificationResponse::from(&adjudication.assessment),
            report: adjudication.report.to_string(),
        }
    }
}
