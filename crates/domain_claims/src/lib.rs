//! Medical Claim Adjudication Domain
//!
//! This crate reads a medical bill's text, works out the treated condition
//! and the billed total, and decides a reimbursement claim against it.
//!
//! # Adjudication Flow
//!
//! ```text
//! bill text -> patterns -> remote inference -> local inference -> BillInfo
//! BillInfo + ClaimSubmission -> exclusions -> tolerance -> ClaimDecision -> ClaimReport
//! ```
//!
//! Inference collaborators sit behind [`ports::TextInferencePort`]; HTTP
//! implementations live in [`adapters`].

pub mod adapters;
pub mod adjudication;
pub mod bill;
pub mod error;
pub mod exclusion;
pub mod extraction;
pub mod ports;
pub mod report;
pub mod resolver;
pub mod service;
pub mod submission;

pub use adjudication::{
    ClaimAssessment, ClaimDecision, DecisionBasis, DecisionEngine, TolerancePolicy, Verdict,
};
pub use bill::{BillInfo, BillResolution, ExtractionStage, PartialBill, UNSPECIFIED_CONDITION};
pub use error::ClaimError;
pub use exclusion::{is_excluded, ExclusionGuard, ExclusionList};
pub use extraction::{extract_diagnosis, extract_expense, ExtractionPatterns};
pub use ports::{DisabledInference, InferenceAnswer, InferenceQuery, TextInferencePort};
pub use report::ClaimReport;
pub use resolver::{BillInfoResolver, ResolverSettings};
pub use service::{Adjudication, ClaimAdjudicator};
pub use submission::{ClaimSubmission, MissingField};
