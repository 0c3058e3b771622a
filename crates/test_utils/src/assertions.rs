//! Custom Test Assertions
//!
//! Provides specialized assertion helpers for decisions and resolutions
//! that give more meaningful failure messages than bare `assert_eq!`.

use domain_claims::adjudication::{ClaimDecision, DecisionBasis, Verdict};
use domain_claims::bill::{BillResolution, ExtractionStage};
use rust_decimal::Decimal;

/// Asserts that a decision approves exactly `amount`
pub fn assert_approved(decision: &ClaimDecision, amount: Decimal) {
    assert_eq!(
        decision.verdict,
        Verdict::Approved,
        "Expected approval, got {:?}: {}",
        decision.basis,
        decision.reason
    );
    assert_eq!(
        decision.approved_amount,
        Some(amount),
        "Approved amount mismatch: {}",
        decision.reason
    );
}

/// Asserts that a decision rejects on the given basis
pub fn assert_rejected(decision: &ClaimDecision, basis: DecisionBasis) {
    assert_eq!(
        decision.verdict,
        Verdict::Rejected,
        "Expected rejection ({:?}), got approval of {:?}",
        basis,
        decision.approved_amount
    );
    assert_eq!(decision.basis, basis, "Rejection basis mismatch: {}", decision.reason);
    assert!(
        decision.approved_amount.is_none(),
        "Rejected decision carries an approved amount"
    );
}

/// Asserts the resolved disease and expense
pub fn assert_resolved(resolution: &BillResolution, disease: &str, expense: Decimal) {
    assert_eq!(
        resolution.bill.disease, disease,
        "Disease mismatch (source {:?})",
        resolution.disease_source
    );
    assert_eq!(
        resolution.bill.expense, expense,
        "Expense mismatch (source {:?})",
        resolution.expense_source
    );
}

/// Asserts which stages supplied the disease and expense
pub fn assert_sources(
    resolution: &BillResolution,
    disease: Option<ExtractionStage>,
    expense: Option<ExtractionStage>,
) {
    assert_eq!(resolution.disease_source, disease, "Disease source mismatch");
    assert_eq!(resolution.expense_source, expense, "Expense source mismatch");
}
