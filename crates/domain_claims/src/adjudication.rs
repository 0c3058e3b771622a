//! Claim adjudication logic
//!
//! Checks run in a fixed order and the first failure decides the claim:
//!
//! ```text
//! completeness -> exclusion -> amount within tolerance -> approve
//! ```

use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;
use tracing::warn;

use crate::bill::{is_valid_expense, BillInfo};
use crate::exclusion::ExclusionList;
use crate::submission::{ClaimSubmission, MissingField};

/// Final verdict
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Verdict {
    Approved,
    Rejected,
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Verdict::Approved => f.write_str("APPROVED"),
            Verdict::Rejected => f.write_str("REJECTED"),
        }
    }
}

/// Which rule decided the claim
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DecisionBasis {
    /// Required information missing
    IncompleteInformation,
    /// Condition is on the exclusion list
    ExcludedCondition,
    /// Claim is above the bill plus tolerance
    AmountExceedsBill,
    /// Claim and bill agree within tolerance
    AmountsMatch,
    /// Claim is below the bill by more than the tolerance
    ClaimBelowBill,
}

/// Outcome of adjudicating one claim
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClaimDecision {
    pub verdict: Verdict,
    pub basis: DecisionBasis,
    pub reason: String,
    pub approved_amount: Option<Decimal>,
}

impl ClaimDecision {
    fn approve(basis: DecisionBasis, amount: Decimal, reason: String) -> Self {
        Self {
            verdict: Verdict::Approved,
            basis,
            reason,
            approved_amount: Some(amount),
        }
    }

    fn reject(basis: DecisionBasis, reason: String) -> Self {
        Self {
            verdict: Verdict::Rejected,
            basis,
            reason,
            approved_amount: None,
        }
    }

    pub fn is_approved(&self) -> bool {
        self.verdict == Verdict::Approved
    }

    /// One-line summary, e.g. `APPROVED: 3150.00`
    pub fn headline(&self) -> String {
        match self.approved_amount {
            Some(amount) => format!("{}: {}", self.verdict, format_amount(amount)),
            None => format!("{}: {}", self.verdict, self.reason),
        }
    }
}

/// Slack allowed between the claimed and billed amounts
///
/// The window is `max(floor, rate * bill expense)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TolerancePolicy {
    pub floor: Decimal,
    pub rate: Decimal,
}

impl Default for TolerancePolicy {
    fn default() -> Self {
        Self {
            floor: dec!(1.0),
            rate: dec!(0.01),
        }
    }
}

impl TolerancePolicy {
    /// Tolerance window for a bill expense, `None` when out of range
    pub fn window(&self, expense: Decimal) -> Option<Decimal> {
        expense
            .checked_mul(self.rate)
            .map(|window| window.max(self.floor))
    }

    /// Window and ceiling (`expense + window`) for a bill expense
    pub fn bounds(&self, expense: Decimal) -> Option<(Decimal, Decimal)> {
        let window = self.window(expense)?;
        Some((window, expense.checked_add(window)?))
    }
}

/// A decision plus the facts behind it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClaimAssessment {
    pub decision: ClaimDecision,
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

/// Applies completeness, exclusion and amount rules to a claim
#[derive(Debug, Clone)]
pub struct DecisionEngine {
    exclusions: Arc<ExclusionList>,
    tolerance: TolerancePolicy,
}

impl Default for DecisionEngine {
    fn default() -> Self {
        Self::new(Arc::new(ExclusionList::standard()), TolerancePolicy::default())
    }
}

impl DecisionEngine {
    pub fn new(exclusions: Arc<ExclusionList>, tolerance: TolerancePolicy) -> Self {
        Self {
            exclusions,
            tolerance,
        }
    }

    pub fn exclusions(&self) -> &ExclusionList {
        &self.exclusions
    }

    pub fn tolerance(&self) -> TolerancePolicy {
        self.tolerance
    }

    /// Decides the claim
    pub fn decide(&self, submission: &ClaimSubmission, bill: &BillInfo) -> ClaimDecision {
        self.assess(submission, bill).decision
    }

    /// Decides the claim and records every fact the decision used
    pub fn assess(&self, submission: &ClaimSubmission, bill: &BillInfo) -> ClaimAssessment {
        let claimed = submission.claimed_amount();
        let expense = bill.expense;
        let bounds = self.tolerance.bounds(expense);
        if bounds.is_none() {
            warn!(%expense, "Bill expense out of range for tolerance");
        }
        // An expense whose ceiling overflows is treated as unusable
        let (tolerance, ceiling) = bounds.unwrap_or((self.tolerance.floor, expense));

        let mut missing_fields = submission.blank_fields();
        if !is_valid_expense(claimed) {
            missing_fields.push(MissingField::ClaimedAmount);
        }
        if !is_valid_expense(expense) || bounds.is_none() {
            missing_fields.push(MissingField::BillExpense);
        }

        let matched_exclusion = self
            .exclusions
            .matching_term(&bill.disease)
            .map(str::to_string);

        let info_complete = missing_fields.is_empty();
        let covered = matched_exclusion.is_none();
        let amount_valid = claimed <= ceiling;
        let amounts_match = (claimed - expense).abs() <= tolerance;

        let decision = if !info_complete {
            let missing: Vec<&str> = missing_fields.iter().map(MissingField::label).collect();
            ClaimDecision::reject(
                DecisionBasis::IncompleteInformation,
                format!("Incomplete information: missing {}", missing.join(", ")),
            )
        } else if let Some(term) = &matched_exclusion {
            ClaimDecision::reject(
                DecisionBasis::ExcludedCondition,
                format!(
                    "Treatment for '{}' is excluded under '{}'",
                    bill.disease, term
                ),
            )
        } else if !amount_valid {
            ClaimDecision::reject(
                DecisionBasis::AmountExceedsBill,
                format!(
                    "Claim amount ({}) exceeds bill amount ({}) plus tolerance ({}) by {}",
                    format_amount(claimed),
                    format_amount(expense),
                    format_amount(tolerance),
                    format_amount(claimed - ceiling),
                ),
            )
        } else if amounts_match {
            ClaimDecision::approve(
                DecisionBasis::AmountsMatch,
                claimed,
                format!(
                    "Claim amount matches bill amount ({}) within tolerance ({})",
                    format_amount(expense),
                    format_amount(tolerance),
                ),
            )
        } else {
            let approved = claimed.min(expense);
            ClaimDecision::approve(
                DecisionBasis::ClaimBelowBill,
                approved,
                format!(
                    "Claim amount ({}) is below bill amount ({}); approved up to {}",
                    format_amount(claimed),
                    format_amount(expense),
                    format_amount(approved),
                ),
            )
        };

        ClaimAssessment {
            decision,
            claimed_amount: claimed,
            bill_expense: expense,
            tolerance,
            info_complete,
            covered,
            amount_valid,
            amounts_match,
            missing_fields,
            matched_exclusion,
        }
    }
}

/// Formats an amount with exactly two decimals
pub fn format_amount(amount: Decimal) -> String {
    format!(
        "{:.2}",
        amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn submission(claimed: &str) -> ClaimSubmission {
        ClaimSubmission {
            patient_name: "Ravi Kumar".to_string(),
            address: "14 MG Road, Pune".to_string(),
            claim_reason: "Fever treatment".to_string(),
            claimed_amount: claimed.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_tolerance_window_has_a_floor() {
        let policy = TolerancePolicy::default();
        assert_eq!(policy.window(dec!(50)), Some(dec!(1.0)));
        assert_eq!(policy.window(dec!(3150)), Some(dec!(31.50)));
    }

    #[test]
    fn test_bounds_overflow_is_none() {
        let policy = TolerancePolicy {
            floor: dec!(1.0),
            rate: dec!(5),
        };
        assert_eq!(policy.window(Decimal::MAX), None);
        assert_eq!(TolerancePolicy::default().bounds(Decimal::MAX), None);
        assert_eq!(
            TolerancePolicy::default().bounds(dec!(1000)),
            Some((dec!(10.00), dec!(1010.00)))
        );
    }

    #[test]
    fn test_overflowing_expense_is_incomplete() {
        let engine = DecisionEngine::default();
        let expense = Decimal::from_str_exact("79000000000000000000000000000").unwrap();
        let assessment = engine.assess(&submission("3150"), &BillInfo::new("Dengue", expense));

        assert_eq!(assessment.decision.basis, DecisionBasis::IncompleteInformation);
        assert_eq!(assessment.missing_fields, vec![MissingField::BillExpense]);
        assert!(assessment.decision.approved_amount.is_none());
    }

    #[test]
    fn test_boundary_counts_as_match() {
        let engine = DecisionEngine::default();
        let decision = engine.decide(&submission("1010"), &BillInfo::new("Dengue", dec!(1000)));
        assert_eq!(decision.basis, DecisionBasis::AmountsMatch);
        assert_eq!(decision.approved_amount, Some(dec!(1010)));
    }

    #[test]
    fn test_just_above_ceiling_is_rejected() {
        let engine = DecisionEngine::default();
        let assessment = engine.assess(&submission("1010.01"), &BillInfo::new("Dengue", dec!(1000)));
        assert_eq!(assessment.decision.basis, DecisionBasis::AmountExceedsBill);
        assert!(!assessment.amount_valid);
        assert!(assessment.decision.reason.ends_with("by 0.01"));
    }

    #[test]
    fn test_claim_below_bill_is_approved_as_claimed() {
        let engine = DecisionEngine::default();
        let decision = engine.decide(&submission("800"), &BillInfo::new("Dengue", dec!(1000)));
        assert_eq!(decision.basis, DecisionBasis::ClaimBelowBill);
        assert_eq!(decision.approved_amount, Some(dec!(800)));
        assert_eq!(decision.headline(), "APPROVED: 800.00");
    }

    #[test]
    fn test_incomplete_reason_lists_every_missing_field() {
        let engine = DecisionEngine::default();
        let mut form = submission("abc");
        form.address.clear();

        let assessment = engine.assess(&form, &BillInfo::unresolved());
        assert!(!assessment.info_complete);
        assert_eq!(
            assessment.missing_fields,
            vec![MissingField::Address, MissingField::ClaimedAmount, MissingField::BillExpense]
        );
        assert_eq!(
            assessment.decision.reason,
            "Incomplete information: missing address, claimed amount, bill expense"
        );
    }

    #[test]
    fn test_completeness_is_checked_before_exclusion() {
        let engine = DecisionEngine::default();
        let decision = engine.decide(&submission(""), &BillInfo::new("HIV/AIDS", dec!(500)));
        assert_eq!(decision.basis, DecisionBasis::IncompleteInformation);
    }

    #[test]
    fn test_format_amount_pads_and_rounds() {
        assert_eq!(format_amount(dec!(1818.5)), "1818.50");
        assert_eq!(format_amount(dec!(3150)), "3150.00");
        assert_eq!(format_amount(dec!(0.005)), "0.01");
    }
}
