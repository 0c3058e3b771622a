//! Claims domain errors

use thiserror::Error;

/// Terminal input errors that stop an adjudication before a decision is made
///
/// These are distinct from policy rejections: the claimant can fix them by
/// resubmitting a readable bill.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClaimError {
    #[error("The uploaded bill is empty or could not be read.")]
    EmptyBillText,

    #[error("Could not extract expense amount from bill. Please resubmit with clearer documentation.")]
    ExpenseNotExtracted,
}

impl ClaimError {
    /// Stable machine-readable code
    pub fn code(&self) -> &'static str {
        match self {
            ClaimError::EmptyBillText => "EMPTY_BILL_TEXT",
            ClaimError::ExpenseNotExtracted => "EXPENSE_NOT_EXTRACTED",
        }
    }
}
