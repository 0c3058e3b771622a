//! Facts extracted from a medical bill

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::extraction::diagnosis::collapse_whitespace;

/// Placeholder diagnosis used when nothing could be extracted.
/// Never treated as a real, possibly excluded condition.
pub const UNSPECIFIED_CONDITION: &str = "unspecified condition";

/// Resolved bill facts
///
/// `expense` is never negative; zero means no usable amount was found,
/// not a free treatment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BillInfo {
    pub disease: String,
    pub expense: Decimal,
}

impl BillInfo {
    /// Creates bill info, clamping a negative expense to its magnitude
    pub fn new(disease: impl Into<String>, expense: Decimal) -> Self {
        Self {
            disease: disease.into(),
            expense: expense.abs(),
        }
    }

    /// Bill info carrying both sentinels
    pub fn unresolved() -> Self {
        Self::new(UNSPECIFIED_CONDITION, Decimal::ZERO)
    }

    /// True if the disease is the placeholder sentinel
    pub fn has_placeholder_disease(&self) -> bool {
        is_placeholder(&self.disease)
    }

    /// True if an amount was extracted
    pub fn has_expense(&self) -> bool {
        self.expense > Decimal::ZERO
    }
}

/// True for the sentinel diagnosis, compared case-insensitively
pub fn is_placeholder(disease: &str) -> bool {
    disease.trim().eq_ignore_ascii_case(UNSPECIFIED_CONDITION)
}

/// A diagnosis counts when it is longer than two characters and not the sentinel
pub fn is_valid_diagnosis(disease: &str) -> bool {
    disease.trim().chars().count() > 2 && !is_placeholder(disease)
}

/// An expense counts when it is strictly positive
pub fn is_valid_expense(expense: Decimal) -> bool {
    expense > Decimal::ZERO
}

/// A stage in the extraction cascade
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExtractionStage {
    /// Regex patterns over the bill text
    Patterns,
    /// Hosted inference service
    RemoteInference,
    /// On-host question answering model
    LocalInference,
}

impl ExtractionStage {
    /// Stages in the order they are tried
    pub const CASCADE: [ExtractionStage; 3] = [
        ExtractionStage::Patterns,
        ExtractionStage::RemoteInference,
        ExtractionStage::LocalInference,
    ];
}

impl fmt::Display for ExtractionStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ExtractionStage::Patterns => "pattern extraction",
            ExtractionStage::RemoteInference => "remote inference",
            ExtractionStage::LocalInference => "local inference",
        };
        f.write_str(name)
    }
}

/// What one stage found; either field may be missing
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PartialBill {
    pub disease: Option<String>,
    pub expense: Option<Decimal>,
}

impl PartialBill {
    /// Creates a partial result, dropping values that do not count
    pub fn new(disease: Option<String>, expense: Option<Decimal>) -> Self {
        Self {
            disease: disease
                .map(|d| collapse_whitespace(&d))
                .filter(|d| is_valid_diagnosis(d)),
            expense: expense.map(|e| e.abs()).filter(|e| is_valid_expense(*e)),
        }
    }

    /// True when both a diagnosis and an expense are present
    pub fn is_complete(&self) -> bool {
        self.disease.is_some() && self.expense.is_some()
    }

    /// True when neither field is present
    pub fn is_empty(&self) -> bool {
        self.disease.is_none() && self.expense.is_none()
    }
}

/// The resolver's answer plus which stage supplied each field
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BillResolution {
    pub bill: BillInfo,
    pub disease_source: Option<ExtractionStage>,
    pub expense_source: Option<ExtractionStage>,
}

impl BillResolution {
    /// Builds an empty resolution to merge stage results into
    pub fn start() -> ResolutionBuilder {
        ResolutionBuilder::default()
    }
}

/// Accumulates stage results without letting later stages overwrite earlier ones
#[derive(Debug, Clone, Default)]
pub struct ResolutionBuilder {
    disease: Option<(String, ExtractionStage)>,
    expense: Option<(Decimal, ExtractionStage)>,
}

impl ResolutionBuilder {
    /// Fills only the fields that are still missing
    pub fn merge(&mut self, stage: ExtractionStage, found: PartialBill) {
        if self.disease.is_none() {
            self.disease = found.disease.map(|d| (d, stage));
        }
        if self.expense.is_none() {
            self.expense = found.expense.map(|e| (e, stage));
        }
    }

    /// True when both fields are filled
    pub fn is_complete(&self) -> bool {
        self.disease.is_some() && self.expense.is_some()
    }

    pub fn has_disease(&self) -> bool {
        self.disease.is_some()
    }

    pub fn has_expense(&self) -> bool {
        self.expense.is_some()
    }

    /// Finishes the resolution, substituting sentinels for missing fields
    pub fn finish(self) -> BillResolution {
        let (disease, disease_source) = match self.disease {
            Some((d, stage)) => (d, Some(stage)),
            None => (UNSPECIFIED_CONDITION.to_string(), None),
        };
        let (expense, expense_source) = match self.expense {
            Some((e, stage)) => (e, Some(stage)),
            None => (Decimal::ZERO, None),
        };

        BillResolution {
            bill: BillInfo::new(disease, expense),
            disease_source,
            expense_source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_partial_bill_drops_invalid_values() {
        let partial = PartialBill::new(Some(" ab ".to_string()), Some(Decimal::ZERO));
        assert!(partial.is_empty());

        let partial = PartialBill::new(Some(UNSPECIFIED_CONDITION.to_string()), Some(dec!(-20)));
        assert_eq!(partial.disease, None);
        assert_eq!(partial.expense, Some(dec!(20)));
    }

    #[test]
    fn test_merge_never_overwrites_earlier_values() {
        let mut builder = BillResolution::start();
        builder.merge(
            ExtractionStage::Patterns,
            PartialBill::new(Some("Typhoid fever".to_string()), None),
        );
        builder.merge(
            ExtractionStage::RemoteInference,
            PartialBill::new(Some("Malaria".to_string()), Some(dec!(900))),
        );
        assert!(builder.is_complete());

        let resolution = builder.finish();
        assert_eq!(resolution.bill, BillInfo::new("Typhoid fever", dec!(900)));
        assert_eq!(resolution.disease_source, Some(ExtractionStage::Patterns));
        assert_eq!(resolution.expense_source, Some(ExtractionStage::RemoteInference));
    }

    #[test]
    fn test_finish_uses_sentinels() {
        let resolution = BillResolution::start().finish();
        assert_eq!(resolution.bill, BillInfo::unresolved());
        assert!(resolution.bill.has_placeholder_disease());
        assert!(!resolution.bill.has_expense());
        assert_eq!(resolution.disease_source, None);
    }

    #[test]
    fn test_placeholder_detection_ignores_case() {
        assert!(is_placeholder("Unspecified Condition"));
        assert!(!is_valid_diagnosis("UNSPECIFIED CONDITION"));
        assert!(is_valid_diagnosis("Flu"));
    }
}
