//! Claim submissions as entered by the claimant

use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};

use core_kernel::normalize_amount;

/// A claim as submitted on the claim form
///
/// Every field is caller-supplied free text. The core only reads it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClaimSubmission {
    /// Patient name
    pub patient_name: String,
    /// Postal address
    pub address: String,
    /// Kind of claim (e.g. "Hospitalization", "Outpatient")
    pub claim_type: String,
    /// Why the claim is made, in the claimant's words
    pub claim_reason: String,
    /// Date of service as written on the form
    pub date_of_service: String,
    /// Treating hospital or clinic
    pub medical_facility: String,
    /// Claimed amount, unparsed; a JSON number is kept as its text
    #[serde(deserialize_with = "amount_text")]
    pub claimed_amount: String,
    /// Free-text description
    pub description: String,
}

/// A required submission value that is absent or unusable
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MissingField {
    PatientName,
    Address,
    ClaimReason,
    ClaimedAmount,
    BillExpense,
}

impl MissingField {
    /// Human-readable field name
    pub fn label(&self) -> &'static str {
        match self {
            MissingField::PatientName => "patient name",
            MissingField::Address => "address",
            MissingField::ClaimReason => "claim reason",
            MissingField::ClaimedAmount => "claimed amount",
            MissingField::BillExpense => "bill expense",
        }
    }
}

fn amount_text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum AmountText {
        Text(String),
        Number(serde_json::Number),
    }

    Ok(match Option::<AmountText>::deserialize(deserializer)? {
        Some(AmountText::Text(text)) => text,
        Some(AmountText::Number(number)) => number.to_string(),
        None => String::new(),
    })
}

impl ClaimSubmission {
    /// The claimed amount normalized to a non-negative decimal; zero when unparsable
    pub fn claimed_amount(&self) -> Decimal {
        normalize_amount(self.claimed_amount.as_str())
    }

    /// Required text fields that are blank after trimming
    pub fn blank_fields(&self) -> Vec<MissingField> {
        [
            (MissingField::PatientName, &self.patient_name),
            (MissingField::Address, &self.address),
            (MissingField::ClaimReason, &self.claim_reason),
        ]
        .into_iter()
        .filter(|(_, value)| value.trim().is_empty())
        .map(|(field, _)| field)
        .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_claimed_amount_is_normalized() {
        let submission = ClaimSubmission {
            claimed_amount: "₹ 3,150".to_string(),
            ..Default::default()
        };
        assert_eq!(submission.claimed_amount(), dec!(3150));
    }

    #[test]
    fn test_blank_fields_trims_whitespace() {
        let submission = ClaimSubmission {
            patient_name: "   ".to_string(),
            address: "12 Park Street".to_string(),
            ..Default::default()
        };
        assert_eq!(
            submission.blank_fields(),
            vec![MissingField::PatientName, MissingField::ClaimReason]
        );
    }

    #[test]
    fn test_deserialize_with_missing_fields() {
        let submission: ClaimSubmission =
            serde_json::from_str(r#"{"patient_name": "Asha Rao", "claimed_amount": "500"}"#).unwrap();
        assert_eq!(submission.patient_name, "Asha Rao");
        assert!(submission.address.is_empty());
    }

    #[test]
    fn test_deserialize_numeric_claimed_amount() {
        let integer: ClaimSubmission = serde_json::from_str(r#"{"claimed_amount": 3150}"#).unwrap();
        assert_eq!(integer.claimed_amount(), dec!(3150));

        let fractional: ClaimSubmission =
            serde_json::from_str(r#"{"claimed_amount": 1818.5}"#).unwrap();
        assert_eq!(fractional.claimed_amount(), dec!(1818.5));

        let null: ClaimSubmission = serde_json::from_str(r#"{"claimed_amount": null}"#).unwrap();
        assert!(null.claimed_amount.is_empty());
    }
}
