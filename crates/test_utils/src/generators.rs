//! Property-Based Test Generators
//!
//! Provides proptest strategies for amounts in the shapes bills and claim
//! forms actually use, plus `fake`-backed claimant data.

use core_kernel::Currency;
use domain_claims::submission::ClaimSubmission;
use fake::faker::address::en::{CityName, StreetName};
use fake::faker::name::en::Name;
use fake::Fake;
use proptest::prelude::*;
use rust_decimal::Decimal;

/// Strategy for generating supported currencies
pub fn currency_strategy() -> impl Strategy<Value = Currency> {
    prop_oneof![
        Just(Currency::USD),
        Just(Currency::EUR),
        Just(Currency::GBP),
        Just(Currency::JPY),
        Just(Currency::INR),
    ]
}

/// Strategy for positive amounts with two decimal places, up to 10 million
pub fn positive_amount_strategy() -> impl Strategy<Value = Decimal> {
    (1i64..1_000_000_000i64).prop_map(|cents| Decimal::new(cents, 2))
}

/// Strategy for amounts inside the fallback range (10 to 1,000,000)
pub fn plausible_bill_amount_strategy() -> impl Strategy<Value = Decimal> {
    (1_000i64..100_000_000i64).prop_map(|cents| Decimal::new(cents, 2))
}

/// Strategy for an amount rendered the way a claimant or bill might write it
///
/// Yields `(text, expected value)`.
pub fn formatted_amount_strategy() -> impl Strategy<Value = (String, Decimal)> {
    (positive_amount_strategy(), currency_strategy(), any::<bool>(), any::<bool>()).prop_map(
        |(amount, currency, indian, code)| {
            let grouped = group_digits(amount, indian);
            let prefix = if code { currency.code() } else { currency.symbol() };
            (format!("{prefix} {grouped}"), amount)
        },
    )
}

/// Formats an amount with two decimals and Western or Indian grouping
pub fn group_digits(amount: Decimal, indian: bool) -> String {
    let text = format!("{:.2}", amount.round_dp(2));
    let (whole, fraction) = text.split_once('.').unwrap_or((&text, "00"));

    let digits: Vec<char> = whole.chars().collect();
    let mut groups: Vec<String> = Vec::new();
    let mut end = digits.len();
    let mut size = 3;
    while end > 0 {
        let start = end.saturating_sub(size);
        groups.push(digits[start..end].iter().collect());
        end = start;
        if indian {
            size = 2;
        }
    }
    groups.reverse();
    format!("{}.{}", groups.join(","), fraction)
}

/// A complete submission with randomized claimant details
pub fn fake_submission(claimed_amount: &str) -> ClaimSubmission {
    let street: String = StreetName().fake();
    let city: String = CityName().fake();
    ClaimSubmission {
        patient_name: Name().fake(),
        address: format!("{} {street}, {city}", (1..200).fake::<u32>()),
        claim_type: "Outpatient".to_string(),
        claim_reason: "Consultation".to_string(),
        date_of_service: "2024-06-01".to_string(),
        medical_facility: format!("{city} General Hospital"),
        claimed_amount: claimed_amount.to_string(),
        description: String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_group_digits() {
        assert_eq!(group_digits(dec!(1234567.8), false), "1,234,567.80");
        assert_eq!(group_digits(dec!(123456), true), "1,23,456.00");
        assert_eq!(group_digits(dec!(12), true), "12.00");
    }

    #[test]
    fn test_fake_submission_is_complete() {
        let submission = fake_submission("100");
        assert!(submission.blank_fields().is_empty());
    }
}
