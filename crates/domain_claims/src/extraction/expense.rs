//! Total expense extraction from bill text
//!
//! Extraction runs line by line so each amount stays attached to the words
//! around it. Two tiers are tried:
//!
//! 1. **Priority totals**: an amount directly after a strong total phrase.
//!    Net payable phrases outrank gross totals; within the winning group the
//!    largest value is returned. When this tier finds anything, its answer is
//!    final.
//! 2. **Fallback amounts**: broader number shapes, only on lines mentioning
//!    money, kept within a plausible bill range.

use rust_decimal::Decimal;
use std::collections::BTreeSet;
use tracing::debug;

use core_kernel::normalize_amount;

use super::patterns::ExtractionPatterns;

/// Smallest value a priority total may take
const PRIORITY_MIN: Decimal = Decimal::ONE;

/// Plausible bill range for fallback candidates
const FALLBACK_MIN: Decimal = Decimal::TEN;
const FALLBACK_MAX: Decimal = Decimal::from_parts(1_000_000, 0, 0, false, 0);

/// Extracts the total expense from bill text
pub fn extract_expense(patterns: &ExtractionPatterns, text: &str) -> Option<Decimal> {
    priority_total(patterns, text).or_else(|| fallback_amount(patterns, text))
}

fn priority_total(patterns: &ExtractionPatterns, text: &str) -> Option<Decimal> {
    let mut best: Vec<Option<Decimal>> = vec![None; patterns.priority_totals.len()];

    for line in text.lines() {
        for ((_, regex), slot) in patterns.priority_totals.iter().zip(best.iter_mut()) {
            for caps in regex.captures_iter(line) {
                let value = normalize_amount(&caps[1]);
                if value >= PRIORITY_MIN {
                    *slot = Some(slot.map_or(value, |current| current.max(value)));
                }
            }
        }
    }

    let (group, total) = patterns
        .priority_totals
        .iter()
        .zip(best)
        .find_map(|((group, _), total)| total.map(|t| (*group, t)))?;
    debug!(?group, %total, "Expense found in priority total");
    Some(total)
}

fn fallback_amount(patterns: &ExtractionPatterns, text: &str) -> Option<Decimal> {
    let candidates: BTreeSet<Decimal> = text
        .lines()
        .filter(|line| patterns.amount_line_keywords.is_match(line))
        .flat_map(|line| {
            patterns
                .fallback_amounts
                .iter()
                .flat_map(move |regex| regex.captures_iter(line))
                .map(|caps| normalize_amount(&caps[1]).normalize())
        })
        .collect();

    let amount = candidates
        .into_iter()
        .rev()
        .find(|value| (FALLBACK_MIN..=FALLBACK_MAX).contains(value))?;
    debug!(%amount, "Expense found by fallback amount scan");
    Some(amount)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn extract(text: &str) -> Option<Decimal> {
        extract_expense(&ExtractionPatterns::new(), text)
    }

    #[test]
    fn test_net_payable_outranks_gross_total() {
        let text = "Consultation 1500\nMedicines 2000\nTotal charge - 3500\nDiscount - 350\nAmount payable - 3150\n";
        assert_eq!(extract(text), Some(dec!(3150)));
    }

    #[test]
    fn test_priority_tier_is_trusted_over_fallback() {
        let text = "Grand Total: 3,500.00\nAdvance paid by card $ 9,999.00\n";
        assert_eq!(extract(text), Some(dec!(3500.00)));
    }

    #[test]
    fn test_maximum_within_priority_group() {
        let text = "Net amount: 1200\nFinal amount = 1450.50\n";
        assert_eq!(extract(text), Some(dec!(1450.50)));
    }

    #[test]
    fn test_currency_between_phrase_and_number() {
        assert_eq!(extract("Grand Total (INR): 12,450"), Some(dec!(12450)));
        assert_eq!(extract("Amount Payable: Rs. 3,150.00"), Some(dec!(3150.00)));
        assert_eq!(extract("Total: ₹ 1,23,456"), Some(dec!(123456)));
    }

    #[test]
    fn test_subtotal_is_not_a_priority_total() {
        let text = "Subtotal 800\nService fee $ 120.00\n";
        assert_eq!(extract(text), Some(dec!(800)));
    }

    #[test]
    fn test_fallback_ignores_lines_without_money_keywords() {
        let text = "Phone 9876543210\nRoom 12\nLab fee 450.00\n";
        assert_eq!(extract(text), Some(dec!(450.00)));
    }

    #[test]
    fn test_fallback_skips_dates_and_out_of_range_values() {
        let text = "Bill date 12/05/2024\nBill no 7\nConsultation charge INR 750\n";
        assert_eq!(extract(text), Some(dec!(750)));
    }

    #[test]
    fn test_fallback_filters_implausible_values() {
        let text = "Amount ref 5000000\nAmount 2500\n";
        assert_eq!(extract(text), Some(dec!(2500)));
    }

    #[test]
    fn test_nothing_found() {
        assert_eq!(extract("Patient: Jane Doe\nDiagnosis: Migraine"), None);
        assert_eq!(extract(""), None);
    }
}
