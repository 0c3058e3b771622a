//! Tests for amount normalization and the currency table
//!
//! Covers the shapes amounts take on claim forms, bills and inference
//! replies, plus the edge cases that must collapse to zero.

use core_kernel::{normalize_amount, Currency, RawAmount};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use std::borrow::Cow;

mod text_amounts {
    use super::*;

    #[test]
    fn test_dollar_amount_with_separators() {
        assert_eq!(normalize_amount("$1,234.56"), dec!(1234.56));
    }

    #[test]
    fn test_rupee_amount_with_indian_grouping() {
        assert_eq!(normalize_amount("₹1,23,456"), dec!(123456));
    }

    #[test]
    fn test_amount_with_trailing_code() {
        assert_eq!(normalize_amount("3150.00 INR"), dec!(3150.00));
    }

    #[test]
    fn test_plain_digits() {
        assert_eq!(normalize_amount("5000"), dec!(5000));
    }

    #[test]
    fn test_owned_string() {
        let owned = String::from("Rs. 700");
        assert_eq!(normalize_amount(&owned), dec!(700));
        assert_eq!(normalize_amount(owned), dec!(700));
    }

    #[test]
    fn test_letters_only_is_zero() {
        assert_eq!(normalize_amount("abc"), Decimal::ZERO);
    }

    #[test]
    fn test_whitespace_only_is_zero() {
        assert_eq!(normalize_amount("   "), Decimal::ZERO);
    }

    #[test]
    fn test_multiple_points_is_zero() {
        assert_eq!(normalize_amount("12.05.2024"), Decimal::ZERO);
    }

    #[test]
    fn test_negative_sign_is_stripped() {
        assert_eq!(normalize_amount("-$40.00"), dec!(40.00));
    }
}

mod non_text_amounts {
    use super::*;

    #[test]
    fn test_missing_is_zero() {
        assert_eq!(normalize_amount(RawAmount::Missing), Decimal::ZERO);
        assert_eq!(normalize_amount(None::<Decimal>), Decimal::ZERO);
    }

    #[test]
    fn test_some_is_unwrapped() {
        assert_eq!(normalize_amount(Some("$12")), dec!(12));
    }

    #[test]
    fn test_exact_decimal_passes_through() {
        assert_eq!(normalize_amount(dec!(3150.50)), dec!(3150.50));
    }

    #[test]
    fn test_float_is_converted() {
        assert_eq!(normalize_amount(99.5_f64), dec!(99.5));
    }

    #[test]
    fn test_explicit_cow_text() {
        let raw = RawAmount::Text(Cow::Owned("£ 80".to_string()));
        assert_eq!(normalize_amount(raw), dec!(80));
    }

    #[test]
    fn test_json_float() {
        let value = serde_json::json!(2750.25);
        assert_eq!(normalize_amount(&value), dec!(2750.25));
    }
}

mod currencies {
    use super::*;

    #[test]
    fn test_symbols_and_codes() {
        assert_eq!(Currency::INR.symbol(), "₹");
        assert_eq!(Currency::INR.code(), "INR");
        assert_eq!(Currency::USD.to_string(), "USD");
    }

    #[test]
    fn test_every_currency_contributes_a_word_token() {
        let words = Currency::word_tokens();
        for currency in Currency::ALL {
            assert!(words.contains(&currency.code()));
        }
    }

    #[test]
    fn test_currency_serializes_uppercase() {
        let json = serde_json::to_string(&Currency::EUR).unwrap();
        assert_eq!(json, "\"EUR\"");
    }
}
