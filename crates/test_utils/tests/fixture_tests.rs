//! Checks the shared fixtures against the real extractors and cascade

use std::sync::Arc;
use std::time::Duration;

use core_kernel::{normalize_amount, PortError};
use domain_claims::adjudication::{DecisionBasis, TolerancePolicy};
use domain_claims::exclusion::ExclusionList;
use domain_claims::bill::ExtractionStage;
use domain_claims::error::ClaimError;
use domain_claims::ports::mock::ScriptedInference;
use domain_claims::resolver::ResolverSettings;
use proptest::prelude::*;
use rust_decimal_macros::dec;

use test_utils::*;

// ============================================================================
// Fixture Extraction Tests
// ============================================================================

mod fixture_extraction_tests {
    use super::*;
    use domain_claims::extraction::{extract_diagnosis, extract_expense};

    #[test]
    fn test_fixture_bills_extract_expected_facts() {
        let patterns = shared_patterns();
        let cases = [
            (BillFixtures::clinic_bill(), "Bodyache with fever", AmountFixtures::clinic_net_payable()),
            (BillFixtures::hospital_bill_inr(), "Acute appendicitis", AmountFixtures::hospital_grand_total()),
            (BillFixtures::pharmacy_receipt_usd(), "Asthma", AmountFixtures::pharmacy_balance_due()),
            (BillFixtures::fallback_only_bill(), "Migraine", AmountFixtures::fallback_consultation()),
        ];

        for (bill, disease, expense) in cases {
            assert_eq!(extract_diagnosis(&patterns, bill).as_deref(), Some(disease), "{bill}");
            assert_eq!(extract_expense(&patterns, bill), Some(expense), "{bill}");
        }
    }

    #[test]
    fn test_unreadable_scan_yields_nothing() {
        let patterns = shared_patterns();
        assert_eq!(extract_diagnosis(&patterns, BillFixtures::unreadable_scan()), None);
        assert_eq!(extract_expense(&patterns, BillFixtures::unreadable_scan()), None);
    }
}

// ============================================================================
// Adjudication Scenario Tests
// ============================================================================

mod scenario_tests {
    use super::*;

    #[tokio::test]
    async fn test_matching_claim_is_approved() {
        let adjudicator = TestAdjudicatorBuilder::new().build();
        let adjudication = adjudicator
            .adjudicate(&SubmissionFixtures::matching_clinic_claim(), BillFixtures::clinic_bill())
            .await
            .unwrap();

        assert_resolved(&adjudication.resolution, "Bodyache with fever", dec!(3150));
        assert_sources(
            &adjudication.resolution,
            Some(ExtractionStage::Patterns),
            Some(ExtractionStage::Patterns),
        );
        assert_approved(&adjudication.assessment.decision, dec!(3150));
        assert!(adjudication.assessment.amounts_match);
    }

    #[tokio::test]
    async fn test_excess_claim_is_rejected_with_excess() {
        let adjudicator = TestAdjudicatorBuilder::new().build();
        let adjudication = adjudicator
            .adjudicate(&SubmissionFixtures::excess_clinic_claim(), BillFixtures::clinic_bill())
            .await
            .unwrap();

        let decision = &adjudication.assessment.decision;
        assert_rejected(decision, DecisionBasis::AmountExceedsBill);
        assert!(decision.reason.contains(&AmountFixtures::clinic_excess().to_string()));
    }

    #[tokio::test]
    async fn test_excluded_condition_is_rejected() {
        let adjudicator = TestAdjudicatorBuilder::new().build();
        let submission = ClaimSubmissionBuilder::new().with_claimed_amount("2000").build();
        let adjudication = adjudicator
            .adjudicate(&submission, BillFixtures::excluded_condition_bill())
            .await
            .unwrap();

        assert_rejected(&adjudication.assessment.decision, DecisionBasis::ExcludedCondition);
        assert!(adjudication.report.to_string().contains("Covered Condition: No"));
    }

    #[tokio::test]
    async fn test_configured_exclusions_replace_standard_list() {
        let adjudicator = TestAdjudicatorBuilder::new()
            .with_exclusions(ExclusionList::new(["fever"]))
            .build();

        let clinic = adjudicator
            .adjudicate(&SubmissionFixtures::matching_clinic_claim(), BillFixtures::clinic_bill())
            .await
            .unwrap();
        assert_rejected(&clinic.assessment.decision, DecisionBasis::ExcludedCondition);
        assert_eq!(clinic.assessment.matched_exclusion.as_deref(), Some("fever"));

        let submission = ClaimSubmissionBuilder::new().with_claimed_amount("2000").build();
        let hiv = adjudicator
            .adjudicate(&submission, BillFixtures::excluded_condition_bill())
            .await
            .unwrap();
        assert_approved(&hiv.assessment.decision, dec!(2000));
    }

    #[tokio::test]
    async fn test_wider_tolerance_accepts_excess_claim() {
        let adjudicator = TestAdjudicatorBuilder::new()
            .with_tolerance(TolerancePolicy {
                floor: dec!(1.0),
                rate: dec!(0.6),
            })
            .build();

        let adjudication = adjudicator
            .adjudicate(&SubmissionFixtures::excess_clinic_claim(), BillFixtures::clinic_bill())
            .await
            .unwrap();

        assert_approved(&adjudication.assessment.decision, dec!(5000));
        assert_eq!(adjudication.assessment.tolerance, dec!(1890));
    }

    #[tokio::test]
    async fn test_incomplete_submission_is_rejected() {
        let adjudicator = TestAdjudicatorBuilder::new().build();
        let adjudication = adjudicator
            .adjudicate(&SubmissionFixtures::incomplete(), BillFixtures::clinic_bill())
            .await
            .unwrap();

        let decision = &adjudication.assessment.decision;
        assert_rejected(decision, DecisionBasis::IncompleteInformation);
        assert!(decision.reason.contains("patient name"));
        assert!(decision.reason.contains("address"));
    }

    #[tokio::test]
    async fn test_blank_bill_short_circuits() {
        let remote = Arc::new(ScriptedInference::new("remote").answer("{}"));
        let adjudicator = TestAdjudicatorBuilder::new().with_remote(remote.clone()).build();

        let error = adjudicator
            .adjudicate(&SubmissionFixtures::matching_clinic_claim(), BillFixtures::blank())
            .await
            .unwrap_err();

        assert_eq!(error, ClaimError::EmptyBillText);
        assert_eq!(remote.call_count(), 0);
    }

    #[tokio::test]
    async fn test_unreadable_scan_recovered_by_local_model() {
        let remote = Arc::new(ScriptedInference::new("remote").fail(PortError::RateLimited {
            retry_after_secs: 30,
        }));
        let local = Arc::new(
            ScriptedInference::new("local")
                .scored("Dengue fever", 0.77)
                .scored("₹ 3,150", 0.64),
        );
        let adjudicator = TestAdjudicatorBuilder::new()
            .with_remote(remote.clone())
            .with_local(local.clone())
            .build();

        let adjudication = adjudicator
            .adjudicate(&SubmissionFixtures::matching_clinic_claim(), BillFixtures::unreadable_scan())
            .await
            .unwrap();

        assert_resolved(&adjudication.resolution, "Dengue fever", dec!(3150));
        assert_sources(
            &adjudication.resolution,
            Some(ExtractionStage::LocalInference),
            Some(ExtractionStage::LocalInference),
        );
        assert_approved(&adjudication.assessment.decision, dec!(3150));
        assert_eq!(remote.call_count(), 1);
        assert_eq!(local.call_count(), 2);
    }

    #[tokio::test]
    async fn test_hung_collaborators_end_in_expense_not_extracted() {
        let remote = Arc::new(
            ScriptedInference::new("remote").delayed(Duration::from_secs(10), r#"{"expense": 10}"#),
        );
        let local = Arc::new(
            ScriptedInference::new("local").delayed(Duration::from_secs(10), "10"),
        );
        let adjudicator = TestAdjudicatorBuilder::new()
            .with_remote(remote)
            .with_local(local)
            .with_settings(ResolverSettings {
                remote_timeout: Duration::from_millis(20),
                local_timeout: Duration::from_millis(20),
                ..ResolverSettings::default()
            })
            .build();

        let error = adjudicator
            .adjudicate(&SubmissionFixtures::matching_clinic_claim(), BillFixtures::unreadable_scan())
            .await
            .unwrap_err();

        assert_eq!(error, ClaimError::ExpenseNotExtracted);
    }
}

// ============================================================================
// Normalizer Property Tests
// ============================================================================

proptest! {
    #[test]
    fn prop_formatted_amounts_normalize_to_their_value((text, expected) in formatted_amount_strategy()) {
        prop_assert_eq!(normalize_amount(text.as_str()), expected);
    }

    #[test]
    fn prop_fake_submissions_are_complete(amount in plausible_bill_amount_strategy()) {
        let submission = fake_submission(&amount.to_string());
        prop_assert!(submission.blank_fields().is_empty());
        prop_assert_eq!(submission.claimed_amount(), amount);
    }
}
