//! Pre-built Test Fixtures
//!
//! Provides ready-to-use bill texts and claim submissions. These fixtures
//! are consistent and predictable; each bill's expected facts are listed
//! next to it.

use std::sync::Arc;

use domain_claims::extraction::ExtractionPatterns;
use domain_claims::submission::ClaimSubmission;
use once_cell::sync::Lazy;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

static PATTERNS: Lazy<Arc<ExtractionPatterns>> = Lazy::new(|| Arc::new(ExtractionPatterns::new()));

/// Pattern tables shared by every test in the process
pub fn shared_patterns() -> Arc<ExtractionPatterns> {
    Arc::clone(&PATTERNS)
}

/// Fixture for bill texts
pub struct BillFixtures;

impl BillFixtures {
    /// Clinic bill with a gross total and a lower net payable.
    /// Expected: "Bodyache with fever", 3150
    pub fn clinic_bill() -> &'static str {
        "CITY CARE CLINIC\n\
         Patient Name: Ravi Kumar\n\
         Date: 12/03/2024\n\
         Diagnosis: Bodyache with fever\n\
         Consultation fee - 500\n\
         Medicines - 3000\n\
         Total charge - 3500\n\
         Discount - 350\n\
         Amount payable - 3150\n"
    }

    /// Hospital bill with Indian digit grouping.
    /// Expected: "Acute appendicitis", 1,23,450.00
    pub fn hospital_bill_inr() -> &'static str {
        "SUNRISE MULTISPECIALITY HOSPITAL\n\
         Final Diagnosis: Acute appendicitis; laparoscopic appendectomy\n\
         Room charges: Rs. 24,000.00\n\
         Surgery: Rs. 85,000.00\n\
         Grand Total: Rs. 1,23,450.00\n"
    }

    /// Pharmacy receipt in dollars with no labeled diagnosis.
    /// Expected: "Asthma" (vocabulary), 86.40
    pub fn pharmacy_receipt_usd() -> &'static str {
        "GREENLEAF PHARMACY\n\
         Inhaler refill for asthma\n\
         Salbutamol inhaler  $ 72.00\n\
         Spacer  $ 14.40\n\
         Balance due: $86.40\n"
    }

    /// Bill whose only amount appears on a keyword line without a strong total phrase.
    /// Expected: "Migraine", 1,450.00
    pub fn fallback_only_bill() -> &'static str {
        "Neurology outpatient visit 04/05/2024\n\
         Reason for Visit: Migraine\n\
         Consultation and tests billed at INR 1,450.00\n"
    }

    /// Bill carrying an excluded condition.
    /// Expected: "HIV/AIDS", 2000
    pub fn excluded_condition_bill() -> &'static str {
        "Diagnosis: HIV/AIDS\nTotal Amount: 2000\n"
    }

    /// OCR noise with nothing the patterns can use
    pub fn unreadable_scan() -> &'static str {
        "~~ ## illegible ## ~~\n%% scan quality low %%\n"
    }

    /// Blank text from a failed upload
    pub fn blank() -> &'static str {
        "   \n\t "
    }
}

/// Fixture for claim submissions
pub struct SubmissionFixtures;

impl SubmissionFixtures {
    /// Complete submission for the given claimed amount
    pub fn complete(claimed_amount: &str) -> ClaimSubmission {
        ClaimSubmission {
            patient_name: "Ravi Kumar".to_string(),
            address: "14 MG Road, Pune 411001".to_string(),
            claim_type: "Outpatient".to_string(),
            claim_reason: "Fever and body pain".to_string(),
            date_of_service: "2024-03-12".to_string(),
            medical_facility: "City Care Clinic".to_string(),
            claimed_amount: claimed_amount.to_string(),
            description: "Three day fever with body ache".to_string(),
        }
    }

    /// Submission matching [`BillFixtures::clinic_bill`]
    pub fn matching_clinic_claim() -> ClaimSubmission {
        Self::complete("3150")
    }

    /// Submission claiming more than the clinic bill allows
    pub fn excess_clinic_claim() -> ClaimSubmission {
        Self::complete("5000")
    }

    /// Submission with no patient name or address
    pub fn incomplete() -> ClaimSubmission {
        ClaimSubmission {
            patient_name: String::new(),
            address: " ".to_string(),
            ..Self::complete("3150")
        }
    }
}

/// Fixture for expected amounts
pub struct AmountFixtures;

impl AmountFixtures {
    pub fn clinic_net_payable() -> Decimal {
        dec!(3150)
    }

    pub fn hospital_grand_total() -> Decimal {
        dec!(123450.00)
    }

    pub fn pharmacy_balance_due() -> Decimal {
        dec!(86.40)
    }

    pub fn fallback_consultation() -> Decimal {
        dec!(1450.00)
    }

    /// Excess for [`SubmissionFixtures::excess_clinic_claim`]: 5000 - (3150 + 31.50)
    pub fn clinic_excess() -> Decimal {
        dec!(1818.50)
    }
}
