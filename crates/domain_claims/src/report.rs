//! Human-readable claim reports

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::adjudication::{format_amount, ClaimAssessment};
use crate::bill::{BillResolution, ExtractionStage};
use crate::submission::ClaimSubmission;

/// A titled block of `label: value` lines
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportSection {
    pub title: String,
    pub lines: Vec<(String, String)>,
}

impl ReportSection {
    fn new(title: &str) -> Self {
        Self {
            title: title.to_string(),
            lines: Vec::new(),
        }
    }

    fn line(mut self, label: &str, value: impl Into<String>) -> Self {
        self.lines.push((label.to_string(), value.into()));
        self
    }
}

/// Rendered adjudication report
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClaimReport {
    pub decision: String,
    pub summary: String,
    pub sections: Vec<ReportSection>,
    pub final_decision: String,
}

fn yes_no(value: bool) -> &'static str {
    if value {
        "Yes"
    } else {
        "No"
    }
}

fn source(stage: Option<ExtractionStage>) -> String {
    stage.map_or_else(|| "not found".to_string(), |s| s.to_string())
}

fn or_dash(value: &str) -> String {
    if value.trim().is_empty() {
        "-".to_string()
    } else {
        value.trim().to_string()
    }
}

impl ClaimReport {
    /// Builds the report for an adjudicated claim
    pub fn render(
        submission: &ClaimSubmission,
        resolution: &BillResolution,
        assessment: &ClaimAssessment,
    ) -> Self {
        let decision = &assessment.decision;
        let bill = &resolution.bill;

        let summary = format!(
            "This report details the analysis of the insurance claim submitted by {}. \
             The claim has been evaluated based on completeness of information, policy \
             exclusions, and amount validation.",
            or_dash(&submission.patient_name)
        );

        let details = ReportSection::new("Claim Details")
            .line("Patient", or_dash(&submission.patient_name))
            .line("Claim Type", or_dash(&submission.claim_type))
            .line("Claim Reason", or_dash(&submission.claim_reason))
            .line("Medical Facility", or_dash(&submission.medical_facility))
            .line("Date of Service", or_dash(&submission.date_of_service))
            .line("Claim Amount", format_amount(assessment.claimed_amount))
            .line("Bill Amount", format_amount(assessment.bill_expense))
            .line("Detected Condition", bill.disease.clone())
            .line("Tolerance", format_amount(assessment.tolerance));

        let sources = ReportSection::new("Extraction Sources")
            .line("Condition", source(resolution.disease_source))
            .line("Expense", source(resolution.expense_source));

        let mut verification = ReportSection::new("Verification Results")
            .line("Information Complete", yes_no(assessment.info_complete))
            .line("Covered Condition", yes_no(assessment.covered))
            .line("Amount Valid", yes_no(assessment.amount_valid))
            .line("Amounts Match", yes_no(assessment.amounts_match));
        if let Some(term) = &assessment.matched_exclusion {
            verification = verification.line("Matched Exclusion", term.clone());
        }

        Self {
            decision: decision.headline(),
            summary,
            sections: vec![details, sources, verification],
            final_decision: format!("{} ({})", decision.verdict, decision.reason),
        }
    }
}

impl fmt::Display for ClaimReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "CLAIM DECISION: {}", self.decision)?;
        writeln!(f)?;
        writeln!(f, "Executive Summary")?;
        writeln!(f, "{}", self.summary)?;
        for section in &self.sections {
            writeln!(f)?;
            writeln!(f, "{}", section.title)?;
            for (label, value) in &section.lines {
                writeln!(f, "- {label}: {value}")?;
            }
        }
        writeln!(f)?;
        writeln!(f, "Final Decision")?;
        write!(f, "{}", self.final_decision)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adjudication::DecisionEngine;
    use crate::bill::{BillInfo, PartialBill};
    use rust_decimal_macros::dec;

    fn resolution(disease: &str, expense: rust_decimal::Decimal) -> BillResolution {
        let mut builder = BillResolution::start();
        builder.merge(
            ExtractionStage::Patterns,
            PartialBill::new(Some(disease.to_string()), Some(expense)),
        );
        builder.finish()
    }

    #[test]
    fn test_report_renders_all_sections() {
        let submission = ClaimSubmission {
            patient_name: "Meera Iyer".to_string(),
            address: "7 Lake View, Chennai".to_string(),
            claim_type: "Outpatient".to_string(),
            claim_reason: "Fever".to_string(),
            claimed_amount: "3150".to_string(),
            ..Default::default()
        };
        let resolution = resolution("Bodyache with fever", dec!(3150));
        let assessment = DecisionEngine::default().assess(&submission, &resolution.bill);

        let text = ClaimReport::render(&submission, &resolution, &assessment).to_string();

        assert!(text.starts_with("CLAIM DECISION: APPROVED: 3150.00"));
        assert!(text.contains("- Bill Amount: 3150.00"));
        assert!(text.contains("- Detected Condition: Bodyache with fever"));
        assert!(text.contains("- Tolerance: 31.50"));
        assert!(text.contains("- Condition: pattern extraction"));
        assert!(text.contains("- Date of Service: -"));
        assert!(text.contains("- Amounts Match: Yes"));
        assert!(text.ends_with("APPROVED (Claim amount matches bill amount (3150.00) within tolerance (31.50))"));
    }

    #[test]
    fn test_report_names_matched_exclusion() {
        let submission = ClaimSubmission {
            patient_name: "A".to_string(),
            address: "B".to_string(),
            claim_reason: "C".to_string(),
            claimed_amount: "100".to_string(),
            ..Default::default()
        };
        let resolution = BillResolution {
            bill: BillInfo::new("HIV/AIDS", dec!(100)),
            disease_source: Some(ExtractionStage::RemoteInference),
            expense_source: None,
        };
        let assessment = DecisionEngine::default().assess(&submission, &resolution.bill);
        let report = ClaimReport::render(&submission, &resolution, &assessment);

        assert!(report.decision.starts_with("REJECTED: Treatment for 'HIV/AIDS'"));
        let text = report.to_string();
        assert!(text.contains("- Covered Condition: No"));
        assert!(text.contains("- Matched Exclusion: HIV/AIDS"));
        assert!(text.contains("- Expense: not found"));
    }
}
