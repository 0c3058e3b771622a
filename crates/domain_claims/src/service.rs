//! Claim adjudication service
//!
//! Ties the resolver, decision engine and report together for one claim.

use serde::Serialize;
use tracing::{info, instrument, warn};

use crate::adjudication::{ClaimAssessment, DecisionEngine};
use crate::bill::BillResolution;
use crate::error::ClaimError;
use crate::report::ClaimReport;
use crate::resolver::BillInfoResolver;
use crate::submission::ClaimSubmission;

/// Everything produced for one adjudicated claim
#[derive(Debug, Clone, Serialize)]
pub struct Adjudication {
    pub resolution: BillResolution,
    pub assessment: ClaimAssessment,
    pub report: ClaimReport,
}

/// Adjudicates claims against their bill text
pub struct ClaimAdjudicator {
    resolver: BillInfoResolver,
    engine: DecisionEngine,
}

impl ClaimAdjudicator {
    pub fn new(resolver: BillInfoResolver, engine: DecisionEngine) -> Self {
        Self { resolver, engine }
    }

    pub fn resolver(&self) -> &BillInfoResolver {
        &self.resolver
    }

    pub fn engine(&self) -> &DecisionEngine {
        &self.engine
    }

    /// Resolves bill facts without deciding a claim
    pub async fn extract(&self, bill_text: &str) -> Result<BillResolution, ClaimError> {
        ensure_readable(bill_text)?;
        Ok(self.resolver.resolve(bill_text).await)
    }

    /// Adjudicates a submission against its bill
    ///
    /// Fails only when the bill is unreadable or yields no usable expense;
    /// policy rejections are returned as decisions.
    #[instrument(skip_all, fields(bill_chars = bill_text.len()))]
    pub async fn adjudicate(
        &self,
        submission: &ClaimSubmission,
        bill_text: &str,
    ) -> Result<Adjudication, ClaimError> {
        ensure_readable(bill_text)?;

        let resolution = self.resolver.resolve(bill_text).await;
        if !resolution.bill.has_expense() {
            warn!(disease = %resolution.bill.disease, "No usable expense in bill");
            return Err(ClaimError::ExpenseNotExtracted);
        }

        let assessment = self.engine.assess(submission, &resolution.bill);
        info!(
            verdict = %assessment.decision.verdict,
            basis = ?assessment.decision.basis,
            claimed = %assessment.claimed_amount,
            bill_expense = %assessment.bill_expense,
            approved = ?assessment.decision.approved_amount,
            "Claim adjudicated"
        );

        let report = ClaimReport::render(submission, &resolution, &assessment);
        Ok(Adjudication {
            resolution,
            assessment,
            report,
        })
    }
}

fn ensure_readable(bill_text: &str) -> Result<(), ClaimError> {
    if bill_text.trim().is_empty() {
        warn!("Bill text is empty");
        return Err(ClaimError::EmptyBillText);
    }
    Ok(())
}
