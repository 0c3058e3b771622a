//! Test Data Builders
//!
//! Provides builder patterns for constructing submissions and fully wired
//! adjudicators with sensible defaults. Tests set only the fields they care
//! about.

use std::sync::Arc;
use std::time::Duration;

use domain_claims::adjudication::{DecisionEngine, TolerancePolicy};
use domain_claims::exclusion::ExclusionList;
use domain_claims::ports::mock::ScriptedInference;
use domain_claims::ports::TextInferencePort;
use domain_claims::resolver::{BillInfoResolver, ResolverSettings};
use domain_claims::service::ClaimAdjudicator;
use domain_claims::submission::ClaimSubmission;

use crate::fixtures::{shared_patterns, SubmissionFixtures};

/// Builder for claim submissions
pub struct ClaimSubmissionBuilder {
    submission: ClaimSubmission,
}

impl Default for ClaimSubmissionBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl ClaimSubmissionBuilder {
    /// Starts from a complete submission claiming 3150
    pub fn new() -> Self {
        Self {
            submission: SubmissionFixtures::matching_clinic_claim(),
        }
    }

    pub fn with_patient_name(mut self, name: impl Into<String>) -> Self {
        self.submission.patient_name = name.into();
        self
    }

    pub fn with_address(mut self, address: impl Into<String>) -> Self {
        self.submission.address = address.into();
        self
    }

    pub fn with_claim_type(mut self, claim_type: impl Into<String>) -> Self {
        self.submission.claim_type = claim_type.into();
        self
    }

    pub fn with_claim_reason(mut self, reason: impl Into<String>) -> Self {
        self.submission.claim_reason = reason.into();
        self
    }

    pub fn with_facility(mut self, facility: impl Into<String>) -> Self {
        self.submission.medical_facility = facility.into();
        self
    }

    pub fn with_date_of_service(mut self, date: impl Into<String>) -> Self {
        self.submission.date_of_service = date.into();
        self
    }

    /// Sets the claimed amount exactly as a claimant would type it
    pub fn with_claimed_amount(mut self, amount: impl Into<String>) -> Self {
        self.submission.claimed_amount = amount.into();
        self
    }

    pub fn build(self) -> ClaimSubmission {
        self.submission
    }
}

/// Builder for a `ClaimAdjudicator` wired to scripted collaborators
pub struct TestAdjudicatorBuilder {
    remote: Option<Arc<dyn TextInferencePort>>,
    local: Option<Arc<dyn TextInferencePort>>,
    settings: ResolverSettings,
    exclusions: ExclusionList,
    tolerance: TolerancePolicy,
}

impl Default for TestAdjudicatorBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl TestAdjudicatorBuilder {
    /// Both collaborators disabled, short timeouts, standard exclusions
    pub fn new() -> Self {
        Self {
            remote: None,
            local: None,
            settings: ResolverSettings {
                remote_timeout: Duration::from_millis(200),
                local_timeout: Duration::from_millis(200),
                ..ResolverSettings::default()
            },
            exclusions: ExclusionList::standard(),
            tolerance: TolerancePolicy::default(),
        }
    }

    pub fn with_remote(mut self, remote: Arc<ScriptedInference>) -> Self {
        self.remote = Some(remote);
        self
    }

    pub fn with_local(mut self, local: Arc<ScriptedInference>) -> Self {
        self.local = Some(local);
        self
    }

    pub fn with_settings(mut self, settings: ResolverSettings) -> Self {
        self.settings = settings;
        self
    }

    pub fn with_exclusions(mut self, exclusions: ExclusionList) -> Self {
        self.exclusions = exclusions;
        self
    }

    pub fn with_tolerance(mut self, tolerance: TolerancePolicy) -> Self {
        self.tolerance = tolerance;
        self
    }

    pub fn build(self) -> ClaimAdjudicator {
        let mut resolver = BillInfoResolver::new(shared_patterns(), self.settings);
        if let Some(remote) = self.remote {
            resolver = resolver.with_remote(remote);
        }
        if let Some(local) = self.local {
            resolver = resolver.with_local(local);
        }
        ClaimAdjudicator::new(
            resolver,
            DecisionEngine::new(Arc::new(self.exclusions), self.tolerance),
        )
    }
}
