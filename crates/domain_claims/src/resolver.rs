//! Bill information resolver
//!
//! Runs the extraction cascade over a bill's text. Each stage in
//! [`ExtractionStage::CASCADE`] only runs while the merged result is still
//! missing a diagnosis or an expense, and every collaborator call is bounded
//! by a timeout. Failures are logged and treated as "nothing found"; the
//! resolver itself never fails.

use serde::Deserialize;
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

use core_kernel::normalize_amount;

use crate::bill::{BillResolution, ExtractionStage, PartialBill, ResolutionBuilder};
use crate::extraction::{extract_diagnosis, extract_expense, ExtractionPatterns};
use crate::ports::{DisabledInference, InferenceAnswer, InferenceQuery, TextInferencePort};

const REMOTE_INSTRUCTION: &str = "Extract the primary medical condition/disease and total expense \
from this medical bill. Return JSON format: {\"disease\": \"\", \"expense\": \"\"}";

const DISEASE_QUESTION: &str = "What is the primary medical condition or disease being treated?";
const EXPENSE_QUESTION: &str = "What is the total expense amount on this medical bill?";

/// Tuning for the inference stages
#[derive(Debug, Clone)]
pub struct ResolverSettings {
    /// Upper bound on a remote inference call
    pub remote_timeout: Duration,
    /// Upper bound on each local question
    pub local_timeout: Duration,
    /// Local answers must score strictly above this
    pub min_confidence: f64,
    /// Characters of bill text sent to the remote collaborator
    pub excerpt_chars: usize,
}

impl Default for ResolverSettings {
    fn default() -> Self {
        Self {
            remote_timeout: Duration::from_secs(30),
            local_timeout: Duration::from_secs(60),
            min_confidence: 0.3,
            excerpt_chars: 2000,
        }
    }
}

/// Drives the extraction cascade
pub struct BillInfoResolver {
    patterns: Arc<ExtractionPatterns>,
    remote: Arc<dyn TextInferencePort>,
    local: Arc<dyn TextInferencePort>,
    settings: ResolverSettings,
}

impl BillInfoResolver {
    /// Creates a resolver with both inference collaborators disabled
    pub fn new(patterns: Arc<ExtractionPatterns>, settings: ResolverSettings) -> Self {
        Self {
            patterns,
            remote: Arc::new(DisabledInference::new("remote-inference")),
            local: Arc::new(DisabledInference::new("local-qa")),
            settings,
        }
    }

    /// Sets the remote text-generation collaborator
    pub fn with_remote(mut self, remote: Arc<dyn TextInferencePort>) -> Self {
        self.remote = remote;
        self
    }

    /// Sets the on-host question-answering collaborator
    pub fn with_local(mut self, local: Arc<dyn TextInferencePort>) -> Self {
        self.local = local;
        self
    }

    pub fn settings(&self) -> &ResolverSettings {
        &self.settings
    }

    /// Names and enabled flags of the inference collaborators, remote first
    pub fn collaborators(&self) -> [(&str, bool); 2] {
        [
            (self.remote.name(), self.remote.is_enabled()),
            (self.local.name(), self.local.is_enabled()),
        ]
    }

    /// Resolves the bill's diagnosis and expense
    pub async fn resolve(&self, text: &str) -> BillResolution {
        let mut progress = BillResolution::start();

        for stage in ExtractionStage::CASCADE {
            if progress.is_complete() {
                break;
            }
            let found = self.run_stage(stage, text, &progress).await;
            debug!(
                %stage,
                found_disease = found.disease.is_some(),
                found_expense = found.expense.is_some(),
                "Extraction stage finished"
            );
            progress.merge(stage, found);
        }

        let resolution = progress.finish();
        debug!(
            disease = %resolution.bill.disease,
            expense = %resolution.bill.expense,
            "Bill information resolved"
        );
        resolution
    }

    async fn run_stage(
        &self,
        stage: ExtractionStage,
        text: &str,
        progress: &ResolutionBuilder,
    ) -> PartialBill {
        match stage {
            ExtractionStage::Patterns => self.extract_with_patterns(text),
            ExtractionStage::RemoteInference => self.ask_remote(text).await,
            ExtractionStage::LocalInference => self.ask_local(text, progress).await,
        }
    }

    fn extract_with_patterns(&self, text: &str) -> PartialBill {
        PartialBill::new(
            extract_diagnosis(&self.patterns, text),
            extract_expense(&self.patterns, text),
        )
    }

    async fn ask_remote(&self, text: &str) -> PartialBill {
        let query = InferenceQuery::new(REMOTE_INSTRUCTION, excerpt(text, self.settings.excerpt_chars));
        let Some(answer) = self
            .call(self.remote.as_ref(), &query, self.settings.remote_timeout)
            .await
        else {
            return PartialBill::default();
        };

        match parse_bill_reply(&answer.text) {
            Some(found) => found,
            None => {
                warn!(
                    collaborator = self.remote.name(),
                    reply_chars = answer.text.len(),
                    "Could not parse inference reply"
                );
                PartialBill::default()
            }
        }
    }

    async fn ask_local(&self, text: &str, progress: &ResolutionBuilder) -> PartialBill {
        let disease = if progress.has_disease() {
            None
        } else {
            self.ask_local_question(DISEASE_QUESTION, text).await
        };

        let expense = if progress.has_expense() {
            None
        } else {
            self.ask_local_question(EXPENSE_QUESTION, text)
                .await
                .map(|answer| normalize_amount(answer.as_str()))
        };

        PartialBill::new(disease, expense)
    }

    async fn ask_local_question(&self, question: &str, text: &str) -> Option<String> {
        let query = InferenceQuery::new(question, text);
        let answer = self
            .call(self.local.as_ref(), &query, self.settings.local_timeout)
            .await?;

        if answer.is_confident(self.settings.min_confidence) {
            Some(answer.text)
        } else {
            debug!(
                question,
                confidence = ?answer.confidence,
                minimum = self.settings.min_confidence,
                "Discarding low-confidence answer"
            );
            None
        }
    }

    async fn call(
        &self,
        port: &dyn TextInferencePort,
        query: &InferenceQuery,
        limit: Duration,
    ) -> Option<InferenceAnswer> {
        if !port.is_enabled() {
            debug!(collaborator = port.name(), "Collaborator not configured, skipping");
            return None;
        }

        match tokio::time::timeout(limit, port.ask(query)).await {
            Ok(Ok(answer)) => Some(answer),
            Ok(Err(error)) => {
                warn!(
                    collaborator = port.name(),
                    transient = error.is_transient(),
                    error = %error,
                    "Inference call failed"
                );
                None
            }
            Err(_) => {
                warn!(
                    collaborator = port.name(),
                    timeout_ms = limit.as_millis() as u64,
                    "Inference call timed out"
                );
                None
            }
        }
    }
}

/// The first `limit` characters of `text`
fn excerpt(text: &str, limit: usize) -> &str {
    match text.char_indices().nth(limit) {
        Some((end, _)) => &text[..end],
        None => text,
    }
}

#[derive(Debug, Deserialize)]
struct BillReply {
    #[serde(default, alias = "condition", alias = "diagnosis")]
    disease: Option<Value>,
    #[serde(default, alias = "amount", alias = "total")]
    expense: Option<Value>,
}

impl BillReply {
    fn into_partial(self) -> PartialBill {
        let disease = self.disease.and_then(|v| match v {
            Value::String(s) => Some(s),
            _ => None,
        });
        let expense = self.expense.as_ref().map(|v| normalize_amount(v));
        PartialBill::new(disease, expense)
    }
}

/// Parses a generated `{disease, expense}` reply
///
/// Tries the whole reply, then the outermost `{...}` fragment, then that
/// fragment with single quotes swapped for double quotes.
pub(crate) fn parse_bill_reply(reply: &str) -> Option<PartialBill> {
    let trimmed = reply.trim();
    let fragment = match (trimmed.find('{'), trimmed.rfind('}')) {
        (Some(start), Some(end)) if start < end => Some(&trimmed[start..=end]),
        _ => None,
    };

    let mut candidates = vec![trimmed.to_string()];
    if let Some(fragment) = fragment {
        candidates.push(fragment.to_string());
        candidates.push(fragment.replace('\'', "\""));
    }

    candidates
        .iter()
        .find_map(|candidate| serde_json::from_str::<BillReply>(candidate).ok())
        .map(BillReply::into_partial)
}
