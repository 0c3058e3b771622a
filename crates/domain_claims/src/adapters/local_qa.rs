//! Local Question-Answering Adapter
//!
//! Talks to an extractive question-answering model served on the same host.
//! The runtime takes `{"question", "context"}` and answers with
//! `{"answer", "score"}`. The first call after the runtime starts can be
//! slow while the model loads, so this adapter usually gets a longer
//! timeout than the hosted one.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::debug;

use core_kernel::{DomainPort, PortError};

use super::{ensure_success, http_client, transport_error};
use crate::ports::{InferenceAnswer, InferenceQuery, TextInferencePort};

const SERVICE: &str = "local-qa";

/// Configuration for the local QA adapter
#[derive(Debug, Clone)]
pub struct LocalQaConfig {
    /// URL of the question-answering endpoint
    pub endpoint_url: String,

    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl Default for LocalQaConfig {
    fn default() -> Self {
        Self {
            endpoint_url: "http://127.0.0.1:8500/qa".to_string(),
            timeout_secs: 60,
        }
    }
}

#[derive(Debug, Serialize)]
struct QaRequest<'a> {
    question: &'a str,
    context: &'a str,
}

#[derive(Debug, Deserialize)]
struct QaResponse {
    answer: String,
    #[serde(default)]
    score: f64,
}

/// On-host question-answering collaborator
#[derive(Debug)]
pub struct LocalQaAdapter {
    config: LocalQaConfig,
    client: reqwest::Client,
}

impl LocalQaAdapter {
    /// Creates the adapter and its HTTP client
    pub fn new(config: LocalQaConfig) -> Result<Self, PortError> {
        let client = http_client(config.timeout_secs)?;
        Ok(Self { config, client })
    }
}

impl DomainPort for LocalQaAdapter {}

#[async_trait]
impl TextInferencePort for LocalQaAdapter {
    fn name(&self) -> &str {
        SERVICE
    }

    async fn ask(&self, query: &InferenceQuery) -> Result<InferenceAnswer, PortError> {
        debug!(question = %query.instruction, "Asking local QA model");

        let response = self
            .client
            .post(&self.config.endpoint_url)
            .json(&QaRequest {
                question: &query.instruction,
                context: &query.context,
            })
            .send()
            .await
            .map_err(|e| transport_error(e, SERVICE, self.config.timeout_secs))?;
        let response = ensure_success(response, SERVICE)?;

        let reply: QaResponse = response
            .json()
            .await
            .map_err(|e| transport_error(e, SERVICE, self.config.timeout_secs))?;

        Ok(InferenceAnswer::scored(reply.answer, reply.score))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_qa_response_defaults_missing_score_to_zero() {
        let reply: QaResponse = serde_json::from_str(r#"{"answer": "3150"}"#).unwrap();
        assert_eq!(reply.answer, "3150");
        assert_eq!(reply.score, 0.0);
    }

    #[test]
    fn test_qa_request_shape() {
        let body = serde_json::to_value(QaRequest {
            question: "What is the total?",
            context: "Total: 10",
        })
        .unwrap();
        assert_eq!(body["question"], "What is the total?");
        assert_eq!(body["context"], "Total: 10");
    }

    #[test]
    fn test_default_config_points_at_localhost() {
        let config = LocalQaConfig::default();
        assert!(config.endpoint_url.starts_with("http://127.0.0.1"));
        assert_eq!(config.timeout_secs, 60);
    }
}
