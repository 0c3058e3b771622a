//! Hosted Inference Adapter
//!
//! Talks to a remote text-generation endpoint that accepts
//! `{"inputs": "<prompt>"}` and answers with `[{"generated_text": "..."}]`
//! (some deployments drop the surrounding array). The prompt is the
//! query's instruction followed by its context.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::debug;

use core_kernel::{DomainPort, PortError};

use super::{ensure_success, http_client, transport_error};
use crate::ports::{InferenceAnswer, InferenceQuery, TextInferencePort};

const SERVICE: &str = "hosted-inference";

/// Configuration for the hosted inference adapter
#[derive(Debug, Clone)]
pub struct HostedInferenceConfig {
    /// Full URL of the model endpoint
    pub endpoint_url: String,

    /// Bearer token, if the endpoint requires one
    pub api_token: Option<String>,

    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl Default for HostedInferenceConfig {
    fn default() -> Self {
        Self {
            endpoint_url: String::new(),
            api_token: None,
            timeout_secs: 30,
        }
    }
}

#[derive(Debug, Serialize)]
struct GenerationRequest<'a> {
    inputs: &'a str,
}

#[derive(Debug, Deserialize)]
struct Generation {
    generated_text: String,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum GenerationResponse {
    Batch(Vec<Generation>),
    Single(Generation),
}

impl GenerationResponse {
    fn into_text(self) -> Option<String> {
        match self {
            GenerationResponse::Batch(batch) => batch.into_iter().next().map(|g| g.generated_text),
            GenerationResponse::Single(single) => Some(single.generated_text),
        }
    }
}

/// Remote text-generation collaborator
#[derive(Debug)]
pub struct HostedInferenceAdapter {
    config: HostedInferenceConfig,
    client: reqwest::Client,
}

impl HostedInferenceAdapter {
    /// Creates the adapter and its HTTP client
    pub fn new(config: HostedInferenceConfig) -> Result<Self, PortError> {
        let client = http_client(config.timeout_secs)?;
        Ok(Self { config, client })
    }

    fn prompt(query: &InferenceQuery) -> String {
        format!("{}\n\n{}", query.instruction, query.context)
    }
}

impl DomainPort for HostedInferenceAdapter {}

#[async_trait]
impl TextInferencePort for HostedInferenceAdapter {
    fn name(&self) -> &str {
        SERVICE
    }

    async fn ask(&self, query: &InferenceQuery) -> Result<InferenceAnswer, PortError> {
        let prompt = Self::prompt(query);
        let mut request = self
            .client
            .post(&self.config.endpoint_url)
            .json(&GenerationRequest { inputs: &prompt });
        if let Some(token) = &self.config.api_token {
            request = request.bearer_auth(token);
        }

        debug!(url = %self.config.endpoint_url, prompt_chars = prompt.len(), "Calling hosted inference");

        let response = request
            .send()
            .await
            .map_err(|e| transport_error(e, SERVICE, self.config.timeout_secs))?;
        let response = ensure_success(response, SERVICE)?;

        let payload: GenerationResponse = response
            .json()
            .await
            .map_err(|e| transport_error(e, SERVICE, self.config.timeout_secs))?;

        payload
            .into_text()
            .map(InferenceAnswer::text)
            .ok_or_else(|| PortError::transformation("hosted inference returned no generations"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generation_response_shapes() {
        let batch: GenerationResponse =
            serde_json::from_str(r#"[{"generated_text": "{\"disease\": \"Fever\"}"}]"#).unwrap();
        assert_eq!(batch.into_text().as_deref(), Some(r#"{"disease": "Fever"}"#));

        let single: GenerationResponse =
            serde_json::from_str(r#"{"generated_text": "hello"}"#).unwrap();
        assert_eq!(single.into_text().as_deref(), Some("hello"));

        let empty: GenerationResponse = serde_json::from_str("[]").unwrap();
        assert_eq!(empty.into_text(), None);
    }

    #[test]
    fn test_prompt_joins_instruction_and_context() {
        let query = InferenceQuery::new("Extract the total.", "Total: 500");
        assert_eq!(HostedInferenceAdapter::prompt(&query), "Extract the total.\n\nTotal: 500");
    }

    #[tokio::test]
    async fn test_unreachable_endpoint_is_a_port_error() {
        let adapter = HostedInferenceAdapter::new(HostedInferenceConfig {
            endpoint_url: "http://127.0.0.1:9/generate".to_string(),
            api_token: None,
            timeout_secs: 2,
        })
        .unwrap();

        let result = adapter.ask(&InferenceQuery::new("q", "ctx")).await;
        assert!(result.is_err());
    }
}
