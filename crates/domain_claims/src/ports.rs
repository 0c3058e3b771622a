//! Inference Ports
//!
//! This module defines the single capability the resolver needs from any
//! text-understanding collaborator: answer a question about a text.
//!
//! # Architecture
//!
//! Several adapters implement [`TextInferencePort`]:
//!
//! - **Hosted Adapter**: a remote text-generation service
//!   ([`crate::adapters::HostedInferenceAdapter`])
//! - **Local Adapter**: an on-host question-answering runtime
//!   ([`crate::adapters::LocalQaAdapter`])
//! - **Disabled**: [`DisabledInference`], used when a collaborator is not configured
//! - **Mock Adapter**: scripted answers for tests (feature `mock`)
//!
//! # Usage
//!
//! ```rust,ignore
//! use domain_claims::ports::{TextInferencePort, DisabledInference};
//! use std::sync::Arc;
//!
//! let remote: Arc<dyn TextInferencePort> = match config.remote_inference_url {
//!     Some(url) => Arc::new(HostedInferenceAdapter::new(settings)?),
//!     None => Arc::new(DisabledInference::new("remote-inference")),
//! };
//! ```

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use core_kernel::{DomainPort, PortError};

/// A question about a text
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InferenceQuery {
    /// Instruction prompt or question
    pub instruction: String,
    /// The text the question is about
    pub context: String,
}

impl InferenceQuery {
    pub fn new(instruction: impl Into<String>, context: impl Into<String>) -> Self {
        Self {
            instruction: instruction.into(),
            context: context.into(),
        }
    }
}

/// A collaborator's answer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InferenceAnswer {
    /// Generated or extracted answer text
    pub text: String,
    /// Confidence in `[0, 1]`, when the collaborator reports one
    pub confidence: Option<f64>,
}

impl InferenceAnswer {
    /// An answer without a confidence score
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            confidence: None,
        }
    }

    /// An answer with a confidence score
    pub fn scored(text: impl Into<String>, confidence: f64) -> Self {
        Self {
            text: text.into(),
            confidence: Some(confidence),
        }
    }

    /// True if the answer clears the given confidence threshold (strictly)
    pub fn is_confident(&self, minimum: f64) -> bool {
        self.confidence.is_some_and(|c| c > minimum)
    }
}

/// A collaborator that answers questions about a text
#[async_trait]
pub trait TextInferencePort: DomainPort {
    /// Short identifier for logs and readiness reports
    fn name(&self) -> &str;

    /// False for the disabled placeholder
    fn is_enabled(&self) -> bool {
        true
    }

    /// Answers a question about the query's context
    async fn ask(&self, query: &InferenceQuery) -> Result<InferenceAnswer, PortError>;
}

/// Stand-in for a collaborator that is not configured
///
/// Every call fails with `ServiceUnavailable`, which the resolver treats
/// like any other stage failure.
#[derive(Debug, Clone)]
pub struct DisabledInference {
    name: String,
}

impl DisabledInference {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

impl DomainPort for DisabledInference {}

#[async_trait]
impl TextInferencePort for DisabledInference {
    fn name(&self) -> &str {
        &self.name
    }

    fn is_enabled(&self) -> bool {
        false
    }

    async fn ask(&self, _query: &InferenceQuery) -> Result<InferenceAnswer, PortError> {
        Err(PortError::unavailable(format!("{} is not configured", self.name)))
    }
}

/// Scripted implementation of TextInferencePort for testing
///
/// Replies are consumed in order; once the script is exhausted every call
/// fails with `ServiceUnavailable`. Each query is recorded.
#[cfg(any(test, feature = "mock"))]
pub mod mock {
    use super::*;
    use std::collections::VecDeque;
    use std::sync::Mutex;
    use std::time::Duration;

    /// One scripted reply
    #[derive(Debug)]
    pub enum ScriptedReply {
        Answer(InferenceAnswer),
        Fail(PortError),
        /// Sleeps before answering, to exercise timeouts
        Delayed(Duration, InferenceAnswer),
    }

    /// In-memory scripted inference collaborator
    #[derive(Debug, Default)]
    pub struct ScriptedInference {
        name: String,
        replies: Mutex<VecDeque<ScriptedReply>>,
        calls: Mutex<Vec<InferenceQuery>>,
    }

    impl ScriptedInference {
        /// Creates a collaborator with an empty script
        pub fn new(name: impl Into<String>) -> Self {
            Self {
                name: name.into(),
                ..Default::default()
            }
        }

        /// Appends a plain text answer
        pub fn answer(self, text: impl Into<String>) -> Self {
            self.push(ScriptedReply::Answer(InferenceAnswer::text(text)))
        }

        /// Appends a scored answer
        pub fn scored(self, text: impl Into<String>, confidence: f64) -> Self {
            self.push(ScriptedReply::Answer(InferenceAnswer::scored(text, confidence)))
        }

        /// Appends a failure
        pub fn fail(self, error: PortError) -> Self {
            self.push(ScriptedReply::Fail(error))
        }

        /// Appends an answer that arrives after `delay`
        pub fn delayed(self, delay: Duration, text: impl Into<String>) -> Self {
            self.push(ScriptedReply::Delayed(delay, InferenceAnswer::text(text)))
        }

        fn push(self, reply: ScriptedReply) -> Self {
            self.replies
                .lock()
                .expect("script lock poisoned")
                .push_back(reply);
            self
        }

        /// Queries received so far
        pub fn calls(&self) -> Vec<InferenceQuery> {
            self.calls.lock().expect("call log lock poisoned").clone()
        }

        /// Number of queries received so far
        pub fn call_count(&self) -> usize {
            self.calls.lock().expect("call log lock poisoned").len()
        }
    }

    impl DomainPort for ScriptedInference {}

    #[async_trait]
    impl TextInferencePort for ScriptedInference {
        fn name(&self) -> &str {
            &self.name
        }

        async fn ask(&self, query: &InferenceQuery) -> Result<InferenceAnswer, PortError> {
            self.calls
                .lock()
                .expect("call log lock poisoned")
                .push(query.clone());

            let reply = self
                .replies
                .lock()
                .expect("script lock poisoned")
                .pop_front();

            match reply {
                Some(ScriptedReply::Answer(answer)) => Ok(answer),
                Some(ScriptedReply::Fail(error)) => Err(error),
                Some(ScriptedReply::Delayed(delay, answer)) => {
                    tokio::time::sleep(delay).await;
                    Ok(answer)
                }
                None => Err(PortError::unavailable(format!("{} script exhausted", self.name))),
            }
        }
    }
}
