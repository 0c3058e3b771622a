//! Inference Adapters
//!
//! HTTP implementations of [`TextInferencePort`](crate::ports::TextInferencePort):
//!
//! - **HostedInferenceAdapter**: a remote text-generation service
//! - **LocalQaAdapter**: a question-answering runtime on the same host
//!
//! # Usage
//!
//! ```rust,ignore
//! use domain_claims::adapters::{HostedInferenceAdapter, HostedInferenceConfig};
//! use domain_claims::ports::TextInferencePort;
//! use std::sync::Arc;
//!
//! let adapter = HostedInferenceAdapter::new(HostedInferenceConfig {
//!     endpoint_url: "https://inference.example.com/models/flan-t5-xxl".to_string(),
//!     api_token: Some("secret".to_string()),
//!     timeout_secs: 30,
//! })?;
//! let port: Arc<dyn TextInferencePort> = Arc::new(adapter);
//! ```
//!
//! # Error Handling
//!
//! HTTP failures are mapped to `PortError` variants:
//! - 401/403 -> `PortError::Unauthorized`
//! - 429 -> `PortError::RateLimited`
//! - 5xx -> `PortError::ServiceUnavailable`
//! - Timeouts -> `PortError::Timeout`
//! - Connection failures -> `PortError::Connection`
//! - Undecodable bodies -> `PortError::Transformation`
//! - Other -> `PortError::Internal`

pub mod hosted;
pub mod local_qa;

pub use hosted::{HostedInferenceAdapter, HostedInferenceConfig};
pub use local_qa::{LocalQaAdapter, LocalQaConfig};

use reqwest::{header, Response, StatusCode};
use std::time::Duration;

use core_kernel::PortError;

/// Builds a client whose every request is bounded by `timeout_secs`
pub(crate) fn http_client(timeout_secs: u64) -> Result<reqwest::Client, PortError> {
    reqwest::Client::builder()
        .timeout(Duration::from_secs(timeout_secs))
        .build()
        .map_err(|e| PortError::Internal {
            message: "failed to build HTTP client".to_string(),
            source: Some(Box::new(e)),
        })
}

/// Maps a transport error from `send()` or body decoding
pub(crate) fn transport_error(error: reqwest::Error, service: &str, timeout_secs: u64) -> PortError {
    if error.is_timeout() {
        PortError::timeout(service, timeout_secs * 1000)
    } else if error.is_connect() {
        PortError::Connection {
            message: format!("cannot reach {service}"),
            source: Some(Box::new(error)),
        }
    } else if error.is_decode() {
        PortError::transformation(format!("{service} returned an undecodable body: {error}"))
    } else {
        PortError::Internal {
            message: format!("{service} request failed"),
            source: Some(Box::new(error)),
        }
    }
}

/// Passes 2xx responses through and maps every other status to a `PortError`
pub(crate) fn ensure_success(response: Response, service: &str) -> Result<Response, PortError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    Err(match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => PortError::Unauthorized {
            message: format!("{service} rejected the credentials ({status})"),
        },
        StatusCode::TOO_MANY_REQUESTS => PortError::RateLimited {
            retry_after_secs: response
                .headers()
                .get(header::RETRY_AFTER)
                .and_then(|v| v.to_str().ok())
                .and_then(|v| v.trim().parse().ok())
                .unwrap_or(60),
        },
        s if s.is_server_error() => PortError::unavailable(format!("{service} ({s})")),
        s => PortError::internal(format!("{service} answered with status {s}")),
    })
}
