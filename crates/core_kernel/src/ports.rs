//! Ports and Adapters Infrastructure
//!
//! Shared types for the hexagonal seams between the claims domain and the
//! collaborators it talks to (hosted inference services, local models).
//!
//! # Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                 Bill Information Resolver                    │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │                      Port Traits                             │
//! │          (TextInferencePort in domain_claims)                │
//! └─────────────────────────────────────────────────────────────┘
//!                    ▲                         ▲
//!                    │                         │
//!         ┌─────────┴─────────┐     ┌────────┴────────┐
//!         │  Hosted Adapter   │     │  Local Adapter   │
//!         │  (REST, remote)   │     │  (on-host QA)    │
//!         └───────────────────┘     └──────────────────┘
//! ```
//!
//! Each domain defines its own port trait extending [`DomainPort`]; every
//! adapter reports failures through [`PortError`].

use std::fmt;
use thiserror::Error;

/// Error type for port operations
///
/// Provides a unified error type that all port implementations must use,
/// so callers can treat every collaborator failure the same way.
#[derive(Debug, Error)]
pub enum PortError {
    /// Connection to the underlying system failed
    #[error("Connection error: {message}")]
    Connection {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// The operation timed out
    #[error("Timeout after {duration_ms}ms: {operation}")]
    Timeout {
        operation: String,
        duration_ms: u64,
    },

    /// Authentication or authorization failed
    #[error("Unauthorized: {message}")]
    Unauthorized {
        message: String,
    },

    /// Rate limit exceeded for external API
    #[error("Rate limited: retry after {retry_after_secs}s")]
    RateLimited {
        retry_after_secs: u64,
    },

    /// The external system is unavailable
    #[error("Service unavailable: {service}")]
    ServiceUnavailable {
        service: String,
    },

    /// The reply could not be turned into domain data
    #[error("Transformation error: {message}")]
    Transformation {
        message: String,
    },

    /// An internal error occurred
    #[error("Internal error: {message}")]
    Internal {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },
}

impl PortError {
    /// Creates a Timeout error
    pub fn timeout(operation: impl fmt::Display, duration_ms: u64) -> Self {
        PortError::Timeout {
            operation: operation.to_string(),
            duration_ms,
        }
    }

    /// Creates a Transformation error
    pub fn transformation(message: impl Into<String>) -> Self {
        PortError::Transformation {
            message: message.into(),
        }
    }

    /// Creates an Internal error
    pub fn internal(message: impl Into<String>) -> Self {
        PortError::Internal {
            message: message.into(),
            source: None,
        }
    }

    /// Creates a ServiceUnavailable error
    pub fn unavailable(service: impl Into<String>) -> Self {
        PortError::ServiceUnavailable {
            service: service.into(),
        }
    }

    /// Returns true if this error indicates a transient failure that may succeed on retry
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            PortError::Connection { .. }
                | PortError::Timeout { .. }
                | PortError::RateLimited { .. }
                | PortError::ServiceUnavailable { .. }
        )
    }
}

/// Marker trait for all domain ports
///
/// All port traits should extend this marker to ensure they are
/// thread-safe and can be used in async contexts.
pub trait DomainPort: Send + Sync + 'static {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_port_error_transient() {
        let timeout = PortError::timeout("ask", 5000);
        assert!(timeout.is_transient());
        assert!(timeout.to_string().contains("5000ms"));

        let rate_limited = PortError::RateLimited {
            retry_after_secs: 60,
        };
        assert!(rate_limited.is_transient());

        let unauthorized = PortError::Unauthorized {
            message: "bad token".to_string(),
        };
        assert!(!unauthorized.is_transient());
        assert!(!PortError::transformation("not json").is_transient());
    }

    #[test]
    fn test_port_error_messages() {
        let error = PortError::unavailable("local-qa");
        assert_eq!(error.to_string(), "Service unavailable: local-qa");

        let error = PortError::internal("boom");
        assert!(error.to_string().contains("boom"));
    }
}
