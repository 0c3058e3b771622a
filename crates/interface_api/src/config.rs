//! API configuration

use rust_decimal::Decimal;
use serde::Deserialize;
use std::time::Duration;

use domain_claims::adjudication::TolerancePolicy;
use domain_claims::exclusion::ExclusionList;
use domain_claims::resolver::ResolverSettings;

/// API configuration
///
/// Every field can be set from an `API_`-prefixed environment variable,
/// e.g. `API_REMOTE_INFERENCE_URL`. Unset fields keep their defaults.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Server host
    pub host: String,
    /// Server port
    pub port: u16,
    /// Log level
    pub log_level: String,
    /// Hosted text-generation endpoint; remote inference is disabled when unset
    pub remote_inference_url: Option<String>,
    /// Bearer token for the hosted endpoint
    pub remote_inference_token: Option<String>,
    /// Timeout for a remote inference call, in seconds
    pub remote_timeout_secs: u64,
    /// On-host question-answering endpoint; local inference is disabled when unset
    pub local_qa_url: Option<String>,
    /// Timeout for each local question, in seconds
    pub local_timeout_secs: u64,
    /// Local answers must score above this
    pub min_confidence: f64,
    /// Characters of bill text sent to the hosted endpoint
    pub excerpt_chars: usize,
    /// Smallest tolerance window
    pub tolerance_floor: Decimal,
    /// Tolerance window as a share of the bill expense
    pub tolerance_rate: Decimal,
    /// Comma-separated exclusions replacing the standard list
    pub exclusions: Option<String>,
}

impl Default for ApiConfig {
    fn default() -> Self {
        let resolver = ResolverSettings::default();
        let tolerance = TolerancePolicy::default();
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            log_level: "info".to_string(),
            remote_inference_url: None,
            remote_inference_token: None,
            remote_timeout_secs: resolver.remote_timeout.as_secs(),
            local_qa_url: None,
            local_timeout_secs: resolver.local_timeout.as_secs(),
            min_confidence: resolver.min_confidence,
            excerpt_chars: resolver.excerpt_chars,
            tolerance_floor: tolerance.floor,
            tolerance_rate: tolerance.rate,
            exclusions: None,
        }
    }
}

impl ApiConfig {
    /// Loads configuration from environment
    pub fn from_env() -> Result<Self, config::ConfigError> {
        Self::from_environment(config::Environment::with_prefix("API"))
    }

    /// Loads configuration from an environment source
    ///
    /// Fails on the first value that does not parse; nothing falls back to defaults.
    pub fn from_environment(environment: config::Environment) -> Result<Self, config::ConfigError> {
        config::Config::builder()
            .add_source(environment.try_parsing(true))
            .build()?
            .try_deserialize()
    }

    /// Returns the server address
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Resolver tuning derived from this configuration
    pub fn resolver_settings(&self) -> ResolverSettings {
        ResolverSettings {
            remote_timeout: Duration::from_secs(self.remote_timeout_secs),
            local_timeout: Duration::from_secs(self.local_timeout_secs),
            min_confidence: self.min_confidence,
            excerpt_chars: self.excerpt_chars,
        }
    }

    pub fn tolerance_policy(&self) -> TolerancePolicy {
        TolerancePolicy {
            floor: self.tolerance_floor,
            rate: self.tolerance_rate,
        }
    }

    /// The configured exclusion list, or the standard one
    pub fn exclusion_list(&self) -> ExclusionList {
        match self.exclusions.as_deref().map(str::trim) {
            Some(list) if !list.is_empty() => ExclusionList::new(list.split(',')),
            _ => ExclusionList::standard(),
        }
    }
}
