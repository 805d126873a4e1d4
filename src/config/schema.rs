//! Configuration schema definitions.
//!
//! All types derive Serde traits for deserialization from TOML files.

use serde::{Deserialize, Serialize};

/// Root configuration for one health check.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct CheckConfig {
    /// Name of the load balancer to query.
    pub load_balancer: String,

    /// Instance ids to report on. `None` reports every registered instance.
    pub instances: Option<Vec<String>>,

    /// Region, endpoint and credential settings.
    pub aws: AwsConfig,

    /// Timeout configuration.
    pub timeouts: TimeoutConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Connection settings for the load-balancer control API.
///
/// Unset fields fall back to environment variables at connect time.
#[derive(Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct AwsConfig {
    /// Region (e.g., "eu-west-1").
    pub region: Option<String>,

    /// Endpoint override (e.g., "https://elasticloadbalancing.eu-west-1.amazonaws.com").
    pub endpoint: Option<String>,

    /// Access key id.
    pub access_key: Option<String>,

    /// Secret access key.
    pub secret_key: Option<String>,

    /// Session token for temporary credentials.
    pub session_token: Option<String>,

    /// Verify TLS certificates of the endpoint.
    pub validate_certs: bool,
}

impl Default for AwsConfig {
    fn default() -> Self {
        Self {
            region: None,
            endpoint: None,
            access_key: None,
            secret_key: None,
            session_token: None,
            validate_certs: true,
        }
    }
}

impl std::fmt::Debug for AwsConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AwsConfig")
            .field("region", &self.region)
            .field("endpoint", &self.endpoint)
            .field("access_key", &self.access_key)
            .field("secret_key", &self.secret_key.as_ref().map(|_| "<redacted>"))
            .field("session_token", &self.session_token.as_ref().map(|_| "<redacted>"))
            .field("validate_certs", &self.validate_certs)
            .finish()
    }
}

/// Timeout configuration for the API request.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TimeoutConfig {
    /// Connection establishment timeout in seconds.
    pub connect_secs: u64,

    /// Request timeout (total time for request/response) in seconds.
    pub request_secs: u64,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self {
            connect_secs: 5,
            request_secs: 30,
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Log output format ("pretty" or "json").
    pub log_format: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "warn".to_string(),
            log_format: "pretty".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minimal_toml_uses_defaults() {
        let config: CheckConfig = toml::from_str(r#"load_balancer = "my-elb""#).unwrap();
        assert_eq!(config.load_balancer, "my-elb");
        assert!(config.instances.is_none());
        assert!(config.aws.validate_certs);
        assert_eq!(config.timeouts.request_secs, 30);
        assert_eq!(config.observability.log_format, "pretty");
    }

    #[test]
    fn test_debug_redacts_secrets() {
        let aws = AwsConfig {
            secret_key: Some("super-secret".to_string()),
            session_token: Some("token".to_string()),
            ..AwsConfig::default()
        };
        let rendered = format!("{:?}", aws);
        assert!(!rendered.contains("super-secret"));
        assert!(!rendered.contains("\"token\""));
    }
}
