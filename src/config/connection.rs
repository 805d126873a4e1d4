//! Region, endpoint and credential resolution.
//!
//! # Responsibilities
//! - Pick region and credentials from configuration, then environment
//! - Derive the regional Query API endpoint
//!
//! # Design Decisions
//! - Explicit configuration always wins over environment variables
//! - Environment lookup is injected so resolution is testable
//! - Only static keys (with optional session token) are supported

use std::time::Duration;

use thiserror::Error;
use url::Url;

use crate::config::schema::CheckConfig;

const REGION_VARS: &[&str] = &["AWS_REGION", "AWS_DEFAULT_REGION", "EC2_REGION"];
const ACCESS_KEY_VARS: &[&str] = &["AWS_ACCESS_KEY_ID", "AWS_ACCESS_KEY", "EC2_ACCESS_KEY"];
const SECRET_KEY_VARS: &[&str] = &["AWS_SECRET_ACCESS_KEY", "AWS_SECRET_KEY", "EC2_SECRET_KEY"];
const SESSION_TOKEN_VARS: &[&str] = &["AWS_SESSION_TOKEN", "AWS_SECURITY_TOKEN", "EC2_SECURITY_TOKEN"];
const ENDPOINT_VARS: &[&str] = &["EC2_URL", "AWS_ELB_ENDPOINT"];

/// Errors raised while preparing a connection.
#[derive(Debug, Error)]
pub enum ConnectionError {
    #[error("No region configured; set `region` or AWS_REGION")]
    MissingRegion,

    #[error("No credentials configured; set access/secret keys or AWS_ACCESS_KEY_ID/AWS_SECRET_ACCESS_KEY")]
    MissingCredentials,

    #[error("Invalid endpoint '{endpoint}': {reason}")]
    InvalidEndpoint { endpoint: String, reason: String },
}

/// Static signing credentials.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub access_key: String,
    pub secret_key: String,
    pub session_token: Option<String>,
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("access_key", &self.access_key)
            .field("secret_key", &"<redacted>")
            .field("session_token", &self.session_token.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

/// Everything needed to build an [`ElbClient`](crate::elb::ElbClient).
#[derive(Debug, Clone)]
pub struct ConnectionSettings {
    pub region: String,
    pub endpoint: Url,
    pub credentials: Credentials,
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
    pub validate_certs: bool,
}

fn first_env<F>(env: &F, names: &[&str]) -> Option<String>
where
    F: Fn(&str) -> Option<String>,
{
    names
        .iter()
        .filter_map(|name| env(*name))
        .find(|value| !value.trim().is_empty())
}

fn non_empty(value: &Option<String>) -> Option<String> {
    value.as_ref().filter(|v| !v.trim().is_empty()).cloned()
}

/// Default Query API endpoint for a region.
pub fn default_endpoint(region: &str) -> String {
    if region.starts_with("cn-") {
        format!("https://elasticloadbalancing.{}.amazonaws.com.cn", region)
    } else {
        format!("https://elasticloadbalancing.{}.amazonaws.com", region)
    }
}

/// Resolve connection settings using `env` for unset values.
pub fn resolve_connection<F>(config: &CheckConfig, env: F) -> Result<ConnectionSettings, ConnectionError>
where
    F: Fn(&str) -> Option<String>,
{
    let aws = &config.aws;

    let region = non_empty(&aws.region)
        .or_else(|| first_env(&env, REGION_VARS))
        .ok_or(ConnectionError::MissingRegion)?;

    let access_key = non_empty(&aws.access_key).or_else(|| first_env(&env, ACCESS_KEY_VARS));
    let secret_key = non_empty(&aws.secret_key).or_else(|| first_env(&env, SECRET_KEY_VARS));
    let (access_key, secret_key) = match (access_key, secret_key) {
        (Some(a), Some(s)) => (a, s),
        _ => return Err(ConnectionError::MissingCredentials),
    };
    let session_token =
        non_empty(&aws.session_token).or_else(|| first_env(&env, SESSION_TOKEN_VARS));

    let endpoint = non_empty(&aws.endpoint)
        .or_else(|| first_env(&env, ENDPOINT_VARS))
        .unwrap_or_else(|| default_endpoint(&region));
    let endpoint = Url::parse(&endpoint).map_err(|e| ConnectionError::InvalidEndpoint {
        endpoint: endpoint.clone(),
        reason: e.to_string(),
    })?;
    if !matches!(endpoint.scheme(), "http" | "https") {
        return Err(ConnectionError::InvalidEndpoint {
            endpoint: endpoint.to_string(),
            reason: format!("unsupported scheme '{}'", endpoint.scheme()),
        });
    }

    Ok(ConnectionSettings {
        region,
        endpoint,
        credentials: Credentials {
            access_key,
            secret_key,
            session_token,
        },
        connect_timeout: Duration::from_secs(config.timeouts.connect_secs),
        request_timeout: Duration::from_secs(config.timeouts.request_secs),
        validate_certs: aws.validate_certs,
    })
}

/// Resolve connection settings from the process environment.
pub fn resolve_from_env(config: &CheckConfig) -> Result<ConnectionSettings, ConnectionError> {
    resolve_connection(config, |name| std::env::var(name).ok())
}
