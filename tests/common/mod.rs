//! Shared fixtures for integration tests.

#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};

use elb_healthcheck::config::schema::CheckConfig;
use elb_healthcheck::elb::{HealthSource, RemoteFetchError};
use elb_healthcheck::health::{HealthState, InstanceId, ObservedHealth};

/// Build a snapshot from `(id, state)` pairs.
pub fn observed(pairs: &[(&str, &str)]) -> ObservedHealth {
    pairs
        .iter()
        .map(|(id, state)| (InstanceId::from(*id), HealthState::from(*state)))
        .collect()
}

/// Render a `DescribeInstanceHealthResponse` document.
pub fn describe_instance_health_xml(pairs: &[(&str, &str)]) -> String {
    let members: String = pairs
        .iter()
        .map(|(id, state)| {
            format!(
                "      <member>\n        <Description>N/A</Description>\n        <InstanceId>{}</InstanceId>\n        <State>{}</State>\n        <ReasonCode>N/A</ReasonCode>\n      </member>\n",
                id, state
            )
        })
        .collect();
    format!(
        "<DescribeInstanceHealthResponse xmlns=\"http://elasticloadbalancing.amazonaws.com/doc/2012-06-01/\">\n  <DescribeInstanceHealthResult>\n    <InstanceStates>\n{}    </InstanceStates>\n  </DescribeInstanceHealthResult>\n  <ResponseMetadata>\n    <RequestId>00000000-0000-0000-0000-000000000000</RequestId>\n  </ResponseMetadata>\n</DescribeInstanceHealthResponse>",
        members
    )
}

/// Render an `ErrorResponse` document.
pub fn error_xml(code: &str, message: &str) -> String {
    format!(
        "<ErrorResponse xmlns=\"http://elasticloadbalancing.amazonaws.com/doc/2012-06-01/\">\n  <Error>\n    <Type>Sender</Type>\n    <Code>{}</Code>\n    <Message>{}</Message>\n  </Error>\n  <RequestId>00000000-0000-0000-0000-000000000000</RequestId>\n</ErrorResponse>",
        code, message
    )
}

/// Config pointing at `endpoint` with static test credentials.
pub fn config_for(endpoint: &str, load_balancer: &str) -> CheckConfig {
    let mut config = CheckConfig::default();
    config.load_balancer = load_balancer.to_string();
    config.aws.region = Some("eu-west-1".to_string());
    config.aws.endpoint = Some(endpoint.to_string());
    config.aws.access_key = Some("AKIDEXAMPLE".to_string());
    config.aws.secret_key = Some("wJalrXUtnFEMI/K7MDENG+bPxRfiCYEXAMPLEKEY".to_string());
    config.timeouts.request_secs = 2;
    config.timeouts.connect_secs = 1;
    config
}

/// Source that always returns the same snapshot and counts calls.
pub struct StaticSource {
    pub snapshot: ObservedHealth,
    pub calls: AtomicUsize,
}

impl StaticSource {
    pub fn new(snapshot: ObservedHealth) -> Self {
        Self {
            snapshot,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl HealthSource for StaticSource {
    async fn fetch_health(&self, _load_balancer: &str) -> Result<ObservedHealth, RemoteFetchError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.snapshot.clone())
    }
}

/// Source that always fails with an API error.
pub struct FailingSource {
    pub code: &'static str,
}

impl HealthSource for FailingSource {
    async fn fetch_health(&self, load_balancer: &str) -> Result<ObservedHealth, RemoteFetchError> {
        Err(RemoteFetchError::Api {
            status: 400,
            code: self.code.to_string(),
            message: format!("There is no ACTIVE Load Balancer named '{}'", load_balancer),
        })
    }
}
