//! Query API response decoding.

use serde::Deserialize;

use crate::elb::types::RemoteFetchError;
use crate::health::{HealthState, InstanceId, ObservedHealth};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct DescribeInstanceHealthResponse {
    describe_instance_health_result: DescribeInstanceHealthResult,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct DescribeInstanceHealthResult {
    #[serde(default)]
    instance_states: InstanceStates,
}

#[derive(Debug, Default, Deserialize)]
struct InstanceStates {
    #[serde(default, rename = "member")]
    members: Vec<InstanceStateMember>,
}

/// One `InstanceStates/member` entry.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct InstanceStateMember {
    pub instance_id: String,
    pub state: String,
    #[serde(default)]
    pub reason_code: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct ErrorResponse {
    error: ErrorDetail,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct ErrorDetail {
    code: String,
    #[serde(default)]
    message: String,
}

/// Decode the members of a `DescribeInstanceHealthResponse` document.
pub fn parse_instance_states(body: &str) -> Result<Vec<InstanceStateMember>, RemoteFetchError> {
    let response: DescribeInstanceHealthResponse = quick_xml::de::from_str(body)
        .map_err(|e| RemoteFetchError::MalformedResponse(e.to_string()))?;
    Ok(response.describe_instance_health_result.instance_states.members)
}

/// Members whose state is anything but `InService`, in document order.
pub fn out_of_service(members: &[InstanceStateMember]) -> Vec<&InstanceStateMember> {
    members
        .iter()
        .filter(|m| m.state != HealthState::IN_SERVICE)
        .collect()
}

/// Collapse decoded members into a snapshot.
///
/// If an id is reported more than once the last entry wins.
pub fn into_observed(members: Vec<InstanceStateMember>) -> ObservedHealth {
    members
        .into_iter()
        .map(|m| (InstanceId::from(m.instance_id), HealthState::from(m.state)))
        .collect()
}

/// Map a non-success response to [`RemoteFetchError::Api`].
///
/// Bodies that are not an `ErrorResponse` document keep their text as the
/// message under a synthetic `HttpStatus` code.
pub fn parse_error(status: u16, body: &str) -> RemoteFetchError {
    match quick_xml::de::from_str::<ErrorResponse>(body) {
        Ok(doc) => RemoteFetchError::Api {
            status,
            code: doc.error.code,
            message: doc.error.message,
        },
        Err(_) => RemoteFetchError::Api {
            status,
            code: "HttpStatus".to_string(),
            message: body.trim().chars().take(512).collect(),
        },
    }
}
