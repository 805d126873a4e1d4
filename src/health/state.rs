//! Instance health data model.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Opaque identifier of an instance registered behind a load balancer.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct InstanceId(String);

impl InstanceId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for InstanceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for InstanceId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for InstanceId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// Health state string as reported by the load balancer.
///
/// Compared only for equality against [`HealthState::IN_SERVICE`].
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HealthState(String);

impl HealthState {
    /// Instance is receiving traffic.
    pub const IN_SERVICE: &'static str = "InService";
    /// Synthesized for requested ids the load balancer did not report.
    pub const NOT_FOUND: &'static str = "NotFound";

    pub fn not_found() -> Self {
        Self(Self::NOT_FOUND.to_string())
    }

    pub fn is_in_service(&self) -> bool {
        self.0 == Self::IN_SERVICE
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for HealthState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for HealthState {
    fn from(state: &str) -> Self {
        Self(state.to_string())
    }
}

impl From<String> for HealthState {
    fn from(state: String) -> Self {
        Self(state)
    }
}

/// Snapshot of instance states returned by one health query.
pub type ObservedHealth = BTreeMap<InstanceId, HealthState>;

/// Result of one health check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthReport {
    /// True iff every reported instance is `InService`.
    pub all_in_service: bool,
    /// State per instance in scope.
    pub instances: BTreeMap<InstanceId, HealthState>,
}

impl HealthReport {
    /// Number of instances in the report that are in service.
    pub fn in_service_count(&self) -> usize {
        self.instances.values().filter(|s| s.is_in_service()).count()
    }
}
