//! Result document emitted back to the host.

use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt::Display;

use crate::health::{HealthReport, HealthState, InstanceId};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum ModuleOutput {
    Success {
        changed: bool,
        all_in_service: bool,
        instances: BTreeMap<InstanceId, HealthState>,
    },
    Failure {
        changed: bool,
        failed: bool,
        msg: String,
    },
}

impl ModuleOutput {
    pub fn success(report: HealthReport) -> Self {
        ModuleOutput::Success {
            changed: false,
            all_in_service: report.all_in_service,
            instances: report.instances,
        }
    }

    pub fn failure(err: &impl Display) -> Self {
        ModuleOutput::Failure {
            changed: false,
            failed: true,
            msg: err.to_string(),
        }
    }

    pub fn is_failure(&self) -> bool {
        matches!(self, ModuleOutput::Failure { .. })
    }

    /// Process exit status: 0 whenever a report was produced, 1 on failure.
    pub fn exit_status(&self) -> u8 {
        if self.is_failure() {
            1
        } else {
            0
        }
    }

    pub fn to_json(&self, pretty: bool) -> Result<String, serde_json::Error> {
        if pretty {
            serde_json::to_string_pretty(self)
        } else {
            serde_json::to_string(self)
        }
    }
}
