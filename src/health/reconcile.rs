//! Health reconciliation.
//!
//! # Responsibilities
//! - Restrict a snapshot to the requested instance ids
//! - Mark requested ids absent from the snapshot as `NotFound`
//! - Derive the `all_in_service` aggregate

use std::collections::BTreeMap;

use crate::health::state::{HealthReport, HealthState, InstanceId, ObservedHealth};

/// Build a report covering exactly `requested`.
///
/// Duplicate ids collapse into a single entry. Ids with no observed state
/// are reported as [`HealthState::NOT_FOUND`].
pub fn reconcile_scoped(observed: &ObservedHealth, requested: &[InstanceId]) -> HealthReport {
    let instances: BTreeMap<InstanceId, HealthState> = requested
        .iter()
        .map(|id| {
            let state = observed
                .get(id)
                .cloned()
                .unwrap_or_else(HealthState::not_found);
            (id.clone(), state)
        })
        .collect();

    let in_service = instances.values().filter(|s| s.is_in_service()).count();
    let all_in_service = in_service == instances.len();

    HealthReport { all_in_service, instances }
}

/// Build a report over every instance the load balancer reported.
pub fn reconcile_all(observed: ObservedHealth) -> HealthReport {
    let all_in_service = observed.values().all(HealthState::is_in_service);
    HealthReport {
        all_in_service,
        instances: observed,
    }
}

/// Scoped reconciliation when ids were requested, otherwise unscoped.
pub fn reconcile(observed: ObservedHealth, requested: Option<&[InstanceId]>) -> HealthReport {
    match requested {
        Some(ids) => reconcile_scoped(&observed, ids),
        None => reconcile_all(observed),
    }
}
