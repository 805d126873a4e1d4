//! Property tests for health reconciliation.

use std::collections::BTreeSet;

use elb_healthcheck::health::{
    reconcile_all, reconcile_scoped, HealthState, InstanceId, ObservedHealth,
};
use proptest::prelude::*;

fn instance_id() -> impl Strategy<Value = InstanceId> {
    "i-[0-9a-f]{1,3}".prop_map(InstanceId::from)
}

fn health_state() -> impl Strategy<Value = HealthState> {
    prop_oneof![
        3 => Just(HealthState::from("InService")),
        1 => Just(HealthState::from("OutOfService")),
        1 => Just(HealthState::from("Unknown")),
    ]
}

fn snapshot() -> impl Strategy<Value = ObservedHealth> {
    prop::collection::btree_map(instance_id(), health_state(), 0..12)
}

fn requested() -> impl Strategy<Value = Vec<InstanceId>> {
    prop::collection::vec(instance_id(), 1..12)
}

proptest! {
    /// Property: scoped output keys are exactly the requested ids
    #[test]
    fn scoped_output_covers_exactly_requested(observed in snapshot(), ids in requested()) {
        let report = reconcile_scoped(&observed, &ids);
        let keys: BTreeSet<_> = report.instances.keys().cloned().collect();
        let wanted: BTreeSet<_> = ids.iter().cloned().collect();
        prop_assert_eq!(keys, wanted);
    }

    /// Property: requested ids missing from the snapshot are NotFound, others keep their state
    #[test]
    fn scoped_missing_ids_are_not_found(observed in snapshot(), ids in requested()) {
        let report = reconcile_scoped(&observed, &ids);
        for id in &ids {
            match observed.get(id) {
                Some(state) => prop_assert_eq!(&report.instances[id], state),
                None => prop_assert_eq!(report.instances[id].as_str(), HealthState::NOT_FOUND),
            }
        }
    }

    /// Property: scoped aggregate is true iff every requested id is InService
    #[test]
    fn scoped_all_in_service_matches_states(observed in snapshot(), ids in requested()) {
        let report = reconcile_scoped(&observed, &ids);
        let expected = ids
            .iter()
            .all(|id| observed.get(id).map(HealthState::is_in_service).unwrap_or(false));
        prop_assert_eq!(report.all_in_service, expected);
    }

    /// Property: unscoped aggregate is true iff every observed state is InService
    #[test]
    fn unscoped_all_in_service_matches_states(observed in snapshot()) {
        let expected = observed.values().all(|s| s.as_str() == "InService");
        let report = reconcile_all(observed);
        prop_assert_eq!(report.all_in_service, expected);
    }

    /// Property: unscoped output is the snapshot itself
    #[test]
    fn unscoped_output_is_identity(observed in snapshot()) {
        let report = reconcile_all(observed.clone());
        prop_assert_eq!(report.instances, observed);
    }
}
