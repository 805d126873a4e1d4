//! Instance health subsystem.
//!
//! # Data Flow
//! ```text
//! DescribeInstanceHealth response (elb)
//!     → ObservedHealth snapshot (state.rs)
//!     → reconcile.rs (scope filter, NotFound synthesis, aggregate)
//!     → HealthReport
//! ```
//!
//! # Design Decisions
//! - States are opaque strings; only "InService" has meaning here
//! - Reconciliation is a pure function over one snapshot
//! - Ids missing from the snapshot are reported, never treated as errors

pub mod reconcile;
pub mod state;

pub use reconcile::{reconcile, reconcile_all, reconcile_scoped};
pub use state::{HealthReport, HealthState, InstanceId, ObservedHealth};
