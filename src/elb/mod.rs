//! Load-balancer control API client.
//!
//! # Data Flow
//! ```text
//! HealthCheck::run (module)
//!     → HealthSource::fetch_health
//!         → client.rs (build DescribeInstanceHealth request)
//!         → signing.rs (SigV4 Authorization header)
//!         → HTTPS GET to the Query API endpoint
//!         → response.rs (XML → ObservedHealth | RemoteFetchError)
//! ```
//!
//! # Design Decisions
//! - One request per check, never retried
//! - The full snapshot is fetched; scoping happens in `health::reconcile`
//! - Timeouts are enforced by the HTTP client

pub mod client;
pub mod response;
pub mod signing;
pub mod types;

use std::future::Future;

use crate::health::ObservedHealth;

pub use client::ElbClient;
pub use types::{RemoteFetchError, TimeoutPhase};

/// Source of instance health snapshots for a named load balancer.
pub trait HealthSource {
    /// Query the current state of every instance registered with `load_balancer`.
    fn fetch_health(
        &self,
        load_balancer: &str,
    ) -> impl Future<Output = Result<ObservedHealth, RemoteFetchError>> + Send;
}
