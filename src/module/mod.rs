//! Automation-host module contract.
//!
//! # Data Flow
//! ```text
//! host JSON args file
//!     → args.rs (ModuleArgs, host option names and aliases)
//!     → CheckConfig
//!     → check.rs (HealthCheck: fetch once, reconcile once)
//!     → output.rs (ModuleOutput JSON on stdout)
//! ```
//!
//! # Design Decisions
//! - Parameters travel in an explicit `HealthCheck` value, not globals
//! - The result is always `changed: false`; the check never mutates anything
//! - Failures become a `failed: true` document with the error text

pub mod args;
pub mod check;
pub mod output;

pub use args::ModuleArgs;
pub use check::{check_from_config, HealthCheck};
pub use output::ModuleOutput;
