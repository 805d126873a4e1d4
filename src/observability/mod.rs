//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! All subsystems produce:
//!     → logging.rs (structured log events on stderr)
//!
//! Consumers:
//!     → Host runtime log capture
//!     → Operators running the binary by hand
//! ```
//!
//! # Design Decisions
//! - stdout is reserved for the result document
//! - Structured fields (load balancer, counts, API codes), never credentials
//! - JSON format for machine parsing, pretty format for terminals

pub mod logging;

pub use logging::init_logging;
