//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML)          host args file (JSON)        CLI flags
//!     → loader.rs                 → module::args               │
//!     └──────────────── merged CheckConfig ◀────────────────────┘
//!     → validation.rs (semantic checks)
//!     → connection.rs (region, endpoint, credentials + env fallback)
//!     → ConnectionSettings
//! ```
//!
//! # Design Decisions
//! - All fields have defaults to allow minimal configs
//! - Validation separates syntactic (serde) from semantic checks
//! - Secrets are redacted from Debug output

pub mod connection;
pub mod loader;
pub mod schema;
pub mod validation;

pub use connection::{ConnectionSettings, Credentials};
pub use loader::{ConfigError, ConfigOverrides};
pub use schema::{AwsConfig, CheckConfig, ObservabilityConfig, TimeoutConfig};
