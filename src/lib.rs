//! Load balancer instance health check library.

pub mod config;
pub mod elb;
pub mod error;
pub mod health;
pub mod module;
pub mod observability;

pub use config::schema::CheckConfig;
pub use elb::{ElbClient, HealthSource, RemoteFetchError};
pub use error::Error;
pub use health::{HealthReport, HealthState, InstanceId, ObservedHealth};
pub use module::{HealthCheck, ModuleOutput};
