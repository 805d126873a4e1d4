//! Crate-level error type.

use thiserror::Error;

use crate::config::connection::ConnectionError;
use crate::config::loader::ConfigError;
use crate::elb::RemoteFetchError;

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("Failed to connect to the load balancer API: {0}")]
    Connection(#[from] ConnectionError),

    #[error(transparent)]
    Remote(#[from] RemoteFetchError),
}

pub type Result<T> = std::result::Result<T, Error>;
