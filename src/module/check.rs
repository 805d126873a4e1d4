//! Single health-check invocation.

use crate::config::connection::resolve_from_env;
use crate::config::schema::CheckConfig;
use crate::elb::{ElbClient, HealthSource, RemoteFetchError};
use crate::error::Error;
use crate::health::{reconcile, HealthReport, InstanceId};

/// One health query against one load balancer.
#[derive(Debug, Clone)]
pub struct HealthCheck<S> {
    /// Load balancer to query.
    pub load_balancer: String,
    /// Requested scope; `None` reports every registered instance.
    pub instances: Option<Vec<InstanceId>>,
    /// Connection used for the fetch.
    pub connection: S,
}

impl<S: HealthSource> HealthCheck<S> {
    pub fn new(load_balancer: impl Into<String>, connection: S) -> Self {
        Self {
            load_balancer: load_balancer.into(),
            instances: None,
            connection,
        }
    }

    pub fn with_instances<I, T>(mut self, ids: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<InstanceId>,
    {
        self.instances = Some(ids.into_iter().map(Into::into).collect());
        self
    }

    pub fn from_config(config: &CheckConfig, connection: S) -> Self {
        let check = Self::new(config.load_balancer.clone(), connection);
        match &config.instances {
            Some(ids) => check.with_instances(ids.iter().map(String::as_str)),
            None => check,
        }
    }

    /// Fetch one snapshot and reconcile it against the requested scope.
    ///
    /// A fetch failure is returned unchanged and no report is produced.
    pub async fn run(&self) -> Result<HealthReport, RemoteFetchError> {
        let observed = self.connection.fetch_health(&self.load_balancer).await?;
        let report = reconcile(observed, self.instances.as_deref());

        tracing::info!(
            load_balancer = %self.load_balancer,
            scoped = self.instances.is_some(),
            instances = report.instances.len(),
            in_service = report.in_service_count(),
            all_in_service = report.all_in_service,
            "Health check complete"
        );
        Ok(report)
    }
}

/// Resolve a connection for `config` and run its check.
pub async fn check_from_config(config: &CheckConfig) -> Result<HealthReport, Error> {
    let settings = resolve_from_env(config)?;
    let client = ElbClient::new(settings)?;
    let report = HealthCheck::from_config(config, client).run().await?;
    Ok(report)
}
