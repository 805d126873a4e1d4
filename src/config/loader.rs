//! Configuration loading from disk.

use std::fs;
use std::path::Path;

use thiserror::Error;

use crate::config::schema::CheckConfig;
use crate::config::validation::{validate_config, ValidationError};
use crate::module::args::ModuleArgs;

/// Error type for configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid module arguments: {0}")]
    Args(#[from] serde_json::Error),

    #[error("Validation failed: {}", join_errors(.0))]
    Validation(Vec<ValidationError>),
}

fn join_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Read a TOML configuration file without validating it.
pub fn read_config(path: &Path) -> Result<CheckConfig, ConfigError> {
    let content = fs::read_to_string(path)?;
    Ok(toml::from_str(&content)?)
}

/// Read the host's JSON argument file.
pub fn read_module_args(path: &Path) -> Result<ModuleArgs, ConfigError> {
    let content = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&content)?)
}

/// Values given as command-line flags.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub name: Option<String>,
    /// Empty means "not given"; flags cannot clear a scope.
    pub instances: Vec<String>,
    pub region: Option<String>,
    pub endpoint: Option<String>,
    pub log_level: Option<String>,
    pub log_format: Option<String>,
}

impl ConfigOverrides {
    /// Overlay the flags that were given onto `config`.
    pub fn apply_to(&self, config: &mut CheckConfig) {
        if let Some(name) = &self.name {
            config.load_balancer = name.clone();
        }
        if !self.instances.is_empty() {
            config.instances = Some(self.instances.clone());
        }
        if let Some(region) = &self.region {
            config.aws.region = Some(region.clone());
        }
        if let Some(endpoint) = &self.endpoint {
            config.aws.endpoint = Some(endpoint.clone());
        }
        if let Some(level) = &self.log_level {
            config.observability.log_level = level.clone();
        }
        if let Some(format) = &self.log_format {
            config.observability.log_format = format.clone();
        }
    }
}

/// Layer host arguments and flags over `base`, then validate.
///
/// Precedence: `base` < `args` < `overrides`.
pub fn merge(
    base: CheckConfig,
    args: Option<ModuleArgs>,
    overrides: &ConfigOverrides,
) -> Result<CheckConfig, ConfigError> {
    let mut config = base;
    if let Some(args) = args {
        args.apply_to(&mut config);
    }
    overrides.apply_to(&mut config);

    validate_config(&config).map_err(ConfigError::Validation)?;
    Ok(config)
}

/// Load every configuration layer and return the validated result.
///
/// Defaults < TOML file < host args file < flags.
pub fn load_config(
    config_path: Option<&Path>,
    args_path: Option<&Path>,
    overrides: &ConfigOverrides,
) -> Result<CheckConfig, ConfigError> {
    let base = match config_path {
        Some(path) => read_config(path)?,
        None => CheckConfig::default(),
    };
    let args = args_path.map(read_module_args).transpose()?;
    merge(base, args, overrides)
}
