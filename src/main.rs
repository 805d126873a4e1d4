//! elb-healthcheck
//!
//! Reports the health-check state of instances registered with a classic
//! load balancer, in the result format automation hosts expect.
//!
//! # Architecture Overview
//!
//! ```text
//!   args file / --config / flags
//!            │
//!            ▼
//!   ┌─────────────────┐    ┌─────────────────┐    ┌──────────────────────┐
//!   │     config      │───▶│   connection    │───▶│      ElbClient       │──── DescribeInstanceHealth
//!   │ merge+validate  │    │ region, creds   │    │  SigV4 signed GET    │◀─── XML snapshot
//!   └─────────────────┘    └─────────────────┘    └──────────┬───────────┘
//!                                                            │ ObservedHealth
//!                                                            ▼
//!   stdout JSON  ◀──── ModuleOutput ◀──── HealthReport ◀── reconcile
//! ```
//!
//! # Usage
//!
//! ```text
//! elb-healthcheck --name my-elb --region eu-west-1 -i i-1157af42 -i i-b514da21
//! elb-healthcheck /tmp/module-args.json
//! ```

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;

use elb_healthcheck::config::loader::{load_config, ConfigOverrides};
use elb_healthcheck::module::{check_from_config, ModuleOutput};
use elb_healthcheck::observability;

#[derive(Parser)]
#[command(name = "elb-healthcheck", version)]
#[command(about = "Get instance health-check states from a load balancer", long_about = None)]
struct Cli {
    /// JSON argument file supplied by the automation host.
    args_file: Option<PathBuf>,

    /// TOML configuration file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Name of the load balancer.
    #[arg(short, long)]
    name: Option<String>,

    /// Instance id to report on (repeatable). Omit to report all instances.
    #[arg(short = 'i', long = "instance")]
    instances: Vec<String>,

    /// Region of the load balancer.
    #[arg(short, long)]
    region: Option<String>,

    /// Endpoint override for the load balancer API.
    #[arg(long)]
    endpoint: Option<String>,

    /// Log level (trace, debug, info, warn, error).
    #[arg(long)]
    log_level: Option<String>,

    /// Log format (pretty or json).
    #[arg(long)]
    log_format: Option<String>,

    /// Pretty-print the result document.
    #[arg(long)]
    pretty: bool,
}

impl Cli {
    fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            name: self.name.clone(),
            instances: self.instances.clone(),
            region: self.region.clone(),
            endpoint: self.endpoint.clone(),
            log_level: self.log_level.clone(),
            log_format: self.log_format.clone(),
        }
    }
}

fn emit(output: &ModuleOutput, pretty: bool) {
    match output.to_json(pretty) {
        Ok(json) => println!("{}", json),
        Err(e) => println!(
            "{}",
            serde_json::json!({
                "changed": false,
                "failed": true,
                "msg": format!("failed to encode result: {}", e),
            })
        ),
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let loaded = load_config(cli.config.as_deref(), cli.args_file.as_deref(), &cli.overrides());
    let config = match loaded {
        Ok(config) => config,
        Err(e) => {
            let output = ModuleOutput::failure(&e);
            emit(&output, cli.pretty);
            return ExitCode::from(output.exit_status());
        }
    };

    observability::init_logging(&config.observability);
    tracing::debug!(
        load_balancer = %config.load_balancer,
        scoped = config.instances.is_some(),
        "Configuration loaded"
    );

    let output = match check_from_config(&config).await {
        Ok(report) => ModuleOutput::success(report),
        Err(e) => {
            tracing::error!(error = %e, "Health check failed");
            ModuleOutput::failure(&e)
        }
    };

    emit(&output, cli.pretty);
    ExitCode::from(output.exit_status())
}
