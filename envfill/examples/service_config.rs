//! Populates a service configuration from `SERVICE_*` variables.
//!
//! Every annotated field starts from its declared default; exported
//! variables override them:
//!
//! ```shell
//! SERVICE_API_PORT=9090 SERVICE_RETRY_ATTEMPTS=5 \
//!     cargo run --example service_config
//! ```

use std::collections::HashMap;
use std::io::{self, Write};

use anyhow::Result;
use envfill::EnvFill;

#[derive(Debug, Default, EnvFill)]
struct RetryConfig {
    #[envfill(default = "3")]
    attempts: i64,
    #[envfill(default = "0.5")]
    backoff_seconds: f64,
}

#[derive(Debug, Default, EnvFill)]
struct ServiceConfig {
    #[envfill(default = "8080")]
    api_port: i64,
    #[envfill(default = "local")]
    service_env: String,
    #[envfill(default = "true")]
    enabled: bool,
    #[envfill(default = "cache:1,db:2")]
    backend_weights: HashMap<String, i64>,
    retry: RetryConfig,
}

fn main() -> Result<()> {
    let mut config = ServiceConfig::default();
    config.fill_from_env("SERVICE")?;
    let mut out = io::stdout().lock();
    writeln!(out, "{config:#?}")?;
    Ok(())
}
