use clap::{Parser, Subcommand};
use client::prelude::*;
use harness::{run_all, run_health, HarnessConfig, RunContext};
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;
use std::time::Duration;
use tracing::{error, info};

#[derive(Parser)]
#[command(name = "harness")]
#[command(about = "Integration tests for the teacher and student REST API")]
struct Cli {
    /// Base URL of the running service (overrides API_BASE_URL)
    #[arg(long, global = true)]
    base_url: Option<String>,
    /// Per-request timeout in seconds (overrides API_TIMEOUT_SECS)
    #[arg(long, global = true)]
    timeout_secs: Option<u64>,
    /// Pause between the two reads of the persistence check, in milliseconds
    #[arg(long, global = true)]
    persistence_pause_ms: Option<u64>,
    /// TOML file with [api] and [run] sections
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Run every suite (default)
    Run,
    /// Only check that the API is reachable
    Health,
}

impl Cli {
    fn harness_config(&self) -> ApiResult<HarnessConfig> {
        let mut config = HarnessConfig::load(self.config.as_deref())?;

        if let Some(base_url) = &self.base_url {
            config.api.base_url = base_url.clone();
        }
        if let Some(secs) = self.timeout_secs {
            config.api.timeout = Duration::from_secs(secs);
        }
        if let Some(ms) = self.persistence_pause_ms {
            config.run.persistence_pause = Duration::from_millis(ms);
        }

        config.validate()?;
        Ok(config)
    }
}

#[tokio::main]
async fn main() -> Result<ExitCode, Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = cli.harness_config().map_err(|e| {
        error!("configuration rejected: {}", e);
        e
    })?;
    info!(
        base_url = %config.api.base_url,
        timeout = ?config.api.timeout,
        "configuration loaded"
    );

    let transport = HttpTransport::new(config.api)?;
    let mut ctx = RunContext::new(Arc::new(transport), config.run);

    let success = match cli.command.unwrap_or(Commands::Run) {
        Commands::Run => run_all(&mut ctx).await,
        Commands::Health => run_health(&mut ctx).await,
    };

    Ok(if success {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}
