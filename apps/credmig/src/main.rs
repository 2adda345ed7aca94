use std::process::ExitCode;
use std::sync::Arc;

use anyhow::Context;
use tracing::info;

mod cli;

use credmig_core::{CredsClientConfig, Migrator, WreqCredsClient};

use crate::cli::{Cli, parse_args};

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    init_tracing();

    let cli = match parse_args(std::env::args()) {
        Ok(cli) => cli,
        Err(code) => return code,
    };

    if let Err(err) = run(cli).await {
        eprintln!("credmig failed: {err:#}");
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let client = WreqCredsClient::new(CredsClientConfig { proxy: cli.proxy })
        .context("build http client")?;
    let mut migrator = Migrator::new(Arc::new(client), cli.host_port, std::io::stdout());
    let summary = migrator
        .migrate(&cli.dump_file)
        .await
        .with_context(|| format!("migrate {}", cli.dump_file))?;
    info!(total = summary.total, failed = summary.failed(), "done");
    Ok(())
}

fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("credmig=warn,credmig_core=warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
