//! Main entry point for optiplot.

use anyhow::Context;
use clap::Parser;
use optiplot_cli::{run, Cli};
use optiplot_common::init_logging;
use optiplot_config::ConfigLoader;
use tracing::debug;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config =
        ConfigLoader::load(cli.config.as_deref()).context("failed to load settings")?;
    cli.apply_overrides(&mut config);

    // Held until exit so file logs are flushed.
    let _guard = init_logging(&config.logging).context("failed to initialize logging")?;
    debug!(?config, "resolved settings");

    let mut stdout = std::io::stdout().lock();
    run(cli.command, config, &mut stdout).await?;
    Ok(())
}
