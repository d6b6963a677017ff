use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use haltr::cli::{Cli, Commands};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "haltr=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Filter {
            stop,
            sentinel,
            config,
        } => {
            haltr::cli::filter(stop, sentinel, config).await?;
        }
        Commands::Fetch {
            remote,
            files,
            output,
        } => {
            haltr::cli::fetch(remote, files, output).await?;
        }
    }

    Ok(())
}
