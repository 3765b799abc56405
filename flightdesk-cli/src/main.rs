use std::io::Write;
use anyhow::Context;
use clap::Parser;
use flightdesk_cli::{commands, render, Cli, Command};
use flightdesk_store::app_config::Config;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config = Config::load_from(&cli.config).context("Failed to load config")?;
    if let Some(url) = &cli.base_url {
        config.source.base_url = url.clone();
    }

    // Logs go to stderr; stdout carries the tables.
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| config.log.filter.clone().into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let mut stdout = std::io::stdout();

    if let Command::Statuses = cli.command {
        write!(stdout, "{}", render::statuses())?;
        return Ok(());
    }

    let source = commands::build_source(&cli, &config).await?;
    match &cli.command {
        Command::Search(args) => commands::search(source, args, &mut stdout).await,
        Command::Session => commands::session(source, &mut stdout).await,
        Command::Show { id } => commands::show(source, id, &mut stdout).await,
        Command::Statuses => Ok(()),
    }
}
