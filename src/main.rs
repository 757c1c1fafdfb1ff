use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use hnfeed::app::AppContext;
use hnfeed::cli::{commands, Cli, Commands};
use hnfeed::config::Config;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };
    if let Some(workers) = cli.workers {
        config.source.workers = workers;
    }

    let ctx = AppContext::new(config)?;

    let result = match cli.command {
        Commands::Top {
            limit,
            cursor,
            pages,
            json,
        } => commands::show_top(&ctx, limit, cursor, pages, json).await,
        Commands::Item { id } => commands::show_item(&ctx, id).await,
    };

    if let Err(e) = &result {
        if e.is_source_unavailable() {
            eprintln!("Data unavailable: unable to reach Hacker News");
        }
    }

    result?;
    Ok(())
}
