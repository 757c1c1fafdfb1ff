pub mod commands;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "hnfeed")]
#[command(about = "Browse the Hacker News top stories from the terminal", long_about = None)]
pub struct Cli {
    /// Configuration file (default: ~/.config/hnfeed/config.toml)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Number of parallel item requests, overriding the config file
    #[arg(short, long, global = true)]
    pub workers: Option<usize>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Show ranked top stories
    Top {
        /// Stories per page (1-50)
        #[arg(short, long)]
        limit: Option<usize>,

        /// Position in the ranking to start from
        #[arg(short, long)]
        cursor: Option<usize>,

        /// Number of pages to load
        #[arg(short, long, default_value_t = 1)]
        pages: usize,

        /// Print each page as JSON instead of text
        #[arg(long)]
        json: bool,
    },
    /// Show a single item
    Item {
        /// Item id
        id: u64,
    },
}
