use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Browse the Supplier Academy content sheet from the terminal
#[derive(Parser)]
#[command(name = "academy")]
#[command(about = "Load, browse and search the Supplier Academy catalog", long_about = None)]
pub struct Cli {
    /// Config file (defaults to academy.toml in the user config dir)
    #[arg(short, long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Print JSON instead of text
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List categories with item counts
    Categories,
    /// List content, optionally limited to one category
    List {
        #[arg(short = 'C', long, default_value = "all")]
        category: String,
    },
    /// List featured content
    Featured,
    /// Search titles and descriptions
    Search {
        query: String,
        #[arg(short = 'C', long, default_value = "all")]
        category: String,
    },
    /// Open an item (videos open in the browser)
    Open {
        id: String,
    },
    /// Keep reloading in the background and print the status after each change
    Watch {
        /// Override the refresh interval
        #[arg(long)]
        interval_secs: Option<u64>,
    },
}
