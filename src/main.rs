use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use launchscore::app::{run, Action, RunOptions};

#[derive(Debug, Parser)]
#[command(name = "launchscore", version, about = "Fuzzy-rank launcher candidates")]
struct Cli {
    #[arg(long, global = true, help = "Enable verbose debug logs")]
    debug: bool,

    #[arg(long, global = true, help = "Config file (default: ~/.config/launchscore/config.toml)")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Rank catalog entries against a query
    Rank {
        #[arg(default_value = "")]
        query: String,
        #[arg(long, help = "Catalog JSON file to rank")]
        catalog: Option<PathBuf>,
        #[arg(long, help = "Maximum number of results to print")]
        limit: Option<usize>,
        #[arg(long, conflicts_with = "limit", help = "Print every match")]
        all: bool,
        #[arg(long, help = "Print results as JSON")]
        json: bool,
    },
    /// Score a single target against a query
    Score {
        target: String,
        query: String,
        #[arg(long = "alias", help = "Alias for the target (repeatable)")]
        aliases: Vec<String>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let (catalog, action) = match cli.command {
        Command::Rank {
            query,
            catalog,
            limit,
            all,
            json,
        } => (
            catalog,
            Action::Rank {
                query,
                limit,
                all,
                json,
            },
        ),
        Command::Score {
            target,
            query,
            aliases,
        } => (
            None,
            Action::Score {
                target,
                query,
                aliases,
            },
        ),
    };

    run(RunOptions {
        debug: cli.debug,
        config: cli.config,
        catalog,
        action,
    })
}
