use clap::builder::RangedU64ValueParser;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "dbpager", about = "Page through the tables of a SQLite database")]
pub struct Cli {
    /// Path to config file
    #[arg(short = 'c', long, global = true, env = "DBPAGER_CONFIG")]
    pub config: Option<PathBuf>,

    /// Emit diagnostics to stderr
    #[arg(short = 'v', long, global = true, env = "DBPAGER_VERBOSE")]
    pub verbose: bool,

    #[command(flatten)]
    pub session: SessionArgs,

    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Options shared by every subcommand that opens a database.
#[derive(Args, Debug, Clone, Default)]
pub struct SessionArgs {
    /// SQLite database file (default: ./csc.db)
    #[arg(short = 'd', long, global = true, env = "DBPAGER_DATABASE")]
    pub database: Option<PathBuf>,

    /// Config file profile name
    #[arg(short = 'P', long, global = true, env = "DBPAGER_PROFILE")]
    pub profile: Option<String>,

    /// Rows fetched per batch (default: 100)
    #[arg(short = 'b', long, global = true, env = "DBPAGER_BATCH_SIZE")]
    pub batch_size: Option<usize>,

    /// Table name casing: upper or verbatim (default: upper)
    #[arg(long, global = true, env = "DBPAGER_DISPLAY_CASE")]
    pub display_case: Option<String>,

    /// Skip the COUNT(*) query on table selection
    #[arg(long, global = true)]
    pub no_count: bool,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Browse tables interactively (default)
    Browse,

    /// List tables in catalog order
    Tables,

    /// Print the formatted rows of one table
    Dump(DumpArgs),
}

#[derive(Args, Debug, Clone)]
pub struct DumpArgs {
    /// Table name, exactly as stored
    pub table: String,

    /// Number of batches to load (at least 1)
    #[arg(
        short = 'n',
        long,
        default_value_t = 1,
        value_parser = RangedU64ValueParser::<usize>::new().range(1..),
        conflicts_with = "all"
    )]
    pub batches: usize,

    /// Load batches until the table is exhausted
    #[arg(long)]
    pub all: bool,

    /// Write the grid to a file (.toon, .txt or .csv) instead of stdout
    #[arg(short = 'o', long)]
    pub output: Option<PathBuf>,
}
