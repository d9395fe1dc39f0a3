mod cmd;
mod logging;

use clap::{Args, Parser, Subcommand};
use periodic_notes_core::Granularity;
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "pnotes", version, about = "Inspect periodic note formats, dateUIDs and folders")]
struct Cli {
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[arg(long, global = true)]
    profile: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Validate configuration and print the resolved note settings
    Doctor,

    /// Read the date a note filename stands for
    Parse(ParseArgs),

    /// Print the dateUID of the period containing a timestamp
    Uid(UidArgs),

    /// Print the note path for a date
    Path(PathArgs),

    /// List existing notes of one granularity
    List(ListArgs),
}

#[derive(Debug, Args)]
pub struct ParseArgs {
    /// Note filename or path (extension and folders are ignored)
    pub name: String,

    #[arg(short, long, default_value = "day")]
    pub granularity: Granularity,
}

#[derive(Debug, Args)]
pub struct UidArgs {
    /// RFC 3339 timestamp, local date/time, or "now"
    pub timestamp: String,

    #[arg(short, long, default_value = "day")]
    pub granularity: Granularity,
}

#[derive(Debug, Args)]
pub struct PathArgs {
    /// Date to build the path for (defaults to now)
    pub date: Option<String>,

    #[arg(short, long, default_value = "day")]
    pub granularity: Granularity,

    /// Prefix the path with the vault root
    #[arg(long)]
    pub absolute: bool,
}

#[derive(Debug, Args)]
pub struct ListArgs {
    #[arg(short, long, default_value = "day")]
    pub granularity: Granularity,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

fn main() {
    let cli = Cli::parse();
    let config = cli.config.as_deref();
    let profile = cli.profile.as_deref();

    match cli.command {
        Commands::Doctor => cmd::doctor::run(config, profile),
        Commands::Parse(args) => cmd::parse::run(config, profile, &args),
        Commands::Uid(args) => cmd::uid::run(config, profile, &args),
        Commands::Path(args) => cmd::path::run(config, profile, &args),
        Commands::List(args) => cmd::list::run(config, profile, &args),
    }
}
