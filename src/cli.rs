use clap::{Parser, Subcommand};
use clap_complete::Shell;

#[derive(Parser, Debug)]
#[command(author, version, about = "YouTube channel ingestion and statistics service")]
pub struct Cli {
    /// Command (defaults to `serve`)
    #[clap(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
#[clap(rename_all = "lower_case")]
pub enum Command {
    /// Start the HTTP API server
    Serve {
        /// Port number (optional, defaults to 5000)
        #[arg(short, long, default_value_t = 5000)]
        port: u16,
    },
    /// Fetch a channel and its latest videos and store them with fresh metrics
    Ingest {
        /// Channel username, or `@handle`
        channel_name: String,
    },
    /// Record current statistics for every stored video
    Snapshot,
    /// Create the database schema if it does not exist yet
    Setup,
    /// Print shell completions to stdout
    Completions {
        #[arg(value_enum)]
        shell: Shell,
    },
}

impl Default for Command {
    fn default() -> Self {
        Command::Serve { port: 5000 }
    }
}
