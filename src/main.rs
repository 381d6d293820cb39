use anyhow::Result;
use colored::Colorize;

use channel_insights::cli::Command;
use channel_insights::{
    handle_completions, handle_ingest, handle_serve, handle_setup, handle_snapshot, interpret,
};

fn main() {
    dotenv::dotenv().ok();
    setup_logging();
    parse_and_execute().unwrap_or_else(|e| {
        eprintln!("{} {e:#}", "Error:".red().bold());
        std::process::exit(1);
    });
}

fn setup_logging() {
    sensible_env_logger::init!();
}

fn parse_and_execute() -> Result<()> {
    let command = interpret();
    execute_command(&command)
}

fn execute_command(command: &Command) -> Result<()> {
    match command {
        Command::Serve { port } => handle_serve(*port),
        Command::Ingest { channel_name } => handle_ingest(channel_name),
        Command::Snapshot => handle_snapshot(),
        Command::Setup => handle_setup(),
        Command::Completions { shell } => handle_completions(*shell),
    }
}
