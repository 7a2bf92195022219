use clap::Parser;
use tracing_subscriber::EnvFilter;

mod cli;
mod commands;
mod output;

use cli::{Cli, Commands};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Initialize tracing; stdout carries command output
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("keyarray=info".parse()?))
        .with_writer(std::io::stderr)
        .init();

    match &cli.command {
        Commands::Sort(args) => commands::sort::run(args, cli.format),
        Commands::Pack(args) => commands::state::pack(args),
        Commands::Unpack(args) => commands::state::unpack(args, cli.format),
        Commands::Iterate(args) => commands::iterate::run(args, cli.format),
    }
}
