mod cdo;
mod cli;
mod config;
mod geo;
mod series;

use std::process::ExitCode;

use clap::Parser;
use cli::{command, init_tracing, Cli, Commands};

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    let config = cli.config();

    let outcome = match &cli.command {
        Commands::States {} => command::states(&config),
        Commands::Counties { state, codes } => command::counties(&config, state, *codes),
        Commands::Fetch(args) => command::fetch(&config, args).await,
    };

    match outcome {
        Ok(output) => {
            println!("{}", output);
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}
