//! spec-client CLI entry point.

use clap::Parser;

use spec_client::cli::{commands, handle_error, Cli, Commands};
use spec_client::infrastructure::{ConfigLoader, LoggerImpl};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let config = match ConfigLoader::load() {
        Ok(config) => config,
        Err(err) => handle_error(err, cli.json),
    };

    let _logger = match LoggerImpl::init(&config.logging) {
        Ok(logger) => logger,
        Err(err) => handle_error(err, cli.json),
    };

    let result = match cli.command {
        Commands::SpecUrl => commands::spec_url::execute(&config, cli.json),
        Commands::Operations(args) => commands::operations::execute(args, cli.json).await,
        Commands::Call(args) => commands::call::execute(args, cli.json).await,
    };

    if let Err(err) = result {
        handle_error(err, cli.json);
    }
}
