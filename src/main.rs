use clap::Parser;

use larder::cli::{load_and_merge_config, Cli, Commands};
use larder::logger::init_logger;
use larder::server::Server;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let settings = load_and_merge_config(&cli)?;

    init_logger(&settings.logger)?;

    match cli.command.unwrap_or(Commands::Serve) {
        Commands::Serve => Server::new(settings).run().await,
    }
}
