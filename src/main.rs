use clap::Parser;

use notify_gateway::cli::executor::Outcome;
use notify_gateway::cli::{self, Cli};
use notify_gateway::server::Server;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let settings = cli::load_and_merge_config(&cli)?;
    cli::init_logger_from_settings(&settings)?;

    match cli::execute_command(&cli, &settings).await? {
        Outcome::Serve => Server::new(settings).run().await,
        Outcome::Exit => Ok(()),
    }
}
