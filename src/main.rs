use clap::Parser;
use jutzo::client::cli_client::{self, Args};
use jutzo::client::config::ClientConfig;
use std::process::ExitCode;

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let config = ClientConfig::from_env();
    std::env::set_var("RUST_LOG", &config.log_level);
    env_logger::init();

    let args = Args::parse();
    if cli_client::run(args, config).await? {
        Ok(ExitCode::SUCCESS)
    } else {
        Ok(ExitCode::FAILURE)
    }
}
