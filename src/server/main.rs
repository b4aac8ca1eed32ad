// Entry point for the jutzo blog service
use clap::Parser;
use jutzo::server::config::ServerConfig;
use jutzo::server::connection::Server;
use jutzo::server::database::Database;
use jutzo::server::setup::{prepare_content_store, StoreSetup};
use log::{error, info};
use std::sync::Arc;

#[derive(Parser, Debug)]
#[command(name = "jutzo-server")]
#[command(about = "Serves the architecture academy blog API")]
struct Args {
    /// Create the content store and seed it when it is empty
    #[arg(long = "init-db")]
    init_db: bool,
    /// Together with --init-db, drop existing content first
    #[arg(long)]
    force: bool,
    #[arg(long)]
    host: Option<String>,
    #[arg(short, long)]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let mut config = ServerConfig::from_env();
    std::env::set_var("RUST_LOG", &config.log_level);
    env_logger::init();

    let args = Args::parse();
    if let Some(host) = args.host {
        config.host = host;
    }
    if let Some(port) = args.port {
        config.port = port;
    }

    let database = Arc::new(Database::connect(&config.database_url).await?);
    let setup = StoreSetup { init_db: args.init_db, force: args.force };
    if let Err(e) = prepare_content_store(&database, setup).await {
        error!("Exiting because the content store could not be prepared: {}", e);
        return Err(e);
    }

    info!("Starting jutzo server on {}", config.bind_address());
    let server = Server { db: database, config };
    server.run().await?;
    Ok(())
}
