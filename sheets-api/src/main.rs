use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use log::error;

mod api;
mod config;
mod logging;
mod server;
mod sheets;

use api::SheetsClient;
use config::Config;
use server::AppState;
use sheets::SheetGateway;

/// REST API over the rows of a Google Sheet
#[derive(Parser, Debug)]
#[command(name = "sheets-api", version, about)]
struct Cli {
    /// Address to bind
    #[arg(long, env = "HOST", default_value = "0.0.0.0")]
    host: IpAddr,

    /// Port to listen on
    #[arg(long, env = "PORT", default_value_t = 8000)]
    port: u16,

    /// Directory holding the frontend's index.html
    #[arg(long, env = "STATIC_DIR", default_value = "static")]
    static_dir: PathBuf,
}

#[tokio::main]
async fn main() -> Result<()> {
    // .env must be loaded before clap reads HOST/PORT from the environment
    dotenvy::dotenv().ok();
    let cli = Cli::parse();
    logging::init();

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Configuration Error: Missing or invalid environment variables. Details: {}", e);
            std::process::exit(1);
        }
    };

    let client = match SheetsClient::new(&config) {
        Ok(client) => client,
        Err(e) => {
            error!("{:#}", e);
            std::process::exit(1);
        }
    };

    let gateway = SheetGateway::new(Arc::new(client));
    let app = server::router(AppState::new(gateway), &cli.static_dir);

    server::serve(SocketAddr::new(cli.host, cli.port), app).await
}
