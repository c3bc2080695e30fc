//! Rook File Server - Entry Point
//!
//! An HTTP file server exposing a single directory tree behind one
//! shared credential pair.

use log::{error, info};

use rook_file_server::Server;
use rook_file_server::config::ServerConfig;

#[tokio::main]
async fn main() {
    // Initialize the logger (env_logger picks up RUST_LOG environment variable)
    env_logger::init();

    info!("Launching file server...");

    let config = match ServerConfig::load() {
        Ok(config) => config,
        Err(e) => {
            error!("Invalid configuration: {}", e);
            panic!("Server startup failed: {}", e);
        }
    };

    let server = Server::new(config).await;
    server.start().await;
}
