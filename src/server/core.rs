use log::{error, info, warn};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::io::{AsyncWriteExt, BufReader};
use tokio::net::{TcpListener, TcpStream};

use crate::config::ServerConfig;
use crate::error::{FileServerError, ProtocolError};
use crate::error::handlers::{error_to_http_status, handle_error};
use crate::protocol::{Response, handle_route, read_request, route};

pub struct Server {
    listener: TcpListener,
    config: Arc<ServerConfig>,
}

impl Server {
    pub async fn new(config: ServerConfig) -> Self {
        let socket = config.control_socket();

        let listener = match TcpListener::bind(&socket).await {
            Ok(listener) => {
                info!("Server bound to {}", socket);
                listener
            }
            Err(e) => {
                error!("Failed to bind to {}: {}", socket, e);
                panic!("Server startup failed on socket {}: {}", socket, e);
            }
        };

        if let Err(e) = std::fs::create_dir_all(config.root_path()) {
            warn!("Failed to create server root directory: {}", e);
        } else {
            info!("Serving files from {}", config.root_dir);
        }

        Self {
            listener,
            config: Arc::new(config),
        }
    }

    /// The address the listener actually bound to (port 0 resolves here)
    pub fn local_addr(&self) -> std::io::Result<SocketAddr> {
        self.listener.local_addr()
    }

    pub async fn start(&self) {
        info!(
            "Starting Rook file server on {}",
            self.config.control_socket()
        );

        loop {
            match self.listener.accept().await {
                Ok((stream, addr)) => {
                    let config = Arc::clone(&self.config);

                    // Spawn a task for each request so the accept loop doesn't block
                    tokio::spawn(async move {
                        if let Err(e) = handle_connection(stream, addr, config).await {
                            warn!("Failed to handle request from {}: {}", addr, e);
                        }
                    });
                }
                Err(e) => {
                    error!("Error accepting connection: {}", e);
                }
            }
        }
    }
}

/// Handles one connection: reads a single request, dispatches it through
/// the route table, writes the response, and closes.
async fn handle_connection(
    stream: TcpStream,
    client_addr: SocketAddr,
    config: Arc<ServerConfig>,
) -> Result<(), std::io::Error> {
    let mut reader = BufReader::new(stream);

    let response = match read_request(&mut reader, config.max_upload_bytes() as usize).await {
        Ok(request) => {
            let matched = route(&request.method, &request.path);
            info!(
                "Received from {}: {} {} -> {:?}",
                client_addr, request.method, request.path, matched
            );
            handle_route(&matched, &request, &config)
        }
        Err(ProtocolError::ConnectionClosed) => {
            info!("Connection closed by client {}", client_addr);
            return Ok(());
        }
        Err(e) => {
            let err = FileServerError::from(e);
            handle_error(&err);
            Response::json(
                error_to_http_status(&err),
                serde_json::json!({"detail": err.to_string()}),
            )
        }
    };

    let status = response.status;
    let bytes = response.into_bytes();
    reader.get_mut().write_all(&bytes).await?;
    reader.get_mut().flush().await?;

    info!(
        "Responded to {} with {} ({} bytes)",
        client_addr,
        status,
        bytes.len()
    );

    Ok(())
}
