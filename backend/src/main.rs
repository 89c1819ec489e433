use std::net::{IpAddr, SocketAddr, UdpSocket};

use anyhow::Context;
use day_tracker_server::config::{ServerConfig, StorageConfig};
use day_tracker_server::{create_router, initialize_backend, logging};
use tokio::net::TcpListener;
use tracing::{error, info};

#[tokio::main]
async fn main() {
    logging::init_logging();

    if let Err(e) = run().await {
        error!("Failed to start server: {:?}", e);
        std::process::exit(1);
    }
}

async fn run() -> anyhow::Result<()> {
    let config = ServerConfig::from_env()?;

    let app_state = initialize_backend(&config).await?;
    let app = create_router(app_state, &config.public_directory);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;

    log_banner(&config);

    axum::serve(listener, app).await?;

    Ok(())
}

fn log_banner(config: &ServerConfig) {
    info!("Day Tracker running on port {}", config.port);
    match &config.storage {
        StorageConfig::Database { .. } => info!("Using Turso cloud database"),
        StorageConfig::File { data_directory } => {
            info!("Local:   http://localhost:{}", config.port);
            if let Some(ip) = local_network_ip() {
                info!("Network: http://{}:{}", ip, config.port);
            }
            info!("Data stored locally in {}", data_directory.display());
        }
    }
}

/// Address of the interface used for outbound traffic, for LAN access.
/// Connecting a UDP socket sends nothing, it only picks a route.
fn local_network_ip() -> Option<IpAddr> {
    let socket = UdpSocket::bind("0.0.0.0:0").ok()?;
    socket.connect("192.0.2.1:80").ok()?;
    let ip = socket.local_addr().ok()?.ip();
    (!ip.is_loopback() && !ip.is_unspecified()).then_some(ip)
}
