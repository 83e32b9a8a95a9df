mod config;
mod connection;
mod error;
mod registry;
mod status;
mod transport;
mod world;

use std::sync::Arc;

use config::ServerConfig;
use connection::{handle_connection, ServerContext};
use registry::{Registry, MAX_PLAYERS};
use tokio::net::TcpListener;
use tracing::{debug, error, info, warn};
use world::SpawnWorld;

const DEFAULT_CONFIG_PATH: &str = "tinycraft.toml";

#[tokio::main]
async fn main() {
    let config_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| DEFAULT_CONFIG_PATH.to_string());
    let config = match ServerConfig::load_or_default(&config_path) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load {config_path}: {e}");
            std::process::exit(1);
        }
    };

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.logging.level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .init();

    info!(
        "tinycraft v{} starting on {}:{}",
        env!("CARGO_PKG_VERSION"),
        config.server.address,
        config.server.port
    );
    info!("MOTD: {}", config.server.motd);
    info!("Max players: {MAX_PLAYERS}");

    let addr = match config.bind_addr() {
        Ok(addr) => addr,
        Err(e) => {
            error!("{e}");
            std::process::exit(1);
        }
    };

    let favicon = match status::load_favicon(&config.server) {
        Ok(uri) => Some(uri),
        Err(e) => {
            warn!("Favicon unavailable, status will omit it: {e}");
            None
        }
    };

    let world = match SpawnWorld::build() {
        Ok(world) => world,
        Err(e) => {
            error!("Failed to build spawn world: {e}");
            std::process::exit(1);
        }
    };

    let listener = match TcpListener::bind(addr).await {
        Ok(listener) => listener,
        Err(e) => {
            error!("Failed to bind {addr}: {e}");
            std::process::exit(1);
        }
    };
    info!("Listening on {addr}");

    let (shutdown_tx, mut shutdown_rx) = tokio::sync::watch::channel(false);

    // Handle Ctrl+C
    tokio::spawn(async move {
        tokio::signal::ctrl_c().await.ok();
        info!("Shutdown signal received");
        let _ = shutdown_tx.send(true);
    });

    let keep_alive = config.network.keep_alive_interval();
    let (registry, registry_task) = Registry::new(keep_alive).spawn(shutdown_rx.clone());

    let ctx = Arc::new(ServerContext {
        config,
        registry: registry.clone(),
        world,
        favicon,
    });

    loop {
        tokio::select! {
            accepted = listener.accept() => {
                let (stream, peer) = match accepted {
                    Ok(pair) => pair,
                    Err(e) => {
                        warn!("Accept failed: {e}");
                        continue;
                    }
                };
                if let Err(e) = stream.set_nodelay(true) {
                    debug!(%peer, "set_nodelay failed: {e}");
                }

                let id = match registry.reserve().await {
                    Ok(Some(id)) => id,
                    Ok(None) => {
                        info!("Server full, refusing {peer}");
                        continue;
                    }
                    Err(e) => {
                        error!("{e}");
                        break;
                    }
                };
                debug!(slot = id, %peer, "connection accepted");
                tokio::spawn(handle_connection(stream, id, ctx.clone()));
            }
            changed = shutdown_rx.changed() => {
                if changed.is_err() || *shutdown_rx.borrow() {
                    break;
                }
            }
        }
    }

    let _ = registry_task.await;
    info!("Server stopped");
}
