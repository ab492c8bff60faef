use anyhow::Context;
use tokio::signal;
use tracing::{info, warn};

use game_server::{config::Config, create_routes};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    info!("Starting Dictionarydle server...");

    let config = Config::from_env()?;

    if !config.word_list_path.exists() {
        warn!(
            "Word list not found at {}; /words.txt will return 404",
            config.word_list_path.display()
        );
    }
    if !config.daily_artifact_path.exists() {
        warn!(
            "No daily artifact at {}; run generate-daily-word to create one",
            config.daily_artifact_path.display()
        );
    }
    info!("Serving static files from {}", config.public_dir.display());

    let routes = create_routes(&config);

    let addr = (
        config
            .host
            .parse::<std::net::IpAddr>()
            .with_context(|| format!("Invalid HOST '{}'", config.host))?,
        config.port,
    );

    let (addr, server) = warp::serve(routes).try_bind_with_graceful_shutdown(addr, async {
        // Wait for SIGINT (Ctrl+C) or SIGTERM
        #[cfg(unix)]
        {
            let signals = (
                signal::unix::signal(signal::unix::SignalKind::interrupt()),
                signal::unix::signal(signal::unix::SignalKind::terminate()),
            );
            match signals {
                (Ok(mut sigint), Ok(mut sigterm)) => {
                    tokio::select! {
                        _ = sigint.recv() => {
                            info!("Received SIGINT, shutting down gracefully...");
                        }
                        _ = sigterm.recv() => {
                            info!("Received SIGTERM, shutting down gracefully...");
                        }
                    }
                }
                _ => {
                    warn!("Could not install signal handlers, falling back to Ctrl+C");
                    let _ = signal::ctrl_c().await;
                }
            }
        }

        #[cfg(not(unix))]
        {
            let _ = signal::ctrl_c().await;
            info!("Received Ctrl+C, shutting down gracefully...");
        }
    })?;

    info!(
        "Server started successfully on {}. Press Ctrl+C to stop.",
        addr
    );
    server.await;
    info!("Server shutdown complete.");
    Ok(())
}
