//! LineKV - An In-Memory Key-Value Engine
//!
//! This is the main entry point for LineKV. It parses the command line,
//! sets up logging and the storage engine, then either runs an interactive
//! session on the terminal or serves the line protocol over TCP.

use clap::Parser;
use linekv::commands::CommandHandler;
use linekv::config::{Cli, Mode};
use linekv::connection::{handle_connection, run_interactive, SessionEnd, SessionStats};
use linekv::storage::StorageEngine;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::signal;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let mode = cli.mode();

    init_logging(cli.log_filter(), &mode);

    // Create the storage engine (shared across all sessions)
    let storage = Arc::new(StorageEngine::with_shards(cli.shards));
    info!(
        shards = storage.shard_count(),
        "Storage engine initialized"
    );

    let stats = Arc::new(SessionStats::new());

    match mode {
        Mode::Repl => {
            let handler = CommandHandler::new(Arc::clone(&storage));
            let end = run_interactive(handler, stats).await?;
            log_storage_stats(&storage);

            // The blocking stdin read cannot be cancelled; leave without
            // waiting for it.
            if end == SessionEnd::Interrupted {
                std::process::exit(0);
            }
        }
        Mode::Serve { .. } => {
            let addr = mode
                .bind_address()
                .ok_or_else(|| anyhow::anyhow!("serve mode has no bind address"))?;
            let listener = TcpListener::bind(&addr).await?;
            info!("Listening on {}", addr);

            // Set up graceful shutdown
            let shutdown = async {
                if let Err(e) = signal::ctrl_c().await {
                    error!("Failed to listen for Ctrl+C: {}", e);
                }
                info!("Shutdown signal received, stopping server...");
            };

            tokio::select! {
                _ = accept_loop(listener, Arc::clone(&storage), stats) => {}
                _ = shutdown => {}
            }

            log_storage_stats(&storage);
            info!("Server shutdown complete");
        }
    }

    Ok(())
}

/// Installs the tracing subscriber.
///
/// `RUST_LOG` wins over `--log-level`. In interactive mode logs go to
/// stderr so stdout carries only the session.
fn init_logging(level: &str, mode: &Mode) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false);

    match mode {
        Mode::Repl => builder.with_writer(std::io::stderr).init(),
        Mode::Serve { .. } => builder.init(),
    }
}

fn log_storage_stats(storage: &StorageEngine) {
    let stats = storage.stats();
    info!(
        keys = stats.keys,
        get_ops = stats.get_ops,
        set_ops = stats.set_ops,
        del_ops = stats.del_ops,
        exists_ops = stats.exists_ops,
        "Storage statistics"
    );
}

/// Main loop that accepts incoming connections
async fn accept_loop(
    listener: TcpListener,
    storage: Arc<StorageEngine>,
    stats: Arc<SessionStats>,
) {
    loop {
        match listener.accept().await {
            Ok((stream, addr)) => {
                // Create a command handler for this connection
                let handler = CommandHandler::new(Arc::clone(&storage));
                let stats = Arc::clone(&stats);

                // Spawn a task to handle this connection
                tokio::spawn(async move {
                    handle_connection(stream, addr, handler, stats).await;
                });
            }
            Err(e) => {
                error!("Failed to accept connection: {}", e);
            }
        }
    }
}
