//! Sermonprep RPC Server - JSON-RPC backend for desktop and web front ends.
//!
//! This binary provides a JSON-RPC 2.0 server that wraps the sermonprep-core
//! library. The front end launches it, reads the bound port from stdout and
//! talks to it over HTTP.

mod handlers;
mod server;
mod wrapper;

use anyhow::{Context, Result};
use clap::Parser;
use sermonprep_core::SermonLibrary;
use std::path::PathBuf;
use std::time::Duration;
use tracing::{info, warn, Level};
use tracing_subscriber::FmtSubscriber;

/// How long open requests get to finish once shutdown starts.
const SHUTDOWN_GRACE: Duration = Duration::from_secs(5);

#[derive(Parser, Debug)]
#[command(name = "sermonprep-rpc")]
#[command(about = "JSON-RPC server for a Sermonprep library")]
struct Args {
    /// Port to listen on (0 = auto-assign)
    #[arg(short, long, default_value = "0")]
    port: u16,

    /// Host to bind to
    #[arg(long, default_value = "127.0.0.1")]
    host: String,

    /// Enable debug logging
    #[arg(short, long)]
    debug: bool,

    /// Library root directory (defaults to the platform data dir)
    #[arg(long)]
    root: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Set up logging
    let log_level = if args.debug { Level::DEBUG } else { Level::INFO };
    FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_target(false)
        .with_thread_ids(false)
        .with_writer(std::io::stderr)
        .compact()
        .init();

    info!("Starting Sermonprep RPC Server");

    let root = match args.root {
        Some(path) => path,
        None => dirs::data_dir()
            .map(|dir| dir.join("sermonprep"))
            .context("No platform data directory; pass --root")?,
    };

    info!("Library root: {}", root.display());

    let library = SermonLibrary::builder(&root)
        .auto_create_dirs(true)
        .build()
        .await?;

    let server = server::start_server(library, &args.host, args.port).await?;
    let state = server.state;

    // Port line is read by the launching front end.
    println!("RPC_PORT={}", server.addr.port());

    info!("RPC server running on {}", server.addr);

    tokio::select! {
        result = tokio::signal::ctrl_c() => {
            result?;
            info!("Shutdown signal received");
        }
        _ = state.shutdown_requested() => {
            info!("Shutdown requested over RPC");
        }
    }

    state.request_shutdown();
    match tokio::time::timeout(SHUTDOWN_GRACE, server.task).await {
        Ok(Ok(())) => {}
        Ok(Err(e)) => warn!("Server task failed: {}", e),
        Err(_) => warn!("Requests still open after {:?}, closing anyway", SHUTDOWN_GRACE),
    }

    state.library.shutdown().await?;
    info!("Exiting");

    Ok(())
}
