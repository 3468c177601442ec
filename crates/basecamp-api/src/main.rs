//! # Basecamp API Server
//!
//! Binary entry point: resolve configuration, wire handles, serve.

use basecamp_api::{Bootstrap, build_router, telemetry};
use basecamp_config::EnvLoader;
use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "basecamp-api")]
#[command(about = "Basecamp API service")]
struct Args {
    /// Service directory (defaults to the working directory)
    #[arg(long)]
    service_dir: Option<PathBuf>,

    /// Print resolved configuration as JSON and exit
    #[arg(long)]
    print_config: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    // Configuration resolves before anything else initialises
    let loader = match args.service_dir {
        Some(dir) => EnvLoader::new(dir),
        None => EnvLoader::from_current_dir()?,
    };
    let boot = Bootstrap::resolve(&loader)?;

    if args.print_config {
        println!("{}", serde_json::to_string_pretty(&boot.describe())?);
        return Ok(());
    }

    telemetry::init(&boot.env, &boot.settings);

    tracing::info!(
        version = basecamp_api::VERSION,
        service_dir = %boot.layout.service_dir().display(),
        "Starting Basecamp API"
    );
    boot.log_resolution();

    let ctx = boot.build_context()?;
    tracing::info!(
        backend = %ctx.cache.backend(),
        default_ttl_ms = ctx.cache.default_ttl().as_millis(),
        "Cache client ready"
    );

    let app = build_router(ctx);

    let addr = boot.settings.server_addr;
    tracing::info!(%addr, "Starting HTTP server");

    let listener = tokio::net::TcpListener::bind(addr).await?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server shut down gracefully");
    Ok(())
}

/// Graceful shutdown signal handler
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            tracing::info!("Received Ctrl+C, shutting down");
        }
        () = terminate => {
            tracing::info!("Received SIGTERM, shutting down");
        }
    }
}
