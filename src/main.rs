//! Adgen - ad generator backend.

use std::net::{IpAddr, SocketAddr};
use std::path::Path;
use std::process;

use adgen::cli::Cli;
use adgen::config::{self, Config};
use adgen::context::ServiceContext;
use adgen::error::StartupError;
use adgen::telemetry;
use clap::Parser;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();
    telemetry::init(cli.verbose);

    if let Err(e) = run(cli).await {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), StartupError> {
    // Load config
    let config_path = config::discover_config_path(cli.config.as_deref());
    let config = Config::load(&config_path).map_err(StartupError::Config)?;

    let host = match cli.host {
        Some(host) => host,
        None => config.server.host.parse::<IpAddr>().map_err(|e| {
            StartupError::Config(format!("Invalid server host '{}': {e}", config.server.host))
        })?,
    };
    let addr = SocketAddr::new(host, cli.port.unwrap_or(config.server.port));

    // Create context based on mode (live / recording / replaying)
    let replay_path = std::env::var("ADGEN_REPLAY").ok();
    let is_recording = std::env::var("ADGEN_REC").is_ok_and(|v| v == "true" || v == "1");

    let (ctx, recording_session) = if let Some(ref cassette_path) = replay_path {
        tracing::info!(cassette = %cassette_path, "replaying upstream calls");
        (ServiceContext::replaying(Path::new(cassette_path))?, None)
    } else if is_recording {
        tracing::info!("recording upstream calls");
        let (ctx, session) = ServiceContext::recording(&config);
        (ctx, Some(session))
    } else {
        (ServiceContext::live(&config), None)
    };

    let app = adgen::app(&config, ctx);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(
        addr = %listener.local_addr()?,
        config_path = %config_path.display(),
        "ad generator backend listening"
    );

    axum::serve(listener, app).with_graceful_shutdown(shutdown_signal()).await?;

    // Finish recording if active
    if let Some(session) = recording_session {
        match session.finish() {
            Ok(path) => tracing::info!(path = %path.display(), "cassette saved"),
            Err(e) => tracing::warn!(error = %e, "failed to save cassette"),
        }
    }

    tracing::info!("ad generator backend stopped");
    Ok(())
}

/// Wait for a shutdown signal (`SIGINT` or `SIGTERM`).
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {}
        () = terminate => {}
    }

    tracing::info!("shutdown signal received");
}
