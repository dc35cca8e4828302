//! Logdock log ingestion API server binary.

use std::net::SocketAddr;
use std::path::PathBuf;

use clap::Parser;
use logdock_api::{ApiConfig, ApiServer};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

/// HTTP log ingestion and query service.
#[derive(Debug, Parser)]
#[command(name = "logdock", version, about)]
struct Args {
    /// Address to bind the HTTP server to.
    #[arg(long, env = "LOGDOCK_BIND", default_value = "0.0.0.0:3001")]
    bind: SocketAddr,

    /// Path of the JSON document holding the log collection.
    #[arg(long, env = "LOGDOCK_DATA_FILE", default_value = "logs.json")]
    data_file: PathBuf,

    /// Deployment environment name; error detail is exposed only in development.
    #[arg(long, env = "LOGDOCK_ENV", default_value = "development")]
    environment: String,

    /// Allowed CORS origins, comma separated (default allows all).
    #[arg(long, env = "LOGDOCK_CORS_ORIGINS", value_delimiter = ',')]
    cors_origins: Vec<String>,
}

#[tokio::main]
async fn main() {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();

    let mut config = ApiConfig::new(args.bind)
        .with_data_path(args.data_file)
        .with_environment(args.environment);
    for origin in args.cors_origins {
        config = config.with_cors_origin(origin);
    }

    info!("Starting Logdock API on {}", args.bind);
    info!("  Health check:  http://{}/api/v1/health", args.bind);
    info!("  Logs endpoint: http://{}/api/v1/logs", args.bind);
    info!("  Environment:   {}", config.environment);

    let server = match ApiServer::new(config) {
        Ok(server) => server,
        Err(e) => {
            error!("Failed to start server: {e}");
            std::process::exit(1);
        }
    };

    if let Err(e) = server.serve_with_shutdown(args.bind, shutdown_signal()).await {
        error!("Server error: {e}");
        std::process::exit(1);
    }
}

/// Resolves when SIGINT or SIGTERM is received.
async fn shutdown_signal() {
    let ctrl_c = async {
        let _ = tokio::signal::ctrl_c().await;
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(_) => std::future::pending::<()>().await,
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => info!("SIGINT received, shutting down gracefully"),
        () = terminate => info!("SIGTERM received, shutting down gracefully"),
    }
}
