//! Regar CLI - irrigation model serving
//!
//! # Commands
//!
//! - `serve` - Start the prediction server
//! - `info` - Show version info

use std::net::SocketAddr;

use clap::{Parser, Subcommand};
use regar::{
    api::{create_router, AppState},
    apr::AprModel,
    config::ServeConfig,
    error::{RegarError, Result},
};

/// Regar - HTTP serving front-end for irrigation prediction models
#[derive(Parser)]
#[command(name = "regar")]
#[command(version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the prediction server
    ///
    /// Examples:
    ///   regar serve
    ///   regar serve --model /srv/models/field7.apr --port 9090
    Serve {
        /// Host to bind to
        #[arg(short = 'H', long, default_value = "0.0.0.0")]
        host: String,

        /// Port to bind to (overrides PORT)
        #[arg(short, long)]
        port: Option<u16>,

        /// Path to model artifact (overrides MODEL_PATH)
        #[arg(short, long)]
        model: Option<String>,
    },
    /// Show version info
    Info,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Serve { host, port, model } => serve(&host, port, model).await?,
        Commands::Info => info(),
    }

    Ok(())
}

/// Resolve config, load the model, and run the server.
///
/// A model that fails to load is logged and serving continues without
/// one - predict calls then answer "Model not available" while `/health`
/// stays up. Only a failed bind is fatal.
async fn serve(host: &str, port: Option<u16>, model: Option<String>) -> Result<()> {
    let mut config = ServeConfig::from_env();
    if let Some(port) = port {
        config.port = port;
    }
    if let Some(model) = model {
        config.model_path = model;
    }

    let state = match AprModel::load(&config.model_path) {
        Ok(model) => {
            tracing::info!(
                path = %config.model_path,
                model_type = model.model_type().name(),
                n_features = model.n_features(),
                "model loaded"
            );
            AppState::with_model(model)
        },
        Err(err) => {
            tracing::error!(
                path = %config.model_path,
                error = %err,
                "failed to load model, serving without one"
            );
            AppState::without_model()
        },
    };

    let app = create_router(state);

    let addr: SocketAddr = format!("{host}:{}", config.port).parse().map_err(|e| {
        RegarError::InvalidConfiguration {
            reason: format!("invalid bind address: {e}"),
        }
    })?;

    println!("Server listening on http://{addr}");
    println!();
    println!("Endpoints:");
    println!("  GET  /health       - Health check");
    println!("  POST /api/predict  - Run prediction");
    println!();
    println!("Example:");
    println!("  curl http://{addr}/health");
    println!();

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|e| RegarError::ServerError {
            reason: format!("failed to bind {addr}: {e}"),
        })?;

    axum::serve(listener, app)
        .await
        .map_err(|e| RegarError::ServerError {
            reason: format!("server error: {e}"),
        })?;

    Ok(())
}

fn info() {
    println!("regar {}", regar::VERSION);
    println!("HTTP serving front-end for irrigation prediction models");
    println!();
    println!("Formats: .apr (LinearRegression, LogisticRegression)");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parsing_serve_defaults() {
        let cli = Cli::parse_from(["regar", "serve"]);
        match cli.command {
            Commands::Serve { host, port, model } => {
                assert_eq!(host, "0.0.0.0");
                assert!(port.is_none());
                assert!(model.is_none());
            },
            Commands::Info => panic!("Expected Serve command"),
        }
    }

    #[test]
    fn test_cli_parsing_serve_with_port() {
        let cli = Cli::parse_from(["regar", "serve", "--port", "9090"]);
        match cli.command {
            Commands::Serve { port, .. } => assert_eq!(port, Some(9090)),
            Commands::Info => panic!("Expected Serve command"),
        }
    }

    #[test]
    fn test_cli_parsing_serve_with_model() {
        let cli = Cli::parse_from(["regar", "serve", "--model", "field7.apr"]);
        match cli.command {
            Commands::Serve { model, .. } => {
                assert_eq!(model, Some("field7.apr".to_string()));
            },
            Commands::Info => panic!("Expected Serve command"),
        }
    }

    #[test]
    fn test_cli_parsing_serve_with_host() {
        let cli = Cli::parse_from(["regar", "serve", "--host", "127.0.0.1"]);
        match cli.command {
            Commands::Serve { host, .. } => assert_eq!(host, "127.0.0.1"),
            Commands::Info => panic!("Expected Serve command"),
        }
    }

    #[test]
    fn test_cli_parsing_info() {
        let cli = Cli::parse_from(["regar", "info"]);
        assert!(matches!(cli.command, Commands::Info));
    }

    #[test]
    fn test_version_constant_exists() {
        assert!(!regar::VERSION.is_empty());
        assert!(regar::VERSION.starts_with("0."));
    }
}
