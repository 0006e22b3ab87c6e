//! Environment-sourced serving configuration
//!
//! Two settings, both read once at startup: the model artifact path
//! (`MODEL_PATH`) and the listening port (`PORT`). CLI flags may override
//! either after the fact; nothing re-reads the environment while serving.

use std::env;

/// Default model artifact path when `MODEL_PATH` is unset
pub const DEFAULT_MODEL_PATH: &str = "model/sprinkler_model.apr";

/// Default listening port when `PORT` is unset
pub const DEFAULT_PORT: u16 = 8080;

/// Startup configuration for the serving process
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServeConfig {
    /// Path to the serialized model artifact
    pub model_path: String,
    /// Port the HTTP listener binds to
    pub port: u16,
}

impl ServeConfig {
    /// Read configuration from the process environment.
    ///
    /// A `PORT` value that does not parse as a port number falls back to
    /// the default with a warning, the same degraded path as an unset
    /// variable.
    pub fn from_env() -> Self {
        let model_path =
            env::var("MODEL_PATH").unwrap_or_else(|_| DEFAULT_MODEL_PATH.to_string());

        let port = match env::var("PORT") {
            Ok(raw) => raw.parse().unwrap_or_else(|_| {
                tracing::warn!(
                    value = %raw,
                    default = DEFAULT_PORT,
                    "PORT is not a valid port number, using default"
                );
                DEFAULT_PORT
            }),
            Err(_) => DEFAULT_PORT,
        };

        Self { model_path, port }
    }
}

impl Default for ServeConfig {
    fn default() -> Self {
        Self {
            model_path: DEFAULT_MODEL_PATH.to_string(),
            port: DEFAULT_PORT,
        }
    }
}
