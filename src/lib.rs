//! # Regar
//!
//! Regar (Spanish: "to water, to irrigate") is a minimal HTTP front-end
//! for pre-trained irrigation models. It loads a serialized `.apr` model
//! artifact at startup and serves predictions over two endpoints:
//!
//! - `GET /health` - Liveness check
//! - `POST /api/predict` - Run inference on feature vectors
//!
//! The prediction endpoint accepts either raw feature vectors
//! (`{"instances": [[...]]}`) or a named-feature mapping
//! (`{"features": {...}}`) converted to a fixed-order vector.
//!
//! ## Example
//!
//! ```rust,ignore
//! use regar::api::{create_router, AppState};
//! use regar::apr::AprModel;
//!
//! let model = AprModel::load("model/sprinkler_model.apr")?;
//! let app = create_router(AppState::with_model(model));
//! axum::serve(listener, app).await?;
//! ```
//!
//! ## Design
//!
//! The loaded model is a single shared, read-only resource: initialized
//! once before the server accepts connections, never mutated afterward.
//! Inference takes `&self`, so concurrent in-flight requests need no
//! locking. A model that fails to load is an explicit application state
//! (`AppState::without_model`), not an ambient null - every predict call
//! then fails with a "Model not available" response while `/health`
//! keeps answering.

#![deny(missing_docs)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::float_cmp)] // Exact comparisons against untouched inputs in tests

pub mod api;
pub mod apr;
pub mod config;
pub mod error;
pub mod features;

/// Crate version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
