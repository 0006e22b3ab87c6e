//! HTTP API for irrigation model serving
//!
//! Provides the REST surface over a loaded `.apr` model using axum.
//!
//! ## Endpoints
//!
//! - `GET /health` - Liveness check (always succeeds, ignores model state)
//! - `POST /api/predict` - Run inference on a batch of feature vectors
//!
//! ## Example
//!
//! ```rust,ignore
//! use regar::api::{create_router, AppState};
//!
//! let state = AppState::with_model(model);
//! let app = create_router(state);
//! axum::serve(listener, app).await?;
//! ```

use std::collections::HashMap;
use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::State,
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};

use crate::apr::AprModel;
use crate::features;

/// Application state shared across handlers.
///
/// Holds the one read-only resource of the system: the model loaded at
/// startup, or `None` when loading failed. The absence is explicit here
/// rather than an ambient null checked inside handlers, so tests can
/// construct either state directly.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Model for inference; `None` when the startup load failed
    model: Option<Arc<AprModel>>,
}

impl AppState {
    /// Create application state holding a loaded model
    pub fn with_model(model: AprModel) -> Self {
        Self {
            model: Some(Arc::new(model)),
        }
    }

    /// Create application state for a failed model load.
    ///
    /// `/health` keeps answering; every predict call returns a
    /// "Model not available" error response.
    pub fn without_model() -> Self {
        Self { model: None }
    }

    /// Whether a model is loaded
    pub fn has_model(&self) -> bool {
        self.model.is_some()
    }
}

/// Response body for `GET /health`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Fixed liveness marker, always `"ok"`
    pub status: String,
}

/// Request body for `POST /api/predict`.
///
/// The two accepted payload shapes, parsed as a tagged union rather than
/// probed dynamically. A body matching neither shape is the invalid
/// payload case.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum PredictRequest {
    /// Pre-ordered feature vectors, used verbatim as the batch
    Instances {
        /// One vector per instance, already in model feature order
        instances: Vec<Vec<f64>>,
    },
    /// Named feature mapping, translated through the fixed feature order
    Features {
        /// Feature name to value; missing names default to `0.0`
        features: HashMap<String, f64>,
    },
}

/// Response body for a successful prediction
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PredictResponse {
    /// Fixed success marker, always `"success"`
    pub status: String,
    /// One prediction per input vector, in input order
    pub prediction: Vec<f64>,
}

/// Error response body
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Error description
    pub error: String,
}

/// Create the application router with all routes configured
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .route("/api/predict", post(predict_handler))
        .with_state(state)
}

/// Health check handler.
///
/// Unconditional: reports liveness, not model readiness.
async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
    })
}

/// Prediction handler.
///
/// Reads the body as raw bytes so that an unparseable body and a body
/// missing both recognized keys collapse into the same invalid-payload
/// response, instead of the framework's own rejection shape.
async fn predict_handler(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<PredictResponse>, (StatusCode, Json<ErrorResponse>)> {
    let model = state.model.as_ref().ok_or_else(|| {
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorResponse {
                error: "Model not available".to_string(),
            }),
        )
    })?;

    let request: PredictRequest = serde_json::from_slice(&body).map_err(|_| {
        (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse {
                error: "Invalid payload format".to_string(),
            }),
        )
    })?;

    let instances = match request {
        PredictRequest::Instances { instances } => instances,
        PredictRequest::Features { features } => vec![features::vector_from_named(&features)],
    };

    match model.predict(&instances) {
        Ok(prediction) => Ok(Json(PredictResponse {
            status: "success".to_string(),
            prediction,
        })),
        Err(err) => {
            tracing::error!(error = %err, batch_size = instances.len(), "prediction failed");
            Err((
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: err.to_string(),
                }),
            ))
        },
    }
}
