//! `.apr` model artifact support
//!
//! Loading and inference for pre-trained irrigation models serialized in
//! the `.apr` container format (Magic: `APRN`).
//!
//! ## Format Structure (32-byte header + JSON payload)
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────────┐
//! │ Header (32 bytes)                                                │
//! │   - Magic: "APRN" (4 bytes)                                      │
//! │   - Version: major.minor (2 bytes)                               │
//! │   - Flags (1 byte) + reserved (1 byte)                           │
//! │   - Model type (u16 LE)                                          │
//! │   - Reserved (2 bytes)                                           │
//! │   - Metadata length (u32 LE, currently 0)                        │
//! │   - Payload length (u32 LE)                                      │
//! │   - Reserved (12 bytes)                                          │
//! ├──────────────────────────────────────────────────────────────────┤
//! │ JSON payload: {"weights":[...],"intercept":..,"n_features":..}   │
//! └──────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Example
//!
//! ```rust,ignore
//! use regar::apr::AprModel;
//!
//! let model = AprModel::load("model/sprinkler_model.apr")?;
//! let predictions = model.predict(&[vec![0.0; 10]])?;
//! ```

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{RegarError, Result};

/// Magic bytes identifying an `.apr` artifact
pub const MAGIC: &[u8; 4] = b"APRN";

/// Fixed header size in bytes
pub const HEADER_SIZE: usize = 32;

/// Highest format major version this build reads
pub const SUPPORTED_VERSION_MAJOR: u8 = 1;

/// Model type code for linear regression
pub const MODEL_TYPE_LINEAR_REGRESSION: u16 = 0x0001;

/// Model type code for logistic regression
pub const MODEL_TYPE_LOGISTIC_REGRESSION: u16 = 0x0002;

/// Kind of predictor stored in an artifact
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModelType {
    /// Continuous output: `y = w·x + b`
    LinearRegression,
    /// Binary class label: `y = round(sigmoid(w·x + b))`
    LogisticRegression,
}

impl ModelType {
    /// Decode a header model-type code
    pub fn from_code(code: u16) -> Option<Self> {
        match code {
            MODEL_TYPE_LINEAR_REGRESSION => Some(Self::LinearRegression),
            MODEL_TYPE_LOGISTIC_REGRESSION => Some(Self::LogisticRegression),
            _ => None,
        }
    }

    /// Human-readable type name
    pub fn name(self) -> &'static str {
        match self {
            Self::LinearRegression => "LinearRegression",
            Self::LogisticRegression => "LogisticRegression",
        }
    }
}

/// JSON payload stored after the header
#[derive(Debug, Clone, Serialize, Deserialize)]
struct ModelPayload {
    /// One weight per input feature
    weights: Vec<f64>,
    /// Additive intercept term
    intercept: f64,
    /// Declared input dimension; must match `weights.len()`
    n_features: usize,
}

/// A loaded, immutable predictor.
///
/// Constructed once at startup and shared read-only across requests;
/// `predict` takes `&self` and performs no internal mutation, so
/// concurrent calls need no synchronization.
#[derive(Debug, Clone)]
pub struct AprModel {
    model_type: ModelType,
    weights: Vec<f64>,
    intercept: f64,
}

impl AprModel {
    /// Load a model artifact from a file path.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path_ref = path.as_ref();
        let bytes = fs::read(path_ref).map_err(|e| RegarError::IoError {
            message: format!("failed to read '{}': {e}", path_ref.display()),
        })?;
        Self::from_bytes(&bytes)
    }

    /// Parse a model artifact from an in-memory buffer.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        if bytes.len() < HEADER_SIZE {
            return Err(RegarError::FormatError {
                reason: format!(
                    "artifact too short: {} bytes, header needs {HEADER_SIZE}",
                    bytes.len()
                ),
            });
        }
        if &bytes[0..4] != MAGIC {
            return Err(RegarError::FormatError {
                reason: format!("invalid magic bytes: {:?}", &bytes[0..4]),
            });
        }

        let major = bytes[4];
        let minor = bytes[5];
        if major != SUPPORTED_VERSION_MAJOR {
            return Err(RegarError::UnsupportedVersion { major, minor });
        }

        let type_code = u16::from_le_bytes([bytes[8], bytes[9]]);
        let model_type =
            ModelType::from_code(type_code).ok_or(RegarError::UnsupportedType(type_code))?;

        let payload_len = u32::from_le_bytes([bytes[16], bytes[17], bytes[18], bytes[19]]) as usize;
        let payload_end = HEADER_SIZE + payload_len;
        if bytes.len() < payload_end {
            return Err(RegarError::FormatError {
                reason: format!(
                    "payload truncated: header declares {payload_len} bytes, {} available",
                    bytes.len() - HEADER_SIZE
                ),
            });
        }

        let payload: ModelPayload = serde_json::from_slice(&bytes[HEADER_SIZE..payload_end])
            .map_err(|e| RegarError::FormatError {
                reason: format!("invalid payload JSON: {e}"),
            })?;

        if payload.weights.len() != payload.n_features {
            return Err(RegarError::FormatError {
                reason: format!(
                    "weight count {} does not match declared n_features {}",
                    payload.weights.len(),
                    payload.n_features
                ),
            });
        }
        if payload.weights.is_empty() {
            return Err(RegarError::FormatError {
                reason: "model has no weights".to_string(),
            });
        }

        Ok(Self {
            model_type,
            weights: payload.weights,
            intercept: payload.intercept,
        })
    }

    /// Kind of predictor held by this model
    pub fn model_type(&self) -> ModelType {
        self.model_type
    }

    /// Input dimension the model was trained with
    pub fn n_features(&self) -> usize {
        self.weights.len()
    }

    /// Run inference over a batch of feature vectors.
    ///
    /// Returns one prediction per input vector, in input order. Rejects
    /// any vector whose length differs from the model's feature count.
    pub fn predict(&self, instances: &[Vec<f64>]) -> Result<Vec<f64>> {
        instances.iter().map(|x| self.predict_one(x)).collect()
    }

    fn predict_one(&self, x: &[f64]) -> Result<f64> {
        if x.len() != self.weights.len() {
            return Err(RegarError::DimensionMismatch {
                expected: self.weights.len(),
                actual: x.len(),
            });
        }

        let score: f64 = self
            .weights
            .iter()
            .zip(x.iter())
            .map(|(w, v)| w * v)
            .sum::<f64>()
            + self.intercept;

        Ok(match self.model_type {
            ModelType::LinearRegression => score,
            ModelType::LogisticRegression => {
                let p = 1.0 / (1.0 + (-score).exp());
                if p >= 0.5 {
                    1.0
                } else {
                    0.0
                }
            },
        })
    }
}
