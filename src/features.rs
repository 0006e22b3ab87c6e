//! Fixed feature ordering for named-feature requests
//!
//! The model consumes positional vectors; clients may instead send a
//! mapping of feature name to value. This module owns the one hardcoded
//! order that translation goes through. Missing names default to `0.0`
//! and unknown names are ignored - the mapping is a convenience layer,
//! not a validation layer.

use std::collections::HashMap;

/// Position-to-name mapping for named-feature requests.
///
/// The four leading entries are the one-hot season encoding produced at
/// training time; the rest are raw sensor readings.
pub const FEATURE_ORDER: [&str; 10] = [
    "season_Monsoon",
    "season_Post-Monsoon",
    "season_Pre-Monsoon",
    "season_Winter",
    "soil_moisture",
    "temperature",
    "humidity",
    "rain_probability",
    "time_of_day",
    "soil_ec",
];

/// Build a positional feature vector from a named mapping.
///
/// Each slot is looked up by name in `FEATURE_ORDER` order; absent names
/// contribute `0.0`. Always returns a vector of length
/// `FEATURE_ORDER.len()`.
pub fn vector_from_named(features: &HashMap<String, f64>) -> Vec<f64> {
    FEATURE_ORDER
        .iter()
        .map(|name| features.get(*name).copied().unwrap_or(0.0))
        .collect()
}
