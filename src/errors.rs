//! Error types produced while loading configurations or sizing a spar.

use std::path::PathBuf;

use thiserror::Error;

/// Error returned when a configuration cannot be read or is not physically meaningful.
///
/// Every variant is fatal: sizing never starts from a configuration that failed to load.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Returned when the configuration file cannot be read.
    #[error("failed to read configuration {path:?}: {source}")]
    Io {
        /// Path that was being read.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: std::io::Error,
    },
    /// Returned when a YAML document is malformed or misses a required key.
    #[error("invalid YAML configuration: {0}")]
    Yaml(#[from] serde_yaml::Error),
    /// Returned when a JSON document is malformed or misses a required key.
    #[error("invalid JSON configuration: {0}")]
    Json(#[from] serde_json::Error),
    /// Returned when the file extension does not name a supported format.
    #[error("unsupported configuration format for {0:?} (expected .yaml, .yml or .json)")]
    UnsupportedFormat(PathBuf),
    /// Returned when a value that must be strictly positive is not.
    #[error("`{key}` must be positive (received {value})")]
    NonPositive {
        /// Configuration key holding the rejected value.
        key: &'static str,
        /// Rejected value.
        value: f64,
    },
    /// Returned when a value is NaN or infinite.
    #[error("`{key}` must be finite (received {value})")]
    NonFinite {
        /// Configuration key holding the rejected value.
        key: &'static str,
        /// Rejected value.
        value: f64,
    },
    /// Returned when a spanwise location does not fall on the half-span.
    #[error("`{key}` = {value} m lies outside the half-span [0, {half_span}) m")]
    OutsideHalfSpan {
        /// Configuration key holding the rejected location.
        key: &'static str,
        /// Rejected location in metres.
        value: f64,
        /// Half-span in metres.
        half_span: f64,
    },
    /// Returned when the discretization step is longer than the half-span.
    #[error("step {delta} m leaves no stations on a {half_span} m half-span")]
    EmptyGrid {
        /// Configured step in metres.
        delta: f64,
        /// Half-span in metres.
        half_span: f64,
    },
    /// Returned when only one coefficient of the linear load fit is supplied.
    #[error("linear load fit needs both `m` and `b`")]
    IncompleteLinearFit,
    /// Returned when the radius region breaks are not strictly increasing.
    #[error("`radius_breaks` must be strictly increasing")]
    UnorderedRadiusBreaks,
}

/// Error returned when a sizing run cannot produce a complete set of profiles.
#[derive(Debug, Error)]
pub enum SizingError {
    /// Returned when the configuration is rejected before any computation.
    #[error(transparent)]
    Config(#[from] ConfigError),
    /// Returned when an arithmetic step produced NaN or infinity.
    ///
    /// A partially valid profile is never handed to a caller.
    #[error("{profile} is not finite at station {index} (y = {position} m)")]
    NonFinite {
        /// Name of the offending profile.
        profile: &'static str,
        /// Station index on the sizing grid.
        index: usize,
        /// Spanwise position of the station in metres.
        position: f64,
    },
}
