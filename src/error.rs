//! Error type of the crate.
use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while building paths or loading configuration.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    /// Response status code is not `default`, a three digit code or a range like `2XX`.
    /// Only raised in strict mode.
    #[error("invalid status code `{code}` for {method} {path}")]
    #[allow(missing_docs)]
    InvalidStatusCode {
        path: String,
        method: &'static str,
        code: String,
    },

    /// Path is empty or does not start with `/`. Only raised in strict mode.
    #[error("invalid path `{path}`, paths must start with `/`")]
    #[allow(missing_docs)]
    InvalidPath { path: String },

    /// JSON (de)serialization failed.
    #[error("serde: {0}")]
    Serde(#[from] serde_json::Error),

    /// YAML serialization failed.
    #[cfg(feature = "yaml")]
    #[error("yaml: {0}")]
    Yaml(#[from] serde_norway::Error),

    /// Reading or writing a config file failed.
    #[error("io: {}: {source}", .path.display())]
    Io {
        /// File being accessed.
        path: PathBuf,
        /// Underlying io error.
        #[source]
        source: std::io::Error,
    },
}
