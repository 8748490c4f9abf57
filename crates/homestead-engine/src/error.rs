//! Error types for the engine binary.
//!
//! [`EngineError`] wraps every failure that can surface while starting,
//! running or saving the farm.

use std::path::PathBuf;

/// Top-level error for the engine binary.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    /// Configuration loading failed.
    #[error("config error: {source}")]
    Config {
        /// The underlying config error.
        #[from]
        source: homestead_core::ConfigError,
    },

    /// The advisor could not be configured.
    #[error("advisor error: {source}")]
    Advisor {
        /// The underlying advisor error.
        #[from]
        source: homestead_advisor::AdvisorError,
    },

    /// The scheduler stopped with an error.
    #[error("runner error: {source}")]
    Runner {
        /// The underlying runner error.
        #[from]
        source: homestead_core::RunnerError,
    },

    /// The farm could not be serialized.
    #[error("snapshot error: {source}")]
    Snapshot {
        /// The underlying snapshot error.
        #[from]
        source: homestead_core::SnapshotError,
    },

    /// Reading or writing the snapshot file failed.
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        /// The file involved.
        path: PathBuf,
        /// The underlying I/O error.
        source: std::io::Error,
    },
}
