//! Error types for the simulation driver.

use esterify_core::SimError;
use thiserror::Error;

/// Errors that can stop a scenario run or an export.
#[derive(Debug, Error)]
pub enum RunError {
    /// The simulation rejected its configuration
    #[error("Simulation setup failed: {0}")]
    Setup(#[from] SimError),

    /// Writing the export file failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Export serialization failed
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
