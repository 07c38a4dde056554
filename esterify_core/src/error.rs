//! Error types for the esterification simulation.

use thiserror::Error;

/// Errors raised while setting up or reconfiguring a simulation.
///
/// The physics and reaction steps are total and never return these; only
/// configuration and registry lookups can fail.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SimError {
    /// A species id or name that is not in the registry.
    #[error("Unknown species: {0}")]
    UnknownSpecies(String),

    /// Malformed configuration (degenerate region, temperature out of range, ...)
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),
}

impl SimError {
    /// Creates an unknown-species error.
    pub fn unknown_species(id: impl std::fmt::Display) -> Self {
        Self::UnknownSpecies(id.to_string())
    }

    /// Creates an invalid-configuration error.
    pub fn invalid(msg: impl Into<String>) -> Self {
        Self::InvalidConfiguration(msg.into())
    }
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, SimError>;
