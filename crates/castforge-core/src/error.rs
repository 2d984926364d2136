//! Error types for CastForge

use castforge_sat::SatError;
use thiserror::Error;

/// Main error type for CastForge operations
#[derive(Debug, Error)]
pub enum CastError {
    /// Error in engine configuration
    #[error("Configuration error: {0}")]
    Config(String),

    /// Error in the show model (dangling ids, broken structure, cyclic requirements)
    #[error("Domain model error: {0}")]
    DomainModel(String),

    /// Invalid operation for the current state of the show
    #[error("Invalid state: {0}")]
    InvalidState(String),

    /// Malformed boolean expression handed to a solver
    #[error("SAT error: {0}")]
    Sat(#[from] SatError),
}

/// Result type alias for CastForge operations
pub type Result<T> = std::result::Result<T, CastError>;
