//! Error types for cattery
//!
//! This module defines all error types used throughout the library.

use thiserror::Error;

use crate::population::individual::CatId;

/// Error type for trait vector construction
#[derive(Debug, Error, Clone, PartialEq)]
pub enum GenomeError {
    /// Trait vector length differs from the expected trait count
    #[error("Dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    /// A trait value is NaN or infinite
    #[error("Non-finite trait value at index {index}")]
    NonFiniteTrait { index: usize },
}

/// Error type for cattery bookkeeping
#[derive(Debug, Error, Clone, PartialEq)]
pub enum PopulationError {
    /// An individual with this id is already present
    #[error("Duplicate cat id: {0}")]
    DuplicateId(CatId),
}

/// Top-level error type for simulation operations
#[derive(Debug, Error)]
pub enum EvolutionError {
    /// Genome error
    #[error("Genome error: {0}")]
    Genome(#[from] GenomeError),

    /// Population error
    #[error("Population error: {0}")]
    Population(#[from] PopulationError),

    /// Invalid configuration
    #[error("Invalid configuration: {0}")]
    Configuration(String),

    /// Configuration could not be (de)serialized
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl From<serde_json::Error> for EvolutionError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}

/// Result type alias for simulation operations
pub type SimResult<T> = Result<T, EvolutionError>;
