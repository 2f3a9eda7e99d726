//! Error types for the simulation engine

use thiserror::Error;

/// Errors raised before a schedule is generated, or while loading stored simulations
#[derive(Debug, Error)]
pub enum SimulationError {
    #[error("Invalid input: {field} - {reason}")]
    InvalidInput { field: &'static str, reason: String },

    #[error("Unknown {field} code: {code}")]
    UnknownCode { field: &'static str, code: String },

    #[error("Simulation {0} not found")]
    NotFound(u32),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl SimulationError {
    pub(crate) fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        SimulationError::InvalidInput {
            field,
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, SimulationError>;
