//! Engine configuration
//!
//! Defaults reproduce the reference figures. Environment variables can override the
//! TIR search for diagnostics:
//!   IRR_START_RATE, IRR_STEP, IRR_TOLERANCE, IRR_MAX_ITERATIONS

use std::env;

use crate::metrics::IrrSearchConfig;

/// Configuration for a simulation run
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SimulationConfig {
    /// TIR search parameters
    pub irr: IrrSearchConfig,
}

impl SimulationConfig {
    /// Defaults overridden by any IRR_* variables that are set and parse
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = IrrSearchConfig::default();

        let irr = IrrSearchConfig {
            start_rate: lookup("IRR_START_RATE")
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.start_rate),
            step: lookup("IRR_STEP")
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.step),
            tolerance: lookup("IRR_TOLERANCE")
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.tolerance),
            max_iterations: lookup("IRR_MAX_ITERATIONS")
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.max_iterations),
        };

        Self { irr }
    }
}
