//! Simulation parameters and stored-simulation loading

mod data;
pub mod loader;

pub use data::{Currency, GracePeriod, SimulationInput, validate_discount_rate};
pub use loader::{
    load_simulations, load_simulations_from_reader, find_simulation,
    StoredSimulation, SimulationSource, CsvSimulationSource,
};

#[cfg(test)]
pub(crate) use data::tests::base_input;
