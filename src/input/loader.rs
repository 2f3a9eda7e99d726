//! Load stored simulations from CSV
//!
//! The engine never touches storage; this is the CSV-backed side of the repository seam
//! the CLI uses to fetch simulation parameters and the client's COK.

use chrono::NaiveDate;
use csv::Reader;
use std::path::{Path, PathBuf};

use super::{Currency, GracePeriod, SimulationInput};
use crate::error::{Result, SimulationError};
use crate::rates::{Capitalization, RateKind, RatePeriod};

/// A persisted simulation together with the client data the engine needs
#[derive(Debug, Clone, PartialEq)]
pub struct StoredSimulation {
    pub simulation_id: u32,
    pub input: SimulationInput,
    /// Client's annual opportunity cost of capital (TEA)
    pub cok_annual: f64,
    /// Disbursement date, when recorded
    pub disbursement_date: Option<NaiveDate>,
}

/// Raw CSV row of the stored simulations export
#[derive(Debug, serde::Deserialize)]
struct CsvRow {
    simulation_id: u32,
    currency: String,
    rate_kind: String,
    rate_period: u8,
    #[serde(default)]
    capitalization: Option<u8>,
    rate: f64,
    property_value: f64,
    down_payment_pct: f64,
    term_months: u32,
    #[serde(default)]
    subsidy_amount: f64,
    #[serde(default)]
    initial_costs: f64,
    #[serde(default)]
    desgravamen_rate: f64,
    #[serde(default)]
    property_insurance_rate: f64,
    #[serde(default)]
    fixed_charge: f64,
    #[serde(default)]
    admin_expense: f64,
    grace_kind: String,
    #[serde(default)]
    grace_months: u32,
    cok: f64,
    #[serde(default)]
    disbursement_date: Option<NaiveDate>,
}

impl CsvRow {
    fn into_stored(self) -> Result<StoredSimulation> {
        let rate_kind = RateKind::parse(&self.rate_kind)?;

        // Effective rates leave capitalization blank; monthly is a harmless placeholder
        let capitalization = match (rate_kind, self.capitalization) {
            (_, Some(code)) => Capitalization::from_code(code)?,
            (RateKind::Effective, None) => Capitalization::Monthly,
            (RateKind::Nominal, None) => {
                return Err(SimulationError::invalid(
                    "capitalization",
                    format!("required for nominal rate (simulation {})", self.simulation_id),
                ))
            }
        };

        let input = SimulationInput {
            currency: Currency::parse(&self.currency)?,
            rate_kind,
            rate_period: RatePeriod::from_code(self.rate_period),
            capitalization,
            rate: self.rate,
            property_value: self.property_value,
            down_payment_pct: self.down_payment_pct,
            term_months: self.term_months,
            subsidy_amount: self.subsidy_amount,
            initial_costs: self.initial_costs,
            monthly_desgravamen_rate: self.desgravamen_rate,
            annual_property_insurance_rate: self.property_insurance_rate,
            fixed_charge: self.fixed_charge,
            admin_expense: self.admin_expense,
            grace: GracePeriod::from_parts(&self.grace_kind, self.grace_months)?,
        };

        Ok(StoredSimulation {
            simulation_id: self.simulation_id,
            input,
            cok_annual: self.cok,
            disbursement_date: self.disbursement_date,
        })
    }
}

/// Load all stored simulations from a CSV file
pub fn load_simulations<P: AsRef<Path>>(path: P) -> Result<Vec<StoredSimulation>> {
    let mut reader = Reader::from_path(path)?;
    collect_rows(&mut reader)
}

/// Load stored simulations from any reader (e.g., string buffer, network stream)
pub fn load_simulations_from_reader<R: std::io::Read>(reader: R) -> Result<Vec<StoredSimulation>> {
    let mut csv_reader = Reader::from_reader(reader);
    collect_rows(&mut csv_reader)
}

fn collect_rows<R: std::io::Read>(reader: &mut Reader<R>) -> Result<Vec<StoredSimulation>> {
    let mut simulations = Vec::new();
    for result in reader.deserialize() {
        let row: CsvRow = result?;
        simulations.push(row.into_stored()?);
    }
    Ok(simulations)
}

/// Find a simulation by id
pub fn find_simulation(simulations: &[StoredSimulation], id: u32) -> Result<&StoredSimulation> {
    simulations
        .iter()
        .find(|s| s.simulation_id == id)
        .ok_or(SimulationError::NotFound(id))
}

/// Source of persisted simulation parameters
pub trait SimulationSource {
    fn fetch(&self, simulation_id: u32) -> Result<StoredSimulation>;
}

/// Reads the CSV export on every fetch
#[derive(Debug, Clone)]
pub struct CsvSimulationSource {
    path: PathBuf,
}

impl CsvSimulationSource {
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        Self { path: path.into() }
    }
}

impl SimulationSource for CsvSimulationSource {
    fn fetch(&self, simulation_id: u32) -> Result<StoredSimulation> {
        let simulations = load_simulations(&self.path)?;
        find_simulation(&simulations, simulation_id).cloned()
    }
}
