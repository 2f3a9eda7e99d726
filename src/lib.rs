//! BBP Mortgage - amortization schedules and cost indicators for Bono del Buen Pagador loans
//!
//! This library provides:
//! - Conversion of effective/nominal rates at any quotation period to a monthly rate (TEM)
//! - Financed principal after down payment, subsidy and initial costs
//! - Monthly French-method schedules with partial or total grace
//! - VAN, TIR and TCEA of the resulting cash flows

pub mod error;
pub mod config;
pub mod money;
pub mod rates;
pub mod principal;
pub mod input;
pub mod schedule;
pub mod metrics;
pub mod simulation;
pub mod calendar;

// Re-export commonly used types
pub use error::{SimulationError, Result};
pub use config::SimulationConfig;
pub use input::{SimulationInput, GracePeriod, Currency, StoredSimulation};
pub use rates::{RateKind, RatePeriod, Capitalization};
pub use schedule::{Schedule, ScheduleRow, ScheduleTotals, PaymentPhase};
pub use metrics::{FinancialMetrics, CostVerdict, IrrSearchConfig};
pub use simulation::{SimulationEngine, SimulationResult, SimulationSummary, compute_simulation};
