//! Payment schedule generation (French method with optional grace)

mod state;
mod generator;
mod rows;

pub use state::ScheduleState;
pub use generator::{ScheduleGenerator, ScheduleTerms, level_installment};
pub use rows::{PaymentPhase, Schedule, ScheduleRow, ScheduleTotals};
