//! Installment due dates
//!
//! The engine works in month indices; dates are only attached when exporting a schedule.

use chrono::{Months, NaiveDate};

use crate::error::{Result, SimulationError};

/// Due dates of installments 1..=n, one calendar month apart from the disbursement.
///
/// Day-of-month is clamped at month end (Jan 31 -> Feb 28/29 -> Mar 31).
pub fn installment_dates(disbursement: NaiveDate, term_months: u32) -> Result<Vec<NaiveDate>> {
    (1..=term_months)
        .map(|k| {
            disbursement.checked_add_months(Months::new(k)).ok_or_else(|| {
                SimulationError::invalid(
                    "disbursement_date",
                    format!("{} plus {} months is out of range", disbursement, k),
                )
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_monthly_offsets() {
        let dates = installment_dates(date(2025, 1, 15), 3).unwrap();
        assert_eq!(dates, vec![date(2025, 2, 15), date(2025, 3, 15), date(2025, 4, 15)]);
    }

    #[test]
    fn test_month_end_clamping() {
        let dates = installment_dates(date(2024, 1, 31), 3).unwrap();
        assert_eq!(dates, vec![date(2024, 2, 29), date(2024, 3, 31), date(2024, 4, 30)]);
    }

    #[test]
    fn test_year_rollover() {
        let dates = installment_dates(date(2025, 11, 10), 240).unwrap();
        assert_eq!(dates.len(), 240);
        assert_eq!(dates[1], date(2026, 1, 10));
        assert_eq!(dates[239], date(2045, 11, 10));
    }
}
