//! Schedule output structures

use serde::{Deserialize, Serialize};

use crate::money::round_cents;

/// Which part of the loan life a month belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PaymentPhase {
    /// Partial or total grace month
    Grace,
    /// Level-installment (French) month
    Amortization,
}

/// One month of the payment schedule. All amounts are rounded to cents.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduleRow {
    /// Installment number (1-indexed)
    pub month: u32,
    pub phase: PaymentPhase,

    pub opening_balance: f64,
    pub interest: f64,
    pub amortization: f64,

    // Charges
    pub desgravamen_premium: f64,
    pub property_insurance_premium: f64,
    pub fixed_charge: f64,
    pub admin_expense: f64,

    /// Total paid by the borrower this month
    pub installment: f64,
    pub closing_balance: f64,
}

impl ScheduleRow {
    /// Sum of insurance premiums for the month
    pub fn insurance(&self) -> f64 {
        self.desgravamen_premium + self.property_insurance_premium
    }

    /// Cash flow from the borrower's side (payments are outflows)
    pub fn borrower_flow(&self) -> f64 {
        -self.installment
    }
}

/// Complete payment schedule
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Schedule {
    pub rows: Vec<ScheduleRow>,

    /// Level installment (interest + amortization + desgravamen) of the amortizing months.
    /// None when grace covers the whole term.
    pub base_installment: Option<f64>,

    /// Month whose opening balance the base installment was recalculated from (after grace)
    pub recalculated_at: Option<u32>,

    /// Outstanding balance settled in the last month when grace covers the whole term
    pub balloon_payment: f64,
}

impl Schedule {
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Installments in month order, the lender's inflows for months 1..n
    pub fn installments(&self) -> Vec<f64> {
        self.rows.iter().map(|r| r.installment).collect()
    }

    pub fn final_balance(&self) -> f64 {
        self.rows.last().map(|r| r.closing_balance).unwrap_or(0.0)
    }

    pub fn totals(&self) -> ScheduleTotals {
        ScheduleTotals::from_rows(&self.rows)
    }
}

/// Aggregates over the whole schedule
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduleTotals {
    pub interest: f64,
    pub amortization: f64,
    /// Desgravamen plus property insurance
    pub insurance: f64,
    pub fixed_charges: f64,
    pub admin_expenses: f64,
    /// Sum of the five components above
    pub total_paid: f64,
}

impl ScheduleTotals {
    pub fn from_rows(rows: &[ScheduleRow]) -> Self {
        let interest: f64 = rows.iter().map(|r| r.interest).sum();
        let amortization: f64 = rows.iter().map(|r| r.amortization).sum();
        let insurance: f64 = rows.iter().map(|r| r.insurance()).sum();
        let fixed_charges: f64 = rows.iter().map(|r| r.fixed_charge).sum();
        let admin_expenses: f64 = rows.iter().map(|r| r.admin_expense).sum();

        Self {
            interest: round_cents(interest),
            amortization: round_cents(amortization),
            insurance: round_cents(insurance),
            fixed_charges: round_cents(fixed_charges),
            admin_expenses: round_cents(admin_expenses),
            total_paid: round_cents(
                interest + amortization + insurance + fixed_charges + admin_expenses,
            ),
        }
    }
}
