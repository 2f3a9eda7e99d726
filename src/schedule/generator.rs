//! Month-by-month schedule generation with partial and total grace
//!
//! The running balance and the one-time recalculation are threaded through a fold over
//! month indices; each month yields one immutable row.

use log::debug;

use super::rows::{PaymentPhase, Schedule, ScheduleRow};
use super::state::ScheduleState;
use crate::input::{GracePeriod, SimulationInput};
use crate::money::round_cents;

/// Everything the generator needs about the loan, already in monthly terms
#[derive(Debug, Clone, PartialEq)]
pub struct ScheduleTerms {
    /// Financed principal S
    pub principal: f64,
    /// Monthly effective interest rate (TEM)
    pub monthly_rate: f64,
    pub term_months: u32,
    pub grace: GracePeriod,
    /// Monthly desgravamen rate applied to the opening balance
    pub desgravamen_rate: f64,
    /// Monthly property insurance premium, PV * TSI / 12
    pub property_insurance_premium: f64,
    pub fixed_charge: f64,
    pub admin_expense: f64,
}

impl ScheduleTerms {
    pub fn from_input(input: &SimulationInput, monthly_rate: f64, principal: f64) -> Self {
        Self {
            principal,
            monthly_rate,
            term_months: input.term_months,
            grace: input.grace,
            desgravamen_rate: input.monthly_desgravamen_rate,
            property_insurance_premium: round_cents(
                input.property_value * input.annual_property_insurance_rate / 12.0,
            ),
            fixed_charge: input.fixed_charge,
            admin_expense: input.admin_expense,
        }
    }

    /// Interest plus desgravamen, the rate the level installment is priced at
    pub fn combined_rate(&self) -> f64 {
        self.monthly_rate + self.desgravamen_rate
    }

    fn charges(&self) -> f64 {
        self.property_insurance_premium + self.fixed_charge + self.admin_expense
    }
}

/// Level installment that repays `balance` over `periods` months at `rate`.
///
/// A zero rate falls back to straight division. Zero periods are treated as one, so the
/// whole balance falls due at once.
pub fn level_installment(balance: f64, rate: f64, periods: u32) -> f64 {
    let periods = periods.max(1);
    if rate.abs() < 1e-12 {
        return balance / periods as f64;
    }
    balance * rate / (1.0 - (1.0 + rate).powi(-(periods as i32)))
}

/// Running state carried from one month to the next
struct Cursor {
    balance: f64,
    state: ScheduleState,
    recalculated_at: Option<u32>,
    balloon_payment: f64,
    rows: Vec<ScheduleRow>,
}

/// Builds the payment schedule for one loan
pub struct ScheduleGenerator {
    terms: ScheduleTerms,
}

impl ScheduleGenerator {
    pub fn new(terms: ScheduleTerms) -> Self {
        Self { terms }
    }

    pub fn terms(&self) -> &ScheduleTerms {
        &self.terms
    }

    /// Generate exactly `term_months` rows
    pub fn generate(&self) -> Schedule {
        let terms = &self.terms;
        let opening = round_cents(terms.principal);

        let initial = Cursor {
            balance: opening,
            state: ScheduleState::initial(terms.grace, || {
                self.price_installment(opening, terms.term_months)
            }),
            recalculated_at: None,
            balloon_payment: 0.0,
            rows: Vec::with_capacity(terms.term_months as usize),
        };

        let cursor = (1..=terms.term_months)
            .fold(initial, |cursor, month| self.step(cursor, month));

        Schedule {
            base_installment: cursor.state.base_installment(),
            recalculated_at: cursor.recalculated_at,
            balloon_payment: cursor.balloon_payment,
            rows: cursor.rows,
        }
    }

    fn price_installment(&self, balance: f64, periods: u32) -> f64 {
        let rate = self.terms.combined_rate();
        if rate.abs() < 1e-12 {
            debug!("Zero combined rate, installment = {:.2} / {}", balance, periods);
        }
        round_cents(level_installment(balance, rate, periods))
    }

    fn step(&self, mut cursor: Cursor, month: u32) -> Cursor {
        let terms = &self.terms;

        let mut state = cursor.state.advance(month, terms.grace);
        if state == ScheduleState::Recalculating {
            let remaining = terms.term_months - terms.grace.months();
            let base_installment = self.price_installment(cursor.balance, remaining);
            debug!(
                "Grace ended at month {}: balance {:.2}, installment {:.2} over {} months",
                month - 1,
                cursor.balance,
                base_installment,
                remaining
            );
            cursor.recalculated_at = Some(month);
            state = ScheduleState::Steady { base_installment };
        }

        let mut row = self.calculate_month(month, cursor.balance, state);

        // Last installment settles whatever is outstanding: rounding residue after
        // amortization, or the full balance when grace spans the whole term
        if month == terms.term_months && row.closing_balance != 0.0 {
            let outstanding = row.closing_balance;
            if row.phase == PaymentPhase::Grace {
                debug!("Grace covers the full term, balloon of {:.2}", outstanding);
                cursor.balloon_payment = outstanding;
            }
            row.amortization = round_cents(row.amortization + outstanding);
            row.installment = round_cents(row.installment + outstanding);
            row.closing_balance = 0.0;
        }

        cursor.balance = row.closing_balance;
        cursor.state = state;
        cursor.rows.push(row);
        cursor
    }

    fn calculate_month(&self, month: u32, balance: f64, state: ScheduleState) -> ScheduleRow {
        let terms = &self.terms;

        let interest = round_cents(balance * terms.monthly_rate);
        let desgravamen = round_cents(balance * terms.desgravamen_rate);

        let mut row = ScheduleRow {
            month,
            phase: PaymentPhase::Grace,
            opening_balance: balance,
            interest,
            amortization: 0.0,
            desgravamen_premium: desgravamen,
            property_insurance_premium: terms.property_insurance_premium,
            fixed_charge: terms.fixed_charge,
            admin_expense: terms.admin_expense,
            installment: 0.0,
            closing_balance: balance,
        };

        match (state.base_installment(), terms.grace) {
            (Some(base_installment), _) => {
                let amortization = round_cents(base_installment - interest - desgravamen);
                row.phase = PaymentPhase::Amortization;
                row.amortization = amortization;
                row.closing_balance = round_cents(balance - amortization);
                row.installment =
                    round_cents(interest + amortization + desgravamen + terms.charges());
            }
            (None, GracePeriod::Total { .. }) => {
                // Interest capitalizes; only insurance and charges are paid
                row.closing_balance = round_cents(balance + interest);
                row.installment = round_cents(desgravamen + terms.charges());
            }
            (None, _) => {
                row.installment = round_cents(interest + desgravamen + terms.charges());
            }
        }

        row
    }
}
