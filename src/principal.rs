//! Amount actually financed by the bank

use crate::money::round_cents;

/// S = PV - PV * down_payment_pct - subsidy + initial_costs, rounded to cents.
///
/// Not clamped: a negative amount means the upstream inputs are inconsistent and is
/// rejected by the engine.
pub fn financed_principal(
    property_value: f64,
    down_payment_pct: f64,
    subsidy_amount: f64,
    initial_costs: f64,
) -> f64 {
    let down_payment = property_value * down_payment_pct;
    round_cents(property_value - down_payment - subsidy_amount + initial_costs)
}
