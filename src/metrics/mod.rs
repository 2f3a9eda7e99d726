//! Financial indicators of the cash-flow stream: VAN, TIR and TCEA

mod irr;

pub use irr::{IrrSearchConfig, IrrOutcome, search_irr, npv_at_rate, lender_cashflows};

use log::warn;
use serde::{Deserialize, Serialize};

use crate::rates::annualize_monthly;

/// Indicators for one simulated loan
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FinancialMetrics {
    /// Net present value at the client's monthly COK, from the lender's side
    pub van: f64,
    /// Monthly internal rate of return
    pub tir: f64,
    /// Annualized TIR
    pub tcea: f64,
    /// Whether the TIR search reached its tolerance
    pub converged: bool,
    pub iterations: u32,
}

/// VAN = S + sum(-installment_k / (1 + d)^k)
///
/// The disbursed principal counts positive and installments negative, mirroring how the
/// figure has always been reported.
pub fn net_present_value(principal: f64, installments: &[f64], monthly_discount_rate: f64) -> f64 {
    let discounted: f64 = installments
        .iter()
        .enumerate()
        .map(|(k, &installment)| -installment / (1.0 + monthly_discount_rate).powi(k as i32 + 1))
        .sum();
    principal + discounted
}

/// Compute VAN, TIR and TCEA for a schedule's installments
pub fn solve(
    principal: f64,
    installments: &[f64],
    monthly_discount_rate: f64,
    config: &IrrSearchConfig,
) -> FinancialMetrics {
    let van = net_present_value(principal, installments, monthly_discount_rate);
    let outcome = search_irr(principal, installments, config);

    if !outcome.converged {
        warn!(
            "TIR search stopped after {} iterations at {:.8} with NPV {:.6}",
            outcome.iterations, outcome.rate, outcome.npv
        );
    }

    FinancialMetrics {
        van,
        tir: outcome.rate,
        tcea: annualize_monthly(outcome.rate),
        converged: outcome.converged,
        iterations: outcome.iterations,
    }
}

/// How the loan's cost compares to the client's opportunity cost
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CostVerdict {
    /// TCEA at or below COK
    Favourable,
    /// TCEA above COK
    Unfavourable,
}

impl CostVerdict {
    /// Compare annual effective cost against annual COK
    pub fn compare(tcea: f64, cok_annual: f64) -> Self {
        if tcea > cok_annual {
            CostVerdict::Unfavourable
        } else {
            CostVerdict::Favourable
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_van_zero_at_irr() {
        let installment = 100.0 * 0.02 / (1.0 - 1.02_f64.powi(-12));
        let van = net_present_value(100.0, &vec![installment; 12], 0.02);
        assert_abs_diff_eq!(van, 0.0, epsilon = 1e-9);
    }

    #[test]
    fn test_van_sign_convention() {
        // Discounting below the loan rate makes repayments worth more than the principal
        let installment = 100.0 * 0.02 / (1.0 - 1.02_f64.powi(-12));
        assert!(net_present_value(100.0, &vec![installment; 12], 0.01) < 0.0);
        assert!(net_present_value(100.0, &vec![installment; 12], 0.03) > 0.0);
    }

    #[test]
    fn test_solve_annualizes_tir() {
        let installment = 100.0 * 0.02 / (1.0 - 1.02_f64.powi(-12));
        let metrics = solve(100.0, &vec![installment; 12], 0.01, &IrrSearchConfig::default());

        assert!(metrics.converged);
        assert_abs_diff_eq!(metrics.tir, 0.02, epsilon = 1e-4);
        assert_abs_diff_eq!(metrics.tcea, (1.0 + metrics.tir).powi(12) - 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_cost_verdict() {
        assert_eq!(CostVerdict::compare(0.15, 0.12), CostVerdict::Unfavourable);
        assert_eq!(CostVerdict::compare(0.10, 0.12), CostVerdict::Favourable);
        assert_eq!(CostVerdict::compare(0.12, 0.12), CostVerdict::Favourable);
    }
}
