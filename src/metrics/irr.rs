//! Internal Rate of Return (TIR) by fixed-step search
//!
//! The search walks the monthly rate up or down by a constant step depending on the sign
//! of the NPV. It is slow compared to Newton or bisection, but the reported figures are
//! defined by this exact walk (start, step, tolerance, cap), so it must not be swapped out.

use serde::{Deserialize, Serialize};

/// Parameters of the fixed-step search
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct IrrSearchConfig {
    /// Monthly rate the walk starts from
    pub start_rate: f64,
    /// Increment applied per iteration
    pub step: f64,
    /// |NPV| at or below which the rate is accepted
    pub tolerance: f64,
    /// Maximum NPV evaluations
    pub max_iterations: u32,
}

impl Default for IrrSearchConfig {
    fn default() -> Self {
        Self {
            start_rate: 0.01,
            step: 1e-6,
            tolerance: 1e-4,
            max_iterations: 100_000,
        }
    }
}

/// Result of the search. `rate` is the best rate reached even when not converged.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct IrrOutcome {
    /// Monthly IRR
    pub rate: f64,
    pub converged: bool,
    /// NPV evaluations performed
    pub iterations: u32,
    /// NPV at `rate`
    pub npv: f64,
}

/// Lender cash flows: -S at t=0, then each installment
pub fn lender_cashflows(principal: f64, installments: &[f64]) -> Vec<f64> {
    let mut cashflows = Vec::with_capacity(installments.len() + 1);
    cashflows.push(-principal);
    cashflows.extend_from_slice(installments);
    cashflows
}

/// Calculate NPV at a given periodic rate (t = 0 undiscounted)
pub fn npv_at_rate(cashflows: &[f64], rate: f64) -> f64 {
    cashflows
        .iter()
        .enumerate()
        .map(|(t, &cf)| cf / (1.0 + rate).powi(t as i32))
        .sum()
}

/// Search the monthly IRR of lending `principal` against `installments`.
///
/// Each iteration evaluates the NPV, stops if it is within tolerance, then steps the rate
/// towards the root. Never fails: when the cap is hit the visited rate with the smallest
/// |NPV| is returned with `converged = false`.
pub fn search_irr(principal: f64, installments: &[f64], config: &IrrSearchConfig) -> IrrOutcome {
    let cashflows = lender_cashflows(principal, installments);

    let mut rate = config.start_rate;
    let mut best = IrrOutcome {
        rate,
        converged: false,
        iterations: 0,
        npv: f64::INFINITY,
    };

    for iteration in 1..=config.max_iterations {
        let npv = npv_at_rate(&cashflows, rate);
        best.iterations = iteration;

        if !npv.is_finite() {
            break;
        }
        if npv.abs() < best.npv.abs() {
            best.rate = rate;
            best.npv = npv;
        }
        if npv.abs() <= config.tolerance {
            best.converged = true;
            break;
        }

        if npv > 0.0 {
            rate += config.step;
        } else {
            rate -= config.step;
        }
    }

    best
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_npv_at_rate() {
        let cashflows = vec![-100.0, 110.0];
        assert_abs_diff_eq!(npv_at_rate(&cashflows, 0.10), 0.0, epsilon = 1e-12);
        assert_abs_diff_eq!(npv_at_rate(&cashflows, 0.0), 10.0, epsilon = 1e-12);
    }

    #[test]
    fn test_exact_annuity_converges() {
        // Installments of an exact 2% annuity on 100
        let installment = 100.0 * 0.02 / (1.0 - 1.02_f64.powi(-12));
        let installments = vec![installment; 12];

        let outcome = search_irr(100.0, &installments, &IrrSearchConfig::default());

        assert!(outcome.converged);
        assert_abs_diff_eq!(outcome.rate, 0.02, epsilon = 1e-4);
        assert!(outcome.iterations < 20_000, "took {} iterations", outcome.iterations);
    }

    #[test]
    fn test_single_period() {
        let outcome = search_irr(100.0, &[102.0], &IrrSearchConfig::default());
        assert!(outcome.converged);
        assert_abs_diff_eq!(outcome.rate, 0.02, epsilon = 1e-4);
    }

    #[test]
    fn test_walks_down_when_rate_too_high() {
        // True IRR 0.5% is below the 1% start
        let installment = 1000.0 * 0.005 / (1.0 - 1.005_f64.powi(-6));
        let outcome = search_irr(1000.0, &vec![installment; 6], &IrrSearchConfig::default());
        assert!(outcome.converged);
        assert_abs_diff_eq!(outcome.rate, 0.005, epsilon = 1e-4);
    }

    #[test]
    fn test_cap_reached_without_convergence() {
        let config = IrrSearchConfig {
            max_iterations: 10,
            ..IrrSearchConfig::default()
        };
        let installment = 100.0 * 0.02 / (1.0 - 1.02_f64.powi(-12));
        let cashflows = lender_cashflows(100.0, &vec![installment; 12]);
        let outcome = search_irr(100.0, &vec![installment; 12], &config);

        // Ten evaluations at 0.01 + k * step for k in 0..10; NPV shrinks on the way up
        assert!(!outcome.converged);
        assert_eq!(outcome.iterations, 10);
        assert_abs_diff_eq!(outcome.rate, 0.01 + 9.0 * 1e-6, epsilon = 1e-12);
        assert_abs_diff_eq!(outcome.npv, npv_at_rate(&cashflows, outcome.rate), epsilon = 1e-12);
    }

    #[test]
    fn test_oscillation_returns_smallest_npv() {
        // Cent-rounded 2% annuity on 90,000: the walk straddles the root without reaching
        // the tolerance, so the closest visited rate is reported
        let installments = vec![8510.36; 12];
        let cashflows = lender_cashflows(90_000.0, &installments);
        let outcome = search_irr(90_000.0, &installments, &IrrSearchConfig::default());

        assert!(!outcome.converged);
        assert_eq!(outcome.iterations, 100_000);
        assert_abs_diff_eq!(outcome.npv, npv_at_rate(&cashflows, outcome.rate), epsilon = 1e-9);

        let neighbours = [outcome.rate - 1e-6, outcome.rate + 1e-6];
        for r in neighbours {
            assert!(npv_at_rate(&cashflows, r).abs() >= outcome.npv.abs());
        }
    }

    #[test]
    fn test_zero_cap_returns_start_rate() {
        let config = IrrSearchConfig {
            max_iterations: 0,
            ..IrrSearchConfig::default()
        };
        let outcome = search_irr(100.0, &[102.0], &config);
        assert!(!outcome.converged);
        assert_eq!(outcome.iterations, 0);
        assert_eq!(outcome.rate, 0.01);
    }
}
