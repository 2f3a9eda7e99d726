//! Simulation engine: rate conversion, principal, schedule and indicators in one pass

use log::debug;
use serde::{Deserialize, Serialize};

use crate::config::SimulationConfig;
use crate::error::{Result, SimulationError};
use crate::input::{validate_discount_rate, SimulationInput};
use crate::metrics::{self, CostVerdict};
use crate::principal::financed_principal;
use crate::rates::{monthly_discount_rate, monthly_rate};
use crate::schedule::{Schedule, ScheduleGenerator, ScheduleTerms, ScheduleTotals};

/// Headline figures of a simulation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationSummary {
    /// TEM
    pub monthly_effective_rate: f64,
    /// S
    pub financed_principal: f64,
    /// Level installment of the amortizing months (0 when grace spans the whole term)
    pub base_installment: f64,
    /// Balance settled in the final month when grace spans the whole term
    pub balloon_payment: f64,
    pub van: f64,
    /// Monthly TIR
    pub tir: f64,
    pub tcea: f64,
    /// False when the TIR search hit its iteration cap; VAN is unaffected, TIR/TCEA are best effort
    pub irr_converged: bool,
    pub irr_iterations: u32,
    pub grace_description: String,
    /// Client's annual COK the VAN was discounted at
    pub cok_annual: f64,
    pub cost_verdict: CostVerdict,
    pub totals: ScheduleTotals,
}

/// Schedule plus summary
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationResult {
    pub schedule: Schedule,
    pub summary: SimulationSummary,
}

/// Runs simulations with a fixed configuration
#[derive(Debug, Clone, Default)]
pub struct SimulationEngine {
    config: SimulationConfig,
}

impl SimulationEngine {
    pub fn new(config: SimulationConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    /// Price one loan.
    ///
    /// # Arguments
    /// * `input` - Loan parameters
    /// * `discount_rate_annual` - Client's COK as an annual effective rate, used for VAN
    ///
    /// # Errors
    /// `InvalidInput` when the parameters are out of range or the financed principal is
    /// negative. Nothing is generated in that case.
    pub fn simulate(
        &self,
        input: &SimulationInput,
        discount_rate_annual: f64,
    ) -> Result<SimulationResult> {
        input.validate()?;
        validate_discount_rate(discount_rate_annual)?;

        let tem = monthly_rate(
            input.rate_kind,
            input.rate,
            input.rate_period,
            input.capitalization,
        );

        let principal = financed_principal(
            input.property_value,
            input.down_payment_pct,
            input.subsidy_amount,
            input.initial_costs,
        );
        if principal < 0.0 {
            return Err(SimulationError::invalid(
                "financed_principal",
                format!("down payment and subsidy exceed the property value ({:.2})", principal),
            ));
        }
        debug!("TEM {:.10}, financed principal {:.2}", tem, principal);

        let terms = ScheduleTerms::from_input(input, tem, principal);
        let schedule = ScheduleGenerator::new(terms).generate();

        let indicators = metrics::solve(
            principal,
            &schedule.installments(),
            monthly_discount_rate(discount_rate_annual),
            &self.config.irr,
        );

        let summary = SimulationSummary {
            monthly_effective_rate: tem,
            financed_principal: principal,
            base_installment: schedule.base_installment.unwrap_or(0.0),
            balloon_payment: schedule.balloon_payment,
            van: indicators.van,
            tir: indicators.tir,
            tcea: indicators.tcea,
            irr_converged: indicators.converged,
            irr_iterations: indicators.iterations,
            grace_description: input.grace.description(),
            cok_annual: discount_rate_annual,
            cost_verdict: CostVerdict::compare(indicators.tcea, discount_rate_annual),
            totals: schedule.totals(),
        };

        Ok(SimulationResult { schedule, summary })
    }
}

/// Price one loan with the default configuration
pub fn compute_simulation(
    input: &SimulationInput,
    discount_rate_annual: f64,
) -> Result<SimulationResult> {
    SimulationEngine::default().simulate(input, discount_rate_annual)
}
