//! Simulation input parameters and boundary validation

use serde::{Deserialize, Serialize};

use crate::error::{Result, SimulationError};
use crate::rates::{Capitalization, RateKind, RatePeriod};

/// Loan currency. Only drives upstream range checks, never the math.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Currency {
    /// Soles (PEN)
    Local,
    /// Dollars (USD)
    Foreign,
}

impl Currency {
    pub fn parse(text: &str) -> Result<Self> {
        match text.trim() {
            "Local" | "PEN" => Ok(Currency::Local),
            "Foreign" | "USD" => Ok(Currency::Foreign),
            other => Err(SimulationError::UnknownCode {
                field: "currency",
                code: other.to_string(),
            }),
        }
    }
}

/// Grace period granted at the start of the loan
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GracePeriod {
    None,
    /// Interest is paid, principal is not amortized
    Partial { months: u32 },
    /// Nothing but charges is paid; interest capitalizes into the balance
    Total { months: u32 },
}

impl GracePeriod {
    /// Build from a stored kind ("None"/"Partial"/"Total") and month count
    pub fn from_parts(kind: &str, months: u32) -> Result<Self> {
        match kind.trim() {
            "None" | "" => Ok(GracePeriod::None),
            "Partial" => Ok(GracePeriod::Partial { months }),
            "Total" => Ok(GracePeriod::Total { months }),
            other => Err(SimulationError::UnknownCode {
                field: "grace_kind",
                code: other.to_string(),
            }),
        }
    }

    /// Number of grace months (0 when no grace)
    pub fn months(&self) -> u32 {
        match self {
            GracePeriod::None => 0,
            GracePeriod::Partial { months } | GracePeriod::Total { months } => *months,
        }
    }

    pub fn is_total(&self) -> bool {
        matches!(self, GracePeriod::Total { .. })
    }

    /// Whether month `month` (1-indexed) falls inside the grace window
    pub fn covers(&self, month: u32) -> bool {
        month <= self.months()
    }

    pub fn description(&self) -> String {
        match self {
            GracePeriod::None => "No grace period".to_string(),
            GracePeriod::Partial { months } => format!("Partial grace ({} months)", months),
            GracePeriod::Total { months } => format!("Total grace ({} months)", months),
        }
    }
}

/// Parameters of one mortgage simulation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationInput {
    pub currency: Currency,

    /// Effective or nominal quotation of `rate`
    pub rate_kind: RateKind,

    /// Quotation period of an effective rate
    pub rate_period: RatePeriod,

    /// Capitalization of a nominal rate
    pub capitalization: Capitalization,

    /// Interest rate as a decimal
    pub rate: f64,

    /// Property value (PV)
    pub property_value: f64,

    /// Down payment as a fraction of PV
    pub down_payment_pct: f64,

    /// Number of monthly installments
    pub term_months: u32,

    /// Bono del Buen Pagador amount (0 when not granted)
    pub subsidy_amount: f64,

    /// Initial costs financed together with the loan
    pub initial_costs: f64,

    /// Monthly credit life (desgravamen) rate on the outstanding balance
    pub monthly_desgravamen_rate: f64,

    /// Annual property insurance rate on PV
    pub annual_property_insurance_rate: f64,

    /// Fixed monthly charge (portes)
    pub fixed_charge: f64,

    /// Monthly administrative expense
    pub admin_expense: f64,

    pub grace: GracePeriod,
}

impl SimulationInput {
    /// Reject inputs the engine cannot price.
    ///
    /// A zero rate is accepted: it goes through the arithmetic installment fallback.
    pub fn validate(&self) -> Result<()> {
        if !self.rate.is_finite() || self.rate < 0.0 {
            return Err(SimulationError::invalid(
                "rate",
                format!("must be a non-negative number, got {}", self.rate),
            ));
        }
        if !self.property_value.is_finite() || self.property_value <= 0.0 {
            return Err(SimulationError::invalid(
                "property_value",
                format!("must be positive, got {}", self.property_value),
            ));
        }
        if !(0.0..=1.0).contains(&self.down_payment_pct) {
            return Err(SimulationError::invalid(
                "down_payment_pct",
                format!("must be within [0, 1], got {}", self.down_payment_pct),
            ));
        }
        if self.term_months == 0 {
            return Err(SimulationError::invalid("term_months", "must be at least 1"));
        }

        let non_negative = [
            ("subsidy_amount", self.subsidy_amount),
            ("initial_costs", self.initial_costs),
            ("monthly_desgravamen_rate", self.monthly_desgravamen_rate),
            ("annual_property_insurance_rate", self.annual_property_insurance_rate),
            ("fixed_charge", self.fixed_charge),
            ("admin_expense", self.admin_expense),
        ];
        for (field, value) in non_negative {
            if !value.is_finite() || value < 0.0 {
                return Err(SimulationError::invalid(
                    field,
                    format!("must be non-negative, got {}", value),
                ));
            }
        }

        if self.grace != GracePeriod::None {
            let months = self.grace.months();
            if months < 1 || months > self.term_months {
                return Err(SimulationError::invalid(
                    "grace_months",
                    format!("must be within [1, {}], got {}", self.term_months, months),
                ));
            }
        }

        Ok(())
    }
}

/// Check the annual opportunity-cost rate used to discount VAN
pub fn validate_discount_rate(annual: f64) -> Result<()> {
    if !annual.is_finite() || annual <= -1.0 {
        return Err(SimulationError::invalid(
            "discount_rate_annual",
            format!("must be greater than -1, got {}", annual),
        ));
    }
    Ok(())
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    /// 100,000 property, 10% down, 12 months at 2% effective monthly, nothing else
    pub(crate) fn base_input() -> SimulationInput {
        SimulationInput {
            currency: Currency::Local,
            rate_kind: RateKind::Effective,
            rate_period: RatePeriod::Monthly,
            capitalization: Capitalization::Monthly,
            rate: 0.02,
            property_value: 100_000.0,
            down_payment_pct: 0.10,
            term_months: 12,
            subsidy_amount: 0.0,
            initial_costs: 0.0,
            monthly_desgravamen_rate: 0.0,
            annual_property_insurance_rate: 0.0,
            fixed_charge: 0.0,
            admin_expense: 0.0,
            grace: GracePeriod::None,
        }
    }

    #[test]
    fn test_valid_input_passes() {
        assert!(base_input().validate().is_ok());
    }

    #[test]
    fn test_zero_rate_is_accepted() {
        let input = SimulationInput { rate: 0.0, ..base_input() };
        assert!(input.validate().is_ok());
    }

    #[test]
    fn test_negative_rate_rejected() {
        let input = SimulationInput { rate: -0.01, ..base_input() };
        assert!(matches!(
            input.validate(),
            Err(SimulationError::InvalidInput { field: "rate", .. })
        ));
    }

    #[test]
    fn test_zero_term_rejected() {
        let input = SimulationInput { term_months: 0, ..base_input() };
        assert!(matches!(
            input.validate(),
            Err(SimulationError::InvalidInput { field: "term_months", .. })
        ));
    }

    #[test]
    fn test_grace_bounds() {
        let too_long = SimulationInput {
            grace: GracePeriod::Partial { months: 13 },
            ..base_input()
        };
        assert!(too_long.validate().is_err());

        let zero = SimulationInput { grace: GracePeriod::Total { months: 0 }, ..base_input() };
        assert!(zero.validate().is_err());

        let full = SimulationInput { grace: GracePeriod::Total { months: 12 }, ..base_input() };
        assert!(full.validate().is_ok());
    }

    #[test]
    fn test_negative_money_rejected() {
        let input = SimulationInput { fixed_charge: -3.5, ..base_input() };
        assert!(matches!(
            input.validate(),
            Err(SimulationError::InvalidInput { field: "fixed_charge", .. })
        ));
    }

    #[test]
    fn test_discount_rate_bounds() {
        assert!(validate_discount_rate(0.12).is_ok());
        assert!(validate_discount_rate(-1.0).is_err());
        assert!(validate_discount_rate(f64::NAN).is_err());
    }

    #[test]
    fn test_grace_description() {
        assert_eq!(GracePeriod::None.description(), "No grace period");
        assert_eq!(GracePeriod::Total { months: 3 }.description(), "Total grace (3 months)");
        assert!(GracePeriod::Partial { months: 6 }.covers(6));
        assert!(!GracePeriod::Partial { months: 6 }.covers(7));
        assert!(!GracePeriod::None.covers(1));
    }
}
