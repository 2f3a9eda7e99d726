//! Conversion of quoted rates to a monthly effective rate
//!
//! Effective rates are compounded or de-compounded from their quotation period to one
//! month. Nominal rates are first turned into an annual effective rate (TEA) using the
//! capitalization frequency, then de-compounded to a month.

use super::period::{Capitalization, RateKind, RatePeriod};

/// Convert an input rate to the monthly effective rate (TEM).
///
/// # Arguments
/// * `kind` - Effective or nominal quotation
/// * `rate` - Rate as a decimal (0.10 for 10%)
/// * `period` - Quotation period, only used for effective rates
/// * `capitalization` - Capitalization frequency, only used for nominal rates
pub fn monthly_rate(
    kind: RateKind,
    rate: f64,
    period: RatePeriod,
    capitalization: Capitalization,
) -> f64 {
    match kind {
        RateKind::Effective => match period {
            // Already monthly, returned untouched
            RatePeriod::Monthly => rate,
            other => (1.0 + rate).powf(other.monthly_exponent()) - 1.0,
        },
        RateKind::Nominal => {
            let tea = annual_effective_from_nominal(rate, capitalization);
            (1.0 + tea).powf(1.0 / 12.0) - 1.0
        }
    }
}

/// TEA = (1 + i/m)^m - 1
pub fn annual_effective_from_nominal(rate: f64, capitalization: Capitalization) -> f64 {
    let m = capitalization.periods_per_year();
    (1.0 + rate / m as f64).powi(m as i32) - 1.0
}

/// Monthly equivalent of an annual effective rate (used for the client's COK)
pub fn monthly_discount_rate(annual_effective: f64) -> f64 {
    (1.0 + annual_effective).powf(1.0 / 12.0) - 1.0
}

/// Annual effective equivalent of a monthly rate: (1 + r)^12 - 1
pub fn annualize_monthly(monthly: f64) -> f64 {
    (1.0 + monthly).powi(12) - 1.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn effective(rate: f64, code: u8) -> f64 {
        monthly_rate(
            RateKind::Effective,
            rate,
            RatePeriod::from_code(code),
            Capitalization::Monthly,
        )
    }

    #[test]
    fn test_monthly_effective_is_unchanged() {
        assert_eq!(effective(0.02, 2), 0.02);
    }

    #[test]
    fn test_effective_exponent_table() {
        let i: f64 = 0.10;
        assert_abs_diff_eq!(effective(i, 0), 1.1_f64.powf(30.0) - 1.0, epsilon = 1e-12);
        assert_abs_diff_eq!(effective(i, 1), 0.21, epsilon = 1e-12);
        assert_abs_diff_eq!(effective(i, 3), 1.1_f64.sqrt() - 1.0, epsilon = 1e-12);
        assert_abs_diff_eq!(effective(i, 4), 1.1_f64.powf(1.0 / 3.0) - 1.0, epsilon = 1e-12);
        assert_abs_diff_eq!(effective(i, 5), 1.1_f64.powf(0.25) - 1.0, epsilon = 1e-12);
        assert_abs_diff_eq!(effective(i, 6), 1.1_f64.powf(1.0 / 6.0) - 1.0, epsilon = 1e-12);
        assert_abs_diff_eq!(effective(i, 7), 1.1_f64.powf(1.0 / 12.0) - 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_annual_effective_round_trips_through_annualize() {
        let tem = effective(0.12, 7);
        assert_abs_diff_eq!(annualize_monthly(tem), 0.12, epsilon = 1e-12);
    }

    #[test]
    fn test_nominal_monthly_capitalization() {
        // 12% nominal capitalized monthly is exactly 1% per month
        let tem = monthly_rate(
            RateKind::Nominal,
            0.12,
            RatePeriod::Annual,
            Capitalization::Monthly,
        );
        assert_abs_diff_eq!(tem, 0.01, epsilon = 1e-12);
    }

    #[test]
    fn test_nominal_ignores_quotation_period() {
        let a = monthly_rate(RateKind::Nominal, 0.10, RatePeriod::Daily, Capitalization::Daily);
        let b = monthly_rate(RateKind::Nominal, 0.10, RatePeriod::Annual, Capitalization::Daily);
        assert_eq!(a, b);

        let tea = (1.0 + 0.10 / 360.0_f64).powi(360) - 1.0;
        assert_abs_diff_eq!(a, (1.0 + tea).powf(1.0 / 12.0) - 1.0, epsilon = 1e-14);
    }

    #[test]
    fn test_annual_capitalization_equals_effective_annual() {
        let nominal =
            monthly_rate(RateKind::Nominal, 0.09, RatePeriod::Annual, Capitalization::Annual);
        assert_abs_diff_eq!(nominal, effective(0.09, 7), epsilon = 1e-14);
    }

    #[test]
    fn test_zero_rate_gives_zero_tem() {
        for code in 0..=7u8 {
            assert_eq!(effective(0.0, code), 0.0);
        }
        let nominal =
            monthly_rate(RateKind::Nominal, 0.0, RatePeriod::Annual, Capitalization::Quarterly);
        assert_eq!(nominal, 0.0);
    }

    #[test]
    fn test_monthly_discount_rate() {
        let d = monthly_discount_rate(0.10);
        assert_abs_diff_eq!((1.0 + d).powi(12), 1.10, epsilon = 1e-12);
    }
}
