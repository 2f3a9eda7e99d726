//! Interest rate conventions and conversion to a monthly effective rate (TEM)

mod period;
mod conversion;

pub use period::{RateKind, RatePeriod, Capitalization};
pub use conversion::{
    annual_effective_from_nominal, annualize_monthly, monthly_discount_rate, monthly_rate,
};
