//! Rate quotation conventions: effective vs nominal, quotation period, capitalization

use serde::{Deserialize, Serialize};

use crate::error::{Result, SimulationError};

/// How the input rate is quoted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RateKind {
    /// Effective rate for the quotation period
    Effective,
    /// Nominal annual rate with a capitalization frequency
    Nominal,
}

impl RateKind {
    /// Parse the stored text form ("Effective"/"Nominal", also accepts "E"/"N")
    pub fn parse(text: &str) -> Result<Self> {
        match text.trim() {
            "Effective" | "E" => Ok(RateKind::Effective),
            "Nominal" | "N" => Ok(RateKind::Nominal),
            other => Err(SimulationError::UnknownCode {
                field: "rate_kind",
                code: other.to_string(),
            }),
        }
    }
}

/// Period an effective rate is quoted at (codes 0-7)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RatePeriod {
    /// Code 0: daily-derived rate, compounded by a fixed 30
    Daily,
    /// Code 1
    Biweekly,
    /// Code 2
    Monthly,
    /// Code 3
    Bimonthly,
    /// Code 4
    Quarterly,
    /// Code 5
    FourMonthly,
    /// Code 6
    Semiannual,
    /// Code 7
    Annual,
}

impl RatePeriod {
    /// Map a stored period code. Codes outside 0-6 behave as annual.
    pub fn from_code(code: u8) -> Self {
        match code {
            0 => RatePeriod::Daily,
            1 => RatePeriod::Biweekly,
            2 => RatePeriod::Monthly,
            3 => RatePeriod::Bimonthly,
            4 => RatePeriod::Quarterly,
            5 => RatePeriod::FourMonthly,
            6 => RatePeriod::Semiannual,
            _ => RatePeriod::Annual,
        }
    }

    pub fn code(&self) -> u8 {
        match self {
            RatePeriod::Daily => 0,
            RatePeriod::Biweekly => 1,
            RatePeriod::Monthly => 2,
            RatePeriod::Bimonthly => 3,
            RatePeriod::Quarterly => 4,
            RatePeriod::FourMonthly => 5,
            RatePeriod::Semiannual => 6,
            RatePeriod::Annual => 7,
        }
    }

    /// Exponent that takes (1 + i) at this period to (1 + TEM).
    ///
    /// These are not derived from day counts: Daily uses 30 and Biweekly uses 2.
    pub fn monthly_exponent(&self) -> f64 {
        match self {
            RatePeriod::Daily => 30.0,
            RatePeriod::Biweekly => 2.0,
            RatePeriod::Monthly => 1.0,
            RatePeriod::Bimonthly => 0.5,
            RatePeriod::Quarterly => 1.0 / 3.0,
            RatePeriod::FourMonthly => 0.25,
            RatePeriod::Semiannual => 1.0 / 6.0,
            RatePeriod::Annual => 1.0 / 12.0,
        }
    }
}

/// Capitalization frequency of a nominal rate (codes 0-7)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Capitalization {
    Daily,
    Biweekly,
    Monthly,
    Bimonthly,
    Quarterly,
    FourMonthly,
    Semiannual,
    Annual,
}

impl Capitalization {
    pub fn from_code(code: u8) -> Result<Self> {
        match code {
            0 => Ok(Capitalization::Daily),
            1 => Ok(Capitalization::Biweekly),
            2 => Ok(Capitalization::Monthly),
            3 => Ok(Capitalization::Bimonthly),
            4 => Ok(Capitalization::Quarterly),
            5 => Ok(Capitalization::FourMonthly),
            6 => Ok(Capitalization::Semiannual),
            7 => Ok(Capitalization::Annual),
            other => Err(SimulationError::UnknownCode {
                field: "capitalization",
                code: other.to_string(),
            }),
        }
    }

    pub fn code(&self) -> u8 {
        match self {
            Capitalization::Daily => 0,
            Capitalization::Biweekly => 1,
            Capitalization::Monthly => 2,
            Capitalization::Bimonthly => 3,
            Capitalization::Quarterly => 4,
            Capitalization::FourMonthly => 5,
            Capitalization::Semiannual => 6,
            Capitalization::Annual => 7,
        }
    }

    /// Sub-periods per year (commercial 360-day year for daily)
    pub fn periods_per_year(&self) -> u32 {
        match self {
            Capitalization::Daily => 360,
            Capitalization::Biweekly => 24,
            Capitalization::Monthly => 12,
            Capitalization::Bimonthly => 6,
            Capitalization::Quarterly => 4,
            Capitalization::FourMonthly => 3,
            Capitalization::Semiannual => 2,
            Capitalization::Annual => 1,
        }
    }
}
