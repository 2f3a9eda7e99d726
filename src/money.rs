//! Monetary rounding

/// Round to 2 decimal places, half away from zero
pub fn round_cents(amount: f64) -> f64 {
    (amount * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_cents() {
        assert_eq!(round_cents(1800.0), 1800.0);
        assert_eq!(round_cents(8510.363696), 8510.36);
        assert_eq!(round_cents(0.125), 0.13);
        assert_eq!(round_cents(-0.125), -0.13);
        assert_eq!(round_cents(0.0), 0.0);
    }
}
