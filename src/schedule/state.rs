//! Grace-period state machine driving the schedule

use crate::input::GracePeriod;

/// Where the schedule is in the life of the loan
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ScheduleState {
    /// Inside the grace window; no principal is amortized
    InGrace,
    /// First month after grace: the level installment must be recomputed
    Recalculating,
    /// French amortization with a fixed level installment
    Steady { base_installment: f64 },
}

impl ScheduleState {
    /// State before month 1. Without grace the installment is known up front.
    pub fn initial(grace: GracePeriod, upfront_installment: impl FnOnce() -> f64) -> Self {
        match grace {
            GracePeriod::None => ScheduleState::Steady {
                base_installment: upfront_installment(),
            },
            _ => ScheduleState::InGrace,
        }
    }

    /// State that applies to `month` (1-indexed) given the state of the prior month
    pub fn advance(self, month: u32, grace: GracePeriod) -> Self {
        match self {
            ScheduleState::InGrace if grace.covers(month) => ScheduleState::InGrace,
            ScheduleState::InGrace => ScheduleState::Recalculating,
            other => other,
        }
    }

    pub fn base_installment(&self) -> Option<f64> {
        match self {
            ScheduleState::Steady { base_installment } => Some(*base_installment),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_grace_starts_steady() {
        let state = ScheduleState::initial(GracePeriod::None, || 123.45);
        assert_eq!(state, ScheduleState::Steady { base_installment: 123.45 });
        assert_eq!(state.advance(1, GracePeriod::None), state);
    }

    #[test]
    fn test_grace_transitions_once() {
        let grace = GracePeriod::Partial { months: 2 };
        let state = ScheduleState::initial(grace, || 0.0);
        assert_eq!(state, ScheduleState::InGrace);

        let m1 = state.advance(1, grace);
        let m2 = m1.advance(2, grace);
        let m3 = m2.advance(3, grace);
        assert_eq!(m1, ScheduleState::InGrace);
        assert_eq!(m2, ScheduleState::InGrace);
        assert_eq!(m3, ScheduleState::Recalculating);
        assert_eq!(m3.base_installment(), None);
    }

    #[test]
    fn test_steady_is_absorbing() {
        let steady = ScheduleState::Steady { base_installment: 10.0 };
        assert_eq!(steady.advance(50, GracePeriod::Total { months: 3 }), steady);
    }
}
