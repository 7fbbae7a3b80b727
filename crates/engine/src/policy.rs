//! Tolerance and rounding knobs shared by the aggregator and the minimizer.

use rust_decimal::RoundingStrategy;
use serde::Deserialize;

use crate::{EngineError, Money, ResultEngine};

/// How settlement amounts are rounded to the cent.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoundingMode {
    /// `0.005` becomes `0.01`, `-0.005` becomes `-0.01`.
    #[default]
    HalfAwayFromZero,
    /// Banker's rounding: `0.005` becomes `0.00`, `0.015` becomes `0.02`.
    HalfEven,
}

impl RoundingMode {
    pub(crate) const fn strategy(self) -> RoundingStrategy {
        match self {
            Self::HalfAwayFromZero => RoundingStrategy::MidpointAwayFromZero,
            Self::HalfEven => RoundingStrategy::MidpointNearestEven,
        }
    }
}

/// Epsilon and rounding applied while settling balances.
///
/// Balances within `[-epsilon, epsilon]` count as settled. Split shares are
/// often `amount / N` and never sum back to the exact total, so comparisons
/// against zero always go through this tolerance.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SettlementPolicy {
    epsilon: Money,
    rounding: RoundingMode,
}

impl SettlementPolicy {
    /// One cent.
    pub const DEFAULT_EPSILON_CENTS: i64 = 1;

    pub fn new(epsilon: Money, rounding: RoundingMode) -> ResultEngine<Self> {
        if !epsilon.is_positive() {
            return Err(EngineError::InvalidPolicy(format!(
                "epsilon must be > 0, got {epsilon}"
            )));
        }
        Ok(Self { epsilon, rounding })
    }

    #[must_use]
    pub const fn epsilon(&self) -> Money {
        self.epsilon
    }

    #[must_use]
    pub const fn rounding(&self) -> RoundingMode {
        self.rounding
    }

    /// Returns `true` when `amount` is close enough to zero.
    #[must_use]
    pub fn is_settled(&self, amount: Money) -> bool {
        amount.abs() <= self.epsilon
    }
}

impl Default for SettlementPolicy {
    fn default() -> Self {
        Self {
            epsilon: Money::from_cents(Self::DEFAULT_EPSILON_CENTS),
            rounding: RoundingMode::HalfAwayFromZero,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn default_is_one_cent_half_away_from_zero() {
        let policy = SettlementPolicy::default();
        assert_eq!(policy.epsilon(), Money::from_cents(1));
        assert_eq!(policy.rounding(), RoundingMode::HalfAwayFromZero);
    }

    #[rstest]
    #[case::zero(0)]
    #[case::negative(-5)]
    fn new_rejects_non_positive_epsilon(#[case] cents: i64) {
        assert!(matches!(
            SettlementPolicy::new(Money::from_cents(cents), RoundingMode::HalfEven),
            Err(EngineError::InvalidPolicy(_))
        ));
    }

    #[rstest]
    #[case::exact_zero(0, true)]
    #[case::on_the_edge(1, true)]
    #[case::negative_edge(-1, true)]
    #[case::above(2, false)]
    #[case::below(-2, false)]
    fn is_settled_is_inclusive(#[case] cents: i64, #[case] settled: bool) {
        assert_eq!(
            SettlementPolicy::default().is_settled(Money::from_cents(cents)),
            settled
        );
    }

    #[test]
    fn rounding_mode_uses_snake_case() {
        let mode: RoundingMode = serde_json::from_str("\"half_even\"").unwrap();
        assert_eq!(mode, RoundingMode::HalfEven);
    }
}
