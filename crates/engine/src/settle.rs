//! Debt minimization: turns net balances into settlement instructions.
//!
//! [`DebtMinimizer`] runs the classic greedy two-pointer matching. It emits at
//! most `creditors + debtors - 1` transfers, but it is a heuristic, not an
//! optimal solver: some balance distributions admit fewer transfers than it
//! finds (e.g. when a subset of debtors exactly cancels a subset of
//! creditors out of sort order).
//!
//! # Closure
//!
//! Applying every instruction brings each user to within
//!
//! ```text
//! |leftover| + 0.005 * (instructions the user takes part in)
//! ```
//!
//! of zero, where the leftover is the part of its balance the matching never
//! reached: balances already within epsilon, remainders below epsilon that
//! advanced a pointer, and whatever the exhausted side could not absorb.
//! [`SettlementPlan::unmatched`] sums those leftovers. For cent-aligned
//! balances that sum to zero with no user inside the epsilon band, nothing is
//! left over and closure is exact. Fractional balances such as thirds pick up
//! the half-cent rounding error of every instruction: splitting 1.00 six ways
//! yields five transfers of 0.17 and leaves the payer at about -0.0167.

use crate::{ExpenseRecord, Money, NetBalances, SettlementPolicy, UserId};

/// A proposed payment of `amount` from `from` to `to`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SettlementInstruction {
    pub from: UserId,
    pub to: UserId,
    pub amount: Money,
}

/// Instructions together with what the matching left untouched.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SettlementPlan {
    pub instructions: Vec<SettlementInstruction>,
    /// Sum of the absolute unrounded balance every user keeps after the
    /// matching, before rounding errors.
    pub unmatched: Money,
}

impl SettlementPlan {
    /// Returns `true` when applying the instructions can only be off by
    /// rounding.
    #[must_use]
    pub fn is_fully_matched(&self) -> bool {
        self.unmatched.is_zero()
    }
}

#[derive(Debug)]
struct Position {
    user: UserId,
    remaining: Money,
}

/// Greedy settlement of net balances.
#[derive(Clone, Copy, Debug, Default)]
pub struct DebtMinimizer {
    policy: SettlementPolicy,
}

impl DebtMinimizer {
    #[must_use]
    pub const fn new(policy: SettlementPolicy) -> Self {
        Self { policy }
    }

    #[must_use]
    pub const fn policy(&self) -> &SettlementPolicy {
        &self.policy
    }

    /// Produces the transfers settling the balances in `net`.
    ///
    /// Creditors and debtors are sorted by user id before matching, so the
    /// same balances always yield the same sequence. Each emitted amount is
    /// rounded to the cent while the unrounded amount is subtracted from
    /// both parties, so closure holds only up to half a cent per instruction
    /// a user takes part in plus its unmatched leftover (see the
    /// [module docs](self)). Use [`DebtMinimizer::plan`] to learn the
    /// leftover.
    #[must_use]
    pub fn minimize(&self, net: &NetBalances) -> Vec<SettlementInstruction> {
        self.plan(net).instructions
    }

    /// Same matching as [`DebtMinimizer::minimize`], also reporting the
    /// unmatched leftover.
    #[must_use]
    pub fn plan(&self, net: &NetBalances) -> SettlementPlan {
        let epsilon = self.policy.epsilon();
        let mut creditors = Vec::new();
        let mut debtors = Vec::new();
        let mut dust = Money::ZERO;

        for (user, balance) in net.sorted() {
            if balance > epsilon {
                creditors.push(Position {
                    user,
                    remaining: balance,
                });
            } else if balance < -epsilon {
                debtors.push(Position {
                    user,
                    remaining: -balance,
                });
            } else {
                dust = dust.saturating_add(balance.abs());
            }
        }

        let mut instructions =
            Vec::with_capacity((creditors.len() + debtors.len()).saturating_sub(1));
        let (mut i, mut j) = (0, 0);
        while i < debtors.len() && j < creditors.len() {
            let debtor = &mut debtors[i];
            let creditor = &mut creditors[j];
            let matched = debtor.remaining.min(creditor.remaining);

            let amount = matched.round_to_cents(self.policy.rounding());
            if !amount.is_zero() {
                instructions.push(SettlementInstruction {
                    from: debtor.user,
                    to: creditor.user,
                    amount,
                });
            }

            debtor.remaining -= matched;
            creditor.remaining -= matched;

            if debtor.remaining < epsilon {
                i += 1;
            }
            if creditor.remaining < epsilon {
                j += 1;
            }
        }

        let remainders: Money = debtors
            .iter()
            .chain(&creditors)
            .map(|position| position.remaining)
            .sum();
        let unmatched = dust.saturating_add(remainders);
        if !unmatched.is_zero() {
            tracing::trace!(%dust, %remainders, "unmatched balance left behind");
        }

        tracing::debug!(
            creditors = creditors.len(),
            debtors = debtors.len(),
            instructions = instructions.len(),
            "minimized settlement"
        );

        SettlementPlan {
            instructions,
            unmatched,
        }
    }
}

/// Aggregates `records` and settles the resulting balances.
pub fn settle_up<'a, I>(records: I, policy: &SettlementPolicy) -> Vec<SettlementInstruction>
where
    I: IntoIterator<Item = &'a ExpenseRecord>,
{
    let net = NetBalances::aggregate_with_policy(records, policy);
    DebtMinimizer::new(*policy).minimize(&net)
}
