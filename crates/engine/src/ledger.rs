//! Ledger aggregation: folds expense records into net balances.

use std::collections::{HashMap, hash_map};

use crate::{ExpenseRecord, Money, SettlementInstruction, SettlementPolicy, UserId};

/// Net position of every user seen in a set of expense records.
///
/// Positive = the user is owed money, negative = the user owes money. Users
/// that never appear are absent, which is equivalent to a zero balance.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct NetBalances {
    balances: HashMap<UserId, Money>,
}

impl NetBalances {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Folds `records` into net balances.
    ///
    /// The payer is credited the full amount and every debtor is debited its
    /// share. Records whose splits do not add up are accepted as they are.
    pub fn aggregate<'a, I>(records: I) -> Self
    where
        I: IntoIterator<Item = &'a ExpenseRecord>,
    {
        let mut net = Self::new();
        for record in records {
            net.fold(record);
        }
        net
    }

    /// Same fold as [`NetBalances::aggregate`], warning about every record
    /// whose splits miss the amount by more than the policy epsilon.
    pub fn aggregate_with_policy<'a, I>(records: I, policy: &SettlementPolicy) -> Self
    where
        I: IntoIterator<Item = &'a ExpenseRecord>,
    {
        let mut net = Self::new();
        let mut unbalanced = 0usize;
        for record in records {
            let gap = record.split_gap();
            if !policy.is_settled(gap) {
                unbalanced += 1;
                tracing::warn!(
                    payer = %record.payer,
                    amount = %record.amount,
                    gap = %gap,
                    splits = record.splits.len(),
                    "expense splits do not add up to the amount"
                );
            }
            net.fold(record);
        }
        tracing::debug!(users = net.len(), unbalanced, "aggregated net balances");
        net
    }

    fn fold(&mut self, record: &ExpenseRecord) {
        self.credit(record.payer, record.amount);
        for split in &record.splits {
            self.credit(split.debtor, -split.share);
        }
    }

    /// Adds `amount` to the user's balance.
    ///
    /// A balance that would leave the representable range is clamped to
    /// [`Money::MAX`] or [`Money::MIN`].
    pub fn credit(&mut self, user: UserId, amount: Money) {
        let balance = self.balances.entry(user).or_default();
        let current = *balance;
        *balance = current.checked_add(amount).unwrap_or_else(|| {
            tracing::warn!(%user, %amount, "balance out of range, clamping");
            current.saturating_add(amount)
        });
    }

    /// Applies a transfer: the payer's balance goes up, the payee's goes down.
    ///
    /// A debtor paying what they owe moves toward zero from below and the
    /// creditor receiving it moves toward zero from above.
    pub fn apply(&mut self, instruction: &SettlementInstruction) {
        self.credit(instruction.from, instruction.amount);
        self.credit(instruction.to, -instruction.amount);
    }

    #[must_use]
    pub fn get(&self, user: &UserId) -> Option<Money> {
        self.balances.get(user).copied()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.balances.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.balances.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&UserId, &Money)> {
        self.balances.iter()
    }

    /// Sum of every balance. Zero when every record was fully split.
    /// Saturates like [`NetBalances::credit`].
    #[must_use]
    pub fn total(&self) -> Money {
        self.balances.values().sum()
    }

    /// Entries ordered by user id.
    #[must_use]
    pub fn sorted(&self) -> Vec<(UserId, Money)> {
        let mut entries: Vec<(UserId, Money)> =
            self.balances.iter().map(|(user, money)| (*user, *money)).collect();
        entries.sort_unstable_by_key(|(user, _)| *user);
        entries
    }

    /// Returns `true` when every balance is within the policy epsilon.
    #[must_use]
    pub fn is_settled(&self, policy: &SettlementPolicy) -> bool {
        self.balances.values().all(|money| policy.is_settled(*money))
    }
}

impl FromIterator<(UserId, Money)> for NetBalances {
    fn from_iter<T: IntoIterator<Item = (UserId, Money)>>(iter: T) -> Self {
        let mut net = Self::new();
        for (user, amount) in iter {
            net.credit(user, amount);
        }
        net
    }
}

impl IntoIterator for NetBalances {
    type Item = (UserId, Money);
    type IntoIter = hash_map::IntoIter<UserId, Money>;

    fn into_iter(self) -> Self::IntoIter {
        self.balances.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Split;
    use rstest::{fixture, rstest};
    use rust_decimal::Decimal;
    use uuid::Uuid;

    fn user(n: u128) -> UserId {
        UserId::from_uuid(Uuid::from_u128(n))
    }

    #[fixture]
    fn dinner() -> ExpenseRecord {
        ExpenseRecord::equal_split(
            user(1),
            Money::from(90),
            "dinner",
            &[user(1), user(2), user(3)],
        )
        .unwrap()
    }

    #[rstest]
    fn payer_is_credited_and_debtors_debited(dinner: ExpenseRecord) {
        let net = NetBalances::aggregate([&dinner]);

        assert_eq!(net.get(&user(1)), Some(Money::from(60)));
        assert_eq!(net.get(&user(2)), Some(Money::from(-30)));
        assert_eq!(net.get(&user(3)), Some(Money::from(-30)));
        assert!(net.total().is_zero());
    }

    #[rstest]
    fn unknown_users_are_absent(dinner: ExpenseRecord) {
        let net = NetBalances::aggregate([&dinner]);
        assert_eq!(net.len(), 3);
        assert_eq!(net.get(&user(4)), None);
    }

    #[test]
    fn empty_input_gives_empty_balances() {
        let net = NetBalances::aggregate(std::iter::empty());
        assert!(net.is_empty());
        assert!(net.is_settled(&SettlementPolicy::default()));
    }

    #[test]
    fn record_without_splits_over_credits_payer() {
        let record = ExpenseRecord::new(user(1), Money::from(40), "gift", vec![]);
        let net = NetBalances::aggregate_with_policy([&record], &SettlementPolicy::default());

        assert_eq!(net.get(&user(1)), Some(Money::from(40)));
        assert_eq!(net.total(), Money::from(40));
    }

    #[test]
    fn repeated_thirds_stay_within_tolerance() {
        let members = [user(1), user(2), user(3)];
        let records: Vec<ExpenseRecord> = (0..1_000)
            .map(|_| ExpenseRecord::equal_split(user(1), Money::from(100), "", &members).unwrap())
            .collect();

        let net = NetBalances::aggregate(&records);
        assert!(SettlementPolicy::default().is_settled(net.total()));
    }

    #[test]
    fn payer_may_be_its_own_debtor() {
        let record = ExpenseRecord::new(
            user(1),
            Money::from(10),
            "self",
            vec![Split::new(user(1), Money::from(10))],
        );
        let net = NetBalances::aggregate([&record]);
        assert_eq!(net.get(&user(1)), Some(Money::ZERO));
    }

    #[test]
    fn huge_amounts_clamp_instead_of_panicking() {
        let huge = Money::new(Decimal::from_i128_with_scale(5 * 10i128.pow(28), 0));
        let record = ExpenseRecord::new(user(1), huge, "", vec![Split::new(user(2), huge)]);

        let policy = SettlementPolicy::default();
        let net = NetBalances::aggregate_with_policy([&record, &record], &policy);
        assert_eq!(net.get(&user(1)), Some(Money::MAX));
        assert_eq!(net.get(&user(2)), Some(Money::MIN));
        assert!(net.total().is_zero());
    }

    #[test]
    fn sorted_orders_by_user_id() {
        let net: NetBalances = [
            (user(3), Money::from(1)),
            (user(1), Money::from(2)),
            (user(2), Money::from(-3)),
        ]
        .into_iter()
        .collect();
        let order: Vec<UserId> = net.sorted().into_iter().map(|(u, _)| u).collect();
        assert_eq!(order, vec![user(1), user(2), user(3)]);
    }

    #[test]
    fn apply_moves_both_parties_toward_zero() {
        let mut net: NetBalances = [(user(1), Money::from(25)), (user(2), Money::from(-25))]
            .into_iter()
            .collect();
        net.apply(&SettlementInstruction {
            from: user(2),
            to: user(1),
            amount: Money::from(25),
        });
        assert!(net.is_settled(&SettlementPolicy::default()));
    }
}
