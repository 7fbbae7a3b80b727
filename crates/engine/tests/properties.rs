use std::collections::HashMap;

use engine::{DebtMinimizer, ExpenseRecord, Money, NetBalances, SettlementPolicy, Split, UserId};
use proptest::prelude::*;
use rust_decimal::Decimal;
use uuid::Uuid;

fn user(index: usize) -> UserId {
    UserId::from_uuid(Uuid::from_u128(index as u128 + 1))
}

/// Balances in steps of 5 cents that sum to zero. The last user absorbs
/// the remainder so no entry falls in the dust band below one cent.
fn zero_sum_balances(steps: &[i64]) -> NetBalances {
    let mut entries: Vec<(UserId, Money)> = steps
        .iter()
        .enumerate()
        .map(|(idx, step)| (user(idx), Money::from_cents(step * 5)))
        .collect();
    let total: Money = entries.iter().map(|(_, money)| *money).sum();
    entries.push((user(steps.len()), -total));
    entries.into_iter().collect()
}

proptest! {
    #[test]
    fn balances_sum_to_zero_when_splits_are_exact(
        payer_indexes in prop::collection::vec(0usize..6, 0..20),
        shares in prop::collection::vec(
            prop::collection::vec((0usize..6, 0i64..=50_000), 1..6),
            0..20,
        ),
    ) {
        let records: Vec<ExpenseRecord> = payer_indexes
            .iter()
            .zip(&shares)
            .map(|(&payer, splits)| {
                let splits: Vec<Split> = splits
                    .iter()
                    .map(|&(debtor, cents)| Split::new(user(debtor), Money::from_cents(cents)))
                    .collect();
                let amount = splits.iter().map(|split| split.share).sum();
                ExpenseRecord::new(user(payer), amount, "", splits)
            })
            .collect();

        let net = NetBalances::aggregate(&records);
        prop_assert!(net.total().is_zero());
    }

    #[test]
    fn split_mismatch_shows_up_in_total(
        payer in 0usize..6,
        splits in prop::collection::vec((0usize..6, 0i64..=50_000), 0..6),
        delta in prop_oneof![-10_000i64..=-1, 1i64..=10_000],
    ) {
        let splits: Vec<Split> = splits
            .iter()
            .map(|&(debtor, cents)| Split::new(user(debtor), Money::from_cents(cents)))
            .collect();
        let exact: Money = splits.iter().map(|split| split.share).sum();
        let record = ExpenseRecord::new(user(payer), exact + Money::from_cents(delta), "", splits);

        let net = NetBalances::aggregate([&record]);
        prop_assert_eq!(net.total(), Money::from_cents(delta));
    }

    #[test]
    fn applying_instructions_settles_everyone(
        steps in prop::collection::vec(-10_000i64..=10_000, 1..8),
    ) {
        let policy = SettlementPolicy::default();
        let mut net = zero_sum_balances(&steps);

        let plan = DebtMinimizer::new(policy).plan(&net);
        prop_assert!(plan.is_fully_matched());
        for instruction in &plan.instructions {
            net.apply(instruction);
        }
        prop_assert!(net.is_settled(&policy));
        prop_assert!(net.iter().all(|(_, balance)| balance.is_zero()));
    }

    #[test]
    fn equal_splits_close_within_unmatched_plus_half_a_cent_per_transfer(
        expenses in prop::collection::vec((0usize..6, 1i64..=100_000, 1u8..64), 1..12),
    ) {
        let records: Vec<ExpenseRecord> = expenses
            .iter()
            .map(|&(payer, cents, mask)| {
                let members: Vec<UserId> =
                    (0..6usize).filter(|&bit| (mask >> bit) & 1 == 1).map(user).collect();
                ExpenseRecord::equal_split(user(payer), Money::from_cents(cents), "", &members)
                    .unwrap()
            })
            .collect();
        let mut net = NetBalances::aggregate(&records);
        let plan = DebtMinimizer::default().plan(&net);

        let mut transfers: HashMap<UserId, i64> = HashMap::new();
        for instruction in &plan.instructions {
            net.apply(instruction);
            *transfers.entry(instruction.from).or_default() += 1;
            *transfers.entry(instruction.to).or_default() += 1;
        }
        for (user, balance) in net.iter() {
            let taken = transfers.get(user).copied().unwrap_or_default();
            // plus 1e-20 for the last digits of repeating shares
            let bound = plan.unmatched
                + Money::new(Decimal::new(5 * taken, 3))
                + Money::new(Decimal::new(1, 20));
            prop_assert!(
                balance.abs() <= bound,
                "{user} ended at {balance}, bound {bound}"
            );
        }
    }

    #[test]
    fn instruction_count_is_bounded(steps in prop::collection::vec(-10_000i64..=10_000, 1..8)) {
        let policy = SettlementPolicy::default();
        let net = zero_sum_balances(&steps);
        let creditors = net.iter().filter(|(_, m)| **m > policy.epsilon()).count();
        let debtors = net.iter().filter(|(_, m)| **m < -policy.epsilon()).count();

        let instructions = DebtMinimizer::new(policy).minimize(&net);
        if creditors == 0 || debtors == 0 {
            prop_assert!(instructions.is_empty());
        } else {
            prop_assert!(instructions.len() <= creditors + debtors - 1);
        }
        prop_assert!(instructions.iter().all(|i| i.amount.is_positive() && i.from != i.to));
    }

    #[test]
    fn output_does_not_depend_on_insertion_order(
        steps in prop::collection::vec(-10_000i64..=10_000, 1..8),
    ) {
        let net = zero_sum_balances(&steps);
        let reversed: NetBalances = net.sorted().into_iter().rev().collect();
        let minimizer = DebtMinimizer::default();

        let first = minimizer.minimize(&net);
        prop_assert_eq!(&first, &minimizer.minimize(&net));
        prop_assert_eq!(&first, &minimizer.minimize(&reversed));
    }

    #[test]
    fn settled_balances_need_no_transfer(cents in prop::collection::vec(-1i64..=1, 0..8)) {
        let net: NetBalances = cents
            .iter()
            .enumerate()
            .map(|(idx, &c)| (user(idx), Money::from_cents(c)))
            .collect();
        prop_assert!(DebtMinimizer::default().minimize(&net).is_empty());
    }
}

#[test]
fn four_way_example_settles_in_three_transfers() {
    let net: NetBalances = [
        (user(0), Money::from(30)),
        (user(1), Money::from(10)),
        (user(2), Money::from(-25)),
        (user(3), Money::from(-15)),
    ]
    .into_iter()
    .collect();

    let instructions = DebtMinimizer::default().minimize(&net);
    let flat: Vec<(UserId, UserId, Money)> = instructions
        .iter()
        .map(|i| (i.from, i.to, i.amount))
        .collect();
    assert_eq!(
        flat,
        vec![
            (user(2), user(0), Money::from(25)),
            (user(3), user(0), Money::from(5)),
            (user(3), user(1), Money::from(10)),
        ]
    );
}
