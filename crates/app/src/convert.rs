//! Mapping between the expense file and engine types.

use api_types::{
    balance::{BalanceDetail, NetBalanceView, SettlementReport},
    expense::{ExpenseFile, ExpenseIn, SplitsType},
};
use engine::{ExpenseRecord, Money, NetBalances, ResultEngine, SettlementPlan, Split, UserId};

/// Parses every expense of the file, failing on the first malformed id.
pub fn expense_records(file: &ExpenseFile) -> ResultEngine<Vec<ExpenseRecord>> {
    file.expenses.iter().map(expense_record).collect()
}

fn expense_record(expense: &ExpenseIn) -> ResultEngine<ExpenseRecord> {
    let payer: UserId = expense.paid_by.parse()?;
    let amount = Money::new(expense.amount);

    match expense.splits_type {
        SplitsType::Equal => {
            let members = expense
                .members
                .iter()
                .map(|member| member.parse::<UserId>())
                .collect::<ResultEngine<Vec<UserId>>>()?;
            ExpenseRecord::equal_split(payer, amount, expense.description.clone(), &members)
        }
        SplitsType::Exact => {
            let splits = expense
                .splits
                .iter()
                .map(|split| -> ResultEngine<Split> {
                    Ok(Split::new(split.user_id.parse()?, Money::new(split.amount)))
                })
                .collect::<ResultEngine<Vec<Split>>>()?;
            Ok(ExpenseRecord::new(payer, amount, expense.description.clone(), splits))
        }
    }
}

pub fn balance_views(net: &NetBalances) -> Vec<NetBalanceView> {
    net.sorted()
        .into_iter()
        .map(|(user, amount)| NetBalanceView {
            user_id: user.uuid(),
            amount: amount.amount(),
        })
        .collect()
}

pub fn settlement_report(net: &NetBalances, plan: &SettlementPlan) -> SettlementReport {
    SettlementReport {
        balances: balance_views(net),
        unmatched: plan.unmatched.amount(),
        settlements: plan
            .instructions
            .iter()
            .map(|instruction| BalanceDetail {
                from_user: instruction.from.uuid(),
                to_user: instruction.to.uuid(),
                amount: instruction.amount.amount(),
            })
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use api_types::expense::SplitIn;
    use engine::EngineError;
    use rstest::rstest;
    use rust_decimal::Decimal;

    const ALICE: &str = "00000000-0000-0000-0000-000000000001";
    const BOB: &str = "00000000-0000-0000-0000-000000000002";

    fn equal(paid_by: &str, amount: i64, members: &[&str]) -> ExpenseIn {
        ExpenseIn {
            paid_by: paid_by.to_string(),
            amount: Decimal::from(amount),
            description: String::new(),
            splits_type: SplitsType::Equal,
            members: members.iter().map(ToString::to_string).collect(),
            splits: vec![],
        }
    }

    #[test]
    fn equal_expense_becomes_even_splits() {
        let file = ExpenseFile {
            expenses: vec![equal(ALICE, 40, &[ALICE, BOB])],
        };
        let records = expense_records(&file).unwrap();
        assert_eq!(records[0].splits.len(), 2);
        assert!(records[0].splits.iter().all(|s| s.share == Money::from(20)));
    }

    #[test]
    fn exact_expense_keeps_given_shares() {
        let mut expense = equal(ALICE, 40, &[]);
        expense.splits_type = SplitsType::Exact;
        expense.splits = vec![SplitIn {
            user_id: BOB.to_string(),
            amount: Decimal::from(40),
        }];

        let record = expense_record(&expense).unwrap();
        assert_eq!(record.splits, vec![Split::new(BOB.parse().unwrap(), Money::from(40))]);
    }

    #[rstest]
    #[case::bad_payer(equal("alice", 10, &[BOB]))]
    #[case::bad_member(equal(ALICE, 10, &[ALICE, "bob"]))]
    fn malformed_ids_are_rejected(#[case] expense: ExpenseIn) {
        assert_eq!(
            expense_record(&expense),
            Err(EngineError::InvalidId("invalid user id".to_string()))
        );
    }

    #[test]
    fn equal_split_needs_members() {
        assert!(matches!(
            expense_record(&equal(ALICE, 10, &[])),
            Err(EngineError::InvalidSplit(_))
        ));
    }

    #[test]
    fn report_lists_sorted_balances_and_transfers() {
        let file = ExpenseFile {
            expenses: vec![equal(BOB, 40, &[ALICE, BOB])],
        };
        let records = expense_records(&file).unwrap();
        let net = NetBalances::aggregate(&records);
        let plan = engine::DebtMinimizer::default().plan(&net);

        let report = settlement_report(&net, &plan);
        assert_eq!(report.balances[0].user_id.to_string(), ALICE);
        assert_eq!(report.balances[0].amount, Decimal::from(-20));
        assert_eq!(report.settlements.len(), 1);
        assert_eq!(report.settlements[0].to_user.to_string(), BOB);
        assert!(report.unmatched.is_zero());
    }
}
