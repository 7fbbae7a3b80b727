//! Wire shapes exchanged with the outside world.
//!
//! Amounts are plain decimals: they deserialize from JSON numbers or strings
//! and serialize as strings so no precision is lost on the way out.

use serde::{Deserialize, Serialize};

pub mod expense {
    use super::*;
    use rust_decimal::Decimal;

    /// How an expense amount is divided.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
    #[serde(rename_all = "snake_case")]
    pub enum SplitsType {
        /// `amount / N` for each listed member.
        #[default]
        Equal,
        /// Shares listed one by one in `splits`.
        Exact,
    }

    #[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
    pub struct SplitIn {
        pub user_id: String,
        pub amount: Decimal,
    }

    /// One expense as found in an expense file.
    ///
    /// `members` is read for `equal` splits, `splits` for `exact` ones. User
    /// ids are kept as raw strings; the engine parses them.
    #[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
    pub struct ExpenseIn {
        pub paid_by: String,
        pub amount: Decimal,
        #[serde(default)]
        pub description: String,
        #[serde(default)]
        pub splits_type: SplitsType,
        #[serde(default)]
        pub members: Vec<String>,
        #[serde(default)]
        pub splits: Vec<SplitIn>,
    }

    /// A snapshot of expenses, from one group or merged across groups.
    #[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
    pub struct ExpenseFile {
        pub expenses: Vec<ExpenseIn>,
    }
}

pub mod balance {
    use super::*;
    use rust_decimal::Decimal;
    use uuid::Uuid;

    /// A suggested payment.
    #[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
    pub struct BalanceDetail {
        pub from_user: Uuid,
        pub to_user: Uuid,
        pub amount: Decimal,
    }

    /// Net position of a user: positive is owed, negative owes.
    #[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
    pub struct NetBalanceView {
        pub user_id: Uuid,
        pub amount: Decimal,
    }

    #[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
    pub struct SettlementReport {
        pub balances: Vec<NetBalanceView>,
        pub settlements: Vec<BalanceDetail>,
        /// Balance the settlements leave untouched, summed over users.
        #[serde(default)]
        pub unmatched: Decimal,
    }
}
