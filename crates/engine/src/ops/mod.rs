use std::collections::HashMap;

use crate::{
    EngineError, Expense, Friendship, Group, GroupId, RecordedSettlement, ResultEngine, User,
    UserId,
};

mod access;
mod balances;
mod expenses;
mod friends;
mod groups;
mod settlements;
mod users;

pub use expenses::{NewExpense, SplitRequest};
pub use friends::{FriendEntry, FriendList};

/// In-memory book of users, friendships, groups, expenses and recorded
/// settlements.
///
/// The book is the management layer around the ledger core: it enforces
/// group membership rules and hands expense records to the
/// [`BalanceService`](crate::BalanceService) through [`ExpenseSource`](crate::ExpenseSource).
#[derive(Debug, Default)]
pub struct Book {
    users: HashMap<UserId, User>,
    groups: HashMap<GroupId, Group>,
    expenses: Vec<Expense>,
    settlements: Vec<RecordedSettlement>,
    friendships: Vec<Friendship>,
}

impl Book {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

fn normalize_required_name(value: &str, label: &str) -> ResultEngine<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(EngineError::InvalidName(format!(
            "{label} name must not be empty"
        )));
    }
    Ok(trimmed.to_string())
}
