//! The module contains the `ExpenseRecord` type, the input of the ledger.
//!
//! A record says who fronted the money and how the amount is attributed to
//! the debtors. The engine never checks that the splits add up to the amount;
//! see [`ExpenseRecord::split_gap`].

use chrono::{DateTime, Utc};

use crate::{ExpenseId, GroupId, Money, ResultEngine, UserId};

/// Portion of an expense attributed to a debtor.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Split {
    pub debtor: UserId,
    pub share: Money,
}

impl Split {
    #[must_use]
    pub const fn new(debtor: UserId, share: Money) -> Self {
        Self { debtor, share }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExpenseRecord {
    pub payer: UserId,
    pub amount: Money,
    pub description: String,
    pub splits: Vec<Split>,
}

impl ExpenseRecord {
    pub fn new(
        payer: UserId,
        amount: Money,
        description: impl Into<String>,
        splits: Vec<Split>,
    ) -> Self {
        Self {
            payer,
            amount,
            description: description.into(),
            splits,
        }
    }

    /// Builds a record split equally across `members`.
    ///
    /// The share is `amount / N`, computed once and applied identically to
    /// every member, payer included when listed.
    pub fn equal_split(
        payer: UserId,
        amount: Money,
        description: impl Into<String>,
        members: &[UserId],
    ) -> ResultEngine<Self> {
        let share = amount.split_evenly(members.len())?;
        let splits = members
            .iter()
            .map(|&debtor| Split::new(debtor, share))
            .collect();
        Ok(Self::new(payer, amount, description, splits))
    }

    /// Sum of every split share.
    #[must_use]
    pub fn splits_total(&self) -> Money {
        self.splits.iter().map(|split| split.share).sum()
    }

    /// `amount - Σ shares`. Positive when the payer is over-credited.
    #[must_use]
    pub fn split_gap(&self) -> Money {
        self.amount.saturating_sub(self.splits_total())
    }
}

/// An expense stored in a group.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Expense {
    pub id: ExpenseId,
    pub group_id: GroupId,
    pub record: ExpenseRecord,
    pub created_at: DateTime<Utc>,
}
