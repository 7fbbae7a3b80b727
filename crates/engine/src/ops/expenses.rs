use chrono::Utc;

use crate::{
    EngineError, Expense, ExpenseId, ExpenseRecord, GroupId, Money, ResultEngine, Split, UserId,
};

use super::Book;

/// How the amount of a new expense is attributed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SplitRequest {
    /// `amount / N` for each of the N current group members.
    Equal,
    /// Caller-provided shares, taken as they are.
    Exact(Vec<Split>),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NewExpense {
    pub paid_by: UserId,
    pub amount: Money,
    pub description: String,
    pub split: SplitRequest,
}

impl Book {
    /// Logs an expense in the group.
    pub fn add_expense(
        &mut self,
        group_id: GroupId,
        expense: NewExpense,
    ) -> ResultEngine<ExpenseId> {
        if !expense.amount.is_positive() {
            return Err(EngineError::InvalidAmount(
                "amount must be greater than 0".to_string(),
            ));
        }
        self.require_user(expense.paid_by)?;
        let group = self.require_group(group_id)?;

        let record = match expense.split {
            SplitRequest::Equal => ExpenseRecord::equal_split(
                expense.paid_by,
                expense.amount,
                expense.description,
                &group.members,
            )?,
            SplitRequest::Exact(splits) => {
                ExpenseRecord::new(expense.paid_by, expense.amount, expense.description, splits)
            }
        };

        let id = ExpenseId::new();
        self.expenses.push(Expense {
            id,
            group_id,
            record,
            created_at: Utc::now(),
        });
        tracing::debug!(group = %group_id, expense = %id, "added expense");
        Ok(id)
    }

    /// Expenses of the group, oldest first.
    pub fn expenses(&self, group_id: GroupId) -> ResultEngine<Vec<&Expense>> {
        self.require_group(group_id)?;
        Ok(self
            .expenses
            .iter()
            .filter(|expense| expense.group_id == group_id)
            .collect())
    }

    pub fn delete_expense(&mut self, expense_id: ExpenseId) -> ResultEngine<()> {
        let index = self
            .expenses
            .iter()
            .position(|expense| expense.id == expense_id)
            .ok_or_else(|| EngineError::KeyNotFound(format!("expense {expense_id}")))?;
        self.expenses.remove(index);
        Ok(())
    }
}
