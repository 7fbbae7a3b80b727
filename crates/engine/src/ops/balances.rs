use crate::{ExpenseRecord, ExpenseSource, GroupId, ResultEngine, UserId};

use super::Book;

impl ExpenseSource for Book {
    fn groups_for_user(&self, user: UserId) -> ResultEngine<Vec<GroupId>> {
        self.require_user(user)?;
        Ok(self
            .user_groups(user)
            .into_iter()
            .map(|group| group.id)
            .collect())
    }

    fn group_expenses(&self, group: GroupId) -> ResultEngine<Vec<ExpenseRecord>> {
        Ok(self
            .expenses(group)?
            .into_iter()
            .map(|expense| expense.record.clone())
            .collect())
    }
}
