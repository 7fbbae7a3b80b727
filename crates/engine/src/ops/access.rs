use crate::{EngineError, Group, GroupId, ResultEngine, User, UserId};

use super::Book;

impl Book {
    pub(super) fn require_user(&self, user_id: UserId) -> ResultEngine<&User> {
        self.users
            .get(&user_id)
            .ok_or_else(|| EngineError::KeyNotFound(format!("user {user_id}")))
    }

    pub(super) fn require_user_mut(&mut self, user_id: UserId) -> ResultEngine<&mut User> {
        self.users
            .get_mut(&user_id)
            .ok_or_else(|| EngineError::KeyNotFound(format!("user {user_id}")))
    }

    pub(super) fn require_group(&self, group_id: GroupId) -> ResultEngine<&Group> {
        self.groups
            .get(&group_id)
            .ok_or_else(|| EngineError::KeyNotFound(format!("group {group_id}")))
    }

    pub(super) fn require_group_mut(&mut self, group_id: GroupId) -> ResultEngine<&mut Group> {
        self.groups
            .get_mut(&group_id)
            .ok_or_else(|| EngineError::KeyNotFound(format!("group {group_id}")))
    }

    /// Returns the group when `user_id` is one of its members.
    pub(super) fn require_member(
        &self,
        group_id: GroupId,
        user_id: UserId,
    ) -> ResultEngine<&Group> {
        let group = self.require_group(group_id)?;
        if !group.is_member(user_id) {
            return Err(EngineError::Forbidden(
                "you are not a member of this group".to_string(),
            ));
        }
        Ok(group)
    }

    /// Returns the group when `user_id` created it.
    pub(super) fn require_creator(
        &self,
        group_id: GroupId,
        user_id: UserId,
        action: &str,
    ) -> ResultEngine<&Group> {
        let group = self.require_group(group_id)?;
        if group.created_by != user_id {
            return Err(EngineError::Forbidden(format!(
                "only the group creator can {action} the group"
            )));
        }
        Ok(group)
    }
}
