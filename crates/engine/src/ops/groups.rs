use crate::{EngineError, Group, GroupId, ResultEngine, UserId};

use super::{Book, normalize_required_name};

impl Book {
    /// Creates a group; the creator becomes its first member.
    pub fn create_group(&mut self, creator: UserId, name: &str) -> ResultEngine<GroupId> {
        let name = normalize_required_name(name, "group")?;
        self.require_user(creator)?;
        let group = Group::new(name, creator);
        let id = group.id;
        self.groups.insert(id, group);
        tracing::debug!(group = %id, creator = %creator, "created group");
        Ok(id)
    }

    /// Returns the group if `requester` is a member.
    pub fn group(&self, group_id: GroupId, requester: UserId) -> ResultEngine<&Group> {
        self.require_member(group_id, requester)
    }

    /// Renames the group (creator only).
    pub fn rename_group(
        &mut self,
        group_id: GroupId,
        requester: UserId,
        name: &str,
    ) -> ResultEngine<()> {
        self.require_creator(group_id, requester, "update")?;
        let name = normalize_required_name(name, "group")?;
        self.require_group_mut(group_id)?.name = name;
        Ok(())
    }

    /// Adds `new_member` to the group.
    ///
    /// The requester must already be a member and the new member must be a
    /// registered user not yet in the group.
    pub fn add_member(
        &mut self,
        group_id: GroupId,
        requester: UserId,
        new_member: UserId,
    ) -> ResultEngine<()> {
        let group = self.require_member(group_id, requester)?;
        if group.is_member(new_member) {
            return Err(EngineError::ExistingKey(format!("member {new_member}")));
        }
        self.require_user(new_member)?;

        self.require_group_mut(group_id)?.members.push(new_member);
        tracing::debug!(group = %group_id, member = %new_member, "added member");
        Ok(())
    }

    /// Removes `target` from the group.
    ///
    /// The creator cannot be removed. Only the creator or the member
    /// themself may remove a member.
    pub fn remove_member(
        &mut self,
        group_id: GroupId,
        requester: UserId,
        target: UserId,
    ) -> ResultEngine<()> {
        let group = self.require_group(group_id)?;
        if target == group.created_by {
            return Err(EngineError::Forbidden(
                "cannot remove the group creator".to_string(),
            ));
        }
        if requester != group.created_by && requester != target {
            return Err(EngineError::Forbidden(
                "only the group creator or the member themselves can remove a member".to_string(),
            ));
        }
        if !group.is_member(target) {
            return Err(EngineError::KeyNotFound(format!("member {target}")));
        }

        self.require_group_mut(group_id)?
            .members
            .retain(|member| *member != target);
        tracing::debug!(group = %group_id, member = %target, "removed member");
        Ok(())
    }

    /// Deletes the group with its expenses and recorded settlements (creator
    /// only).
    pub fn delete_group(&mut self, group_id: GroupId, requester: UserId) -> ResultEngine<()> {
        self.require_creator(group_id, requester, "delete")?;

        self.expenses.retain(|expense| expense.group_id != group_id);
        self.settlements
            .retain(|settlement| settlement.group_id != group_id);
        self.groups.remove(&group_id);
        tracing::debug!(group = %group_id, "deleted group");
        Ok(())
    }

    /// Groups `user_id` belongs to, ordered by creation time.
    pub fn user_groups(&self, user_id: UserId) -> Vec<&Group> {
        let mut groups: Vec<&Group> = self
            .groups
            .values()
            .filter(|group| group.is_member(user_id))
            .collect();
        groups.sort_by_key(|group| (group.created_at, group.id));
        groups
    }
}
