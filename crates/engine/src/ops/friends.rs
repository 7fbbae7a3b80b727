use crate::{EngineError, Friendship, FriendshipId, FriendshipStatus, ResultEngine, User, UserId};

use super::Book;

/// A friendship seen from one side, with the other user resolved.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FriendEntry<'a> {
    pub friendship: &'a Friendship,
    pub user: &'a User,
}

/// Friendship listing of a user.
///
/// Friendships whose other side no longer resolves to a user are left out of
/// `entries` and counted in `skipped`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FriendList<'a> {
    pub entries: Vec<FriendEntry<'a>>,
    pub skipped: usize,
}

impl FriendList<'_> {
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.skipped == 0
    }
}

impl Book {
    /// Sends a friend request from `requester` to `addressee`.
    ///
    /// A previously rejected request between the two is reopened in place,
    /// with `requester` as the new sender.
    pub fn send_friend_request(
        &mut self,
        requester: UserId,
        addressee: UserId,
    ) -> ResultEngine<FriendshipId> {
        if requester == addressee {
            return Err(EngineError::InvalidRequest(
                "you cannot send a friend request to yourself".to_string(),
            ));
        }
        self.require_user(requester)?;
        self.require_user(addressee)?;

        if let Some(existing) = self
            .friendships
            .iter_mut()
            .find(|friendship| friendship.is_between(requester, addressee))
        {
            return match existing.status {
                FriendshipStatus::Accepted => Err(EngineError::ExistingKey(
                    "you are already friends with this user".to_string(),
                )),
                FriendshipStatus::Pending => Err(EngineError::ExistingKey(
                    "a friend request already exists between you and this user".to_string(),
                )),
                FriendshipStatus::Rejected => {
                    existing.requester = requester;
                    existing.addressee = addressee;
                    existing.status = FriendshipStatus::Pending;
                    tracing::debug!(friendship = %existing.id, "reopened friend request");
                    Ok(existing.id)
                }
            };
        }

        let friendship = Friendship::request(requester, addressee);
        let id = friendship.id;
        self.friendships.push(friendship);
        tracing::debug!(friendship = %id, %requester, %addressee, "sent friend request");
        Ok(id)
    }

    pub fn accept_friend_request(
        &mut self,
        user: UserId,
        request: FriendshipId,
    ) -> ResultEngine<()> {
        self.answer_request(user, request, FriendshipStatus::Accepted, "accept")
    }

    pub fn reject_friend_request(
        &mut self,
        user: UserId,
        request: FriendshipId,
    ) -> ResultEngine<()> {
        self.answer_request(user, request, FriendshipStatus::Rejected, "reject")
    }

    fn answer_request(
        &mut self,
        user: UserId,
        request: FriendshipId,
        status: FriendshipStatus,
        action: &str,
    ) -> ResultEngine<()> {
        let friendship = self.require_friendship_mut(request)?;
        if friendship.addressee != user {
            return Err(EngineError::Forbidden(format!(
                "you can only {action} requests sent to you"
            )));
        }
        if friendship.status != FriendshipStatus::Pending {
            return Err(EngineError::InvalidRequest(
                "this request is not pending".to_string(),
            ));
        }
        friendship.status = status;
        tracing::debug!(friendship = %request, ?status, "answered friend request");
        Ok(())
    }

    /// Accepted friendships of `user`.
    pub fn friends(&self, user: UserId) -> ResultEngine<FriendList<'_>> {
        self.require_user(user)?;
        Ok(self.friend_list(user, |friendship| {
            friendship.status == FriendshipStatus::Accepted && friendship.involves(user)
        }))
    }

    /// Pending requests sent to `user`.
    pub fn pending_requests(&self, user: UserId) -> ResultEngine<FriendList<'_>> {
        self.require_user(user)?;
        Ok(self.friend_list(user, |friendship| {
            friendship.status == FriendshipStatus::Pending && friendship.addressee == user
        }))
    }

    /// Pending requests sent by `user`.
    pub fn sent_requests(&self, user: UserId) -> ResultEngine<FriendList<'_>> {
        self.require_user(user)?;
        Ok(self.friend_list(user, |friendship| {
            friendship.status == FriendshipStatus::Pending && friendship.requester == user
        }))
    }

    /// Removes a friendship or cancels a request. Either side may do it.
    pub fn remove_friend(&mut self, user: UserId, friendship: FriendshipId) -> ResultEngine<()> {
        if !self.require_friendship_mut(friendship)?.involves(user) {
            return Err(EngineError::Forbidden(
                "you are not part of this friendship".to_string(),
            ));
        }
        self.friendships.retain(|existing| existing.id != friendship);
        tracing::debug!(%friendship, "removed friendship");
        Ok(())
    }

    fn require_friendship_mut(&mut self, id: FriendshipId) -> ResultEngine<&mut Friendship> {
        self.friendships
            .iter_mut()
            .find(|friendship| friendship.id == id)
            .ok_or_else(|| EngineError::KeyNotFound(format!("friendship {id}")))
    }

    fn friend_list(&self, user: UserId, keep: impl Fn(&Friendship) -> bool) -> FriendList<'_> {
        let mut list = FriendList::default();
        for friendship in self.friendships.iter().filter(|&friendship| keep(friendship)) {
            let other = friendship.other(user);
            match self.users.get(&other) {
                Some(other) => list.entries.push(FriendEntry {
                    friendship,
                    user: other,
                }),
                None => {
                    list.skipped += 1;
                    tracing::warn!(
                        friendship = %friendship.id,
                        user = %other,
                        "skipping friendship with unknown user"
                    );
                }
            }
        }
        list
    }
}
