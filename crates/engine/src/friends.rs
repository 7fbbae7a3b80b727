//! Friendships between users.
//!
//! A friendship starts as a pending request from `requester` to `addressee`.
//! Only the addressee can accept or reject it, and a rejected request may be
//! sent again by either side, which reuses the same record.

use chrono::{DateTime, Utc};

use crate::{FriendshipId, UserId};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FriendshipStatus {
    Pending,
    Accepted,
    Rejected,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Friendship {
    pub id: FriendshipId,
    pub requester: UserId,
    pub addressee: UserId,
    pub status: FriendshipStatus,
    pub created_at: DateTime<Utc>,
}

impl Friendship {
    pub fn request(requester: UserId, addressee: UserId) -> Self {
        Self {
            id: FriendshipId::new(),
            requester,
            addressee,
            status: FriendshipStatus::Pending,
            created_at: Utc::now(),
        }
    }

    #[must_use]
    pub fn involves(&self, user: UserId) -> bool {
        self.requester == user || self.addressee == user
    }

    /// The side of the friendship that is not `user`.
    #[must_use]
    pub fn other(&self, user: UserId) -> UserId {
        if self.requester == user {
            self.addressee
        } else {
            self.requester
        }
    }

    #[must_use]
    pub fn is_between(&self, a: UserId, b: UserId) -> bool {
        (self.requester == a && self.addressee == b) || (self.requester == b && self.addressee == a)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn user(n: u128) -> UserId {
        UserId::from_uuid(Uuid::from_u128(n))
    }

    #[test]
    fn other_side_works_from_both_ends() {
        let friendship = Friendship::request(user(1), user(2));
        assert_eq!(friendship.other(user(1)), user(2));
        assert_eq!(friendship.other(user(2)), user(1));
        assert!(friendship.is_between(user(2), user(1)));
        assert!(!friendship.involves(user(3)));
        assert_eq!(friendship.status, FriendshipStatus::Pending);
    }
}
