//! The `Group` holds the members sharing expenses. The creator is always a
//! member and cannot be removed.

use chrono::{DateTime, Utc};

use crate::{GroupId, UserId};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Group {
    pub id: GroupId,
    pub name: String,
    pub created_by: UserId,
    pub members: Vec<UserId>,
    pub created_at: DateTime<Utc>,
}

impl Group {
    pub fn new(name: String, created_by: UserId) -> Self {
        Self {
            id: GroupId::new(),
            name,
            created_by,
            members: vec![created_by],
            created_at: Utc::now(),
        }
    }

    #[must_use]
    pub fn is_member(&self, user: UserId) -> bool {
        self.members.contains(&user)
    }
}
