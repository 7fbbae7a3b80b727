//! Payments users report having made to each other.
//!
//! A recorded settlement is history: it is listed per group and per user but
//! does not take part in balance aggregation.

use chrono::{DateTime, Utc};

use crate::{GroupId, Money, SettlementId, UserId};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RecordedSettlement {
    pub id: SettlementId,
    pub group_id: GroupId,
    pub paid_by: UserId,
    pub paid_to: UserId,
    pub amount: Money,
    pub created_at: DateTime<Utc>,
}

impl RecordedSettlement {
    #[must_use]
    pub fn involves(&self, user: UserId) -> bool {
        self.paid_by == user || self.paid_to == user
    }
}
