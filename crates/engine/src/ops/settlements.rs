use chrono::Utc;

use crate::{EngineError, GroupId, Money, RecordedSettlement, ResultEngine, SettlementId, UserId};

use super::Book;

impl Book {
    /// Records a payment `paid_by` made to `paid_to` within the group.
    pub fn record_settlement(
        &mut self,
        group_id: GroupId,
        paid_by: UserId,
        paid_to: UserId,
        amount: Money,
    ) -> ResultEngine<SettlementId> {
        if !amount.is_positive() {
            return Err(EngineError::InvalidAmount(
                "amount must be greater than 0".to_string(),
            ));
        }
        self.require_group(group_id)?;
        self.require_user(paid_by)?;
        self.require_user(paid_to)?;

        let id = SettlementId::new();
        self.settlements.push(RecordedSettlement {
            id,
            group_id,
            paid_by,
            paid_to,
            amount,
            created_at: Utc::now(),
        });
        tracing::debug!(group = %group_id, settlement = %id, %amount, "recorded settlement");
        Ok(id)
    }

    pub fn group_settlements(&self, group_id: GroupId) -> ResultEngine<Vec<&RecordedSettlement>> {
        self.require_group(group_id)?;
        Ok(self
            .settlements
            .iter()
            .filter(|settlement| settlement.group_id == group_id)
            .collect())
    }

    /// Settlements where `user_id` paid or was paid.
    pub fn user_settlements(&self, user_id: UserId) -> Vec<&RecordedSettlement> {
        self.settlements
            .iter()
            .filter(|settlement| settlement.involves(user_id))
            .collect()
    }

    pub fn delete_settlement(&mut self, settlement_id: SettlementId) -> ResultEngine<()> {
        let index = self
            .settlements
            .iter()
            .position(|settlement| settlement.id == settlement_id)
            .ok_or_else(|| EngineError::KeyNotFound(format!("settlement {settlement_id}")))?;
        self.settlements.remove(index);
        Ok(())
    }
}
