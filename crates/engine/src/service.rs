//! Balance queries over an injected expense source.
//!
//! The service never reaches into ambient state: the caller hands it an
//! [`ExpenseSource`] and every query reads one snapshot of expense records
//! from it before running the ledger core.

use crate::{
    DebtMinimizer, ExpenseRecord, GroupId, NetBalances, ResultEngine, SettlementInstruction,
    SettlementPolicy, UserId,
};

/// Where expense records come from.
pub trait ExpenseSource {
    /// Groups the user belongs to.
    fn groups_for_user(&self, user: UserId) -> ResultEngine<Vec<GroupId>>;

    /// Every expense record of the group.
    fn group_expenses(&self, group: GroupId) -> ResultEngine<Vec<ExpenseRecord>>;
}

impl<S: ExpenseSource + ?Sized> ExpenseSource for &S {
    fn groups_for_user(&self, user: UserId) -> ResultEngine<Vec<GroupId>> {
        (**self).groups_for_user(user)
    }

    fn group_expenses(&self, group: GroupId) -> ResultEngine<Vec<ExpenseRecord>> {
        (**self).group_expenses(group)
    }
}

/// Cross-group settlement plan of a user.
///
/// Groups whose expenses could not be loaded are left out of `instructions`
/// and counted in `skipped_groups`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct UserOverview {
    pub instructions: Vec<SettlementInstruction>,
    pub skipped_groups: usize,
}

impl UserOverview {
    /// Returns `true` when every group contributed.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.skipped_groups == 0
    }
}

#[derive(Debug)]
pub struct BalanceService<S> {
    source: S,
    minimizer: DebtMinimizer,
}

impl<S: ExpenseSource> BalanceService<S> {
    pub fn new(source: S, policy: SettlementPolicy) -> Self {
        Self {
            source,
            minimizer: DebtMinimizer::new(policy),
        }
    }

    fn policy(&self) -> &SettlementPolicy {
        self.minimizer.policy()
    }

    /// Net balances of a single group.
    pub fn group_balances(&self, group: GroupId) -> ResultEngine<NetBalances> {
        let records = self.source.group_expenses(group)?;
        Ok(NetBalances::aggregate_with_policy(&records, self.policy()))
    }

    /// Settlement instructions closing a single group.
    pub fn group_plan(&self, group: GroupId) -> ResultEngine<Vec<SettlementInstruction>> {
        let net = self.group_balances(group)?;
        Ok(self.minimizer.minimize(&net))
    }

    /// Settlement instructions over every group of `user`.
    ///
    /// The expenses of all groups are merged into one list before
    /// aggregation, so debts cancel across groups. A group whose expenses
    /// fail to load is skipped and counted; failing to list the groups is
    /// an error.
    pub fn user_overview(&self, user: UserId) -> ResultEngine<UserOverview> {
        let groups = self.source.groups_for_user(user)?;

        let mut records = Vec::new();
        let mut skipped_groups = 0;
        for group in groups {
            match self.source.group_expenses(group) {
                Ok(group_records) => records.extend(group_records),
                Err(err) => {
                    skipped_groups += 1;
                    tracing::warn!(%user, %group, "skipping group in overview: {err}");
                }
            }
        }

        let net = NetBalances::aggregate_with_policy(&records, self.policy());
        Ok(UserOverview {
            instructions: self.minimizer.minimize(&net),
            skipped_groups,
        })
    }
}
