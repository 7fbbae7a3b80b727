//! Expense-splitting ledger engine.
//!
//! The core is a one-way pipeline:
//!
//! 1. [`NetBalances::aggregate`] folds [`ExpenseRecord`]s into net balances.
//! 2. [`DebtMinimizer::minimize`] reduces the balances to a list of
//!    [`SettlementInstruction`]s.
//!
//! Both steps are pure and synchronous. Around them sit an in-memory
//! [`Book`] of users, friendships, groups and expenses and a [`BalanceService`] that reads
//! expense records from any [`ExpenseSource`].
//!
//! ```rust
//! use engine::{ExpenseRecord, Money, SettlementPolicy, UserId, settle_up};
//!
//! let (alice, bob, carol) = (UserId::new(), UserId::new(), UserId::new());
//! let dinner =
//!     ExpenseRecord::equal_split(alice, Money::from(90), "dinner", &[alice, bob, carol]).unwrap();
//!
//! let plan = settle_up([&dinner], &SettlementPolicy::default());
//! assert_eq!(plan.len(), 2);
//! assert!(plan.iter().all(|i| i.to == alice && i.amount == Money::from(30)));
//! ```

pub use error::EngineError;
pub use expense::{Expense, ExpenseRecord, Split};
pub use friends::{Friendship, FriendshipStatus};
pub use groups::Group;
pub use ids::{ExpenseId, FriendshipId, GroupId, SettlementId, UserId};
pub use ledger::NetBalances;
pub use money::Money;
pub use ops::{Book, FriendEntry, FriendList, NewExpense, SplitRequest};
pub use policy::{RoundingMode, SettlementPolicy};
pub use service::{BalanceService, ExpenseSource, UserOverview};
pub use settle::{DebtMinimizer, SettlementInstruction, SettlementPlan, settle_up};
pub use settlements::RecordedSettlement;
pub use users::User;

mod error;
mod expense;
mod friends;
mod groups;
mod ids;
mod ledger;
mod money;
mod ops;
mod policy;
mod service;
mod settle;
mod settlements;
mod users;

pub type ResultEngine<T> = Result<T, EngineError>;
