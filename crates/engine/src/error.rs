//! The module contains the error the engine can throw.
//!
//! Balance aggregation and debt minimization are total and never fail. Errors
//! come from the surrounding layers:
//!
//! - [`InvalidId`] thrown when an identifier cannot be parsed.
//! - [`KeyNotFound`] thrown when a user, group, expense or settlement is missing.
//! - [`Forbidden`] thrown when the requester lacks the right on a group or
//!   a friend request.
//! - [`InvalidRequest`] thrown when a friend request is in the wrong state.
//! - [`Source`] thrown when an [`ExpenseSource`] cannot load expenses.
//!
//!  [`InvalidId`]: EngineError::InvalidId
//!  [`KeyNotFound`]: EngineError::KeyNotFound
//!  [`Forbidden`]: EngineError::Forbidden
//!  [`InvalidRequest`]: EngineError::InvalidRequest
//!  [`Source`]: EngineError::Source
//!  [`ExpenseSource`]: crate::ExpenseSource
use thiserror::Error;

/// Engine custom errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    #[error("\"{0}\" key not found!")]
    KeyNotFound(String),
    #[error("\"{0}\" already present!")]
    ExistingKey(String),
    #[error("Invalid id: {0}")]
    InvalidId(String),
    #[error("Invalid amount: {0}")]
    InvalidAmount(String),
    #[error("Invalid name: {0}")]
    InvalidName(String),
    #[error("Invalid email: {0}")]
    InvalidEmail(String),
    #[error("Invalid split: {0}")]
    InvalidSplit(String),
    #[error("Invalid settlement policy: {0}")]
    InvalidPolicy(String),
    #[error("Forbidden: {0}")]
    Forbidden(String),
    #[error("Invalid request: {0}")]
    InvalidRequest(String),
    #[error("Expense source failure: {0}")]
    Source(String),
}
