//! Users known to the book.
//!
//! Authentication lives outside the engine; a user here is an id, a display
//! name and an email that is unique across the book.

use crate::UserId;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct User {
    pub id: UserId,
    pub name: String,
    /// Trimmed and lowercased.
    pub email: String,
}
