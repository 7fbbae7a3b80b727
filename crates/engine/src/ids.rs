//! Strongly typed identifiers.
//!
//! Every identifier wraps a [`Uuid`]. They are ordered by UUID byte order,
//! which is the canonical order the debt minimizer sorts participants by.

use std::{fmt, str::FromStr};

use uuid::Uuid;

use crate::EngineError;

macro_rules! uuid_id {
    ($(#[$meta:meta])* $name:ident, $label:literal) => {
        $(#[$meta])*
        #[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
        pub struct $name(Uuid);

        impl $name {
            /// Draws a fresh random identifier.
            #[must_use]
            pub fn new() -> Self {
                Self(Uuid::new_v4())
            }

            #[must_use]
            pub const fn from_uuid(uuid: Uuid) -> Self {
                Self(uuid)
            }

            #[must_use]
            pub const fn uuid(self) -> Uuid {
                self.0
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                fmt::Display::fmt(&self.0, f)
            }
        }

        impl FromStr for $name {
            type Err = EngineError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Uuid::parse_str(s.trim())
                    .map(Self)
                    .map_err(|_| {
                        EngineError::InvalidId(concat!("invalid ", $label, " id").to_string())
                    })
            }
        }

        impl From<Uuid> for $name {
            fn from(value: Uuid) -> Self {
                Self(value)
            }
        }
    };
}

uuid_id!(
    /// Identifies a user across groups.
    UserId,
    "user"
);
uuid_id!(
    /// Identifies a group of users sharing expenses.
    GroupId,
    "group"
);
uuid_id!(ExpenseId, "expense");
uuid_id!(SettlementId, "settlement");
uuid_id!(FriendshipId, "friendship");
