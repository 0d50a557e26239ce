//! Newtype wrappers around `u64` for all domain entity identifiers.
//!
//! Using distinct types prevents accidentally passing a `RoleId` where a
//! `UserId` is expected. Identifiers are plain integers because the SSO
//! provider hands out integer account ids, and the native user id is the
//! same value.

use std::fmt;
use std::num::ParseIntError;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Macro to define a newtype ID wrapper around `u64`.
macro_rules! define_id {
    (
        $(#[$meta:meta])*
        $name:ident
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub u64);

        impl $name {
            /// Create an identifier from a raw integer.
            pub fn from_u64(value: u64) -> Self {
                Self(value)
            }

            /// Return the inner integer value.
            pub fn as_u64(&self) -> u64 {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl FromStr for $name {
            type Err = ParseIntError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Ok(Self(s.parse()?))
            }
        }

        impl From<u64> for $name {
            fn from(value: u64) -> Self {
                Self(value)
            }
        }

        impl From<$name> for u64 {
            fn from(value: $name) -> Self {
                value.0
            }
        }
    };
}

define_id!(
    /// Durable identifier of a user record in the user store.
    UserId
);

define_id!(
    /// Unique identifier for a role.
    RoleId
);

define_id!(
    /// The durable, opaque identity key a token's subject refers to.
    ///
    /// Stable across sessions; equal to the SSO account id and to the native
    /// user record id.
    IdentityKey
);

impl From<IdentityKey> for UserId {
    fn from(value: IdentityKey) -> Self {
        Self(value.0)
    }
}

impl From<UserId> for IdentityKey {
    fn from(value: UserId) -> Self {
        Self(value.0)
    }
}
