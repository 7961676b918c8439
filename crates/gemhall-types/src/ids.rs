//! Type-safe identifier wrappers around asset-id strings.
//!
//! Cards and noble tiles are identified by opaque string asset ids assigned
//! by whatever deals the game out (e.g. `"C7"`). Strongly-typed wrappers
//! prevent a card id from being passed where a noble id is expected.

use serde::{Deserialize, Serialize};

/// Generates a newtype wrapper around an asset-id `String` with standard
/// derives and conversions.
macro_rules! define_id {
    (
        $(#[$meta:meta])*
        $name:ident
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        pub struct $name(pub String);

        impl $name {
            /// Wrap an asset id.
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            /// View the id as a string slice.
            #[must_use]
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl core::fmt::Display for $name {
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<&str> for $name {
            fn from(id: &str) -> Self {
                Self(id.to_owned())
            }
        }

        impl From<String> for $name {
            fn from(id: String) -> Self {
                Self(id)
            }
        }
    };
}

define_id! {
    /// Unique identifier for a development card.
    CardId
}

define_id! {
    /// Unique identifier for a noble tile.
    NobleId
}
