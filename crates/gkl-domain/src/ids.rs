//! Strongly-typed row identifiers
//!
//! ULID newtypes for funds, documents, entities, and links. ULIDs are
//! sortable by creation time, which keeps store iteration stable across
//! reruns without a separate sequence column.

use serde::{Deserialize, Serialize};
use ulid::Ulid;

macro_rules! id_type {
    ($(#[$doc:meta])* $name:ident) => {
        $(#[$doc])*
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
        )]
        pub struct $name(pub Ulid);

        impl $name {
            /// Generate a new identifier
            #[inline]
            #[must_use]
            pub fn new() -> Self {
                Self(Ulid::new())
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

id_type! {
    /// Fund scope identifier: every row in the graph is owned by exactly one fund
    FundId
}

id_type! {
    /// Registry document identifier
    DocumentId
}

id_type! {
    /// Knowledge entity identifier
    EntityId
}

id_type! {
    /// Knowledge link identifier
    LinkId
}
