//! Newtype IDs for type-safe entity references.
//!
//! The same URL path carries a customer id for some methods and a purchase
//! id for others, so the handlers use distinct wrapper types to keep the two
//! from being mixed up.

/// Define a type-safe ID wrapper around `i64`.
///
/// Generates `Serialize`/`Deserialize` with `#[serde(transparent)]`, a
/// transparent `sqlx::Type` so the wrapper binds and decodes as a plain
/// integer column, and `new()`/`as_i64()` conversions.
macro_rules! define_id {
    ($name:ident) => {
        #[derive(
            Debug,
            Clone,
            Copy,
            PartialEq,
            Eq,
            Hash,
            ::serde::Serialize,
            ::serde::Deserialize,
            ::sqlx::Type,
        )]
        #[serde(transparent)]
        #[sqlx(transparent)]
        pub struct $name(i64);

        impl $name {
            /// Create a new ID from an i64 value.
            #[must_use]
            pub const fn new(id: i64) -> Self {
                Self(id)
            }

            /// Get the underlying i64 value.
            #[must_use]
            pub const fn as_i64(&self) -> i64 {
                self.0
            }
        }

        impl ::core::fmt::Display for $name {
            fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<i64> for $name {
            fn from(id: i64) -> Self {
                Self(id)
            }
        }

        impl From<$name> for i64 {
            fn from(id: $name) -> Self {
                id.0
            }
        }
    };
}

define_id!(CustomerId);
define_id!(PurchaseId);
