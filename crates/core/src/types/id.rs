//! Newtype IDs for type-safe entity references.
//!
//! The backend assigns every entity an opaque string identifier; the client
//! never invents one. Use the `define_id!` macro to create type-safe wrappers
//! that prevent accidentally mixing IDs from different entity types.

/// Macro to define a type-safe ID wrapper around an opaque server-assigned
/// string.
///
/// Creates a newtype with:
/// - `Serialize`/`Deserialize` with `#[serde(transparent)]`
/// - `Debug`, `Clone`, `PartialEq`, `Eq`, `Hash`
/// - Conversion methods: `new()`, `as_str()`
/// - `From<String>`, `From<&str>` and `Into<String>` implementations
///
/// # Example
///
/// ```rust
/// # use heartsync_core::define_id;
/// define_id!(WidgetId);
/// define_id!(GadgetId);
///
/// let widget = WidgetId::from("w-1");
/// let gadget = GadgetId::from("g-1");
///
/// // These are different types, so this won't compile:
/// // let _: WidgetId = gadget;
/// ```
#[macro_export]
macro_rules! define_id {
    ($name:ident) => {
        #[derive(
            Debug,
            Clone,
            PartialEq,
            Eq,
            Hash,
            ::serde::Serialize,
            ::serde::Deserialize
        )]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Create a new ID from a server-assigned string.
            #[must_use]
            pub const fn new(id: String) -> Self {
                Self(id)
            }

            /// Get the underlying string value.
            #[must_use]
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl ::core::fmt::Display for $name {
            fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<String> for $name {
            fn from(id: String) -> Self {
                Self(id)
            }
        }

        impl From<&str> for $name {
            fn from(id: &str) -> Self {
                Self(id.to_owned())
            }
        }

        impl From<$name> for String {
            fn from(id: $name) -> Self {
                id.0
            }
        }
    };
}

define_id!(RelationshipId);
define_id!(GoalId);
define_id!(InsightId);
define_id!(ReportId);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_id_round_trip() {
        let id = RelationshipId::from("rel-42");
        assert_eq!(id.as_str(), "rel-42");
        assert_eq!(id.to_string(), "rel-42");
        assert_eq!(String::from(id), "rel-42");
    }

    #[test]
    fn test_id_serde_transparent() {
        let id = GoalId::from("goal-7");
        let json = serde_json::to_string(&id).expect("serialize");
        assert_eq!(json, "\"goal-7\"");

        let back: GoalId = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(back, id);
    }

    #[test]
    fn test_ids_compare_by_value() {
        assert_eq!(InsightId::from("i-1"), InsightId::from("i-1"));
        assert_ne!(ReportId::from("r-1"), ReportId::from("r-2"));
    }
}
