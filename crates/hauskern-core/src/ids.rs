//! Strongly Typed Identifiers
//!
//! This module provides type-safe identifier types for hauskern.
//! Using the newtype pattern, these types prevent accidental misuse of
//! different ID types at compile time.
//!
//! # Example
//!
//! ```
//! use hauskern_core::{BuildingId, PropertyId};
//!
//! let property = PropertyId::new();
//! let building = BuildingId::new();
//!
//! // Type safety: cannot pass BuildingId where PropertyId is expected
//! fn requires_property(id: PropertyId) -> String {
//!     id.to_string()
//! }
//!
//! let result = requires_property(property);
//! // requires_property(building); // This would not compile!
//! ```

use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use std::str::FromStr;
use uuid::Uuid;

/// Error type for ID parsing failures
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseIdError {
    /// The type of ID that failed to parse
    pub id_type: &'static str,
    /// The underlying UUID parse error message
    pub message: String,
}

impl Display for ParseIdError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "Failed to parse {}: {}", self.id_type, self.message)
    }
}

impl std::error::Error for ParseIdError {}

/// Macro to define a strongly-typed ID type
macro_rules! define_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(Uuid);

        impl $name {
            /// Creates a new random ID using UUID v4.
            #[must_use]
            pub fn new() -> Self {
                Self(Uuid::new_v4())
            }

            /// Creates an ID from an existing UUID.
            #[must_use]
            pub fn from_uuid(uuid: Uuid) -> Self {
                Self(uuid)
            }

            /// Returns a reference to the underlying UUID.
            #[must_use]
            pub fn as_uuid(&self) -> &Uuid {
                &self.0
            }

            /// Consumes the ID, returning the underlying UUID.
            #[must_use]
            pub fn into_uuid(self) -> Uuid {
                self.0
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl Display for $name {
            fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<$name> for Uuid {
            fn from(id: $name) -> Uuid {
                id.0
            }
        }

        impl FromStr for $name {
            type Err = ParseIdError;

            fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
                Uuid::parse_str(s)
                    .map(Self)
                    .map_err(|e| ParseIdError {
                        id_type: stringify!($name),
                        message: e.to_string(),
                    })
            }
        }
    };
}

define_id!(
    /// Strongly typed identifier for properties (the root of the hierarchy).
    ///
    /// # Example
    ///
    /// ```
    /// use hauskern_core::PropertyId;
    /// use uuid::Uuid;
    ///
    /// // Create a new random PropertyId
    /// let property_id = PropertyId::new();
    /// println!("Property: {}", property_id);
    ///
    /// // Create from existing UUID
    /// let uuid = Uuid::new_v4();
    /// let property_id = PropertyId::from_uuid(uuid);
    /// assert_eq!(property_id.as_uuid(), &uuid);
    ///
    /// // Parse from string
    /// let property_id: PropertyId = "550e8400-e29b-41d4-a716-446655440000".parse().unwrap();
    /// ```
    PropertyId
);

define_id!(
    /// Strongly typed identifier for buildings owned by a property.
    ///
    /// # Example
    ///
    /// ```
    /// use hauskern_core::BuildingId;
    ///
    /// let building_id = BuildingId::new();
    /// println!("Building: {}", building_id);
    /// ```
    BuildingId
);

define_id!(
    /// Strongly typed identifier for units owned by a building.
    ///
    /// # Example
    ///
    /// ```
    /// use hauskern_core::UnitId;
    ///
    /// let unit_id = UnitId::new();
    /// println!("Unit: {}", unit_id);
    /// ```
    UnitId
);

define_id!(
    /// Strongly typed identifier for manager contacts referenced by properties.
    ManagerId
);

define_id!(
    /// Strongly typed identifier for accountant contacts referenced by properties.
    AccountantId
);

#[cfg(test)]
mod tests {
    use super::*;

    mod property_id_tests {
        use super::*;

        #[test]
        fn test_new_creates_valid_id() {
            let id = PropertyId::new();
            let id_str = id.to_string();
            // UUID format: 8-4-4-4-12 hex digits
            assert_eq!(id_str.len(), 36);
            assert!(id_str.contains('-'));
        }

        #[test]
        fn test_from_uuid_preserves_value() {
            let uuid = Uuid::new_v4();
            let id = PropertyId::from_uuid(uuid);
            assert_eq!(id.as_uuid(), &uuid);
        }

        #[test]
        fn test_display_returns_uuid_string() {
            let uuid = Uuid::parse_str("550e8400-e29b-41d4-a716-446655440000").unwrap();
            let id = PropertyId::from_uuid(uuid);
            assert_eq!(id.to_string(), "550e8400-e29b-41d4-a716-446655440000");
        }

        #[test]
        fn test_default_creates_new_id() {
            let id1 = PropertyId::default();
            let id2 = PropertyId::default();
            // Default should create new random IDs
            assert_ne!(id1, id2);
        }

        #[test]
        fn test_parse_rejects_garbage() {
            let parsed = "not-a-uuid".parse::<PropertyId>();
            let err = parsed.unwrap_err();
            assert_eq!(err.id_type, "PropertyId");
        }
    }

    mod serde_tests {
        use super::*;

        #[test]
        fn test_serializes_transparently() {
            let uuid = Uuid::parse_str("550e8400-e29b-41d4-a716-446655440003").unwrap();
            let id = BuildingId::from_uuid(uuid);
            let json = serde_json::to_string(&id).unwrap();
            assert_eq!(json, "\"550e8400-e29b-41d4-a716-446655440003\"");
        }

        #[test]
        fn test_deserializes_from_bare_uuid_string() {
            let id: UnitId =
                serde_json::from_str("\"550e8400-e29b-41d4-a716-446655440004\"").unwrap();
            assert_eq!(id.to_string(), "550e8400-e29b-41d4-a716-446655440004");
        }
    }

    mod contact_id_tests {
        use super::*;

        #[test]
        fn test_contact_ids_round_trip_as_bare_uuids() {
            let uuid = Uuid::parse_str("550e8400-e29b-41d4-a716-446655440005").unwrap();
            let manager = ManagerId::from_uuid(uuid);
            let json = serde_json::to_string(&manager).unwrap();
            assert_eq!(json, "\"550e8400-e29b-41d4-a716-446655440005\"");

            let accountant: AccountantId = serde_json::from_str(&json).unwrap();
            assert_eq!(accountant.into_uuid(), uuid);
        }

        #[test]
        fn test_parse_names_the_contact_id_type() {
            let err = "nope".parse::<ManagerId>().unwrap_err();
            assert_eq!(err.id_type, "ManagerId");
        }
    }
}
