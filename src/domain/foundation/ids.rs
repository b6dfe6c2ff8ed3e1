//! Strongly-typed identifier value objects.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

macro_rules! uuid_identifier {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(Uuid);

        impl $name {
            /// Creates a new random identifier.
            pub fn new() -> Self {
                Self(Uuid::new_v4())
            }

            /// Creates an identifier from an existing UUID.
            pub fn from_uuid(uuid: Uuid) -> Self {
                Self(uuid)
            }

            /// Returns the inner UUID.
            pub fn as_uuid(&self) -> &Uuid {
                &self.0
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl FromStr for $name {
            type Err = uuid::Error;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Ok(Self(Uuid::parse_str(s)?))
            }
        }
    };
}

uuid_identifier!(
    /// Unique identifier for a principal (an account that is also a channel).
    PrincipalId
);

uuid_identifier!(
    /// Identifier of an interaction target: a content item, comment, or post.
    TargetId
);

uuid_identifier!(
    /// Unique identifier for a single interaction record.
    InteractionId
);

uuid_identifier!(
    /// Unique identifier for a follow edge.
    FollowEdgeId
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn principal_id_generates_unique_values() {
        let id1 = PrincipalId::new();
        let id2 = PrincipalId::new();
        assert_ne!(id1, id2);
    }

    #[test]
    fn principal_id_parses_from_string() {
        let uuid = Uuid::new_v4();
        let id: PrincipalId = uuid.to_string().parse().unwrap();
        assert_eq!(id.as_uuid(), &uuid);
    }

    #[test]
    fn target_id_rejects_malformed_string() {
        let result: Result<TargetId, _> = "not-a-uuid".parse();
        assert!(result.is_err());
    }

    #[test]
    fn ids_serialize_as_bare_uuid() {
        let uuid = Uuid::new_v4();
        let id = InteractionId::from_uuid(uuid);
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, format!("\"{}\"", uuid));
    }

    #[test]
    fn display_matches_inner_uuid() {
        let uuid = Uuid::new_v4();
        assert_eq!(FollowEdgeId::from_uuid(uuid).to_string(), uuid.to_string());
    }
}
