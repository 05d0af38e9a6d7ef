//! Strongly-typed identifier value objects.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use super::ValidationError;

macro_rules! uuid_id {
    ($(#[$meta:meta])* $name:ident, $field:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
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

            /// Parses a request-supplied identifier.
            pub fn parse(s: &str) -> Result<Self, ValidationError> {
                let trimmed = s.trim();
                if trimmed.is_empty() {
                    return Err(ValidationError::empty_field($field));
                }
                Uuid::parse_str(trimmed)
                    .map(Self)
                    .map_err(|e| ValidationError::invalid_format($field, e.to_string()))
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
            type Err = ValidationError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::parse(s)
            }
        }
    };
}

uuid_id!(
    /// Identifier of a SaaS client (the business owner account).
    ClientId,
    "clientId"
);

uuid_id!(
    /// Identifier of a `business_info` row.
    BusinessInfoId,
    "businessInfoId"
);

uuid_id!(
    /// Identifier of a booked appointment.
    AppointmentId,
    "appointmentId"
);

uuid_id!(
    /// Identifier of an owner notification.
    NotificationId,
    "notificationId"
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_accepts_uuid_with_whitespace() {
        let raw = "  6f1c2a8e-2f43-4a55-9a77-0d9c2b1f0e11 ";
        let id = ClientId::parse(raw).unwrap();
        assert_eq!(id.to_string(), raw.trim());
    }

    #[test]
    fn parse_rejects_empty() {
        let err = ClientId::parse("   ").unwrap_err();
        assert!(matches!(err, ValidationError::EmptyField { ref field } if field == "clientId"));
    }

    #[test]
    fn parse_rejects_garbage() {
        let err = AppointmentId::parse("not-a-uuid").unwrap_err();
        assert!(matches!(err, ValidationError::InvalidFormat { .. }));
    }

    #[test]
    fn serializes_transparently() {
        let id = NotificationId::new();
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, format!("\"{}\"", id));
    }
}
