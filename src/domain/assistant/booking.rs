//! Booking directives embedded in assistant replies.

use serde::{Deserialize, Serialize};

/// Token the assistant emits right before a booking JSON object.
pub const BOOKING_SENTINEL: &str = "[[CREATE_APPOINTMENT]]";

/// Appointment details the assistant gathered from a visitor.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookingRequest {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default, rename = "type")]
    pub appointment_type: Option<String>,
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub time: Option<String>,
    #[serde(default)]
    pub origin: Option<String>,
}

impl BookingRequest {
    /// Extracts the booking object following the sentinel, if any.
    ///
    /// Returns `None` when the sentinel is absent or the text after it does
    /// not start with a well-formed JSON object. Trailing prose is ignored.
    pub fn detect(reply: &str) -> Option<Self> {
        let (_, after) = reply.split_once(BOOKING_SENTINEL)?;
        let start = after.find('{')?;
        if !after[..start].trim().is_empty() {
            return None;
        }
        serde_json::Deserializer::from_str(&after[start..])
            .into_iter::<BookingRequest>()
            .next()?
            .ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_reply_has_no_booking() {
        assert_eq!(BookingRequest::detect("We open at 9."), None);
    }

    #[test]
    fn parses_object_after_sentinel() {
        let reply = r#"Great! [[CREATE_APPOINTMENT]] {"name":"Ana","email":"ana@example.com","type":"call","date":"2025-07-01","time":"09:00","origin":"web"} See you then."#;

        let booking = BookingRequest::detect(reply).unwrap();

        assert_eq!(booking.name.as_deref(), Some("Ana"));
        assert_eq!(booking.appointment_type.as_deref(), Some("call"));
        assert_eq!(booking.date.as_deref(), Some("2025-07-01"));
        assert_eq!(booking.time.as_deref(), Some("09:00"));
    }

    #[test]
    fn malformed_object_is_ignored() {
        assert_eq!(BookingRequest::detect("[[CREATE_APPOINTMENT]] {name: Ana"), None);
    }

    #[test]
    fn sentinel_without_object_is_ignored() {
        assert_eq!(BookingRequest::detect("[[CREATE_APPOINTMENT]] soon"), None);
    }
}
