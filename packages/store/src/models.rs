//! # Domain models for time capsules
//!
//! Defines the records exchanged with the capsule API. They are
//! `Serialize + Deserialize` with camelCase field names so they match the JSON
//! the API produces and can also cross the server/client boundary via Dioxus
//! server functions.
//!
//! ## Types
//!
//! | Type | Represents |
//! |------|-----------|
//! | [`Capsule`] | A capsule record as returned by `GET /capsules` or `POST /capsules/{id}/open`. |
//! | [`CapsuleStatus`] | Lifecycle status: `ACTIVE` until opened, then `OPENED`. |
//! | [`CapsuleInput`] | What the creation form hands to the repository client. |
//!
//! Timestamps stay as the server's strings. They are only parsed for display
//! (see [`crate::format`]) so an unexpected format never fails a whole list.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Lifecycle status of a capsule.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CapsuleStatus {
    Active,
    Opened,
}

impl CapsuleStatus {
    /// Wire name, also used for display: `"ACTIVE"` / `"OPENED"`.
    pub fn as_str(&self) -> &'static str {
        match self {
            CapsuleStatus::Active => "ACTIVE",
            CapsuleStatus::Opened => "OPENED",
        }
    }

    /// Lowercase form used as a CSS modifier class.
    pub fn css_class(&self) -> &'static str {
        match self {
            CapsuleStatus::Active => "active",
            CapsuleStatus::Opened => "opened",
        }
    }
}

impl std::fmt::Display for CapsuleStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A capsule record.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Capsule {
    /// Opaque identifier assigned by the API.
    pub capsule_id: String,
    pub title: String,
    /// Stored message. The API usually omits it; plaintext arrives in
    /// `decrypted_message` once the capsule is opened.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    /// Creation timestamp as sent by the API (RFC 3339).
    pub created_date: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delivery_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recipient_email: Option<String>,
    pub status: CapsuleStatus,
    /// Plaintext, only present on an opened capsule.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub decrypted_message: Option<String>,
}

impl Capsule {
    pub fn is_opened(&self) -> bool {
        self.status == CapsuleStatus::Opened
    }

    /// Drop any plaintext from a capsule that has not been opened.
    pub fn redacted(mut self) -> Self {
        if self.status == CapsuleStatus::Active {
            self.decrypted_message = None;
        }
        self
    }
}

/// Input for creating a capsule.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct CapsuleInput {
    pub title: String,
    pub message: String,
    /// `None` means "send it to me".
    pub recipient_email: Option<String>,
    /// `None` means immediate delivery.
    pub delivery_date: Option<DateTime<Utc>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_active_capsule() {
        let json = r#"{
            "capsuleId": "c1",
            "title": "Hi",
            "createdDate": "2025-01-01T10:00:00.000Z",
            "status": "ACTIVE",
            "userId": "ignored"
        }"#;
        let capsule: Capsule = serde_json::from_str(json).unwrap();
        assert_eq!(capsule.capsule_id, "c1");
        assert_eq!(capsule.status, CapsuleStatus::Active);
        assert!(capsule.delivery_date.is_none());
        assert!(capsule.decrypted_message.is_none());
        assert!(!capsule.is_opened());
    }

    #[test]
    fn test_deserialize_opened_capsule() {
        let json = r#"{
            "capsuleId": "c1",
            "title": "Hi",
            "createdDate": "2025-01-01T10:00:00.000Z",
            "deliveryDate": "2025-06-01T10:00:00.000Z",
            "recipientEmail": "me@example.com",
            "status": "OPENED",
            "decryptedMessage": "Hello future me"
        }"#;
        let capsule: Capsule = serde_json::from_str(json).unwrap();
        assert!(capsule.is_opened());
        assert_eq!(capsule.decrypted_message.as_deref(), Some("Hello future me"));
        assert_eq!(capsule.recipient_email.as_deref(), Some("me@example.com"));
    }

    #[test]
    fn test_redacted_only_strips_active() {
        let active = Capsule {
            capsule_id: "a".into(),
            title: "A".into(),
            message: None,
            created_date: "2025-01-01T00:00:00Z".into(),
            delivery_date: None,
            recipient_email: None,
            status: CapsuleStatus::Active,
            decrypted_message: Some("leak".into()),
        };
        assert!(active.clone().redacted().decrypted_message.is_none());

        let opened = Capsule {
            status: CapsuleStatus::Opened,
            ..active
        };
        assert_eq!(opened.redacted().decrypted_message.as_deref(), Some("leak"));
    }

    #[test]
    fn test_status_names() {
        assert_eq!(CapsuleStatus::Active.to_string(), "ACTIVE");
        assert_eq!(CapsuleStatus::Opened.css_class(), "opened");
        assert_eq!(
            serde_json::to_string(&CapsuleStatus::Opened).unwrap(),
            "\"OPENED\""
        );
    }
}
