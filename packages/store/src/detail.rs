//! View model for the capsule detail modal.

use crate::format;
use crate::models::{Capsule, CapsuleStatus};

/// Shown when an opened capsule came back without plaintext.
pub const MISSING_MESSAGE: &str = "Message content not available";

/// Display-ready fields of an opened capsule.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CapsuleDetails {
    pub title: String,
    pub created: String,
    pub originally_scheduled: Option<String>,
    pub status: &'static str,
    pub recipient: Option<String>,
    pub message: String,
}

impl CapsuleDetails {
    /// Build with dates rendered by `fmt` (e.g. [`format::format_long`]).
    pub fn with_formatter(capsule: &Capsule, fmt: impl Fn(&str) -> String) -> Self {
        Self {
            title: capsule.title.clone(),
            created: fmt(&capsule.created_date),
            originally_scheduled: capsule.delivery_date.as_deref().map(&fmt),
            // the modal only ever shows opened capsules
            status: CapsuleStatus::Opened.as_str(),
            recipient: capsule.recipient_email.clone(),
            message: capsule
                .decrypted_message
                .clone()
                .filter(|m| !m.is_empty())
                .unwrap_or_else(|| MISSING_MESSAGE.to_string()),
        }
    }
}

impl From<&Capsule> for CapsuleDetails {
    fn from(capsule: &Capsule) -> Self {
        Self::with_formatter(capsule, format::format_long)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn opened() -> Capsule {
        Capsule {
            capsule_id: "c1".into(),
            title: "Hi".into(),
            message: None,
            created_date: "2025-01-05T15:04:00Z".into(),
            delivery_date: Some("2025-06-01T08:00:00Z".into()),
            recipient_email: Some("friend@example.com".into()),
            status: CapsuleStatus::Opened,
            decrypted_message: Some("Hello future me".into()),
        }
    }

    #[test]
    fn test_details_of_opened_capsule() {
        let details =
            CapsuleDetails::with_formatter(&opened(), |raw| format::format_long_in(raw, &Utc));
        assert_eq!(details.title, "Hi");
        assert_eq!(details.created, "January 5, 2025 at 03:04 PM");
        assert_eq!(
            details.originally_scheduled.as_deref(),
            Some("June 1, 2025 at 08:00 AM")
        );
        assert_eq!(details.status, "OPENED");
        assert_eq!(details.recipient.as_deref(), Some("friend@example.com"));
        assert_eq!(details.message, "Hello future me");
    }

    #[test]
    fn test_missing_optional_fields() {
        let capsule = Capsule {
            delivery_date: None,
            recipient_email: None,
            decrypted_message: None,
            ..opened()
        };
        let details = CapsuleDetails::with_formatter(&capsule, str::to_string);
        assert!(details.originally_scheduled.is_none());
        assert!(details.recipient.is_none());
        assert_eq!(details.message, MISSING_MESSAGE);
    }
}
