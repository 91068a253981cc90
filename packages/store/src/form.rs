//! Capsule creation form state.
//!
//! Holds the raw field values as typed, validates them, and turns them into a
//! [`CapsuleInput`]. The delivery date comes from a `datetime-local` control,
//! i.e. a wall-clock time without zone; it is resolved in the viewer's time
//! zone and sent as a UTC instant. Whether that instant lies in the future is
//! left to the API.

use chrono::{DateTime, Local, NaiveDateTime, TimeZone, Utc};
use thiserror::Error;

use crate::models::{Capsule, CapsuleInput};

/// Hint shown next to any submission error.
pub const DELIVERY_DATE_HINT: &str = "Please check your delivery date is in the future";

const DATETIME_LOCAL_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M", "%Y-%m-%dT%H:%M:%S"];

/// A field problem caught before anything is sent.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FieldError {
    #[error("Title is required")]
    MissingTitle,
    #[error("Message is required")]
    MissingMessage,
    #[error("Invalid delivery date: {0}")]
    InvalidDeliveryDate(String),
}

/// Lifecycle of one submission.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum RequestState {
    #[default]
    Idle,
    Loading,
    Success,
    Error(String),
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct CapsuleForm {
    pub title: String,
    pub message: String,
    /// Raw `datetime-local` value, empty when unset.
    pub delivery_date: String,
    /// Empty means "send it to me".
    pub recipient_email: String,
    state: RequestState,
}

impl CapsuleForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &RequestState {
        &self.state
    }

    pub fn is_submitting(&self) -> bool {
        self.state == RequestState::Loading
    }

    pub fn error(&self) -> Option<&str> {
        match &self.state {
            RequestState::Error(message) => Some(message),
            _ => None,
        }
    }

    pub fn validate(&self) -> Result<(), FieldError> {
        if self.title.trim().is_empty() {
            return Err(FieldError::MissingTitle);
        }
        if self.message.trim().is_empty() {
            return Err(FieldError::MissingMessage);
        }
        Ok(())
    }

    /// Build the input, resolving the delivery date in local time.
    pub fn to_input(&self) -> Result<CapsuleInput, FieldError> {
        self.to_input_in(&Local)
    }

    /// Build the input, resolving the delivery date in `tz`.
    pub fn to_input_in<Tz: TimeZone>(&self, tz: &Tz) -> Result<CapsuleInput, FieldError> {
        self.validate()?;

        let recipient = self.recipient_email.trim();
        Ok(CapsuleInput {
            title: self.title.clone(),
            message: self.message.clone(),
            recipient_email: (!recipient.is_empty()).then(|| recipient.to_string()),
            delivery_date: parse_delivery_date(&self.delivery_date, tz)?,
        })
    }

    /// Mark a submission as started. Returns `false` if one is already in flight.
    pub fn begin_submit(&mut self) -> bool {
        if self.is_submitting() {
            return false;
        }
        self.state = RequestState::Loading;
        true
    }

    /// Record the outcome of a submission. Success clears the fields.
    pub fn finish_submit(&mut self, result: &Result<Capsule, String>) {
        match result {
            Ok(_) => {
                *self = CapsuleForm {
                    state: RequestState::Success,
                    ..CapsuleForm::default()
                };
            }
            Err(message) => self.state = RequestState::Error(message.clone()),
        }
    }

    /// Record a problem found before submitting.
    pub fn reject(&mut self, error: &FieldError) {
        self.state = RequestState::Error(error.to_string());
    }
}

fn parse_delivery_date<Tz: TimeZone>(
    raw: &str,
    tz: &Tz,
) -> Result<Option<DateTime<Utc>>, FieldError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(None);
    }
    let naive = DATETIME_LOCAL_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
        .ok_or_else(|| FieldError::InvalidDeliveryDate(raw.to_string()))?;
    // A wall-clock time skipped by a DST change has no instant.
    let local = tz
        .from_local_datetime(&naive)
        .earliest()
        .ok_or_else(|| FieldError::InvalidDeliveryDate(raw.to_string()))?;
    Ok(Some(local.with_timezone(&Utc)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::CapsuleStatus;
    use chrono::FixedOffset;

    fn filled() -> CapsuleForm {
        CapsuleForm {
            title: "Hi".into(),
            message: "Hello future me".into(),
            ..CapsuleForm::default()
        }
    }

    #[test]
    fn test_required_fields() {
        let mut form = CapsuleForm::new();
        assert_eq!(form.validate(), Err(FieldError::MissingTitle));
        form.title = "Hi".into();
        form.message = "   ".into();
        assert_eq!(form.validate(), Err(FieldError::MissingMessage));
        form.message = "Hello".into();
        assert!(form.validate().is_ok());
    }

    #[test]
    fn test_optional_fields_left_out() {
        let input = filled().to_input_in(&Utc).unwrap();
        assert_eq!(input.title, "Hi");
        assert_eq!(input.message, "Hello future me");
        assert!(input.recipient_email.is_none());
        assert!(input.delivery_date.is_none());
    }

    #[test]
    fn test_delivery_date_converted_to_utc() {
        let mut form = filled();
        form.delivery_date = "2030-07-01T09:30".into();
        let est = FixedOffset::west_opt(5 * 3600).unwrap();
        let input = form.to_input_in(&est).unwrap();
        assert_eq!(
            input.delivery_date.unwrap().to_rfc3339(),
            "2030-07-01T14:30:00+00:00"
        );
    }

    #[test]
    fn test_delivery_date_with_seconds() {
        let mut form = filled();
        form.delivery_date = "2030-07-01T09:30:15".into();
        let input = form.to_input_in(&Utc).unwrap();
        assert_eq!(
            input.delivery_date.unwrap().to_rfc3339(),
            "2030-07-01T09:30:15+00:00"
        );
    }

    #[test]
    fn test_past_date_is_not_rejected_locally() {
        let mut form = filled();
        form.delivery_date = "2001-01-01T00:00".into();
        assert!(form.to_input_in(&Utc).unwrap().delivery_date.is_some());
    }

    #[test]
    fn test_garbage_date_rejected() {
        let mut form = filled();
        form.delivery_date = "tomorrow".into();
        assert_eq!(
            form.to_input_in(&Utc),
            Err(FieldError::InvalidDeliveryDate("tomorrow".into()))
        );
    }

    #[test]
    fn test_recipient_trimmed() {
        let mut form = filled();
        form.recipient_email = "  friend@example.com ".into();
        assert_eq!(
            form.to_input_in(&Utc).unwrap().recipient_email.as_deref(),
            Some("friend@example.com")
        );
    }

    #[test]
    fn test_submit_guard_and_reset() {
        let mut form = filled();
        form.delivery_date = "2030-01-01T00:00".into();
        assert!(form.begin_submit());
        assert!(!form.begin_submit());

        let created = Capsule {
            capsule_id: "c1".into(),
            title: "Hi".into(),
            message: None,
            created_date: "2025-01-01T00:00:00Z".into(),
            delivery_date: None,
            recipient_email: None,
            status: CapsuleStatus::Active,
            decrypted_message: None,
        };
        form.finish_submit(&Ok(created));
        assert_eq!(form.state(), &RequestState::Success);
        assert!(form.title.is_empty());
        assert!(form.delivery_date.is_empty());
        assert!(form.begin_submit());
    }

    #[test]
    fn test_submit_error_keeps_fields() {
        let mut form = filled();
        form.begin_submit();
        form.finish_submit(&Err("Delivery date must be in the future".into()));
        assert_eq!(form.error(), Some("Delivery date must be in the future"));
        assert_eq!(form.title, "Hi");
        assert!(!form.is_submitting());
    }
}
