//! Core data types for the campus event service

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Deserializer, Serialize};
use validator::Validate;

/// Event identifier type
pub type EventId = i64;

/// Administrator identifier type
pub type AdminId = i64;

/// Approval status of an event
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EventStatus {
    /// Awaiting an administrator decision
    #[default]
    Pending,
    /// Visible to students
    Approved,
    /// Hidden from students
    Rejected,
}

impl EventStatus {
    /// Wire representation of the status
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "PENDING",
            Self::Approved => "APPROVED",
            Self::Rejected => "REJECTED",
        }
    }
}

impl std::fmt::Display for EventStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.pad(self.as_str())
    }
}

/// A campus event as returned by the service
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    /// Server-assigned identifier
    pub id: EventId,

    /// Display title
    pub title: String,

    /// Free-text description
    #[serde(default, deserialize_with = "null_as_empty")]
    pub description: String,

    /// Calendar date of the event
    pub date: NaiveDate,

    /// Start time of the event
    #[serde(with = "wire_time")]
    pub time: NaiveTime,

    /// Free-text location
    #[serde(default, deserialize_with = "null_as_empty")]
    pub location: String,

    /// Approval status
    #[serde(default)]
    pub status: EventStatus,

    /// Date the event was recorded by the service
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<NaiveDate>,
}

impl Event {
    /// Whether an approve action does anything for this event
    ///
    /// Only the target state disables the action, so a rejected event can
    /// still be approved and vice versa.
    #[must_use]
    pub fn can_approve(&self) -> bool {
        self.status != EventStatus::Approved
    }

    /// Whether a reject action does anything for this event
    #[must_use]
    pub fn can_reject(&self) -> bool {
        self.status != EventStatus::Rejected
    }

    /// Case-insensitive match of `term` against title or location
    #[must_use]
    pub fn matches_filter(&self, term: &str) -> bool {
        let term = term.to_lowercase();
        self.title.to_lowercase().contains(&term) || self.location.to_lowercase().contains(&term)
    }
}

/// Fields an administrator fills in to create an event
///
/// There is no id or status: the service assigns the id and every new event
/// starts out pending.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct EventDraft {
    /// Display title
    #[validate(length(min = 1, message = "title is required"))]
    pub title: String,

    /// Free-text description
    #[validate(length(min = 1, message = "description is required"))]
    pub description: String,

    /// Calendar date of the event
    pub date: NaiveDate,

    /// Start time of the event
    #[serde(with = "wire_time")]
    pub time: NaiveTime,

    /// Free-text location
    #[validate(length(min = 1, message = "location is required"))]
    pub location: String,
}

/// Body of `POST /api/events`
#[derive(Debug, Serialize)]
pub struct NewEventRequest<'a> {
    /// Event fields
    #[serde(flatten)]
    pub draft: &'a EventDraft,

    /// Always [`EventStatus::Pending`]
    pub status: EventStatus,
}

impl<'a> NewEventRequest<'a> {
    /// Wrap a draft as a pending event submission
    #[must_use]
    pub const fn pending(draft: &'a EventDraft) -> Self {
        Self {
            draft,
            status: EventStatus::Pending,
        }
    }
}

/// Event totals reported by `GET /api/events/count`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventCounts {
    /// Approved events
    #[serde(default)]
    pub approved: u64,

    /// All events regardless of status
    #[serde(default)]
    pub total: u64,

    /// Rejected events
    #[serde(default)]
    pub rejected: u64,

    /// Pending events
    #[serde(default)]
    pub pending: u64,
}

impl EventCounts {
    /// Events that have not been rejected (`total - rejected`)
    #[must_use]
    pub const fn non_rejected(&self) -> u64 {
        self.total.saturating_sub(self.rejected)
    }
}

/// Administrator identity established by a successful login
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdminIdentity {
    /// Administrator id
    pub id: AdminId,
    /// Display name
    pub name: String,
    /// Login email
    pub email: String,
}

/// Body of `POST /api/admin/login`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct LoginRequest {
    /// Login email
    #[validate(length(min = 1, message = "email is required"))]
    pub email: String,

    /// Plaintext password
    #[validate(length(min = 1, message = "password is required"))]
    pub password: String,
}

/// Response of `POST /api/admin/login`
///
/// The service answers with the same shape on success and failure; only the
/// presence of `id` tells them apart.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginResponse {
    /// Administrator id, present on success
    #[serde(default)]
    pub id: Option<AdminId>,
    /// Display name
    #[serde(default)]
    pub name: Option<String>,
    /// Login email
    #[serde(default)]
    pub email: Option<String>,
    /// Human-readable outcome
    #[serde(default)]
    pub message: Option<String>,
}

impl LoginResponse {
    /// Convert into an identity, or the server's failure message
    ///
    /// # Errors
    ///
    /// Returns the response message (or `"Login failed"`) when no id is present.
    pub fn into_identity(self) -> Result<AdminIdentity, String> {
        match self.id {
            Some(id) => Ok(AdminIdentity {
                id,
                name: self.name.unwrap_or_default(),
                email: self.email.unwrap_or_default(),
            }),
            None => Err(self
                .message
                .filter(|m| !m.is_empty())
                .unwrap_or_else(|| "Login failed".to_string())),
        }
    }
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

/// Parse a time of day as `HH:MM` or `HH:MM:SS`
#[must_use]
pub fn parse_event_time(raw: &str) -> Option<NaiveTime> {
    let raw = raw.trim();
    ["%H:%M:%S%.f", "%H:%M"]
        .iter()
        .find_map(|format| NaiveTime::parse_from_str(raw, format).ok())
}

/// Serde adapter: accepts `HH:MM[:SS]`, writes `HH:MM`
pub mod wire_time {
    use chrono::NaiveTime;
    use serde::{Deserialize, Deserializer, Serializer, de::Error as _};

    /// Serialize as `HH:MM`
    ///
    /// # Errors
    ///
    /// Propagates serializer errors.
    pub fn serialize<S>(time: &NaiveTime, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(&time.format("%H:%M"))
    }

    /// Deserialize from `HH:MM` or `HH:MM:SS`
    ///
    /// # Errors
    ///
    /// Fails when the string is not a time of day.
    pub fn deserialize<'de, D>(deserializer: D) -> Result<NaiveTime, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        super::parse_event_time(&raw)
            .ok_or_else(|| D::Error::custom(format!("invalid time of day: {raw}")))
    }
}
