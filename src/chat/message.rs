//! Session-log message types.

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

/// Which side of the conversation authored a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    /// Text typed by the user.
    User,

    /// Text produced by the tutor (or synthesized locally on failure).
    Assistant,
}

/// A single turn in the session log.
///
/// Every field is fixed at creation. The log is append-only, so a `Message`
/// is never mutated or removed once it has been pushed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    /// Unique identifier within the session, never reused.
    pub id: u64,

    /// Who authored the message.
    pub role: ChatRole,

    /// Text payload.
    pub content: String,

    /// Creation time, captured once.
    #[serde(with = "time::serde::rfc3339")]
    pub timestamp: OffsetDateTime,
}

impl Message {
    /// Creates a message stamped with the current time.
    pub fn new(id: u64, role: ChatRole, content: impl Into<String>) -> Self {
        Self {
            id,
            role,
            content: content.into(),
            timestamp: OffsetDateTime::now_utc(),
        }
    }
}
