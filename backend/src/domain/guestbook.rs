//! Guestbook entries and the pin pointer.
//!
//! Entries are immutable once stored. The only lifecycle transition is
//! `present -> deleted`, either through the author's `user_key` or by an
//! administrator, or implicitly through capacity eviction.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Maximum number of stored entries.
pub const GUESTBOOK_CAPACITY: usize = 1000;

/// Fixed key of the single pin row.
pub const PIN_SLOT: &str = "singleton";

/// Validation errors raised while building guestbook values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum GuestbookValidationError {
    /// Entry id was blank.
    #[error("entry id must not be empty")]
    EmptyId,
    /// Entry id was not a UUID.
    #[error("entry id must be a valid UUID")]
    InvalidId,
    /// Author was blank.
    #[error("author must not be empty")]
    EmptyAuthor,
    /// Content was blank.
    #[error("content must not be empty")]
    EmptyContent,
    /// Author proof key was blank.
    #[error("userKey must not be empty")]
    EmptyUserKey,
}

impl GuestbookValidationError {
    /// Request field the error refers to.
    pub const fn field(self) -> &'static str {
        match self {
            Self::EmptyId | Self::InvalidId => "id",
            Self::EmptyAuthor => "author",
            Self::EmptyContent => "content",
            Self::EmptyUserKey => "userKey",
        }
    }
}

/// Server-assigned entry identifier.
///
/// New identifiers are UUIDv7 so they sort by creation time, which makes
/// them a stable tie-break when two entries share a timestamp.
///
/// # Examples
/// ```
/// use fansite::domain::EntryId;
///
/// let id = EntryId::generate();
/// let parsed: EntryId = id.to_string().parse().expect("round trip");
/// assert_eq!(parsed, id);
/// assert!("nope".parse::<EntryId>().is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntryId(Uuid);

impl EntryId {
    /// Generate a time-ordered identifier.
    #[must_use]
    pub fn generate() -> Self {
        Self(Uuid::now_v7())
    }

    /// Wrap an existing UUID.
    pub const fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Underlying UUID.
    pub const fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for EntryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for EntryId {
    type Err = GuestbookValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(GuestbookValidationError::EmptyId);
        }
        Uuid::parse_str(trimmed)
            .map(Self)
            .map_err(|_| GuestbookValidationError::InvalidId)
    }
}

/// A stored guestbook entry.
///
/// `user_key` is the author's proof of ownership. It is stored but never
/// serialised outward; see `inbound::http::schemas` for the wire shape.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GuestbookEntry {
    pub id: EntryId,
    pub author: String,
    pub content: String,
    pub user_key: String,
    pub created_at: DateTime<Utc>,
}

impl GuestbookEntry {
    /// Whether `user_key` proves authorship of this entry.
    pub fn is_owned_by(&self, user_key: &str) -> bool {
        !user_key.is_empty() && self.user_key == user_key
    }
}

/// Validated input for a new entry.
///
/// # Examples
/// ```
/// use fansite::domain::{GuestbookValidationError, NewGuestbookEntry};
///
/// assert!(NewGuestbookEntry::try_from_parts("Mio", "hi!", "k-1").is_ok());
/// assert_eq!(
///     NewGuestbookEntry::try_from_parts("  ", "hi!", "k-1"),
///     Err(GuestbookValidationError::EmptyAuthor),
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewGuestbookEntry {
    author: String,
    content: String,
    user_key: String,
}

impl NewGuestbookEntry {
    /// Validate raw request fields. Whitespace-only values count as empty.
    pub fn try_from_parts(
        author: impl Into<String>,
        content: impl Into<String>,
        user_key: impl Into<String>,
    ) -> Result<Self, GuestbookValidationError> {
        let author = author.into();
        let content = content.into();
        let user_key = user_key.into();
        if author.trim().is_empty() {
            return Err(GuestbookValidationError::EmptyAuthor);
        }
        if content.trim().is_empty() {
            return Err(GuestbookValidationError::EmptyContent);
        }
        if user_key.trim().is_empty() {
            return Err(GuestbookValidationError::EmptyUserKey);
        }
        Ok(Self {
            author,
            content,
            user_key,
        })
    }

    /// Stamp the entry with a fresh id and `created_at`.
    pub fn into_entry(self, created_at: DateTime<Utc>) -> GuestbookEntry {
        GuestbookEntry {
            id: EntryId::generate(),
            author: self.author,
            content: self.content,
            user_key: self.user_key,
            created_at,
        }
    }
}
