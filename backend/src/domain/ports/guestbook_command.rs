//! Driving port for guestbook mutations.
//!
//! Identifiers arrive as raw strings so the service decides how malformed
//! ids are reported: as `NotFound` on delete and `InvalidRequest` on pin.

use async_trait::async_trait;

use crate::domain::{EntryId, Error, GuestbookEntry, Role};

/// Request to create an entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateEntryRequest {
    pub author: String,
    pub content: String,
    pub user_key: String,
}

/// Request to delete an entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeleteEntryRequest {
    pub id: String,
    /// Ownership proof; administrators may omit it.
    pub user_key: Option<String>,
    pub role: Role,
}

/// Domain use-case port for guestbook writes.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait GuestbookCommand: Send + Sync {
    /// Store a new entry, evicting the oldest one when at capacity.
    async fn create_entry(&self, request: CreateEntryRequest) -> Result<GuestbookEntry, Error>;

    /// Delete an entry as its author or as an administrator.
    async fn delete_entry(&self, request: DeleteEntryRequest) -> Result<(), Error>;

    /// Pin `id`. Administrators only.
    async fn set_pinned(&self, id: &str, role: Role) -> Result<EntryId, Error>;
}
