//! Driven port for guestbook persistence.
//!
//! Adapters own atomicity. [`GuestbookRepository::insert_bounded`] and
//! [`GuestbookRepository::delete_with_pin`] must each behave as a single
//! transaction, and concurrent inserts must never leave more than `capacity`
//! entries behind.

use async_trait::async_trait;
use pagination::PageRequest;

use crate::domain::{EntryId, GuestbookEntry};

use super::define_port_error;

define_port_error! {
    /// Errors raised by guestbook repository adapters.
    pub enum GuestbookRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } =>
            "guestbook repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } =>
            "guestbook repository query failed: {message}",
    }
}

/// Storage for guestbook entries and the single pin pointer.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait GuestbookRepository: Send + Sync {
    /// Entries ordered newest first (`created_at DESC, id DESC`), windowed by
    /// `page`.
    async fn list(
        &self,
        page: &PageRequest,
    ) -> Result<Vec<GuestbookEntry>, GuestbookRepositoryError>;

    /// Fetch one entry.
    async fn find_by_id(
        &self,
        id: &EntryId,
    ) -> Result<Option<GuestbookEntry>, GuestbookRepositoryError>;

    /// Insert `entry`. When `capacity` entries are already stored, the single
    /// oldest existing entry is deleted first.
    ///
    /// Returns the evicted identifier. A pin referencing it is cleared in the
    /// same transaction. The new entry never takes part in eviction.
    async fn insert_bounded(
        &self,
        entry: &GuestbookEntry,
        capacity: usize,
    ) -> Result<Option<EntryId>, GuestbookRepositoryError>;

    /// Remove the entry and any pin referencing it.
    ///
    /// Returns `false` when no entry had that id.
    async fn delete_with_pin(&self, id: &EntryId) -> Result<bool, GuestbookRepositoryError>;

    /// Currently pinned id, if any.
    async fn pinned(&self) -> Result<Option<EntryId>, GuestbookRepositoryError>;

    /// Point the pin at `id`, replacing any previous target.
    async fn set_pinned(&self, id: &EntryId) -> Result<(), GuestbookRepositoryError>;
}
