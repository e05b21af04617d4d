//! Driving port for guestbook reads.

use async_trait::async_trait;
use pagination::{PageRequest, Paginated};

use crate::domain::{EntryId, Error, GuestbookEntry};

/// Domain use-case port for guestbook reads.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait GuestbookQuery: Send + Sync {
    /// One page of entries, newest first.
    async fn list_entries(&self, page: PageRequest) -> Result<Paginated<GuestbookEntry>, Error>;

    /// The pinned entry id, if any.
    async fn pinned_entry(&self) -> Result<Option<EntryId>, Error>;
}
