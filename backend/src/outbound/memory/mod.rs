//! In-process guestbook storage.
//!
//! Mirrors the PostgreSQL adapter's semantics: newest-first ordering by
//! `(created_at, id)`, bounded inserts that evict the single oldest entry
//! before inserting, and pin removal alongside its entry. A single mutex stands in for the database
//! transaction, so every operation is atomic. Contents are lost on restart.

use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;
use pagination::PageRequest;

use crate::domain::ports::{GuestbookRepository, GuestbookRepositoryError};
use crate::domain::{EntryId, GuestbookEntry};

#[derive(Debug, Default)]
struct GuestbookState {
    /// Newest first.
    entries: Vec<GuestbookEntry>,
    pinned: Option<EntryId>,
}

impl GuestbookState {
    fn insert_sorted(&mut self, entry: GuestbookEntry) {
        let key = (entry.created_at, entry.id);
        let position = self
            .entries
            .partition_point(|existing| (existing.created_at, existing.id) > key);
        self.entries.insert(position, entry);
    }

    fn evict_oldest(&mut self) -> Option<EntryId> {
        let oldest = self.entries.pop()?.id;
        if self.pinned == Some(oldest) {
            self.pinned = None;
        }
        Some(oldest)
    }

    fn remove(&mut self, id: &EntryId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|entry| entry.id != *id);
        if self.pinned.as_ref() == Some(id) {
            self.pinned = None;
        }
        self.entries.len() != before
    }
}

/// Guestbook repository held in memory.
///
/// # Examples
/// ```
/// use fansite::outbound::memory::InMemoryGuestbookRepository;
///
/// let repo = InMemoryGuestbookRepository::default();
/// assert_eq!(repo.len(), 0);
/// ```
#[derive(Debug, Default)]
pub struct InMemoryGuestbookRepository {
    state: Mutex<GuestbookState>,
}

impl InMemoryGuestbookRepository {
    fn lock(&self) -> Result<MutexGuard<'_, GuestbookState>, GuestbookRepositoryError> {
        self.state
            .lock()
            .map_err(|_| GuestbookRepositoryError::query("guestbook state lock poisoned"))
    }

    /// Number of stored entries.
    pub fn len(&self) -> usize {
        self.lock().map(|state| state.entries.len()).unwrap_or(0)
    }

    /// Whether no entries are stored.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl GuestbookRepository for InMemoryGuestbookRepository {
    async fn list(
        &self,
        page: &PageRequest,
    ) -> Result<Vec<GuestbookEntry>, GuestbookRepositoryError> {
        let state = self.lock()?;
        let skip = usize::try_from(page.offset()).unwrap_or(usize::MAX);
        let take = usize::try_from(page.limit()).unwrap_or(usize::MAX);
        Ok(state.entries.iter().skip(skip).take(take).cloned().collect())
    }

    async fn find_by_id(
        &self,
        id: &EntryId,
    ) -> Result<Option<GuestbookEntry>, GuestbookRepositoryError> {
        let state = self.lock()?;
        Ok(state.entries.iter().find(|entry| entry.id == *id).cloned())
    }

    async fn insert_bounded(
        &self,
        entry: &GuestbookEntry,
        capacity: usize,
    ) -> Result<Option<EntryId>, GuestbookRepositoryError> {
        let mut state = self.lock()?;
        let evicted = if state.entries.len() >= capacity {
            state.evict_oldest()
        } else {
            None
        };
        state.insert_sorted(entry.clone());
        Ok(evicted)
    }

    async fn delete_with_pin(&self, id: &EntryId) -> Result<bool, GuestbookRepositoryError> {
        Ok(self.lock()?.remove(id))
    }

    async fn pinned(&self) -> Result<Option<EntryId>, GuestbookRepositoryError> {
        Ok(self.lock()?.pinned)
    }

    async fn set_pinned(&self, id: &EntryId) -> Result<(), GuestbookRepositoryError> {
        self.lock()?.pinned = Some(*id);
        Ok(())
    }
}
