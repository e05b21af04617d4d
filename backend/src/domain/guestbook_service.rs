//! Guestbook domain service implementing the command and query ports.
//!
//! Role and ownership checks live here; adapters only store and fetch.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use pagination::{PageRequest, Paginated};
use serde_json::json;
use tracing::{debug, info};

use crate::domain::ports::{
    CreateEntryRequest, DeleteEntryRequest, GuestbookCommand, GuestbookQuery, GuestbookRepository,
    GuestbookRepositoryError,
};
use crate::domain::{
    EntryId, Error, GUESTBOOK_CAPACITY, GuestbookEntry, GuestbookValidationError,
    NewGuestbookEntry, Role, require_role,
};

const ENTRY_NOT_FOUND: &str = "guestbook entry not found";

/// Guestbook service over a [`GuestbookRepository`].
#[derive(Clone)]
pub struct GuestbookService<R> {
    repo: Arc<R>,
    clock: Arc<dyn Clock>,
    capacity: usize,
}

impl<R> GuestbookService<R> {
    /// Create a service holding at most [`GUESTBOOK_CAPACITY`] entries.
    ///
    /// ```rust,no_run
    /// # use std::sync::Arc;
    /// # use fansite::domain::GuestbookService;
    /// # use fansite::outbound::memory::InMemoryGuestbookRepository;
    /// # use mockable::DefaultClock;
    /// let service = GuestbookService::new(
    ///     Arc::new(InMemoryGuestbookRepository::default()),
    ///     Arc::new(DefaultClock),
    /// );
    /// # let _ = service;
    /// ```
    pub fn new(repo: Arc<R>, clock: Arc<dyn Clock>) -> Self {
        Self::with_capacity(repo, clock, GUESTBOOK_CAPACITY)
    }

    /// Create a service with a custom bound. A zero bound is raised to one.
    pub fn with_capacity(repo: Arc<R>, clock: Arc<dyn Clock>, capacity: usize) -> Self {
        Self {
            repo,
            clock,
            capacity: capacity.max(1),
        }
    }
}

fn map_repository_error(error: GuestbookRepositoryError) -> Error {
    match error {
        GuestbookRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("guestbook repository unavailable: {message}"))
        }
        GuestbookRepositoryError::Query { message } => {
            Error::internal(format!("guestbook repository error: {message}"))
        }
    }
}

fn validation_error(error: GuestbookValidationError) -> Error {
    Error::invalid_request(error.to_string()).with_details(json!({
        "field": error.field(),
        "code": "validation_error",
    }))
}

#[async_trait]
impl<R> GuestbookCommand for GuestbookService<R>
where
    R: GuestbookRepository,
{
    async fn create_entry(&self, request: CreateEntryRequest) -> Result<GuestbookEntry, Error> {
        let CreateEntryRequest {
            author,
            content,
            user_key,
        } = request;
        let entry = NewGuestbookEntry::try_from_parts(author, content, user_key)
            .map_err(validation_error)?
            .into_entry(self.clock.utc());

        let evicted = self
            .repo
            .insert_bounded(&entry, self.capacity)
            .await
            .map_err(map_repository_error)?;

        debug!(entry_id = %entry.id, "guestbook entry created");
        if let Some(evicted) = evicted {
            info!(
                entry_id = %evicted,
                capacity = self.capacity,
                "evicted oldest guestbook entry"
            );
        }
        Ok(entry)
    }

    async fn delete_entry(&self, request: DeleteEntryRequest) -> Result<(), Error> {
        let DeleteEntryRequest { id, user_key, role } = request;
        let Ok(id) = id.parse::<EntryId>() else {
            return Err(Error::not_found(ENTRY_NOT_FOUND));
        };

        let entry = self
            .repo
            .find_by_id(&id)
            .await
            .map_err(map_repository_error)?
            .ok_or_else(|| Error::not_found(ENTRY_NOT_FOUND))?;

        let is_author = user_key
            .as_deref()
            .is_some_and(|key| entry.is_owned_by(key));
        if !is_author && !role.authorize(Role::Admin) {
            return Err(Error::forbidden("only the author or an admin may delete"));
        }

        let removed = self
            .repo
            .delete_with_pin(&id)
            .await
            .map_err(map_repository_error)?;
        if !removed {
            // Lost a race with eviction or another delete.
            return Err(Error::not_found(ENTRY_NOT_FOUND));
        }

        info!(entry_id = %id, %role, by_author = is_author, "guestbook entry deleted");
        Ok(())
    }

    async fn set_pinned(&self, id: &str, role: Role) -> Result<EntryId, Error> {
        require_role(role, &[Role::Admin])?;
        let id = id.parse::<EntryId>().map_err(validation_error)?;

        self.repo
            .set_pinned(&id)
            .await
            .map_err(map_repository_error)?;

        info!(entry_id = %id, "guestbook pin updated");
        Ok(id)
    }
}

#[async_trait]
impl<R> GuestbookQuery for GuestbookService<R>
where
    R: GuestbookRepository,
{
    async fn list_entries(&self, page: PageRequest) -> Result<Paginated<GuestbookEntry>, Error> {
        let items = self
            .repo
            .list(&page)
            .await
            .map_err(map_repository_error)?;
        Ok(Paginated::new(items, page))
    }

    async fn pinned_entry(&self) -> Result<Option<EntryId>, Error> {
        self.repo.pinned().await.map_err(map_repository_error)
    }
}

#[cfg(test)]
#[path = "guestbook_service_tests.rs"]
mod tests;
