//! PostgreSQL-backed `GuestbookRepository` implementation using Diesel ORM.
//!
//! Inserts take a transaction-scoped advisory lock, count the stored rows and,
//! at capacity, delete the single oldest row before inserting. Concurrent
//! writers therefore cannot both observe a free slot and leave the table over
//! its bound. Deletes and evictions remove the pin row in the same
//! transaction as the entry.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel::sql_query;
use diesel::sql_types::BigInt;
use diesel::upsert::excluded;
use diesel_async::scoped_futures::ScopedFutureExt;
use diesel_async::{AsyncConnection, AsyncPgConnection, RunQueryDsl};
use pagination::PageRequest;
use tracing::debug;
use uuid::Uuid;

use crate::domain::ports::{GuestbookRepository, GuestbookRepositoryError};
use crate::domain::{EntryId, GuestbookEntry, PIN_SLOT};

use super::models::{GuestbookEntryRow, NewGuestbookEntryRow, NewGuestbookPinRow};
use super::pool::{DbPool, PoolError};
use super::schema::{guestbook_entries, guestbook_pins};

/// Advisory lock key serialising guestbook writers.
const GUESTBOOK_WRITE_LOCK: i64 = 0x6775_6573_7462_6b;

/// Diesel-backed implementation of the `GuestbookRepository` port.
#[derive(Clone)]
pub struct DieselGuestbookRepository {
    pool: DbPool,
}

impl DieselGuestbookRepository {
    /// Create a new repository with the given connection pool.
    ///
    /// # Examples
    ///
    /// ```rust,no_run
    /// use fansite::outbound::persistence::{DbPool, DieselGuestbookRepository, PoolConfig};
    ///
    /// # async fn run() -> Result<(), Box<dyn std::error::Error>> {
    /// let pool = DbPool::new(PoolConfig::new("postgres://localhost/fansite")).await?;
    /// let _repo = DieselGuestbookRepository::new(pool);
    /// # Ok(())
    /// # }
    /// ```
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> GuestbookRepositoryError {
    GuestbookRepositoryError::connection(error.into_message())
}

fn map_diesel_error(error: diesel::result::Error) -> GuestbookRepositoryError {
    use diesel::result::{DatabaseErrorKind, Error as DieselError};

    match &error {
        DieselError::DatabaseError(kind, info) => {
            debug!(?kind, message = info.message(), "diesel operation failed");
        }
        _ => debug!(
            error_type = %std::any::type_name_of_val(&error),
            "diesel operation failed"
        ),
    }

    match error {
        DieselError::NotFound => GuestbookRepositoryError::query("record not found"),
        DieselError::QueryBuilderError(_) => {
            GuestbookRepositoryError::query("database query error")
        }
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, _) => {
            GuestbookRepositoryError::connection("database connection error")
        }
        _ => GuestbookRepositoryError::query("database error"),
    }
}

fn to_sql_count(value: u64) -> Result<i64, GuestbookRepositoryError> {
    i64::try_from(value).map_err(|_| GuestbookRepositoryError::query("page window out of range"))
}

/// Delete the single oldest entry together with any pin on it.
async fn evict_oldest(
    conn: &mut AsyncPgConnection,
) -> Result<Option<Uuid>, diesel::result::Error> {
    let oldest: Option<Uuid> = guestbook_entries::table
        .order((
            guestbook_entries::created_at.asc(),
            guestbook_entries::id.asc(),
        ))
        .select(guestbook_entries::id)
        .first(conn)
        .await
        .optional()?;

    if let Some(id) = oldest {
        diesel::delete(guestbook_pins::table.filter(guestbook_pins::entry_id.eq(id)))
            .execute(conn)
            .await?;
        diesel::delete(guestbook_entries::table.find(id))
            .execute(conn)
            .await?;
    }
    Ok(oldest)
}

#[async_trait]
impl GuestbookRepository for DieselGuestbookRepository {
    async fn list(
        &self,
        page: &PageRequest,
    ) -> Result<Vec<GuestbookEntry>, GuestbookRepositoryError> {
        let offset = to_sql_count(page.offset())?;
        let limit = i64::from(page.limit());
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows: Vec<GuestbookEntryRow> = guestbook_entries::table
            .order((
                guestbook_entries::created_at.desc(),
                guestbook_entries::id.desc(),
            ))
            .limit(limit)
            .offset(offset)
            .select(GuestbookEntryRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        Ok(rows.into_iter().map(GuestbookEntry::from).collect())
    }

    async fn find_by_id(
        &self,
        id: &EntryId,
    ) -> Result<Option<GuestbookEntry>, GuestbookRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row: Option<GuestbookEntryRow> = guestbook_entries::table
            .find(*id.as_uuid())
            .select(GuestbookEntryRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        Ok(row.map(GuestbookEntry::from))
    }

    async fn insert_bounded(
        &self,
        entry: &GuestbookEntry,
        capacity: usize,
    ) -> Result<Option<EntryId>, GuestbookRepositoryError> {
        let row = NewGuestbookEntryRow::from(entry);
        let bound = to_sql_count(u64::try_from(capacity).unwrap_or(u64::MAX))?;
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let evicted = conn
            .transaction(|conn| {
                async move {
                    sql_query("SELECT pg_advisory_xact_lock($1)")
                        .bind::<BigInt, _>(GUESTBOOK_WRITE_LOCK)
                        .execute(conn)
                        .await?;

                    let stored: i64 = guestbook_entries::table.count().get_result(conn).await?;
                    let evicted = if stored >= bound {
                        evict_oldest(conn).await?
                    } else {
                        None
                    };

                    diesel::insert_into(guestbook_entries::table)
                        .values(&row)
                        .execute(conn)
                        .await?;

                    Ok(evicted)
                }
                .scope_boxed()
            })
            .await
            .map_err(map_diesel_error)?;

        Ok(evicted.map(EntryId::from_uuid))
    }

    async fn delete_with_pin(&self, id: &EntryId) -> Result<bool, GuestbookRepositoryError> {
        let id = *id.as_uuid();
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let removed = conn
            .transaction(|conn| {
                async move {
                    diesel::delete(guestbook_pins::table.filter(guestbook_pins::entry_id.eq(id)))
                        .execute(conn)
                        .await?;
                    diesel::delete(guestbook_entries::table.find(id))
                        .execute(conn)
                        .await
                }
                .scope_boxed()
            })
            .await
            .map_err(map_diesel_error)?;

        Ok(removed > 0)
    }

    async fn pinned(&self) -> Result<Option<EntryId>, GuestbookRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let pinned: Option<Uuid> = guestbook_pins::table
            .find(PIN_SLOT)
            .select(guestbook_pins::entry_id)
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        Ok(pinned.map(EntryId::from_uuid))
    }

    async fn set_pinned(&self, id: &EntryId) -> Result<(), GuestbookRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = NewGuestbookPinRow {
            slot: PIN_SLOT,
            entry_id: *id.as_uuid(),
        };

        diesel::insert_into(guestbook_pins::table)
            .values(&row)
            .on_conflict(guestbook_pins::slot)
            .do_update()
            .set(guestbook_pins::entry_id.eq(excluded(guestbook_pins::entry_id)))
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(map_diesel_error)
    }
}
