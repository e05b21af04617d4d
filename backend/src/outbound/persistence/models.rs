//! Internal Diesel row structs for database operations.
//!
//! These types never leave the persistence layer.

use chrono::{DateTime, Utc};
use diesel::prelude::*;
use uuid::Uuid;

use crate::domain::{EntryId, GuestbookEntry};

use super::schema::{guestbook_entries, guestbook_pins};

/// Row struct for reading from the guestbook_entries table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = guestbook_entries)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct GuestbookEntryRow {
    pub id: Uuid,
    pub author: String,
    pub content: String,
    pub user_key: String,
    pub created_at: DateTime<Utc>,
}

impl From<GuestbookEntryRow> for GuestbookEntry {
    fn from(row: GuestbookEntryRow) -> Self {
        Self {
            id: EntryId::from_uuid(row.id),
            author: row.author,
            content: row.content,
            user_key: row.user_key,
            created_at: row.created_at,
        }
    }
}

/// Insertable struct for new guestbook entries.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = guestbook_entries)]
pub(crate) struct NewGuestbookEntryRow<'a> {
    pub id: Uuid,
    pub author: &'a str,
    pub content: &'a str,
    pub user_key: &'a str,
    pub created_at: DateTime<Utc>,
}

impl<'a> From<&'a GuestbookEntry> for NewGuestbookEntryRow<'a> {
    fn from(entry: &'a GuestbookEntry) -> Self {
        Self {
            id: *entry.id.as_uuid(),
            author: &entry.author,
            content: &entry.content,
            user_key: &entry.user_key,
            created_at: entry.created_at,
        }
    }
}

/// Insertable struct for the pin singleton.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = guestbook_pins)]
pub(crate) struct NewGuestbookPinRow<'a> {
    pub slot: &'a str,
    pub entry_id: Uuid,
}
