//! Diesel table definitions for the PostgreSQL schema.
//!
//! Must match `backend/migrations` exactly; regenerate with
//! `diesel print-schema` after changing a migration.

diesel::table! {
    /// Guestbook entries, newest first by `(created_at, id)`.
    guestbook_entries (id) {
        /// Primary key: UUID v7, time ordered.
        id -> Uuid,
        author -> Text,
        content -> Text,
        /// Author's ownership proof. Never returned to clients.
        user_key -> Text,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Single-row pin pointer keyed by the constant `"singleton"`.
    guestbook_pins (slot) {
        slot -> Text,
        entry_id -> Uuid,
    }
}

diesel::allow_tables_to_appear_in_same_query!(guestbook_entries, guestbook_pins);
