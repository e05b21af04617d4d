//! PostgreSQL persistence adapters using Diesel ORM.
//!
//! Repository implementations only translate between Diesel rows and domain
//! types. Row structs (`models.rs`) and table definitions (`schema.rs`) stay
//! private to this module. Connections come from a `bb8` pool through
//! `diesel-async`.
//!
//! # Example
//!
//! ```ignore
//! use fansite::outbound::persistence::{DbPool, DieselGuestbookRepository, PoolConfig};
//!
//! let pool = DbPool::new(PoolConfig::new("postgres://localhost/fansite")).await?;
//! let repo = DieselGuestbookRepository::new(pool);
//! ```

mod diesel_guestbook_repository;
mod migrations;
mod models;
mod pool;
mod schema;

pub use diesel_guestbook_repository::DieselGuestbookRepository;
pub use migrations::{MigrationError, run_pending_migrations};
pub use pool::{DbPool, PoolConfig, PoolError};
