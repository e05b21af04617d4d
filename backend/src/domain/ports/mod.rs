//! Domain ports for the hexagonal boundary.
//!
//! Driving ports (`*Command`, `*Query`, [`LoginService`]) are called by
//! inbound adapters; driven ports (`*Repository`) are implemented by outbound
//! adapters.

mod macros;
pub(crate) use macros::define_port_error;

mod guestbook_command;
mod guestbook_query;
mod guestbook_repository;
mod login_service;

#[cfg(test)]
pub use guestbook_command::MockGuestbookCommand;
pub use guestbook_command::{CreateEntryRequest, DeleteEntryRequest, GuestbookCommand};
#[cfg(test)]
pub use guestbook_query::MockGuestbookQuery;
pub use guestbook_query::GuestbookQuery;
#[cfg(test)]
pub use guestbook_repository::MockGuestbookRepository;
pub use guestbook_repository::{GuestbookRepository, GuestbookRepositoryError};
#[cfg(test)]
pub use login_service::MockLoginService;
pub use login_service::LoginService;
