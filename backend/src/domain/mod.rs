//! Domain primitives, services and ports.
//!
//! Purpose: hold the role model, the login use-case and the guestbook rules
//! independent of HTTP and storage. Adapters in `inbound` and `outbound`
//! depend on this module, never the reverse.
//!
//! Public surface:
//! - Error / ErrorCode: transport-agnostic error payload.
//! - Role, resolve_role, require_role: cookie-derived role and the guard.
//! - SecretLoginService: password login against configured secrets.
//! - GuestbookService: guestbook commands and queries.

pub mod auth;
pub mod error;
pub mod guestbook;
pub mod guestbook_service;
pub mod ports;
pub mod role;
pub mod trace_id;

pub use self::auth::{ACCESS_DENIED, AccessSecrets, Password, SecretLoginService};
pub use self::error::{Error, ErrorCode, ErrorValidationError};
pub use self::guestbook::{
    EntryId, GUESTBOOK_CAPACITY, GuestbookEntry, GuestbookValidationError, NewGuestbookEntry,
    PIN_SLOT,
};
pub use self::guestbook_service::GuestbookService;
pub use self::role::{Role, UnknownRole, require_role, resolve_role};
pub use self::trace_id::{TRACE_ID_HEADER, TraceId};
