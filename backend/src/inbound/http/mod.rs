//! HTTP inbound adapter exposing REST endpoints.

use actix_web::{Scope, web};

pub mod auth;
pub mod error;
pub mod guestbook;
pub mod health;
pub mod schemas;
pub mod session;
pub mod session_config;
pub mod state;
#[cfg(test)]
pub mod test_utils;

pub use error::ApiResult;

/// Versioned API scope with every auth and guestbook handler registered.
///
/// Handlers expect [`state::HttpState`] in the application data.
pub fn api_scope() -> Scope {
    web::scope("/api/v1")
        .service(auth::login)
        .service(auth::logout)
        .service(auth::current_session)
        .service(guestbook::list_entries)
        .service(guestbook::create_entry)
        .service(guestbook::get_pinned)
        .service(guestbook::set_pinned)
        .service(guestbook::delete_entry)
}
