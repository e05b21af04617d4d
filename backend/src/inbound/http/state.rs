//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on domain ports (use-cases) and remain testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{GuestbookCommand, GuestbookQuery, LoginService};

use super::session::SessionCookie;

/// Parameter object bundling all port implementations for HTTP handlers.
#[derive(Clone)]
pub struct HttpStatePorts {
    pub login: Arc<dyn LoginService>,
    pub guestbook: Arc<dyn GuestbookCommand>,
    pub guestbook_query: Arc<dyn GuestbookQuery>,
}

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub login: Arc<dyn LoginService>,
    pub guestbook: Arc<dyn GuestbookCommand>,
    pub guestbook_query: Arc<dyn GuestbookQuery>,
    pub session_cookie: SessionCookie,
}

impl HttpState {
    /// Construct state from a ports bundle and the cookie policy.
    ///
    /// # Examples
    /// ```no_run
    /// use std::sync::Arc;
    ///
    /// use fansite::domain::{AccessSecrets, GuestbookService, SecretLoginService};
    /// use fansite::inbound::http::session::SessionCookie;
    /// use fansite::inbound::http::state::{HttpState, HttpStatePorts};
    /// use fansite::outbound::memory::InMemoryGuestbookRepository;
    /// use mockable::DefaultClock;
    ///
    /// let service = Arc::new(GuestbookService::new(
    ///     Arc::new(InMemoryGuestbookRepository::default()),
    ///     Arc::new(DefaultClock),
    /// ));
    /// let state = HttpState::new(
    ///     HttpStatePorts {
    ///         login: Arc::new(SecretLoginService::new(AccessSecrets::default())),
    ///         guestbook: service.clone(),
    ///         guestbook_query: service,
    ///     },
    ///     SessionCookie::new(false),
    /// );
    /// let _login = state.login.clone();
    /// ```
    pub fn new(ports: HttpStatePorts, session_cookie: SessionCookie) -> Self {
        let HttpStatePorts {
            login,
            guestbook,
            guestbook_query,
        } = ports;
        Self {
            login,
            guestbook,
            guestbook_query,
            session_cookie,
        }
    }
}
