//! Test helpers for inbound HTTP components.

use std::sync::Arc;

use actix_web::dev::{ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, web};

use crate::domain::ports::{
    GuestbookCommand, GuestbookQuery, LoginService, MockGuestbookCommand, MockGuestbookQuery,
    MockLoginService,
};

use super::session::SessionCookie;
use super::state::{HttpState, HttpStatePorts};

/// Build state from arbitrary ports with non-secure cookies for plain HTTP
/// tests.
pub fn test_state(
    login: Arc<dyn LoginService>,
    guestbook: Arc<dyn GuestbookCommand>,
    guestbook_query: Arc<dyn GuestbookQuery>,
) -> HttpState {
    HttpState::new(
        HttpStatePorts {
            login,
            guestbook,
            guestbook_query,
        },
        SessionCookie::new(false),
    )
}

/// State whose guestbook ports must not be called.
pub fn state_with_login(login: MockLoginService) -> HttpState {
    test_state(
        Arc::new(login),
        Arc::new(MockGuestbookCommand::new()),
        Arc::new(MockGuestbookQuery::new()),
    )
}

/// State whose login port must not be called.
pub fn state_with_guestbook(command: MockGuestbookCommand, query: MockGuestbookQuery) -> HttpState {
    test_state(
        Arc::new(MockLoginService::new()),
        Arc::new(command),
        Arc::new(query),
    )
}

/// Application serving the versioned API over `state`.
pub fn test_app(
    state: HttpState,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    App::new()
        .app_data(web::Data::new(state))
        .service(super::api_scope())
}
