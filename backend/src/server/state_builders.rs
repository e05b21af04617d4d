//! Builders wiring domain services onto the HTTP state.

use std::sync::Arc;

use actix_web::web;
use mockable::DefaultClock;

use fansite::domain::ports::{GuestbookCommand, GuestbookQuery, GuestbookRepository};
use fansite::domain::{GuestbookService, SecretLoginService};
use fansite::inbound::http::session::SessionCookie;
use fansite::inbound::http::state::{HttpState, HttpStatePorts};
use fansite::outbound::memory::InMemoryGuestbookRepository;
use fansite::outbound::persistence::DieselGuestbookRepository;
use tracing::info;

use super::ServerConfig;

fn guestbook_ports<R>(repo: R) -> (Arc<dyn GuestbookCommand>, Arc<dyn GuestbookQuery>)
where
    R: GuestbookRepository + 'static,
{
    let service = Arc::new(GuestbookService::new(
        Arc::new(repo),
        Arc::new(DefaultClock),
    ));
    (service.clone(), service)
}

/// Build handler state, choosing Postgres when a pool is configured.
pub(super) fn build_http_state(config: &ServerConfig) -> web::Data<HttpState> {
    let (guestbook, guestbook_query) = match &config.db_pool {
        Some(pool) => guestbook_ports(DieselGuestbookRepository::new(pool.clone())),
        None => {
            info!("using in-memory guestbook storage");
            guestbook_ports(InMemoryGuestbookRepository::default())
        }
    };

    let ports = HttpStatePorts {
        login: Arc::new(SecretLoginService::new(config.session.secrets.clone())),
        guestbook,
        guestbook_query,
    };
    web::Data::new(HttpState::new(
        ports,
        SessionCookie::new(config.session.cookie_secure),
    ))
}
