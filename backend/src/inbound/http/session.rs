//! Session cookie helpers to keep HTTP handlers free of cookie plumbing.
//!
//! The `admin_session` cookie carries the caller's role name verbatim. It is
//! neither signed nor encrypted; the server only ever writes values produced
//! by [`Role::as_str`] and reads anything else as [`Role::Guest`].

use std::future::{Ready, ready};

use actix_web::cookie::{Cookie, SameSite, time::Duration};
use actix_web::{FromRequest, HttpRequest, dev::Payload};

use crate::domain::{Role, resolve_role};

/// Name of the role cookie.
pub const SESSION_COOKIE: &str = "admin_session";

/// Role resolved for the current request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionContext {
    role: Role,
}

impl SessionContext {
    /// Wrap an already resolved role.
    pub fn new(role: Role) -> Self {
        Self { role }
    }

    /// Resolve the role from the request's cookie jar.
    pub fn from_http_request(req: &HttpRequest) -> Self {
        let cookie = req.cookie(SESSION_COOKIE);
        Self::new(resolve_role(cookie.as_ref().map(Cookie::value)))
    }

    /// The caller's role.
    pub fn role(&self) -> Role {
        self.role
    }
}

impl FromRequest for SessionContext {
    type Error = actix_web::Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(Ok(Self::from_http_request(req)))
    }
}

/// Builds the `Set-Cookie` values for login and logout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionCookie {
    secure: bool,
}

impl SessionCookie {
    /// Cookie factory honouring the configured `Secure` flag.
    pub const fn new(secure: bool) -> Self {
        Self { secure }
    }

    /// Session cookie for `role`. It has no `Max-Age`, so it lasts for the
    /// browser session.
    pub fn issue(&self, role: Role) -> Cookie<'static> {
        Cookie::build(SESSION_COOKIE, role.as_str())
            .path("/")
            .http_only(true)
            .same_site(SameSite::Lax)
            .secure(self.secure)
            .finish()
    }

    /// Expired cookie that removes the role from the browser.
    pub fn clear(&self) -> Cookie<'static> {
        Cookie::build(SESSION_COOKIE, "")
            .path("/")
            .http_only(true)
            .same_site(SameSite::Lax)
            .secure(self.secure)
            .max_age(Duration::ZERO)
            .finish()
    }
}
