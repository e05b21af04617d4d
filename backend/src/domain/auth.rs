//! Password login against server-side role secrets.
//!
//! There are no user accounts. The server holds one plaintext secret per
//! privileged role, loaded once at start; a login attempt is compared against
//! them in precedence order (admin, staff, visitor) and the first match names
//! the role written into the session cookie.

use std::fmt;

use async_trait::async_trait;
use tracing::{info, warn};
use zeroize::Zeroizing;

use super::ports::LoginService;
use super::{Error, Role};

/// Fixed denial message; failures never reveal why they failed.
pub const ACCESS_DENIED: &str = "access denied";

/// Password supplied by a login attempt.
#[derive(Clone, PartialEq, Eq)]
pub struct Password(Zeroizing<String>);

impl Password {
    /// Wrap a raw password.
    pub fn new(raw: impl Into<String>) -> Self {
        Self(Zeroizing::new(raw.into()))
    }

    /// Raw password text.
    pub fn expose(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Debug for Password {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Password(<redacted>)")
    }
}

/// Per-role login secrets.
///
/// ## Invariants
/// - [`Role::Guest`] never has a secret.
/// - Blank secrets are discarded and can never match.
///
/// # Examples
/// ```
/// use fansite::domain::{AccessSecrets, Role};
///
/// let secrets = AccessSecrets::default()
///     .with_secret(Role::Admin, "hunter2")
///     .with_secret(Role::Staff, "");
/// assert_eq!(secrets.role_for("hunter2"), Some(Role::Admin));
/// assert_eq!(secrets.role_for(""), None);
/// ```
#[derive(Clone, Default)]
pub struct AccessSecrets {
    admin: Option<Zeroizing<String>>,
    staff: Option<Zeroizing<String>>,
    visitor: Option<Zeroizing<String>>,
}

impl AccessSecrets {
    /// Set the secret for `role`. Guest secrets and blank values are ignored.
    #[must_use]
    pub fn with_secret(mut self, role: Role, secret: impl Into<String>) -> Self {
        let secret = secret.into();
        let value = (!secret.trim().is_empty()).then(|| Zeroizing::new(secret));
        match role {
            Role::Admin => self.admin = value,
            Role::Staff => self.staff = value,
            Role::Visitor => self.visitor = value,
            Role::Guest => {}
        }
        self
    }

    /// Whether no secret is configured at all.
    pub fn is_empty(&self) -> bool {
        self.admin.is_none() && self.staff.is_none() && self.visitor.is_none()
    }

    /// Whether `role` has a secret configured.
    pub fn has_secret(&self, role: Role) -> bool {
        self.secret(role).is_some()
    }

    fn secret(&self, role: Role) -> Option<&str> {
        match role {
            Role::Admin => self.admin.as_deref().map(String::as_str),
            Role::Staff => self.staff.as_deref().map(String::as_str),
            Role::Visitor => self.visitor.as_deref().map(String::as_str),
            Role::Guest => None,
        }
    }

    /// Role whose secret equals `password`, checked in precedence order.
    pub fn role_for(&self, password: &str) -> Option<Role> {
        if password.is_empty() {
            return None;
        }
        Role::ALL
            .into_iter()
            .find(|role| self.secret(*role) == Some(password))
    }
}

impl fmt::Debug for AccessSecrets {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AccessSecrets")
            .field("admin", &self.admin.is_some())
            .field("staff", &self.staff.is_some())
            .field("visitor", &self.visitor.is_some())
            .finish()
    }
}

/// [`LoginService`] backed by configured [`AccessSecrets`].
#[derive(Debug, Clone)]
pub struct SecretLoginService {
    secrets: AccessSecrets,
}

impl SecretLoginService {
    /// Create the service from loaded secrets.
    pub fn new(secrets: AccessSecrets) -> Self {
        if !secrets.has_secret(Role::Admin) {
            warn!("no admin secret configured; admin login is disabled");
        }
        Self { secrets }
    }
}

#[async_trait]
impl LoginService for SecretLoginService {
    async fn authenticate(&self, password: &Password) -> Result<Role, Error> {
        match self.secrets.role_for(password.expose()) {
            Some(role) => {
                info!(%role, "login accepted");
                Ok(role)
            }
            None => {
                warn!("login rejected");
                Err(Error::unauthorized(ACCESS_DENIED))
            }
        }
    }
}
