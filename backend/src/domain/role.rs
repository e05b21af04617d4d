//! Caller roles and the authorisation guard.
//!
//! A role is derived per request from the `admin_session` cookie; no server
//! side session table backs it. Only the login use-case may mint a cookie and
//! it only ever writes one of the four strings returned by [`Role::as_str`].
//!
//! Authorisation is an equality check, not a hierarchy: [`Role::Staff`] does
//! not inherit [`Role::Admin`] powers. Each privileged operation names the
//! exact roles it accepts.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::Error;

/// Privilege level of a caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Site administrator.
    Admin,
    /// Collaborating staff member.
    Staff,
    /// Trusted visitor.
    Visitor,
    /// Anonymous caller; the default when no cookie is present.
    #[default]
    Guest,
}

/// Raised by [`Role::from_str`] for strings outside the fixed set.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown role '{0}'")]
pub struct UnknownRole(pub String);

impl Role {
    /// Every role, in login precedence order.
    pub const ALL: [Role; 4] = [Role::Admin, Role::Staff, Role::Visitor, Role::Guest];

    /// Cookie/wire representation.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::Staff => "staff",
            Self::Visitor => "visitor",
            Self::Guest => "guest",
        }
    }

    /// Whether this role is exactly `required`.
    ///
    /// # Examples
    /// ```
    /// use fansite::domain::Role;
    ///
    /// assert!(Role::Admin.authorize(Role::Admin));
    /// assert!(!Role::Staff.authorize(Role::Admin));
    /// ```
    pub fn authorize(self, required: Role) -> bool {
        self == required
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = UnknownRole;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|role| role.as_str() == s)
            .ok_or_else(|| UnknownRole(s.to_owned()))
    }
}

/// Resolve the caller's role from the raw cookie value.
///
/// Absent or unrecognised values resolve to [`Role::Guest`]. Matching is
/// exact; `"Admin"` is not `"admin"`.
///
/// # Examples
/// ```
/// use fansite::domain::{Role, resolve_role};
///
/// assert_eq!(resolve_role(Some("staff")), Role::Staff);
/// assert_eq!(resolve_role(Some("root")), Role::Guest);
/// assert_eq!(resolve_role(None), Role::Guest);
/// ```
pub fn resolve_role(cookie_value: Option<&str>) -> Role {
    cookie_value
        .and_then(|value| value.parse().ok())
        .unwrap_or_default()
}

/// Fail with [`super::ErrorCode::Forbidden`] unless `role` is one of `accepted`.
pub fn require_role(role: Role, accepted: &[Role]) -> Result<(), Error> {
    if accepted.iter().any(|required| role.authorize(*required)) {
        Ok(())
    } else {
        Err(Error::forbidden("forbidden"))
    }
}
