//! Session configuration parsing and validation.
//!
//! This module centralises the environment-driven session settings, the
//! cookie `Secure` toggle and the per-role login secrets, so they are
//! validated consistently and can be tested in isolation.

use mockable::Env;
use tracing::warn;

use crate::domain::{AccessSecrets, Role};

mod parsing;

use parsing::{BoolEnvConfig, parse_bool_env};

const COOKIE_SECURE_ENV: &str = "SESSION_COOKIE_SECURE";
const ADMIN_PASSWORD_ENV: &str = "ADMIN_PASSWORD";
const STAFF_PASSWORD_ENV: &str = "STAFF_PASSWORD";
const VISITOR_PASSWORD_ENV: &str = "VISITOR_PASSWORD";

/// Build mode for session configuration validation.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum BuildMode {
    /// Debug builds tolerate defaults and emit warnings for missing toggles.
    Debug,
    /// Release builds require explicit, valid session toggles.
    Release,
}

impl BuildMode {
    /// Determine the build mode from `cfg!(debug_assertions)`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use fansite::inbound::http::session_config::BuildMode;
    ///
    /// let mode = BuildMode::from_debug_assertions();
    /// if cfg!(debug_assertions) {
    ///     assert_eq!(mode, BuildMode::Debug);
    /// } else {
    ///     assert_eq!(mode, BuildMode::Release);
    /// }
    /// ```
    #[must_use]
    pub fn from_debug_assertions() -> Self {
        if cfg!(debug_assertions) {
            Self::Debug
        } else {
            Self::Release
        }
    }

    pub(crate) fn is_debug(self) -> bool {
        matches!(self, Self::Debug)
    }
}

/// Session settings derived from configuration.
#[derive(Debug, Clone)]
pub struct SessionSettings {
    /// Whether session cookies are marked `Secure`.
    pub cookie_secure: bool,
    /// Login secrets per role.
    pub secrets: AccessSecrets,
}

/// Errors raised while validating session configuration.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum SessionConfigError {
    /// A required environment variable is missing.
    #[error("missing required environment variable: {name}")]
    MissingEnv { name: &'static str },
    /// A variable is present but contains an invalid value.
    #[error("invalid value for {name}='{value}'; expected {expected}")]
    InvalidEnv {
        name: &'static str,
        value: String,
        expected: &'static str,
    },
}

/// Build session settings from environment variables and build mode.
///
/// # Examples
///
/// ```rust
/// use fansite::domain::Role;
/// use fansite::inbound::http::session_config::{BuildMode, session_settings_from_env};
/// use mockable::MockEnv;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let mut env = MockEnv::new();
/// env.expect_string().returning(|name| match name {
///     "SESSION_COOKIE_SECURE" => Some("1".to_string()),
///     "ADMIN_PASSWORD" => Some("correct horse".to_string()),
///     _ => None,
/// });
///
/// let settings = session_settings_from_env(&env, BuildMode::Release)?;
/// assert!(settings.cookie_secure);
/// assert_eq!(settings.secrets.role_for("correct horse"), Some(Role::Admin));
/// # Ok(())
/// # }
/// ```
pub fn session_settings_from_env<E: Env>(
    env: &E,
    mode: BuildMode,
) -> Result<SessionSettings, SessionConfigError> {
    let cookie_secure = parse_bool_env(env, mode, BoolEnvConfig::new(COOKIE_SECURE_ENV, true))?;
    let secrets = secrets_from_env(env, mode)?;

    Ok(SessionSettings {
        cookie_secure,
        secrets,
    })
}

fn secrets_from_env<E: Env>(env: &E, mode: BuildMode) -> Result<AccessSecrets, SessionConfigError> {
    let admin = non_blank(env, ADMIN_PASSWORD_ENV);
    if admin.is_none() {
        if mode.is_debug() {
            warn!("ADMIN_PASSWORD not set; admin login is disabled");
        } else {
            return Err(SessionConfigError::MissingEnv {
                name: ADMIN_PASSWORD_ENV,
            });
        }
    }

    let mut secrets = AccessSecrets::default();
    for (role, value) in [
        (Role::Admin, admin),
        (Role::Staff, non_blank(env, STAFF_PASSWORD_ENV)),
        (Role::Visitor, non_blank(env, VISITOR_PASSWORD_ENV)),
    ] {
        if let Some(secret) = value {
            secrets = secrets.with_secret(role, secret);
        }
    }
    Ok(secrets)
}

fn non_blank<E: Env>(env: &E, name: &str) -> Option<String> {
    env.string(name).filter(|value| !value.trim().is_empty())
}
