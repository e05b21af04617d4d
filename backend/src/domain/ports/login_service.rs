//! Driving port for the login use-case.
//!
//! Inbound adapters call it to exchange a password for a [`Role`] without
//! knowing where the secrets come from, so handler tests can substitute a
//! double.

use async_trait::async_trait;

use crate::domain::{Error, Password, Role};

/// Domain use-case port for password login.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LoginService: Send + Sync {
    /// Return the role granted by `password`, or `Unauthorized`.
    async fn authenticate(&self, password: &Password) -> Result<Role, Error>;
}
