//! Page/limit pagination primitives shared by backend list endpoints.
//!
//! List endpoints accept `?page=` and `?limit=` query parameters. Both are
//! optional positive integers; `page` defaults to [`DEFAULT_PAGE`] and `limit`
//! to [`DEFAULT_LIMIT`]. [`PageRequest`] is the validated form and exposes the
//! row offset that persistence adapters feed into `OFFSET`/`LIMIT` clauses.
//!
//! No upper bound is placed on `limit`; callers that need one must enforce it
//! themselves.
//!
//! # Examples
//! ```
//! use pagination::{PageParams, PageRequest};
//!
//! let params = PageParams {
//!     page: Some("3".to_owned()),
//!     limit: Some("10".to_owned()),
//! };
//! let request = PageRequest::try_from(params).expect("valid params");
//! assert_eq!(request.offset(), 20);
//! ```

use std::num::NonZeroU32;

use serde::{Deserialize, Serialize};

/// Page number used when the caller does not supply one.
pub const DEFAULT_PAGE: u32 = 1;
/// Page size used when the caller does not supply one.
pub const DEFAULT_LIMIT: u32 = 50;

/// Errors raised while validating pagination parameters.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PageRequestError {
    /// `page` was zero, negative, or not an integer.
    #[error("page must be a positive integer, got '{value}'")]
    InvalidPage {
        /// Raw value supplied by the caller.
        value: String,
    },
    /// `limit` was zero, negative, or not an integer.
    #[error("limit must be a positive integer, got '{value}'")]
    InvalidLimit {
        /// Raw value supplied by the caller.
        value: String,
    },
}

/// Validated one-based page request.
///
/// ## Invariants
/// - `page >= 1` and `limit >= 1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    page: NonZeroU32,
    limit: NonZeroU32,
}

impl PageRequest {
    /// Build a request from numeric parts.
    ///
    /// # Errors
    /// Returns [`PageRequestError`] when either value is zero.
    ///
    /// # Examples
    /// ```
    /// use pagination::PageRequest;
    ///
    /// let request = PageRequest::new(2, 10).expect("positive values");
    /// assert_eq!(request.offset(), 10);
    /// assert!(PageRequest::new(0, 10).is_err());
    /// ```
    pub fn new(page: u32, limit: u32) -> Result<Self, PageRequestError> {
        let page = NonZeroU32::new(page).ok_or_else(|| PageRequestError::InvalidPage {
            value: page.to_string(),
        })?;
        let limit = NonZeroU32::new(limit).ok_or_else(|| PageRequestError::InvalidLimit {
            value: limit.to_string(),
        })?;
        Ok(Self { page, limit })
    }

    /// One-based page number.
    #[must_use]
    pub const fn page(&self) -> u32 {
        self.page.get()
    }

    /// Maximum number of items on the page.
    #[must_use]
    pub const fn limit(&self) -> u32 {
        self.limit.get()
    }

    /// Number of items to skip: `(page - 1) * limit`.
    #[must_use]
    pub fn offset(&self) -> u64 {
        u64::from(self.page.get().saturating_sub(1)) * u64::from(self.limit.get())
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: NonZeroU32::MIN,
            limit: NonZeroU32::new(DEFAULT_LIMIT).unwrap_or(NonZeroU32::MIN),
        }
    }
}

/// Raw query parameters as received from the transport.
///
/// Values stay as strings so malformed input surfaces as a
/// [`PageRequestError`] rather than a framework deserialisation failure.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct PageParams {
    /// Requested page, if any.
    #[serde(default)]
    pub page: Option<String>,
    /// Requested page size, if any.
    #[serde(default)]
    pub limit: Option<String>,
}

impl TryFrom<PageParams> for PageRequest {
    type Error = PageRequestError;

    fn try_from(value: PageParams) -> Result<Self, Self::Error> {
        let page = parse_positive(value.page, DEFAULT_PAGE)
            .map_err(|raw| PageRequestError::InvalidPage { value: raw })?;
        let limit = parse_positive(value.limit, DEFAULT_LIMIT)
            .map_err(|raw| PageRequestError::InvalidLimit { value: raw })?;
        Self::new(page, limit)
    }
}

/// Parse an optional positive integer, treating blank input as absent.
fn parse_positive(raw: Option<String>, default: u32) -> Result<u32, String> {
    let Some(raw) = raw else {
        return Ok(default);
    };
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(default);
    }
    match trimmed.parse::<u32>() {
        Ok(value) if value > 0 => Ok(value),
        _ => Err(raw),
    }
}

/// Page envelope returned by list endpoints.
///
/// Serialises as `{"items": [...], "page": 1, "limit": 50}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Paginated<T> {
    items: Vec<T>,
    page: u32,
    limit: u32,
}

impl<T> Paginated<T> {
    /// Wrap a page of items with the request that produced it.
    #[must_use]
    pub fn new(items: Vec<T>, request: PageRequest) -> Self {
        Self {
            items,
            page: request.page(),
            limit: request.limit(),
        }
    }

    /// Items on this page.
    #[must_use]
    pub fn items(&self) -> &[T] {
        &self.items
    }

    /// Consume the envelope, returning the items.
    #[must_use]
    pub fn into_items(self) -> Vec<T> {
        self.items
    }

    /// One-based page number.
    #[must_use]
    pub const fn page(&self) -> u32 {
        self.page
    }

    /// Requested page size.
    #[must_use]
    pub const fn limit(&self) -> u32 {
        self.limit
    }
}
