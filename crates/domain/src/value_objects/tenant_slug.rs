//! Tenant slug value object
//!
//! The slug is the URL-safe short name a tenant is addressed by: it appears
//! as the subdomain label (`acme.podium.events`), in the tenant header, and
//! in credential claims. Immutable once assigned.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::errors::DomainError;

/// Minimum length for tenant slugs
pub const MIN_SLUG_LEN: usize = 2;

/// Maximum length for tenant slugs (a DNS label)
pub const MAX_SLUG_LEN: usize = 63;

/// A validated, URL-safe tenant short name
///
/// # Validation Rules
///
/// - Length: 2-63 characters
/// - Characters: lowercase ASCII alphanumeric and hyphen
/// - Must start and end with an alphanumeric character
///
/// # Examples
///
/// ```
/// use domain::TenantSlug;
///
/// let slug = TenantSlug::parse("acme-corp").unwrap();
/// assert_eq!(slug.as_str(), "acme-corp");
///
/// assert!(TenantSlug::parse("a").is_err()); // Too short
/// assert!(TenantSlug::parse("My Tenant").is_err()); // Invalid chars
/// assert!(TenantSlug::parse("-acme").is_err()); // Leading hyphen
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TenantSlug(String);

impl TenantSlug {
    /// Parse and validate a slug from a string
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidSlug` if the input violates any
    /// validation rule.
    pub fn parse(s: impl Into<String>) -> Result<Self, DomainError> {
        let s = s.into();

        if s.len() < MIN_SLUG_LEN {
            return Err(DomainError::InvalidSlug(format!(
                "too short: {} < {MIN_SLUG_LEN} characters",
                s.len()
            )));
        }
        if s.len() > MAX_SLUG_LEN {
            return Err(DomainError::InvalidSlug(format!(
                "too long: {} > {MAX_SLUG_LEN} characters",
                s.len()
            )));
        }
        if !s
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
        {
            return Err(DomainError::InvalidSlug(
                "only lowercase alphanumeric characters and hyphens are allowed".to_string(),
            ));
        }
        // Leading/trailing hyphens are invalid DNS labels
        if s.starts_with('-') || s.ends_with('-') {
            return Err(DomainError::InvalidSlug(
                "must start and end with an alphanumeric character".to_string(),
            ));
        }

        Ok(Self(s))
    }

    /// Get the slug as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Convert into the owned slug string
    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for TenantSlug {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<String> for TenantSlug {
    type Error = DomainError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::parse(s)
    }
}

impl From<TenantSlug> for String {
    fn from(slug: TenantSlug) -> Self {
        slug.0
    }
}

impl AsRef<str> for TenantSlug {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
