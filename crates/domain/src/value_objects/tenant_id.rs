//! Tenant identifier value object
//!
//! # Examples
//!
//! ```
//! use domain::TenantId;
//!
//! // Create a new random tenant ID
//! let tenant_id = TenantId::new();
//! assert!(!tenant_id.to_string().is_empty());
//!
//! // Parse from string
//! let parsed = TenantId::parse("550e8400-e29b-41d4-a716-446655440000").unwrap();
//! assert_eq!(parsed.to_string(), "550e8400-e29b-41d4-a716-446655440000");
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A unique tenant identifier
///
/// Tenants are isolated organizations within Podium. Each tenant has its own
/// events, contests, users, and settings. The identifier is opaque and stable:
/// once assigned it never changes, even if the tenant's slug or domain does.
///
/// # Examples
///
/// ```
/// use domain::TenantId;
///
/// let tenant_id = TenantId::new();
/// println!("Tenant ID: {}", tenant_id);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TenantId(Uuid);

impl TenantId {
    /// Create a new random tenant ID
    ///
    /// # Examples
    ///
    /// ```
    /// use domain::TenantId;
    ///
    /// let id1 = TenantId::new();
    /// let id2 = TenantId::new();
    /// assert_ne!(id1, id2);
    /// ```
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Create a tenant ID from an existing UUID
    pub const fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Parse a tenant ID from a string
    ///
    /// # Examples
    ///
    /// ```
    /// use domain::TenantId;
    ///
    /// let tenant_id = TenantId::parse("550e8400-e29b-41d4-a716-446655440000").unwrap();
    /// assert!(TenantId::parse("invalid").is_err());
    /// ```
    pub fn parse(s: &str) -> Result<Self, uuid::Error> {
        Ok(Self(Uuid::parse_str(s)?))
    }

    /// Get the underlying UUID
    pub const fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl Default for TenantId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for TenantId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<Uuid> for TenantId {
    fn from(uuid: Uuid) -> Self {
        Self(uuid)
    }
}

impl From<TenantId> for Uuid {
    fn from(id: TenantId) -> Self {
        id.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_creates_unique_ids() {
        let id1 = TenantId::new();
        let id2 = TenantId::new();
        assert_ne!(id1, id2);
    }

    #[test]
    fn test_parse_valid_uuid() {
        let uuid_str = "550e8400-e29b-41d4-a716-446655440000";
        let result = TenantId::parse(uuid_str);
        assert!(result.is_ok());
        assert_eq!(result.unwrap().to_string(), uuid_str);
    }

    #[test]
    fn test_parse_invalid_uuid() {
        assert!(TenantId::parse("not-a-uuid").is_err());
        assert!(TenantId::parse("").is_err());
    }

    #[test]
    fn test_uuid_conversions() {
        let original_uuid = Uuid::new_v4();
        let tenant_id = TenantId::from(original_uuid);
        let converted_uuid: Uuid = tenant_id.into();
        assert_eq!(original_uuid, converted_uuid);
    }

    #[test]
    fn test_display() {
        let uuid_str = "550e8400-e29b-41d4-a716-446655440000";
        let tenant_id = TenantId::parse(uuid_str).unwrap();
        assert_eq!(format!("{tenant_id}"), uuid_str);
    }

    #[test]
    fn test_serialization() {
        let tenant_id = TenantId::parse("550e8400-e29b-41d4-a716-446655440000").unwrap();
        let json = serde_json::to_string(&tenant_id).unwrap();
        let deserialized: TenantId = serde_json::from_str(&json).unwrap();
        assert_eq!(tenant_id, deserialized);
    }
}
