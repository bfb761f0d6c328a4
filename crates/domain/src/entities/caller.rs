//! Authenticated caller identity
//!
//! Produced by the authentication layer (out of scope here) and attached to
//! the request before tenant resolution runs. Whether the caller is a super
//! admin is a property of their account, looked up independently of any
//! tenant signal.

use serde::{Deserialize, Serialize};

use crate::value_objects::UserId;

/// The already-authenticated caller of a request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CallerIdentity {
    user_id: UserId,
}

impl CallerIdentity {
    /// Create a caller identity for an authenticated user
    #[must_use]
    pub const fn new(user_id: UserId) -> Self {
        Self { user_id }
    }

    /// Get the caller's user ID
    #[must_use]
    pub const fn user_id(&self) -> UserId {
        self.user_id
    }
}

impl From<UserId> for CallerIdentity {
    fn from(user_id: UserId) -> Self {
        Self::new(user_id)
    }
}
