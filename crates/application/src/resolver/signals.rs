//! Raw identification signals lifted off an inbound request
//!
//! The HTTP layer copies the handful of request parts the extractors look
//! at into this plain value, which keeps the resolver and its extractors
//! free of any web-framework types and trivially constructible in tests.

use domain::CallerIdentity;

/// The untrusted identification signals of one request
#[derive(Debug, Clone, Default)]
pub struct RequestSignals {
    host: Option<String>,
    header_value: Option<String>,
    authorization: Option<String>,
    query_value: Option<String>,
    caller: Option<CallerIdentity>,
}

impl RequestSignals {
    /// Empty signal set (no host, headers, credential, query, or caller)
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the request host (from the Host header or URI authority)
    #[must_use]
    pub fn with_host(mut self, host: impl Into<String>) -> Self {
        self.host = Some(host.into());
        self
    }

    /// Set the value of the tenant-identifier header
    #[must_use]
    pub fn with_header_value(mut self, value: impl Into<String>) -> Self {
        self.header_value = Some(value.into());
        self
    }

    /// Set the raw Authorization header value
    #[must_use]
    pub fn with_authorization(mut self, value: impl Into<String>) -> Self {
        self.authorization = Some(value.into());
        self
    }

    /// Set the value of the tenant query parameter
    #[must_use]
    pub fn with_query_value(mut self, value: impl Into<String>) -> Self {
        self.query_value = Some(value.into());
        self
    }

    /// Set the authenticated caller
    #[must_use]
    pub const fn with_caller(mut self, caller: CallerIdentity) -> Self {
        self.caller = Some(caller);
        self
    }

    /// The request host, if present
    #[must_use]
    pub fn host(&self) -> Option<&str> {
        self.host.as_deref()
    }

    /// The tenant-identifier header value, if present
    #[must_use]
    pub fn header_value(&self) -> Option<&str> {
        self.header_value.as_deref()
    }

    /// The raw Authorization header value, if present
    #[must_use]
    pub fn authorization(&self) -> Option<&str> {
        self.authorization.as_deref()
    }

    /// The tenant query parameter value, if present
    #[must_use]
    pub fn query_value(&self) -> Option<&str> {
        self.query_value.as_deref()
    }

    /// The authenticated caller, if any
    #[must_use]
    pub const fn caller(&self) -> Option<&CallerIdentity> {
        self.caller.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use domain::UserId;

    use super::*;

    #[test]
    fn default_is_empty() {
        let signals = RequestSignals::new();
        assert!(signals.host().is_none());
        assert!(signals.header_value().is_none());
        assert!(signals.authorization().is_none());
        assert!(signals.query_value().is_none());
        assert!(signals.caller().is_none());
    }

    #[test]
    fn builder_sets_all_fields() {
        let caller = CallerIdentity::new(UserId::new());
        let signals = RequestSignals::new()
            .with_host("acme.podium.events")
            .with_header_value("acme")
            .with_authorization("Bearer abc")
            .with_query_value("acme")
            .with_caller(caller);

        assert_eq!(signals.host(), Some("acme.podium.events"));
        assert_eq!(signals.header_value(), Some("acme"));
        assert_eq!(signals.authorization(), Some("Bearer abc"));
        assert_eq!(signals.query_value(), Some("acme"));
        assert_eq!(signals.caller(), Some(&caller));
    }
}
