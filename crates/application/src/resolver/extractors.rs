//! Identifier extractors
//!
//! Five independent, side-effect-free strategies that each try to pull a
//! candidate tenant identifier out of one part of the request. Extractors
//! are string-only: no directory lookups happen here, and none of them can
//! fail — an unusable signal is simply no signal.

use std::net::IpAddr;

use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;

use crate::resolver::signals::RequestSignals;
use crate::tenancy_config::TenancyConfig;

/// Name of the credential claim carrying the tenant slug
const TENANT_CLAIM: &str = "tenant_id";

/// Normalize a host header value: trim, lower-case, strip a trailing port.
///
/// IPv6 bracket hosts keep their brackets so the result stays a syntactically
/// whole host.
fn normalize_host(raw: &str) -> Option<String> {
    let host = raw.trim().to_ascii_lowercase();
    if host.is_empty() {
        return None;
    }

    if let Some(rest) = host.strip_prefix('[') {
        let (addr, _) = rest.split_once(']')?;
        return Some(format!("[{addr}]"));
    }

    if let Some((name, port)) = host.rsplit_once(':') {
        if !port.is_empty() && port.bytes().all(|b| b.is_ascii_digit()) {
            return (!name.is_empty()).then(|| name.to_string());
        }
    }

    Some(host)
}

/// Whether a normalized host is an IP literal rather than a hostname
fn is_ip_literal(host: &str) -> bool {
    let bare = host
        .strip_prefix('[')
        .and_then(|h| h.strip_suffix(']'))
        .unwrap_or(host);
    bare.parse::<IpAddr>().is_ok()
}

/// Subdomain strategy: `{label}.{base_domain}` yields `label` unless the
/// label is reserved, nested, or the host is the bare base domain.
pub(crate) fn subdomain(signals: &RequestSignals, config: &TenancyConfig) -> Option<String> {
    let host = normalize_host(signals.host()?)?;
    let base = config.base_domain.to_ascii_lowercase();

    let label = host.strip_suffix(&base)?.strip_suffix('.')?;
    if label.is_empty() || label.contains('.') {
        return None;
    }
    if config.is_reserved(label) {
        return None;
    }

    Some(label.to_string())
}

/// Custom-domain strategy: hosts outside the platform base domain are
/// candidates verbatim; matching against the directory's custom-domain
/// index happens later. Platform hosts and IP literals never qualify.
pub(crate) fn custom_domain(signals: &RequestSignals, config: &TenancyConfig) -> Option<String> {
    let host = normalize_host(signals.host()?)?;
    let base = config.base_domain.to_ascii_lowercase();

    if host == base || host.ends_with(&format!(".{base}")) {
        return None;
    }
    if is_ip_literal(&host) {
        return None;
    }

    Some(host)
}

/// Header strategy: the dedicated tenant header, when enabled
pub(crate) fn header(signals: &RequestSignals, config: &TenancyConfig) -> Option<String> {
    if !config.allow_untrusted_identifiers {
        return None;
    }
    non_empty(signals.header_value()?)
}

/// Credential-claim strategy: the tenant claim of a Bearer token payload.
///
/// Only decodes — the token's signature is the authentication layer's
/// concern, and a token that fails to decode is no signal, not an error.
pub(crate) fn credential_claim(signals: &RequestSignals) -> Option<String> {
    let token = bearer_token(signals.authorization()?)?;
    decode_tenant_claim(token)
}

/// Query-parameter strategy: the designated query parameter, when enabled
pub(crate) fn query_param(signals: &RequestSignals, config: &TenancyConfig) -> Option<String> {
    if !config.allow_untrusted_identifiers {
        return None;
    }
    non_empty(signals.query_value()?)
}

/// Pull the token out of a `Bearer <token>` authorization value.
///
/// Scheme matching is case-insensitive; other schemes yield nothing.
fn bearer_token(authorization: &str) -> Option<&str> {
    let (scheme, token) = authorization.trim().split_once(' ')?;
    let token = token.trim();
    if token.is_empty() || !scheme.eq_ignore_ascii_case("bearer") {
        return None;
    }
    Some(token)
}

/// Decode the payload segment of a JWT and read its tenant claim
fn decode_tenant_claim(token: &str) -> Option<String> {
    let mut segments = token.split('.');
    let _header = segments.next()?;
    let payload = segments.next()?;
    let _signature = segments.next()?;
    if segments.next().is_some() {
        return None;
    }

    let bytes = URL_SAFE_NO_PAD.decode(payload).ok()?;
    let claims: serde_json::Value = serde_json::from_slice(&bytes).ok()?;
    claims
        .get(TENANT_CLAIM)?
        .as_str()
        .and_then(non_empty)
}

fn non_empty(value: &str) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> TenancyConfig {
        TenancyConfig {
            base_domain: "podium.events".to_string(),
            ..TenancyConfig::default()
        }
    }

    fn with_host(host: &str) -> RequestSignals {
        RequestSignals::new().with_host(host)
    }

    /// Build an unsigned test token with the given payload JSON
    fn token_with_payload(payload: &serde_json::Value) -> String {
        let header = URL_SAFE_NO_PAD.encode(br#"{"alg":"HS256","typ":"JWT"}"#);
        let body = URL_SAFE_NO_PAD.encode(serde_json::to_vec(payload).unwrap());
        format!("{header}.{body}.sig")
    }

    // Subdomain strategy

    #[test]
    fn subdomain_extracts_label() {
        let signals = with_host("acme.podium.events");
        assert_eq!(subdomain(&signals, &config()), Some("acme".to_string()));
    }

    #[test]
    fn subdomain_is_case_insensitive_and_strips_port() {
        let signals = with_host("ACME.Podium.Events:8443");
        assert_eq!(subdomain(&signals, &config()), Some("acme".to_string()));
    }

    #[test]
    fn subdomain_skips_bare_base_domain() {
        assert_eq!(subdomain(&with_host("podium.events"), &config()), None);
    }

    #[test]
    fn subdomain_skips_reserved_labels() {
        for host in ["www.podium.events", "api.podium.events", "app.podium.events"] {
            assert_eq!(subdomain(&with_host(host), &config()), None, "host {host}");
        }
    }

    #[test]
    fn subdomain_skips_nested_labels() {
        assert_eq!(subdomain(&with_host("a.b.podium.events"), &config()), None);
    }

    #[test]
    fn subdomain_skips_unrelated_hosts() {
        assert_eq!(subdomain(&with_host("contests.acme.com"), &config()), None);
        // Suffix match must be on label boundaries
        assert_eq!(subdomain(&with_host("evilpodium.events"), &config()), None);
    }

    #[test]
    fn subdomain_skips_missing_host() {
        assert_eq!(subdomain(&RequestSignals::new(), &config()), None);
    }

    // Custom-domain strategy

    #[test]
    fn custom_domain_returns_outside_hosts() {
        let signals = with_host("Contests.Acme.com:443");
        assert_eq!(
            custom_domain(&signals, &config()),
            Some("contests.acme.com".to_string())
        );
    }

    #[test]
    fn custom_domain_skips_platform_hosts() {
        for host in ["podium.events", "acme.podium.events", "www.podium.events"] {
            assert_eq!(custom_domain(&with_host(host), &config()), None, "host {host}");
        }
    }

    #[test]
    fn custom_domain_skips_ip_literals() {
        assert_eq!(custom_domain(&with_host("127.0.0.1:3000"), &config()), None);
        assert_eq!(custom_domain(&with_host("[::1]:3000"), &config()), None);
    }

    // Header strategy

    #[test]
    fn header_returns_trimmed_value() {
        let signals = RequestSignals::new().with_header_value(" beta ");
        assert_eq!(header(&signals, &config()), Some("beta".to_string()));
    }

    #[test]
    fn header_skips_empty_value() {
        let signals = RequestSignals::new().with_header_value("   ");
        assert_eq!(header(&signals, &config()), None);
    }

    #[test]
    fn header_disabled_when_untrusted_sources_off() {
        let cfg = TenancyConfig {
            allow_untrusted_identifiers: false,
            ..config()
        };
        let signals = RequestSignals::new().with_header_value("beta");
        assert_eq!(header(&signals, &cfg), None);
    }

    // Credential-claim strategy

    #[test]
    fn claim_extracts_tenant_id() {
        let token = token_with_payload(&serde_json::json!({"sub": "u1", "tenant_id": "acme"}));
        let signals = RequestSignals::new().with_authorization(format!("Bearer {token}"));
        assert_eq!(credential_claim(&signals), Some("acme".to_string()));
    }

    #[test]
    fn claim_scheme_is_case_insensitive() {
        let token = token_with_payload(&serde_json::json!({"tenant_id": "acme"}));
        let signals = RequestSignals::new().with_authorization(format!("bearer {token}"));
        assert_eq!(credential_claim(&signals), Some("acme".to_string()));
    }

    #[test]
    fn claim_absent_when_claim_missing() {
        let token = token_with_payload(&serde_json::json!({"sub": "u1"}));
        let signals = RequestSignals::new().with_authorization(format!("Bearer {token}"));
        assert_eq!(credential_claim(&signals), None);
    }

    #[test]
    fn claim_absent_on_garbage_token() {
        for auth in [
            "Bearer not-a-jwt",
            "Bearer a.b",
            "Bearer a.!!!.c",
            "Basic dXNlcjpwYXNz",
            "Bearer ",
        ] {
            let signals = RequestSignals::new().with_authorization(auth);
            assert_eq!(credential_claim(&signals), None, "auth {auth}");
        }
    }

    #[test]
    fn claim_absent_when_payload_not_json() {
        let header_seg = URL_SAFE_NO_PAD.encode(b"{}");
        let payload = URL_SAFE_NO_PAD.encode(b"plain text");
        let signals = RequestSignals::new()
            .with_authorization(format!("Bearer {header_seg}.{payload}.sig"));
        assert_eq!(credential_claim(&signals), None);
    }

    // Query strategy

    #[test]
    fn query_returns_value() {
        let signals = RequestSignals::new().with_query_value("gamma");
        assert_eq!(query_param(&signals, &config()), Some("gamma".to_string()));
    }

    #[test]
    fn query_disabled_when_untrusted_sources_off() {
        let cfg = TenancyConfig {
            allow_untrusted_identifiers: false,
            ..config()
        };
        let signals = RequestSignals::new().with_query_value("gamma");
        assert_eq!(query_param(&signals, &cfg), None);
    }

    // Host normalization

    #[test]
    fn normalize_host_handles_ports_and_case() {
        assert_eq!(normalize_host("Acme.Example.com:8080"), Some("acme.example.com".to_string()));
        assert_eq!(normalize_host("acme.example.com"), Some("acme.example.com".to_string()));
        assert_eq!(normalize_host("  "), None);
        assert_eq!(normalize_host("[::1]:3000"), Some("[::1]".to_string()));
    }
}
