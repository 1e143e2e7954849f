//! Application Configuration
//!
//! Configuration for the SIWE application layer.

use std::time::Duration;

use crate::error::{SiweError, SiweResult};

/// Re-export SameSite from platform
pub use platform::cookie::SameSite;

/// SIWE application configuration
///
/// `domain` is the bare authority clients must sign in to; `uri` is the
/// full origin the session is scoped to. Both are derived from the
/// server's base URL so the verifier and the builder can never drift.
#[derive(Debug, Clone)]
pub struct SiweConfig {
    /// Authority without scheme, compared against the signed message
    pub domain: String,
    /// Full origin URI placed in issued messages
    pub uri: String,
    /// Optional human-readable statement shown by wallets
    pub statement: Option<String>,
    /// If set, issued messages expire `issued_at + offset`
    pub expiration_offset: Option<Duration>,
    /// If set, issued messages are invalid before `issued_at + offset`
    pub not_before_offset: Option<Duration>,
    /// Generate a fresh request id (UUID v4) per message
    pub include_request_id: bool,
    /// Resource URIs carried through opaque
    pub resources: Vec<String>,
    /// Cookie name for the challenge session id
    pub session_cookie_name: String,
    /// Session-id cookie lifetime
    pub session_ttl: Duration,
    /// Whether to require Secure cookie
    pub cookie_secure: bool,
    /// SameSite policy
    pub cookie_same_site: SameSite,
}

impl SiweConfig {
    /// Build a config from the server's base URL
    ///
    /// The domain is the base URL with its scheme stripped, the way the
    /// message domain line must read.
    pub fn from_base_url(base_url: &str) -> SiweResult<Self> {
        // At most one trailing slash; a bare scheme like "https://"
        // must not collapse into something that looks like an authority
        let base_url = base_url.strip_suffix('/').unwrap_or(base_url);
        let domain = match base_url.split_once("://") {
            Some((_, rest)) => rest,
            None => base_url,
        };

        if domain.is_empty() || domain.contains('/') {
            return Err(SiweError::InvalidInput(format!(
                "base url {:?} does not name a bare origin",
                base_url
            )));
        }

        Ok(Self {
            domain: domain.to_string(),
            uri: base_url.to_string(),
            statement: None,
            expiration_offset: None,
            not_before_offset: None,
            include_request_id: false,
            resources: Vec::new(),
            session_cookie_name: "siwe_session".to_string(),
            session_ttl: Duration::from_secs(600),
            cookie_secure: true,
            cookie_same_site: SameSite::Lax,
        })
    }

    /// Create config for development (insecure cookie, local origin)
    pub fn development() -> Self {
        let mut config = Self::from_base_url("http://localhost:31113")
            .expect("static development base url is valid");
        config.cookie_secure = false;
        config
    }

    /// Cookie settings for the challenge session id
    pub fn session_cookie(&self) -> platform::cookie::CookieConfig {
        platform::cookie::CookieConfig {
            name: self.session_cookie_name.clone(),
            secure: self.cookie_secure,
            http_only: true,
            same_site: self.cookie_same_site,
            path: "/".to_string(),
            max_age_secs: Some(self.session_ttl.as_secs() as i64),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_base_url_strips_scheme() {
        let config = SiweConfig::from_base_url("https://example.com").unwrap();
        assert_eq!(config.domain, "example.com");
        assert_eq!(config.uri, "https://example.com");

        let config = SiweConfig::from_base_url("http://localhost:31113").unwrap();
        assert_eq!(config.domain, "localhost:31113");
    }

    #[test]
    fn test_from_base_url_accepts_single_trailing_slash() {
        let config = SiweConfig::from_base_url("https://example.com/").unwrap();
        assert_eq!(config.domain, "example.com");
        assert_eq!(config.uri, "https://example.com");
    }

    #[test]
    fn test_from_base_url_rejects_paths() {
        assert!(SiweConfig::from_base_url("https://example.com/app").is_err());
        assert!(SiweConfig::from_base_url("https://example.com//").is_err());
        assert!(SiweConfig::from_base_url("https://").is_err());
        assert!(SiweConfig::from_base_url("").is_err());
    }
}
