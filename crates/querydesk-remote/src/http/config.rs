//! HTTP collaborator configuration.

use std::time::Duration;

/// Connection settings for [`HttpCollaborator`](super::HttpCollaborator).
#[derive(Clone)]
pub struct HttpConfig {
    pub base_url: String,
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
    /// Characters of a non-JSON error body kept in `RemoteError::Api`.
    pub error_body_limit: usize,
    /// Bearer token, for services behind an authenticating proxy.
    pub auth_token: Option<String>,
}

impl std::fmt::Debug for HttpConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpConfig")
            .field("base_url", &self.base_url)
            .field("connect_timeout", &self.connect_timeout)
            .field("request_timeout", &self.request_timeout)
            .field("error_body_limit", &self.error_body_limit)
            .field(
                "auth_token",
                &self.auth_token.as_ref().map(|_| "[REDACTED]"),
            )
            .finish()
    }
}

impl HttpConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            connect_timeout: Duration::from_secs(10),
            request_timeout: Duration::from_secs(120),
            error_body_limit: 200,
            auth_token: None,
        }
    }

    pub fn with_connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }

    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    pub fn with_error_body_limit(mut self, limit: usize) -> Self {
        self.error_body_limit = limit;
        self
    }

    pub fn with_auth_token(mut self, token: impl Into<String>) -> Self {
        self.auth_token = Some(token.into());
        self
    }
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self::new("http://127.0.0.1:8001")
    }
}
