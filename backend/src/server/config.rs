//! HTTP server configuration object.

use actix_web::http::header::HeaderName;

use backend::inbound::http::state::HttpState;

/// Everything [`super::create_server`] needs besides the health state.
pub struct ServerConfig {
    pub(crate) bind_addr: (String, u16),
    pub(crate) identity_header: HeaderName,
    pub(crate) http_state: HttpState,
}

impl ServerConfig {
    /// Configuration serving `http_state` on `host:port`.
    #[must_use]
    pub fn new(host: impl Into<String>, port: u16, http_state: HttpState) -> Self {
        Self {
            bind_addr: (host.into(), port),
            identity_header: HeaderName::from_static(backend::middleware::DEFAULT_IDENTITY_HEADER),
            http_state,
        }
    }

    /// Read caller identities from `header` instead of `x-user-id`.
    #[must_use]
    pub fn with_identity_header(mut self, header: HeaderName) -> Self {
        self.identity_header = header;
        self
    }
}
