//! Resolves the caller identity written by the upstream gateway.
//!
//! Authentication happens before requests reach this service; the gateway
//! forwards the authenticated user's id in a trusted header. This middleware
//! parses that header into an [`Identity`] stored in the request extensions.
//! A missing or malformed header leaves the request anonymous; handlers that
//! need a caller reject it when extracting the identity.

use std::rc::Rc;
use std::task::{Context, Poll};

use actix_web::dev::{Service, ServiceRequest, ServiceResponse, Transform};
use actix_web::http::header::HeaderName;
use actix_web::{Error, HttpMessage};
use futures_util::future::{Ready, ready};
use tracing::warn;

use crate::domain::{Identity, UserId};

/// Default header carrying the authenticated user id.
pub const DEFAULT_IDENTITY_HEADER: &str = "x-user-id";

/// Middleware factory reading the caller id from a configurable header.
///
/// # Examples
/// ```
/// use actix_web::App;
/// use actix_web::http::header::HeaderName;
/// use backend::middleware::IdentityHeader;
///
/// let app = App::new().wrap(IdentityHeader::new(HeaderName::from_static("x-user-id")));
/// ```
#[derive(Debug, Clone)]
pub struct IdentityHeader {
    header: Rc<HeaderName>,
}

impl IdentityHeader {
    /// Read identities from `header`.
    pub fn new(header: HeaderName) -> Self {
        Self {
            header: Rc::new(header),
        }
    }
}

impl Default for IdentityHeader {
    fn default() -> Self {
        Self::new(HeaderName::from_static(DEFAULT_IDENTITY_HEADER))
    }
}

impl<S, B> Transform<S, ServiceRequest> for IdentityHeader
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type InitError = ();
    type Transform = IdentityMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(IdentityMiddleware {
            service,
            header: Rc::clone(&self.header),
        }))
    }
}

/// Service produced by [`IdentityHeader`].
pub struct IdentityMiddleware<S> {
    service: S,
    header: Rc<HeaderName>,
}

impl<S> IdentityMiddleware<S> {
    fn resolve(&self, req: &ServiceRequest) -> Option<Identity> {
        let value = req.headers().get(self.header.as_ref())?;
        let Ok(raw) = value.to_str() else {
            warn!(header = %self.header, "identity header is not valid text");
            return None;
        };
        match UserId::new(raw.trim()) {
            Ok(user_id) => Some(Identity::new(user_id)),
            Err(error) => {
                warn!(header = %self.header, %error, "rejected malformed identity header");
                None
            }
        }
    }
}

impl<S, B> Service<ServiceRequest> for IdentityMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = S::Future;

    fn poll_ready(&self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.service.poll_ready(cx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        if let Some(identity) = self.resolve(&req) {
            req.extensions_mut().insert(identity);
        }
        self.service.call(req)
    }
}
