//! Extractor exposing the caller [`Identity`] to handlers.
//!
//! [`crate::middleware::IdentityHeader`] places the identity in the request
//! extensions; handlers that declare an `Identity` argument reject anonymous
//! requests with `401 Unauthorized`.

use actix_web::dev::Payload;
use actix_web::{FromRequest, HttpMessage, HttpRequest};
use futures_util::future::{Ready, ready};

use crate::domain::{Error, Identity};

/// Message returned when an identity-required route is called anonymously.
pub const IDENTITY_REQUIRED_MESSAGE: &str = "authentication required";

impl FromRequest for Identity {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(
            req.extensions()
                .get::<Identity>()
                .copied()
                .ok_or_else(|| Error::unauthorized(IDENTITY_REQUIRED_MESSAGE)),
        )
    }
}
