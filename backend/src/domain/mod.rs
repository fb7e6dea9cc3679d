//! Domain primitives, aggregates, ports and services.
//!
//! Purpose: define strongly typed card and user entities, validate them
//! before any store mutation, and implement the driving ports consumed by
//! inbound adapters. Nothing here depends on HTTP or SQL.
//!
//! Public surface:
//! - DomainError (re-exported as Error) / ErrorCode: transport-agnostic failure
//!   payload.
//! - Card, CardWithOwner, NewCard: card aggregate and its write-time shape.
//! - User, UserProfile, NewUser: user aggregate and its public projection.
//! - Identity: the caller acting on a request.
//! - CardService / UserService: driving port implementations.

mod card;
mod card_service;
pub mod error;
mod identity;
pub mod ports;
mod trace_id;
mod user;
mod user_service;
mod web_url;

pub use self::card::{
    CARD_NAME_MAX, CARD_NAME_MIN, Card, CardId, CardLink, CardName, CardValidationError,
    CardWithOwner, Likes, NewCard,
};
pub use self::card_service::{
    CARD_DELETE_FORBIDDEN_MESSAGE, CARD_NOT_FOUND_MESSAGE, CardService,
    INVALID_CARD_DATA_MESSAGE, INVALID_CARD_ID_MESSAGE,
};
pub use self::error::{DomainError, DomainError as Error, ErrorCode, ErrorValidationError};
pub use self::identity::Identity;
pub use self::trace_id::{TRACE_ID_HEADER, TraceId};
pub use self::user::{
    ABOUT_MAX, ABOUT_MIN, About, AvatarUrl, DEFAULT_ABOUT, DEFAULT_AVATAR, DEFAULT_USER_NAME,
    Email, NewUser, NewUserInput, Password, PasswordHash, PasswordHashError, USER_NAME_MAX,
    USER_NAME_MIN, User, UserId, UserName, UserProfile, UserValidationError,
};
pub use self::user_service::{
    INVALID_USER_DATA_MESSAGE, INVALID_USER_ID_MESSAGE, USER_NOT_FOUND_MESSAGE, UserService,
};
pub use self::web_url::is_web_url;

/// Convenient API result alias.
///
/// # Examples
/// ```
/// use actix_web::HttpResponse;
/// use backend::domain::{ApiResult, Error};
///
/// fn handler() -> ApiResult<HttpResponse> {
///     Err(Error::forbidden("nope"))
/// }
/// ```
pub type ApiResult<T> = Result<T, Error>;
