//! Driving port for user registration.

use async_trait::async_trait;
use serde::Deserialize;
use utoipa::ToSchema;

use crate::domain::{Error, NewUserInput, UserProfile};

/// Client payload for registering a user.
///
/// Omitted profile fields fall back to the defaults documented on
/// [`crate::domain::UserName`], [`crate::domain::About`] and
/// [`crate::domain::AvatarUrl`].
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RegisterUserRequest {
    #[serde(default)]
    #[schema(example = "ada@example.com")]
    pub email: String,
    #[serde(default)]
    #[schema(example = "correct horse battery staple")]
    pub password: String,
    #[schema(example = "Ada Lovelace")]
    pub name: Option<String>,
    #[schema(example = "Mathematician")]
    pub about: Option<String>,
    #[schema(example = "https://example.com/ada.png")]
    pub avatar: Option<String>,
}

impl From<RegisterUserRequest> for NewUserInput {
    fn from(value: RegisterUserRequest) -> Self {
        Self {
            email: value.email,
            password: value.password,
            name: value.name,
            about: value.about,
            avatar: value.avatar,
        }
    }
}

/// User write operations.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UsersCommand: Send + Sync {
    /// Register a new user and return their public profile.
    ///
    /// # Errors
    ///
    /// Returns `invalid_request` for invalid fields and `conflict` when the
    /// email is already registered.
    async fn register(&self, request: RegisterUserRequest) -> Result<UserProfile, Error>;
}
