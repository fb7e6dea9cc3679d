//! User data model.
//!
//! A [`User`] is the full stored record including the credential digest. Reads
//! that leave the domain go through [`UserProfile`], which has no credential
//! field at all, so the digest cannot be serialised by accident.

use std::fmt;
use std::sync::LazyLock;

use argon2::Argon2;
use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{
    PasswordHash as PhcString, PasswordHasher, PasswordVerifier, SaltString,
};
use regex::Regex;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use zeroize::Zeroizing;

use super::web_url::is_web_url;

/// Minimum length of a user name, in characters.
pub const USER_NAME_MIN: usize = 2;
/// Maximum length of a user name, in characters.
pub const USER_NAME_MAX: usize = 30;
/// Minimum length of the about text, in characters.
pub const ABOUT_MIN: usize = 2;
/// Maximum length of the about text, in characters.
pub const ABOUT_MAX: usize = 200;

/// Name given to users who do not pick one.
pub const DEFAULT_USER_NAME: &str = "Jacques-Yves Cousteau";
/// About text given to users who do not provide one.
pub const DEFAULT_ABOUT: &str = "Explorer";
/// Avatar given to users who do not provide one.
pub const DEFAULT_AVATAR: &str =
    "https://pictures.s3.yandex.net/resources/jacques-cousteau_1604399756.png";

/// Validation errors raised while building user values.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UserValidationError {
    #[error("user id must be a valid UUID")]
    InvalidId,
    #[error("name must be between {min} and {max} characters")]
    NameLength { min: usize, max: usize },
    #[error("about must be between {min} and {max} characters")]
    AboutLength { min: usize, max: usize },
    #[error("avatar must be a valid http, https or ftp URL")]
    InvalidAvatar,
    #[error("email must not be empty")]
    EmptyEmail,
    #[error("email must be a valid address")]
    InvalidEmail,
    #[error("password must not be empty")]
    EmptyPassword,
}

impl UserValidationError {
    /// Name of the request field the error refers to.
    pub fn field(&self) -> &'static str {
        match self {
            Self::InvalidId => "id",
            Self::NameLength { .. } => "name",
            Self::AboutLength { .. } => "about",
            Self::InvalidAvatar => "avatar",
            Self::EmptyEmail | Self::InvalidEmail => "email",
            Self::EmptyPassword => "password",
        }
    }

    /// Stable snake_case code for the failure.
    pub fn code(&self) -> &'static str {
        match self {
            Self::InvalidId => "invalid_id",
            Self::NameLength { .. } => "invalid_name_length",
            Self::AboutLength { .. } => "invalid_about_length",
            Self::InvalidAvatar => "invalid_avatar",
            Self::EmptyEmail => "empty_email",
            Self::InvalidEmail => "invalid_email",
            Self::EmptyPassword => "empty_password",
        }
    }
}

/// Stable user identifier stored as a UUID.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(Uuid);

impl UserId {
    /// Parse an identifier from its textual form.
    ///
    /// Surrounding whitespace is rejected rather than trimmed.
    pub fn new(id: impl AsRef<str>) -> Result<Self, UserValidationError> {
        let raw = id.as_ref();
        if raw.is_empty() || raw.trim() != raw {
            return Err(UserValidationError::InvalidId);
        }
        Uuid::parse_str(raw)
            .map(Self)
            .map_err(|_| UserValidationError::InvalidId)
    }

    /// Generate a new random identifier.
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }

    /// Wrap an identifier read back from storage.
    pub fn from_uuid(id: Uuid) -> Self {
        Self(id)
    }

    /// Access the underlying UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

fn char_len_within(value: &str, min: usize, max: usize) -> bool {
    let length = value.chars().count();
    (min..=max).contains(&length)
}

macro_rules! text_newtype {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Serialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                self.0.as_str()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<$name> for String {
            fn from(value: $name) -> Self {
                value.0
            }
        }
    };
}

text_newtype!(
    /// Display name, 2 to 30 characters.
    UserName
);
text_newtype!(
    /// Free-form profile text, 2 to 200 characters.
    About
);
text_newtype!(
    /// Web URL of the profile picture.
    AvatarUrl
);
text_newtype!(
    /// Normalised (trimmed, lowercase) email address.
    Email
);

impl UserName {
    /// Validate a display name.
    pub fn new(value: impl Into<String>) -> Result<Self, UserValidationError> {
        let value = value.into();
        if !char_len_within(&value, USER_NAME_MIN, USER_NAME_MAX) {
            return Err(UserValidationError::NameLength {
                min: USER_NAME_MIN,
                max: USER_NAME_MAX,
            });
        }
        Ok(Self(value))
    }
}

impl Default for UserName {
    fn default() -> Self {
        Self(DEFAULT_USER_NAME.to_owned())
    }
}

impl About {
    /// Validate profile text.
    pub fn new(value: impl Into<String>) -> Result<Self, UserValidationError> {
        let value = value.into();
        if !char_len_within(&value, ABOUT_MIN, ABOUT_MAX) {
            return Err(UserValidationError::AboutLength {
                min: ABOUT_MIN,
                max: ABOUT_MAX,
            });
        }
        Ok(Self(value))
    }
}

impl Default for About {
    fn default() -> Self {
        Self(DEFAULT_ABOUT.to_owned())
    }
}

impl AvatarUrl {
    /// Validate an avatar URL.
    pub fn new(value: impl Into<String>) -> Result<Self, UserValidationError> {
        let value = value.into();
        if !is_web_url(&value) {
            return Err(UserValidationError::InvalidAvatar);
        }
        Ok(Self(value))
    }
}

impl Default for AvatarUrl {
    fn default() -> Self {
        Self(DEFAULT_AVATAR.to_owned())
    }
}

// Local part, then a domain of at least two dot-separated labels.
#[allow(clippy::expect_used, reason = "constant pattern, covered by the email tests")]
static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[^\s@]+@[^\s@.]+(\.[^\s@.]+)+$").expect("email pattern compiles")
});

impl Email {
    /// Validate and normalise an email address.
    ///
    /// # Examples
    /// ```
    /// use backend::domain::Email;
    ///
    /// let email = Email::new("  Ada@Example.COM ").expect("valid email");
    /// assert_eq!(email.as_ref(), "ada@example.com");
    /// ```
    pub fn new(value: impl AsRef<str>) -> Result<Self, UserValidationError> {
        let normalised = value.as_ref().trim().to_lowercase();
        if normalised.is_empty() {
            return Err(UserValidationError::EmptyEmail);
        }
        if !EMAIL_RE.is_match(&normalised) {
            return Err(UserValidationError::InvalidEmail);
        }
        Ok(Self(normalised))
    }
}

/// Failure to derive a password digest.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("failed to hash password: {message}")]
pub struct PasswordHashError {
    message: String,
}

/// Plain-text password held only long enough to derive a digest.
///
/// The buffer is wiped on drop and never printed.
pub struct Password(Zeroizing<String>);

impl Password {
    /// Wrap a non-empty password.
    pub fn new(value: impl Into<String>) -> Result<Self, UserValidationError> {
        let value = Zeroizing::new(value.into());
        if value.is_empty() {
            return Err(UserValidationError::EmptyPassword);
        }
        Ok(Self(value))
    }

    /// Derive an Argon2id digest with a fresh random salt.
    ///
    /// # Errors
    ///
    /// Returns [`PasswordHashError`] when Argon2 rejects the input.
    pub fn digest(&self) -> Result<PasswordHash, PasswordHashError> {
        let salt = SaltString::generate(&mut OsRng);
        Argon2::default()
            .hash_password(self.0.as_bytes(), &salt)
            .map(|hash| PasswordHash(hash.to_string()))
            .map_err(|err| PasswordHashError {
                message: err.to_string(),
            })
    }
}

impl fmt::Debug for Password {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Password(<redacted>)")
    }
}

/// Stored credential as an Argon2 PHC string (`$argon2id$v=19$...`).
#[derive(Clone, PartialEq, Eq)]
pub struct PasswordHash(String);

impl PasswordHash {
    /// Wrap a digest read back from storage.
    pub fn from_stored(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Check a candidate password against this digest.
    ///
    /// A stored value that is not a valid PHC string matches nothing.
    pub fn matches(&self, candidate: &str) -> bool {
        PhcString::new(&self.0).is_ok_and(|parsed| {
            Argon2::default()
                .verify_password(candidate.as_bytes(), &parsed)
                .is_ok()
        })
    }

    /// Encoded digest for persistence adapters.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Debug for PasswordHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("PasswordHash(<redacted>)")
    }
}

/// Stored user record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: UserId,
    pub name: UserName,
    pub about: About,
    pub avatar: AvatarUrl,
    pub email: Email,
    pub password_hash: PasswordHash,
}

impl User {
    /// Public projection of this user.
    pub fn profile(&self) -> UserProfile {
        UserProfile {
            id: self.id,
            name: self.name.clone(),
            about: self.about.clone(),
            avatar: self.avatar.clone(),
            email: self.email.clone(),
        }
    }
}

/// User fields safe to return to any caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    #[schema(value_type = String, example = "3fa85f64-5717-4562-b3fc-2c963f66afa6")]
    pub id: UserId,
    #[schema(value_type = String, example = "Jacques-Yves Cousteau")]
    pub name: UserName,
    #[schema(value_type = String, example = "Explorer")]
    pub about: About,
    #[schema(value_type = String, example = "https://example.com/avatar.png")]
    pub avatar: AvatarUrl,
    #[schema(value_type = String, example = "ada@example.com")]
    pub email: Email,
}

/// Raw registration input before validation.
#[derive(Debug)]
pub struct NewUserInput {
    pub email: String,
    pub password: String,
    pub name: Option<String>,
    pub about: Option<String>,
    pub avatar: Option<String>,
}

/// Registration data that passed validation; omitted fields hold defaults.
#[derive(Debug)]
pub struct NewUser {
    pub name: UserName,
    pub about: About,
    pub avatar: AvatarUrl,
    pub email: Email,
    pub password: Password,
}

impl NewUser {
    /// Validate every registration field, stopping at the first failure.
    pub fn try_new(input: NewUserInput) -> Result<Self, UserValidationError> {
        let NewUserInput {
            email,
            password,
            name,
            about,
            avatar,
        } = input;
        let email = Email::new(email)?;
        let password = Password::new(password)?;
        let name = name.map(UserName::new).transpose()?.unwrap_or_default();
        let about = about.map(About::new).transpose()?.unwrap_or_default();
        let avatar = avatar.map(AvatarUrl::new).transpose()?.unwrap_or_default();
        Ok(Self {
            name,
            about,
            avatar,
            email,
            password,
        })
    }

    /// Assign an identifier and replace the password with its digest.
    ///
    /// # Errors
    ///
    /// Returns [`PasswordHashError`] when the digest cannot be derived.
    pub fn into_user(self, id: UserId) -> Result<User, PasswordHashError> {
        let password_hash = self.password.digest()?;
        Ok(User {
            id,
            name: self.name,
            about: self.about,
            avatar: self.avatar,
            email: self.email,
            password_hash,
        })
    }
}

impl UserProfile {
    /// Rebuild a profile from stored columns, re-checking field constraints.
    pub fn from_stored(
        id: Uuid,
        name: String,
        about: String,
        avatar: String,
        email: &str,
    ) -> Result<Self, UserValidationError> {
        Ok(Self {
            id: UserId::from_uuid(id),
            name: UserName::new(name)?,
            about: About::new(about)?,
            avatar: AvatarUrl::new(avatar)?,
            email: Email::new(email)?,
        })
    }
}
