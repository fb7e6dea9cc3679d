//! Card data model and its write-time validation.
//!
//! A card is created through [`NewCard::try_new`], which checks every field
//! before anything reaches a repository. Identifiers arriving as path
//! parameters go through [`CardId::parse`] so malformed input is told apart
//! from an id that simply does not exist.

use std::collections::BTreeSet;
use std::fmt;

use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

use super::web_url::is_web_url;
use super::{UserId, UserProfile};

/// Minimum length of a card name, in characters.
pub const CARD_NAME_MIN: usize = 2;
/// Maximum length of a card name, in characters.
pub const CARD_NAME_MAX: usize = 30;

/// Field-level reasons a card cannot be built.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CardValidationError {
    /// The card id is not a UUID.
    #[error("card id must be a valid UUID")]
    InvalidId,
    /// The name was missing or blank.
    #[error("name must not be empty")]
    EmptyName,
    /// The name length is out of range.
    #[error("name must be between {min} and {max} characters")]
    NameLength { min: usize, max: usize },
    /// The link was missing or blank.
    #[error("link must not be empty")]
    EmptyLink,
    /// The link is not a web URL.
    #[error("link must be a valid http, https or ftp URL")]
    InvalidLink,
}

impl CardValidationError {
    /// Name of the request field the error refers to.
    pub fn field(&self) -> &'static str {
        match self {
            Self::InvalidId => "cardId",
            Self::EmptyName | Self::NameLength { .. } => "name",
            Self::EmptyLink | Self::InvalidLink => "link",
        }
    }

    /// Stable snake_case code for the failure.
    pub fn code(&self) -> &'static str {
        match self {
            Self::InvalidId => "invalid_id",
            Self::EmptyName => "empty_name",
            Self::NameLength { .. } => "invalid_name_length",
            Self::EmptyLink => "empty_link",
            Self::InvalidLink => "invalid_link",
        }
    }
}

/// Card identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct CardId(Uuid);

impl CardId {
    /// Parse an identifier received from a client.
    ///
    /// # Examples
    /// ```
    /// use backend::domain::CardId;
    ///
    /// assert!(CardId::parse("3fa85f64-5717-4562-b3fc-2c963f66afa6").is_ok());
    /// assert!(CardId::parse("42").is_err());
    /// ```
    pub fn parse(raw: &str) -> Result<Self, CardValidationError> {
        if raw.trim() != raw {
            return Err(CardValidationError::InvalidId);
        }
        Uuid::parse_str(raw)
            .map(Self)
            .map_err(|_| CardValidationError::InvalidId)
    }

    /// Generate a fresh identifier.
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

impl fmt::Display for CardId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Card title, 2 to 30 characters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct CardName(String);

impl CardName {
    /// Validate a card title.
    pub fn new(value: impl Into<String>) -> Result<Self, CardValidationError> {
        let value = value.into();
        if value.trim().is_empty() {
            return Err(CardValidationError::EmptyName);
        }
        let length = value.chars().count();
        if !(CARD_NAME_MIN..=CARD_NAME_MAX).contains(&length) {
            return Err(CardValidationError::NameLength {
                min: CARD_NAME_MIN,
                max: CARD_NAME_MAX,
            });
        }
        Ok(Self(value))
    }
}

impl AsRef<str> for CardName {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

/// Web URL of the card image.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct CardLink(String);

impl CardLink {
    /// Validate an image link.
    pub fn new(value: impl Into<String>) -> Result<Self, CardValidationError> {
        let value = value.into();
        if value.trim().is_empty() {
            return Err(CardValidationError::EmptyLink);
        }
        if !is_web_url(&value) {
            return Err(CardValidationError::InvalidLink);
        }
        Ok(Self(value))
    }
}

impl AsRef<str> for CardLink {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

/// Users who liked a card. Insertion order is not kept.
pub type Likes = BTreeSet<UserId>;

/// Stored card with the owner as a bare identifier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Card {
    #[schema(value_type = String, example = "9b2f3c1e-7a44-4c59-9f0e-2d8a6b1c5e77")]
    pub id: CardId,
    #[schema(value_type = String, example = "Ball")]
    pub name: CardName,
    #[schema(value_type = String, example = "https://x.test/a.png")]
    pub link: CardLink,
    #[schema(value_type = String, example = "3fa85f64-5717-4562-b3fc-2c963f66afa6")]
    pub owner: UserId,
    #[schema(value_type = Vec<String>)]
    pub likes: Likes,
    pub created_at: DateTime<Utc>,
}

impl Card {
    /// Whether `user` may delete this card.
    pub fn is_owned_by(&self, user: &UserId) -> bool {
        self.owner == *user
    }
}

/// Card returned by listings, with the owner's profile in place of the id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CardWithOwner {
    #[schema(value_type = String, example = "9b2f3c1e-7a44-4c59-9f0e-2d8a6b1c5e77")]
    pub id: CardId,
    #[schema(value_type = String, example = "Ball")]
    pub name: CardName,
    #[schema(value_type = String, example = "https://x.test/a.png")]
    pub link: CardLink,
    pub owner: UserProfile,
    #[schema(value_type = Vec<String>)]
    pub likes: Likes,
    pub created_at: DateTime<Utc>,
}

impl CardWithOwner {
    /// Combine a card with its owner's profile.
    ///
    /// Returns `None` when `owner` is not the card's owner.
    pub fn resolve(card: Card, owner: UserProfile) -> Option<Self> {
        if card.owner != owner.id {
            return None;
        }
        Some(Self {
            id: card.id,
            name: card.name,
            link: card.link,
            owner,
            likes: card.likes,
            created_at: card.created_at,
        })
    }
}

/// Card fields that passed validation, awaiting an id and timestamp.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewCard {
    pub name: CardName,
    pub link: CardLink,
    pub owner: UserId,
}

impl NewCard {
    /// Validate client-supplied fields for a card owned by `owner`.
    ///
    /// # Examples
    /// ```
    /// use backend::domain::{NewCard, UserId};
    ///
    /// let owner = UserId::random();
    /// let card = NewCard::try_new("Ball", "https://x.test/a.png", owner).expect("valid card");
    /// assert_eq!(card.owner, owner);
    /// assert!(NewCard::try_new("B", "https://x.test/a.png", owner).is_err());
    /// ```
    pub fn try_new(
        name: impl Into<String>,
        link: impl Into<String>,
        owner: UserId,
    ) -> Result<Self, CardValidationError> {
        Ok(Self {
            name: CardName::new(name)?,
            link: CardLink::new(link)?,
            owner,
        })
    }

    /// Finish the card with a fresh id, creation time, and no likes.
    pub fn into_card(self, id: CardId, created_at: DateTime<Utc>) -> Card {
        Card {
            id,
            name: self.name,
            link: self.link,
            owner: self.owner,
            likes: Likes::new(),
            created_at,
        }
    }
}

#[cfg(test)]
mod tests;
