//! Driving port for card mutations.
//!
//! HTTP handlers call [`CardsCommand`] with the caller's [`Identity`] and the
//! raw client input. Implementations validate that input, check ownership,
//! and translate persistence failures into domain [`Error`] values.

use async_trait::async_trait;
use serde::Deserialize;
use utoipa::ToSchema;

use crate::domain::{Card, Error, Identity};

/// Client payload for creating a card.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateCardRequest {
    /// Card title, 2 to 30 characters.
    #[serde(default)]
    #[schema(example = "Ball")]
    pub name: String,
    /// Image URL; http, https or ftp, scheme optional.
    #[serde(default)]
    #[schema(example = "https://x.test/a.png")]
    pub link: String,
}

/// Card write operations.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CardsCommand: Send + Sync {
    /// Create a card owned by the caller.
    ///
    /// # Errors
    ///
    /// Returns `invalid_request` when a field fails validation.
    async fn create_card(
        &self,
        identity: &Identity,
        request: CreateCardRequest,
    ) -> Result<Card, Error>;

    /// Delete a card the caller owns.
    ///
    /// # Errors
    ///
    /// Returns `invalid_request` for a malformed id, `not_found` when the
    /// card does not exist, and `forbidden` when the caller is not the owner.
    async fn delete_card(&self, identity: &Identity, card_id: &str) -> Result<(), Error>;

    /// Add the caller to the card's likes. Repeating the call is a no-op.
    async fn like_card(&self, identity: &Identity, card_id: &str) -> Result<Card, Error>;

    /// Remove the caller from the card's likes. Repeating the call is a no-op.
    async fn dislike_card(&self, identity: &Identity, card_id: &str) -> Result<Card, Error>;
}
