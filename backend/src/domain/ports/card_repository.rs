//! Port for card persistence adapters and their errors.
//!
//! Every method is a single round trip that the adapter must make atomic for
//! the card it touches. Likes behave as a set: adding a present user or
//! removing an absent one leaves the card unchanged.

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::{Card, CardId, CardWithOwner, UserId};

/// Persistence errors raised by card repository adapters.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CardPersistenceError {
    /// Repository connection could not be established.
    #[error("card repository connection failed: {message}")]
    Connection { message: String },
    /// Query or mutation failed during execution.
    #[error("card repository query failed: {message}")]
    Query { message: String },
    /// The owner or liking user does not exist in the user store.
    #[error("card references unknown user {user_id}")]
    UnknownUser { user_id: UserId },
}

impl CardPersistenceError {
    /// Helper for connection failures.
    pub fn connection(message: impl Into<String>) -> Self {
        Self::Connection {
            message: message.into(),
        }
    }

    /// Helper for query failures.
    pub fn query(message: impl Into<String>) -> Self {
        Self::Query {
            message: message.into(),
        }
    }

    /// Helper for dangling user references.
    pub fn unknown_user(user_id: UserId) -> Self {
        Self::UnknownUser { user_id }
    }
}

/// Card store.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CardRepository: Send + Sync {
    /// All cards, each with its owner's public profile.
    async fn list_with_owners(&self) -> Result<Vec<CardWithOwner>, CardPersistenceError>;

    /// Persist a new, already validated card.
    async fn insert(&self, card: &Card) -> Result<(), CardPersistenceError>;

    /// Fetch a card by identifier.
    async fn find_by_id(&self, id: &CardId) -> Result<Option<Card>, CardPersistenceError>;

    /// Remove a card. Returns whether a card was removed.
    async fn delete(&self, id: &CardId) -> Result<bool, CardPersistenceError>;

    /// Add `user` to the likes of card `id` and return the updated card.
    ///
    /// Returns `None` when the card does not exist, whether or not `user`
    /// does. Fails with [`CardPersistenceError::UnknownUser`] only for an
    /// existing card.
    async fn add_like(
        &self,
        id: &CardId,
        user: &UserId,
    ) -> Result<Option<Card>, CardPersistenceError>;

    /// Remove `user` from the likes of card `id` and return the updated card.
    ///
    /// Returns `None` when the card does not exist. Never checks that `user`
    /// exists.
    async fn remove_like(
        &self,
        id: &CardId,
        user: &UserId,
    ) -> Result<Option<Card>, CardPersistenceError>;
}
