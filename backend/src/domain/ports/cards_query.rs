//! Driving port for card reads.

use async_trait::async_trait;

use crate::domain::{CardWithOwner, Error};

/// Card read operations.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CardsQuery: Send + Sync {
    /// Every card with its owner's profile embedded. Order is unspecified.
    async fn list_cards(&self) -> Result<Vec<CardWithOwner>, Error>;
}
