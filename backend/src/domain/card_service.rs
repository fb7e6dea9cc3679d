//! Card domain service.
//!
//! Implements the card driving ports on top of a [`CardRepository`]. Input is
//! validated and identifiers are parsed before the repository is touched, so
//! a malformed request never reaches storage.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::SubsecRound;
use mockable::Clock;
use serde_json::json;
use tracing::debug;

use crate::domain::ports::{
    CardPersistenceError, CardRepository, CardsCommand, CardsQuery, CreateCardRequest,
};
use crate::domain::{Card, CardId, CardValidationError, CardWithOwner, Error, Identity, NewCard};

/// Message returned when card creation input fails validation.
pub const INVALID_CARD_DATA_MESSAGE: &str = "invalid data supplied when creating card";
/// Message returned when a card id cannot be parsed.
pub const INVALID_CARD_ID_MESSAGE: &str = "invalid card id";
/// Message returned when no card has the requested id.
pub const CARD_NOT_FOUND_MESSAGE: &str = "card not found";
/// Message returned when a non-owner tries to delete a card.
pub const CARD_DELETE_FORBIDDEN_MESSAGE: &str = "not authorized to delete this card";

/// Card service implementing [`CardsCommand`] and [`CardsQuery`].
#[derive(Clone)]
pub struct CardService<R> {
    cards: Arc<R>,
    clock: Arc<dyn Clock>,
}

impl<R> CardService<R> {
    /// Create a service over the given card repository.
    /// ```rust,no_run
    /// # use std::sync::Arc;
    /// # use backend::domain::CardService;
    /// # use backend::outbound::memory::InMemoryStore;
    /// # use mockable::DefaultClock;
    /// let service = CardService::new(Arc::new(InMemoryStore::default()), Arc::new(DefaultClock));
    /// # let _ = service;
    /// ```
    pub fn new(cards: Arc<R>, clock: Arc<dyn Clock>) -> Self {
        Self { cards, clock }
    }
}

impl<R> CardService<R>
where
    R: CardRepository,
{
    fn map_persistence_error(error: CardPersistenceError) -> Error {
        match error {
            CardPersistenceError::Connection { message } => {
                Error::internal(format!("card repository unavailable: {message}"))
            }
            CardPersistenceError::Query { message } => {
                Error::internal(format!("card repository error: {message}"))
            }
            CardPersistenceError::UnknownUser { user_id } => {
                Error::invalid_request(format!("user {user_id} does not exist")).with_details(
                    json!({ "field": "userId", "code": "unknown_user" }),
                )
            }
        }
    }

    fn invalid_card_data(error: &CardValidationError) -> Error {
        Error::invalid_request(INVALID_CARD_DATA_MESSAGE).with_details(json!({
            "field": error.field(),
            "code": error.code(),
            "reason": error.to_string(),
        }))
    }

    fn parse_card_id(raw: &str) -> Result<CardId, Error> {
        CardId::parse(raw).map_err(|err| {
            debug!(card_id = raw, "rejected malformed card id");
            Error::invalid_request(INVALID_CARD_ID_MESSAGE).with_details(json!({
                "field": err.field(),
                "code": err.code(),
            }))
        })
    }

    fn card_not_found() -> Error {
        Error::not_found(CARD_NOT_FOUND_MESSAGE)
    }
}

#[async_trait]
impl<R> CardsQuery for CardService<R>
where
    R: CardRepository,
{
    async fn list_cards(&self) -> Result<Vec<CardWithOwner>, Error> {
        self.cards
            .list_with_owners()
            .await
            .map_err(Self::map_persistence_error)
    }
}

#[async_trait]
impl<R> CardsCommand for CardService<R>
where
    R: CardRepository,
{
    async fn create_card(
        &self,
        identity: &Identity,
        request: CreateCardRequest,
    ) -> Result<Card, Error> {
        let new_card = NewCard::try_new(request.name, request.link, *identity.user_id())
            .map_err(|err| Self::invalid_card_data(&err))?;
        // Storage keeps microseconds; trim so the response matches a re-read.
        let card = new_card.into_card(CardId::random(), self.clock.utc().trunc_subsecs(6));

        self.cards.insert(&card).await.map_err(|err| match err {
            CardPersistenceError::UnknownUser { user_id } => Error::invalid_request(
                INVALID_CARD_DATA_MESSAGE,
            )
            .with_details(json!({
                "field": "owner",
                "code": "unknown_user",
                "reason": format!("user {user_id} does not exist"),
            })),
            other => Self::map_persistence_error(other),
        })?;

        Ok(card)
    }

    async fn delete_card(&self, identity: &Identity, card_id: &str) -> Result<(), Error> {
        let id = Self::parse_card_id(card_id)?;
        let card = self
            .cards
            .find_by_id(&id)
            .await
            .map_err(Self::map_persistence_error)?
            .ok_or_else(Self::card_not_found)?;

        if !card.is_owned_by(identity.user_id()) {
            return Err(Error::forbidden(CARD_DELETE_FORBIDDEN_MESSAGE));
        }

        let removed = self
            .cards
            .delete(&id)
            .await
            .map_err(Self::map_persistence_error)?;
        if !removed {
            // A concurrent delete by the owner won the race.
            return Err(Self::card_not_found());
        }
        Ok(())
    }

    async fn like_card(&self, identity: &Identity, card_id: &str) -> Result<Card, Error> {
        let id = Self::parse_card_id(card_id)?;
        self.cards
            .add_like(&id, identity.user_id())
            .await
            .map_err(Self::map_persistence_error)?
            .ok_or_else(Self::card_not_found)
    }

    async fn dislike_card(&self, identity: &Identity, card_id: &str) -> Result<Card, Error> {
        let id = Self::parse_card_id(card_id)?;
        self.cards
            .remove_like(&id, identity.user_id())
            .await
            .map_err(Self::map_persistence_error)?
            .ok_or_else(Self::card_not_found)
    }
}

#[cfg(test)]
#[path = "card_service_tests.rs"]
mod tests;
