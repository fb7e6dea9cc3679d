//! In-memory store implementing both repository ports.
//!
//! Used when no database URL is configured and by the integration suites.
//! A single mutex guards users and cards together, so every operation is
//! atomic and the same referential rules as the SQL schema hold: a card's
//! owner and every liking user must exist. Removing a like never checks the
//! user, since deleting an absent row cannot violate a foreign key.

use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;

use crate::domain::ports::{
    CardPersistenceError, CardRepository, UserPersistenceError, UserRepository,
};
use crate::domain::{Card, CardId, CardWithOwner, User, UserId};

const POISONED: &str = "in-memory store lock poisoned";

#[derive(Debug, Default)]
struct State {
    users: Vec<User>,
    cards: Vec<Card>,
}

impl State {
    fn has_user(&self, id: &UserId) -> bool {
        self.users.iter().any(|user| user.id == *id)
    }

    fn card_mut(&mut self, id: &CardId) -> Option<&mut Card> {
        self.cards.iter_mut().find(|card| card.id == *id)
    }
}

/// Process-local store. Share one instance behind an `Arc` for both ports.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    state: Mutex<State>,
}

impl InMemoryStore {
    fn lock(&self) -> Option<MutexGuard<'_, State>> {
        self.state.lock().ok()
    }

    fn lock_cards(&self) -> Result<MutexGuard<'_, State>, CardPersistenceError> {
        self.lock().ok_or_else(|| CardPersistenceError::query(POISONED))
    }

    fn lock_users(&self) -> Result<MutexGuard<'_, State>, UserPersistenceError> {
        self.lock().ok_or_else(|| UserPersistenceError::query(POISONED))
    }

    /// Apply `apply` to card `id`. A missing card yields `None` before any
    /// user check, matching the row lock the SQL adapter takes first.
    fn update_likes(
        &self,
        id: &CardId,
        user: &UserId,
        require_user: bool,
        apply: impl FnOnce(&mut Card, UserId),
    ) -> Result<Option<Card>, CardPersistenceError> {
        let mut state = self.lock_cards()?;
        if state.card_mut(id).is_none() {
            return Ok(None);
        }
        if require_user && !state.has_user(user) {
            return Err(CardPersistenceError::unknown_user(*user));
        }
        Ok(state.card_mut(id).map(|card| {
            apply(card, *user);
            card.clone()
        }))
    }
}

#[async_trait]
impl UserRepository for InMemoryStore {
    async fn insert(&self, user: &User) -> Result<(), UserPersistenceError> {
        let mut state = self.lock_users()?;
        if state.users.iter().any(|existing| existing.email == user.email) {
            return Err(UserPersistenceError::duplicate_email(user.email.as_ref()));
        }
        state.users.push(user.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserPersistenceError> {
        let state = self.lock_users()?;
        Ok(state.users.iter().find(|user| user.id == *id).cloned())
    }

    async fn list(&self) -> Result<Vec<User>, UserPersistenceError> {
        Ok(self.lock_users()?.users.clone())
    }
}

#[async_trait]
impl CardRepository for InMemoryStore {
    async fn list_with_owners(&self) -> Result<Vec<CardWithOwner>, CardPersistenceError> {
        let state = self.lock_cards()?;
        state
            .cards
            .iter()
            .map(|card| {
                let owner = state
                    .users
                    .iter()
                    .find(|user| user.id == card.owner)
                    .ok_or_else(|| CardPersistenceError::unknown_user(card.owner))?;
                CardWithOwner::resolve(card.clone(), owner.profile())
                    .ok_or_else(|| CardPersistenceError::query("card resolved to wrong owner"))
            })
            .collect()
    }

    async fn insert(&self, card: &Card) -> Result<(), CardPersistenceError> {
        let mut state = self.lock_cards()?;
        if !state.has_user(&card.owner) {
            return Err(CardPersistenceError::unknown_user(card.owner));
        }
        if state.cards.iter().any(|existing| existing.id == card.id) {
            return Err(CardPersistenceError::query(format!(
                "card {} already exists",
                card.id
            )));
        }
        state.cards.push(card.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: &CardId) -> Result<Option<Card>, CardPersistenceError> {
        let state = self.lock_cards()?;
        Ok(state.cards.iter().find(|card| card.id == *id).cloned())
    }

    async fn delete(&self, id: &CardId) -> Result<bool, CardPersistenceError> {
        let mut state = self.lock_cards()?;
        let before = state.cards.len();
        state.cards.retain(|card| card.id != *id);
        Ok(state.cards.len() < before)
    }

    async fn add_like(
        &self,
        id: &CardId,
        user: &UserId,
    ) -> Result<Option<Card>, CardPersistenceError> {
        self.update_likes(id, user, true, |card, user| {
            card.likes.insert(user);
        })
    }

    async fn remove_like(
        &self,
        id: &CardId,
        user: &UserId,
    ) -> Result<Option<Card>, CardPersistenceError> {
        self.update_likes(id, user, false, |card, user| {
            card.likes.remove(&user);
        })
    }
}
