//! Shared HTTP adapter state.
//!
//! Handlers receive this through `web::Data` and depend only on the driving
//! ports, so they can be tested against mocks or the in-memory store.

use std::sync::Arc;

use crate::domain::ports::{CardsCommand, CardsQuery, UsersCommand, UsersQuery};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub cards: Arc<dyn CardsCommand>,
    pub cards_query: Arc<dyn CardsQuery>,
    pub users: Arc<dyn UsersCommand>,
    pub users_query: Arc<dyn UsersQuery>,
}

impl HttpState {
    /// Bundle the port implementations.
    pub fn new(
        cards: Arc<dyn CardsCommand>,
        cards_query: Arc<dyn CardsQuery>,
        users: Arc<dyn UsersCommand>,
        users_query: Arc<dyn UsersQuery>,
    ) -> Self {
        Self {
            cards,
            cards_query,
            users,
            users_query,
        }
    }
}
