//! Wiring of domain services onto the configured store.

use std::sync::Arc;

use mockable::{Clock, DefaultClock};
use tracing::{info, warn};

use backend::domain::{CardService, UserService};
use backend::inbound::http::state::HttpState;
use backend::outbound::memory::InMemoryStore;
use backend::outbound::persistence::{
    DbPool, DieselCardRepository, DieselUserRepository, PoolConfig, run_pending_migrations,
};

use super::settings::AppSettings;

/// Store choice resolved from settings.
pub enum Store {
    Postgres(DbPool),
    Memory(Arc<InMemoryStore>),
}

/// Errors raised while connecting to the configured store.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error(transparent)]
    Pool(#[from] backend::outbound::persistence::PoolError),
    #[error(transparent)]
    Migration(#[from] backend::outbound::persistence::MigrationError),
}

/// Connect to PostgreSQL when a URL is configured, otherwise use memory.
pub async fn connect_store(settings: &AppSettings) -> Result<Store, StoreError> {
    let Some(url) = settings.database_url.as_deref() else {
        warn!("CARDS_DATABASE_URL not set; cards and users are kept in memory only");
        return Ok(Store::Memory(Arc::new(InMemoryStore::default())));
    };
    if settings.run_migrations {
        run_pending_migrations(url).await?;
    }
    let pool =
        DbPool::new(PoolConfig::new(url).with_max_size(settings.db_pool_size())).await?;
    info!(max_size = settings.db_pool_size(), "database pool ready");
    Ok(Store::Postgres(pool))
}

/// Build handler state with services over `store`.
pub fn build_http_state(store: Store) -> HttpState {
    let clock: Arc<dyn Clock> = Arc::new(DefaultClock);
    match store {
        Store::Postgres(pool) => {
            let cards = Arc::new(CardService::new(
                Arc::new(DieselCardRepository::new(pool.clone())),
                clock,
            ));
            let users = Arc::new(UserService::new(Arc::new(DieselUserRepository::new(pool))));
            HttpState::new(cards.clone(), cards, users.clone(), users)
        }
        Store::Memory(store) => {
            let cards = Arc::new(CardService::new(Arc::clone(&store), clock));
            let users = Arc::new(UserService::new(store));
            HttpState::new(cards.clone(), cards, users.clone(), users)
        }
    }
}
