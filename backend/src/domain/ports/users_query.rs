//! Driving port for user-facing queries.
//!
//! Inbound adapters use this port to read public profiles without touching
//! password digests or persistence types.

use async_trait::async_trait;

use crate::domain::{Error, Identity, UserProfile};

/// User read operations.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UsersQuery: Send + Sync {
    /// All registered users.
    async fn list_users(&self) -> Result<Vec<UserProfile>, Error>;

    /// One user by raw identifier.
    ///
    /// # Errors
    ///
    /// Returns `invalid_request` for a malformed id and `not_found` when no
    /// user has it.
    async fn get_user(&self, user_id: &str) -> Result<UserProfile, Error>;

    /// The caller's own profile.
    async fn current_user(&self, identity: &Identity) -> Result<UserProfile, Error>;
}
