//! User domain service.
//!
//! Registers users and serves their public profiles. Password digests never
//! leave this module: every read returns a [`UserProfile`].

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::json;

use crate::domain::ports::{
    RegisterUserRequest, UserPersistenceError, UserRepository, UsersCommand, UsersQuery,
};
use crate::domain::{Error, Identity, NewUser, User, UserId, UserProfile};

/// Message returned when registration input fails validation.
pub const INVALID_USER_DATA_MESSAGE: &str = "invalid data supplied when creating user";
/// Message returned when a user id cannot be parsed.
pub const INVALID_USER_ID_MESSAGE: &str = "invalid user id";
/// Message returned when no user has the requested id.
pub const USER_NOT_FOUND_MESSAGE: &str = "user not found";

/// User service implementing [`UsersCommand`] and [`UsersQuery`].
#[derive(Clone)]
pub struct UserService<R> {
    users: Arc<R>,
}

impl<R> UserService<R> {
    /// Create a service over the given user repository.
    pub fn new(users: Arc<R>) -> Self {
        Self { users }
    }
}

impl<R> UserService<R>
where
    R: UserRepository,
{
    fn map_persistence_error(error: UserPersistenceError) -> Error {
        match error {
            UserPersistenceError::Connection { message } => {
                Error::internal(format!("user repository unavailable: {message}"))
            }
            UserPersistenceError::Query { message } => {
                Error::internal(format!("user repository error: {message}"))
            }
            UserPersistenceError::DuplicateEmail { .. } => {
                Error::conflict("a user with this email already exists")
                    .with_details(json!({ "field": "email", "code": "duplicate_email" }))
            }
        }
    }

    async fn find(&self, id: &UserId) -> Result<User, Error> {
        self.users
            .find_by_id(id)
            .await
            .map_err(Self::map_persistence_error)?
            .ok_or_else(|| Error::not_found(USER_NOT_FOUND_MESSAGE))
    }
}

#[async_trait]
impl<R> UsersCommand for UserService<R>
where
    R: UserRepository,
{
    async fn register(&self, request: RegisterUserRequest) -> Result<UserProfile, Error> {
        let new_user = NewUser::try_new(request.into()).map_err(|err| {
            Error::invalid_request(INVALID_USER_DATA_MESSAGE).with_details(json!({
                "field": err.field(),
                "code": err.code(),
                "reason": err.to_string(),
            }))
        })?;
        let user = new_user
            .into_user(UserId::random())
            .map_err(|err| Error::internal(err.to_string()))?;
        self.users
            .insert(&user)
            .await
            .map_err(Self::map_persistence_error)?;
        Ok(user.profile())
    }
}

#[async_trait]
impl<R> UsersQuery for UserService<R>
where
    R: UserRepository,
{
    async fn list_users(&self) -> Result<Vec<UserProfile>, Error> {
        let users = self
            .users
            .list()
            .await
            .map_err(Self::map_persistence_error)?;
        Ok(users.iter().map(User::profile).collect())
    }

    async fn get_user(&self, user_id: &str) -> Result<UserProfile, Error> {
        let id = UserId::new(user_id).map_err(|err| {
            Error::invalid_request(INVALID_USER_ID_MESSAGE)
                .with_details(json!({ "field": "userId", "code": err.code() }))
        })?;
        self.find(&id).await.map(|user| user.profile())
    }

    async fn current_user(&self, identity: &Identity) -> Result<UserProfile, Error> {
        self.find(identity.user_id())
            .await
            .map(|user| user.profile())
    }
}
