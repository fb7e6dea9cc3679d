//! Test helpers for inbound HTTP components.

use std::sync::Arc;

use actix_web::dev::{ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, web};
use mockable::DefaultClock;

use crate::domain::ports::UserRepository;
use crate::domain::{CardService, NewUser, NewUserInput, UserId, UserService};
use crate::inbound::http::error::json_error_handler;
use crate::inbound::http::state::HttpState;
use crate::middleware::{DEFAULT_IDENTITY_HEADER, IdentityHeader, Trace};
use crate::outbound::memory::InMemoryStore;

/// Header name handlers expect the caller id in.
pub const IDENTITY_HEADER: &str = DEFAULT_IDENTITY_HEADER;

/// State wired to real services over a shared in-memory store.
pub fn memory_state(store: &Arc<InMemoryStore>) -> HttpState {
    let cards = Arc::new(CardService::new(Arc::clone(store), Arc::new(DefaultClock)));
    let users = Arc::new(UserService::new(Arc::clone(store)));
    HttpState::new(cards.clone(), cards, users.clone(), users)
}

/// Store a user directly and return their id.
pub async fn seed_user(store: &InMemoryStore, email: &str) -> UserId {
    let user = NewUser::try_new(NewUserInput {
        email: email.to_owned(),
        password: "secret".to_owned(),
        name: None,
        about: None,
        avatar: None,
    })
    .expect("valid user")
    .into_user(UserId::random())
    .expect("password digest");
    let id = user.id;
    UserRepository::insert(store, &user)
        .await
        .expect("seed user");
    id
}

/// App with the production middleware stack and `configure` applied.
pub fn test_app(
    state: HttpState,
    configure: fn(&mut web::ServiceConfig),
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    App::new()
        .app_data(web::Data::new(state))
        .app_data(web::JsonConfig::default().error_handler(json_error_handler))
        .wrap(IdentityHeader::default())
        .wrap(Trace)
        .configure(configure)
}
