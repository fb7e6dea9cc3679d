//! Domain ports and supporting types for the hexagonal boundary.
//!
//! Driven ports ([`CardRepository`], [`UserRepository`]) are implemented by
//! outbound adapters. Driving ports ([`CardsCommand`], [`CardsQuery`],
//! [`UsersCommand`], [`UsersQuery`]) are implemented by domain services and
//! consumed by inbound adapters.

mod card_repository;
mod cards_command;
mod cards_query;
mod user_repository;
mod users_command;
mod users_query;

#[cfg(test)]
pub use card_repository::MockCardRepository;
pub use card_repository::{CardPersistenceError, CardRepository};
#[cfg(test)]
pub use cards_command::MockCardsCommand;
pub use cards_command::{CardsCommand, CreateCardRequest};
#[cfg(test)]
pub use cards_query::MockCardsQuery;
pub use cards_query::CardsQuery;
#[cfg(test)]
pub use user_repository::MockUserRepository;
pub use user_repository::{UserPersistenceError, UserRepository};
#[cfg(test)]
pub use users_command::MockUsersCommand;
pub use users_command::{RegisterUserRequest, UsersCommand};
#[cfg(test)]
pub use users_query::MockUsersQuery;
pub use users_query::UsersQuery;
