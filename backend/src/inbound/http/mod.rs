//! HTTP inbound adapter exposing REST endpoints.

pub mod cards;
pub mod error;
pub mod health;
pub mod identity;
pub mod state;
#[cfg(test)]
pub mod test_utils;
pub mod users;

use actix_web::web;

pub use error::ApiResult;

/// Register every card and user route on `cfg`.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.configure(cards::configure).configure(users::configure);
}
