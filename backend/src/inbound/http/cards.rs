//! Cards API handlers.
//!
//! ```text
//! GET    /cards
//! POST   /cards                    {"name":"Ball","link":"https://x.test/a.png"}
//! DELETE /cards/{cardId}
//! PUT    /cards/{cardId}/likes     (PATCH accepted too)
//! DELETE /cards/{cardId}/likes
//! ```
//!
//! Every route except the listing needs a caller identity.

use actix_web::{HttpResponse, delete, get, post, route, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::ports::CreateCardRequest;
use crate::domain::{Card, CardWithOwner, Error, Identity};
use crate::inbound::http::ApiResult;
use crate::inbound::http::state::HttpState;

/// Confirmation body for a successful delete.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct DeleteCardResponse {
    #[schema(example = "card deleted")]
    pub message: String,
}

impl DeleteCardResponse {
    fn deleted() -> Self {
        Self {
            message: "card deleted".to_owned(),
        }
    }
}

/// List every card with its owner's profile.
///
/// # Examples
/// ```
/// use actix_web::App;
/// use backend::inbound::http::cards::list_cards;
///
/// let app = App::new().service(list_cards);
/// ```
#[utoipa::path(
    get,
    path = "/cards",
    responses(
        (status = 200, description = "Cards", body = [CardWithOwner]),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["cards"],
    operation_id = "listCards",
    security([])
)]
#[get("/cards")]
pub async fn list_cards(state: web::Data<HttpState>) -> ApiResult<web::Json<Vec<CardWithOwner>>> {
    let cards = state.cards_query.list_cards().await?;
    Ok(web::Json(cards))
}

/// Create a card owned by the caller.
#[utoipa::path(
    post,
    path = "/cards",
    request_body = CreateCardRequest,
    responses(
        (status = 201, description = "Card created", body = Card),
        (status = 400, description = "Invalid card data", body = Error),
        (status = 401, description = "Identity required", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["cards"],
    operation_id = "createCard"
)]
#[post("/cards")]
pub async fn create_card(
    state: web::Data<HttpState>,
    identity: Identity,
    payload: web::Json<CreateCardRequest>,
) -> ApiResult<HttpResponse> {
    let card = state
        .cards
        .create_card(&identity, payload.into_inner())
        .await?;
    Ok(HttpResponse::Created().json(card))
}

/// Delete a card the caller owns.
#[utoipa::path(
    delete,
    path = "/cards/{cardId}",
    params(("cardId" = String, Path, description = "Card identifier (UUID)")),
    responses(
        (status = 200, description = "Card deleted", body = DeleteCardResponse),
        (status = 400, description = "Invalid card id", body = Error),
        (status = 401, description = "Identity required", body = Error),
        (status = 403, description = "Caller does not own the card", body = Error),
        (status = 404, description = "Card not found", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["cards"],
    operation_id = "deleteCard"
)]
#[delete("/cards/{cardId}")]
pub async fn delete_card(
    state: web::Data<HttpState>,
    identity: Identity,
    card_id: web::Path<String>,
) -> ApiResult<web::Json<DeleteCardResponse>> {
    state.cards.delete_card(&identity, &card_id).await?;
    Ok(web::Json(DeleteCardResponse::deleted()))
}

/// Like a card. Liking twice keeps a single like.
#[utoipa::path(
    method(put, patch),
    path = "/cards/{cardId}/likes",
    params(("cardId" = String, Path, description = "Card identifier (UUID)")),
    responses(
        (status = 200, description = "Updated card", body = Card),
        (status = 400, description = "Invalid card id", body = Error),
        (status = 401, description = "Identity required", body = Error),
        (status = 404, description = "Card not found", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["cards"],
    operation_id = "likeCard"
)]
#[route("/cards/{cardId}/likes", method = "PUT", method = "PATCH")]
pub async fn like_card(
    state: web::Data<HttpState>,
    identity: Identity,
    card_id: web::Path<String>,
) -> ApiResult<web::Json<Card>> {
    let card = state.cards.like_card(&identity, &card_id).await?;
    Ok(web::Json(card))
}

/// Remove the caller's like from a card.
#[utoipa::path(
    delete,
    path = "/cards/{cardId}/likes",
    params(("cardId" = String, Path, description = "Card identifier (UUID)")),
    responses(
        (status = 200, description = "Updated card", body = Card),
        (status = 400, description = "Invalid card id", body = Error),
        (status = 401, description = "Identity required", body = Error),
        (status = 404, description = "Card not found", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["cards"],
    operation_id = "dislikeCard"
)]
#[delete("/cards/{cardId}/likes")]
pub async fn dislike_card(
    state: web::Data<HttpState>,
    identity: Identity,
    card_id: web::Path<String>,
) -> ApiResult<web::Json<Card>> {
    let card = state.cards.dislike_card(&identity, &card_id).await?;
    Ok(web::Json(card))
}

/// Register every card route on `cfg`.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(list_cards)
        .service(create_card)
        .service(delete_card)
        .service(like_card)
        .service(dislike_card);
}

#[cfg(test)]
mod tests;
