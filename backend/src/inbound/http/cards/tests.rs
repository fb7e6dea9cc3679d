//! Tests for the cards API handlers.

use std::sync::Arc;

use actix_web::http::StatusCode;
use actix_web::test as actix_test;
use rstest::{fixture, rstest};
use serde_json::{Value, json};

use super::*;
use crate::domain::ports::{MockCardsCommand, MockCardsQuery, MockUsersCommand, MockUsersQuery};
use crate::domain::UserId;
use crate::inbound::http::test_utils::{IDENTITY_HEADER, memory_state, seed_user, test_app};
use crate::outbound::memory::InMemoryStore;

#[fixture]
fn store() -> Arc<InMemoryStore> {
    Arc::new(InMemoryStore::default())
}

fn card_body() -> Value {
    json!({ "name": "Ball", "link": "https://x.test/a.png" })
}

async fn read_json(res: actix_web::dev::ServiceResponse) -> Value {
    let body = actix_test::read_body(res).await;
    serde_json::from_slice(&body).expect("JSON body")
}

#[rstest]
#[actix_web::test]
async fn create_then_list_embeds_owner(store: Arc<InMemoryStore>) {
    let owner = seed_user(&store, "owner@example.com").await;
    let app = actix_test::init_service(test_app(memory_state(&store), configure)).await;

    let created = actix_test::call_service(
        &app,
        actix_test::TestRequest::post()
            .uri("/cards")
            .insert_header((IDENTITY_HEADER, owner.to_string()))
            .set_json(card_body())
            .to_request(),
    )
    .await;
    assert_eq!(created.status(), StatusCode::CREATED);
    let card = read_json(created).await;
    assert_eq!(card["owner"], json!(owner.to_string()));
    assert_eq!(card["likes"], json!([]));

    let listed = actix_test::call_service(
        &app,
        actix_test::TestRequest::get().uri("/cards").to_request(),
    )
    .await;
    assert_eq!(listed.status(), StatusCode::OK);
    let cards = read_json(listed).await;
    assert_eq!(cards.as_array().map(Vec::len), Some(1));
    assert_eq!(cards[0]["owner"]["email"], json!("owner@example.com"));
    assert!(cards[0]["owner"].get("password").is_none());
}

#[rstest]
#[case(json!({ "name": "B", "link": "https://x.test/a.png" }), "name")]
#[case(json!({ "name": "Ball", "link": "not a url" }), "link")]
#[case(json!({ "link": "https://x.test/a.png" }), "name")]
#[actix_web::test]
async fn create_rejects_invalid_data(
    store: Arc<InMemoryStore>,
    #[case] body: Value,
    #[case] field: &str,
) {
    let owner = seed_user(&store, "owner@example.com").await;
    let app = actix_test::init_service(test_app(memory_state(&store), configure)).await;

    let res = actix_test::call_service(
        &app,
        actix_test::TestRequest::post()
            .uri("/cards")
            .insert_header((IDENTITY_HEADER, owner.to_string()))
            .set_json(body)
            .to_request(),
    )
    .await;

    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let error = read_json(res).await;
    assert_eq!(error["code"], json!("invalid_request"));
    assert_eq!(
        error["message"],
        json!("invalid data supplied when creating card")
    );
    assert_eq!(error["details"]["field"], json!(field));
}

#[rstest]
#[actix_web::test]
async fn identity_is_required_for_mutations(store: Arc<InMemoryStore>) {
    let app = actix_test::init_service(test_app(memory_state(&store), configure)).await;
    let card_id = crate::domain::CardId::random().to_string();

    let requests = [
        actix_test::TestRequest::post()
            .uri("/cards")
            .set_json(card_body()),
        actix_test::TestRequest::delete().uri(&format!("/cards/{card_id}")),
        actix_test::TestRequest::put().uri(&format!("/cards/{card_id}/likes")),
        actix_test::TestRequest::patch().uri(&format!("/cards/{card_id}/likes")),
        actix_test::TestRequest::delete().uri(&format!("/cards/{card_id}/likes")),
    ];
    for request in requests {
        let res = actix_test::call_service(&app, request.to_request()).await;
        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
        let error = read_json(res).await;
        assert_eq!(error["code"], json!("unauthorized"));
    }
}

#[rstest]
#[actix_web::test]
async fn only_the_owner_can_delete(store: Arc<InMemoryStore>) {
    let owner = seed_user(&store, "owner@example.com").await;
    let other = seed_user(&store, "other@example.com").await;
    let app = actix_test::init_service(test_app(memory_state(&store), configure)).await;

    let created = actix_test::call_service(
        &app,
        actix_test::TestRequest::post()
            .uri("/cards")
            .insert_header((IDENTITY_HEADER, owner.to_string()))
            .set_json(card_body())
            .to_request(),
    )
    .await;
    let card_id = read_json(created).await["id"]
        .as_str()
        .expect("card id")
        .to_owned();

    let forbidden = actix_test::call_service(
        &app,
        actix_test::TestRequest::delete()
            .uri(&format!("/cards/{card_id}"))
            .insert_header((IDENTITY_HEADER, other.to_string()))
            .to_request(),
    )
    .await;
    assert_eq!(forbidden.status(), StatusCode::FORBIDDEN);
    assert_eq!(
        read_json(forbidden).await["message"],
        json!("not authorized to delete this card")
    );

    let deleted = actix_test::call_service(
        &app,
        actix_test::TestRequest::delete()
            .uri(&format!("/cards/{card_id}"))
            .insert_header((IDENTITY_HEADER, owner.to_string()))
            .to_request(),
    )
    .await;
    assert_eq!(deleted.status(), StatusCode::OK);
    assert_eq!(read_json(deleted).await, json!({ "message": "card deleted" }));

    let again = actix_test::call_service(
        &app,
        actix_test::TestRequest::delete()
            .uri(&format!("/cards/{card_id}"))
            .insert_header((IDENTITY_HEADER, owner.to_string()))
            .to_request(),
    )
    .await;
    assert_eq!(again.status(), StatusCode::NOT_FOUND);
}

#[rstest]
#[case("PUT")]
#[case("PATCH")]
#[actix_web::test]
async fn liking_is_idempotent(store: Arc<InMemoryStore>, #[case] method: &str) {
    let owner = seed_user(&store, "owner@example.com").await;
    let liker = seed_user(&store, "liker@example.com").await;
    let app = actix_test::init_service(test_app(memory_state(&store), configure)).await;

    let created = actix_test::call_service(
        &app,
        actix_test::TestRequest::post()
            .uri("/cards")
            .insert_header((IDENTITY_HEADER, owner.to_string()))
            .set_json(card_body())
            .to_request(),
    )
    .await;
    let card_id = read_json(created).await["id"]
        .as_str()
        .expect("card id")
        .to_owned();

    let method = actix_web::http::Method::from_bytes(method.as_bytes()).expect("method");
    let mut last = Value::Null;
    for _ in 0..2 {
        let res = actix_test::call_service(
            &app,
            actix_test::TestRequest::default()
                .method(method.clone())
                .uri(&format!("/cards/{card_id}/likes"))
                .insert_header((IDENTITY_HEADER, liker.to_string()))
                .to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::OK);
        last = read_json(res).await;
    }
    assert_eq!(last["likes"], json!([liker.to_string()]));

    let disliked = actix_test::call_service(
        &app,
        actix_test::TestRequest::delete()
            .uri(&format!("/cards/{card_id}/likes"))
            .insert_header((IDENTITY_HEADER, liker.to_string()))
            .to_request(),
    )
    .await;
    assert_eq!(disliked.status(), StatusCode::OK);
    assert_eq!(read_json(disliked).await["likes"], json!([]));
}

#[rstest]
#[case("/cards/not-a-uuid", StatusCode::BAD_REQUEST, "invalid card id")]
#[case(
    "/cards/00000000-0000-0000-0000-000000000000",
    StatusCode::NOT_FOUND,
    "card not found"
)]
#[actix_web::test]
async fn delete_reports_bad_and_missing_ids(
    store: Arc<InMemoryStore>,
    #[case] uri: &str,
    #[case] status: StatusCode,
    #[case] message: &str,
) {
    let owner = seed_user(&store, "owner@example.com").await;
    let app = actix_test::init_service(test_app(memory_state(&store), configure)).await;

    let res = actix_test::call_service(
        &app,
        actix_test::TestRequest::delete()
            .uri(uri)
            .insert_header((IDENTITY_HEADER, owner.to_string()))
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), status);
    assert_eq!(read_json(res).await["message"], json!(message));
}

#[rstest]
#[actix_web::test]
async fn like_on_missing_card_is_not_found(store: Arc<InMemoryStore>) {
    let liker = seed_user(&store, "liker@example.com").await;
    let app = actix_test::init_service(test_app(memory_state(&store), configure)).await;

    let res = actix_test::call_service(
        &app,
        actix_test::TestRequest::put()
            .uri(&format!("/cards/{}/likes", crate::domain::CardId::random()))
            .insert_header((IDENTITY_HEADER, liker.to_string()))
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
}

#[rstest]
#[case("PUT")]
#[case("DELETE")]
#[actix_web::test]
async fn unregistered_caller_gets_not_found_for_missing_card(
    store: Arc<InMemoryStore>,
    #[case] method: &str,
) {
    let app = actix_test::init_service(test_app(memory_state(&store), configure)).await;
    let method = actix_web::http::Method::from_bytes(method.as_bytes()).expect("method");

    let res = actix_test::call_service(
        &app,
        actix_test::TestRequest::default()
            .method(method)
            .uri(&format!("/cards/{}/likes", crate::domain::CardId::random()))
            .insert_header((IDENTITY_HEADER, UserId::random().to_string()))
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    assert_eq!(read_json(res).await["message"], json!("card not found"));
}

#[rstest]
#[actix_web::test]
async fn unregistered_caller_can_remove_like_but_not_add_one(store: Arc<InMemoryStore>) {
    let owner = seed_user(&store, "owner@example.com").await;
    let app = actix_test::init_service(test_app(memory_state(&store), configure)).await;
    let created = actix_test::call_service(
        &app,
        actix_test::TestRequest::post()
            .uri("/cards")
            .insert_header((IDENTITY_HEADER, owner.to_string()))
            .set_json(card_body())
            .to_request(),
    )
    .await;
    let card_id = read_json(created).await["id"]
        .as_str()
        .expect("card id")
        .to_owned();
    let stranger = UserId::random().to_string();

    let disliked = actix_test::call_service(
        &app,
        actix_test::TestRequest::delete()
            .uri(&format!("/cards/{card_id}/likes"))
            .insert_header((IDENTITY_HEADER, stranger.clone()))
            .to_request(),
    )
    .await;
    assert_eq!(disliked.status(), StatusCode::OK);
    assert_eq!(read_json(disliked).await["likes"], json!([]));

    let liked = actix_test::call_service(
        &app,
        actix_test::TestRequest::put()
            .uri(&format!("/cards/{card_id}/likes"))
            .insert_header((IDENTITY_HEADER, stranger))
            .to_request(),
    )
    .await;
    assert_eq!(liked.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        read_json(liked).await["details"]["code"],
        json!("unknown_user")
    );
}

#[rstest]
#[actix_web::test]
async fn storage_failures_are_redacted() {
    let mut cards_query = MockCardsQuery::new();
    cards_query
        .expect_list_cards()
        .times(1)
        .return_once(|| Err(Error::internal("card repository error: connection reset")));
    let state = HttpState::new(
        Arc::new(MockCardsCommand::new()),
        Arc::new(cards_query),
        Arc::new(MockUsersCommand::new()),
        Arc::new(MockUsersQuery::new()),
    );
    let app = actix_test::init_service(test_app(state, configure)).await;

    let res = actix_test::call_service(
        &app,
        actix_test::TestRequest::get().uri("/cards").to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let error = read_json(res).await;
    assert_eq!(error["code"], json!("internal_error"));
    assert_eq!(error["message"], json!("Internal server error"));
    assert!(error["traceId"].is_string());
}

#[rstest]
#[actix_web::test]
async fn create_passes_caller_identity_to_the_port() {
    let caller = UserId::random();
    let mut cards = MockCardsCommand::new();
    cards
        .expect_create_card()
        .withf(move |identity, request| *identity.user_id() == caller && request.name == "Ball")
        .times(1)
        .return_once(|identity, request| {
            crate::domain::NewCard::try_new(request.name, request.link, *identity.user_id())
                .map(|card| card.into_card(crate::domain::CardId::random(), chrono::Utc::now()))
                .map_err(|err| Error::invalid_request(err.to_string()))
        });
    let state = HttpState::new(
        Arc::new(cards),
        Arc::new(MockCardsQuery::new()),
        Arc::new(MockUsersCommand::new()),
        Arc::new(MockUsersQuery::new()),
    );
    let app = actix_test::init_service(test_app(state, configure)).await;

    let res = actix_test::call_service(
        &app,
        actix_test::TestRequest::post()
            .uri("/cards")
            .insert_header((IDENTITY_HEADER, caller.to_string()))
            .set_json(card_body())
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::CREATED);
}
