//! Tests for the card service.

use std::sync::Arc;

use chrono::{DateTime, Local, TimeZone, Utc};
use mockable::Clock;
use rstest::{fixture, rstest};

use super::*;
use crate::domain::ports::MockCardRepository;
use crate::domain::{ErrorCode, Likes, UserId};

struct FixtureClock {
    utc_now: DateTime<Utc>,
}

impl Clock for FixtureClock {
    fn local(&self) -> DateTime<Local> {
        self.utc_now.with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        self.utc_now
    }
}

fn fixture_timestamp() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 10, 16, 9, 0, 0)
        .single()
        .expect("valid fixture timestamp")
}

fn make_service(repo: MockCardRepository) -> CardService<MockCardRepository> {
    CardService::new(
        Arc::new(repo),
        Arc::new(FixtureClock {
            utc_now: fixture_timestamp(),
        }),
    )
}

#[fixture]
fn owner() -> Identity {
    Identity::new(UserId::random())
}

fn card_owned_by(owner: &Identity) -> Card {
    NewCard::try_new("Ball", "https://x.test/a.png", *owner.user_id())
        .expect("valid card")
        .into_card(CardId::random(), fixture_timestamp())
}

fn request(name: &str, link: &str) -> CreateCardRequest {
    CreateCardRequest {
        name: name.to_owned(),
        link: link.to_owned(),
    }
}

#[rstest]
#[tokio::test]
async fn create_card_sets_owner_and_empty_likes(owner: Identity) {
    let mut repo = MockCardRepository::new();
    let expected_owner = *owner.user_id();
    repo.expect_insert()
        .withf(move |card| card.owner == expected_owner && card.likes.is_empty())
        .times(1)
        .return_once(|_| Ok(()));

    let card = make_service(repo)
        .create_card(&owner, request("Ball", "https://x.test/a.png"))
        .await
        .expect("card created");

    assert_eq!(card.owner, *owner.user_id());
    assert_eq!(card.name.as_ref(), "Ball");
    assert!(card.likes.is_empty());
    assert_eq!(card.created_at, fixture_timestamp());
}

#[rstest]
#[case("B", "https://x.test/a.png", "name")]
#[case("", "https://x.test/a.png", "name")]
#[case("Ball", "http://localhost/a.png", "link")]
#[case("Ball", "", "link")]
#[tokio::test]
async fn create_card_rejects_invalid_fields_without_storing(
    owner: Identity,
    #[case] name: &str,
    #[case] link: &str,
    #[case] field: &str,
) {
    let mut repo = MockCardRepository::new();
    repo.expect_insert().never();

    let error = make_service(repo)
        .create_card(&owner, request(name, link))
        .await
        .expect_err("validation fails");

    assert_eq!(error.code(), ErrorCode::InvalidRequest);
    assert_eq!(error.message(), INVALID_CARD_DATA_MESSAGE);
    let details = error.details().expect("details present");
    assert_eq!(details["field"], field);
}

#[rstest]
#[tokio::test]
async fn create_card_reports_unknown_owner_as_invalid_data(owner: Identity) {
    let mut repo = MockCardRepository::new();
    let user = *owner.user_id();
    repo.expect_insert()
        .times(1)
        .return_once(move |_| Err(CardPersistenceError::unknown_user(user)));

    let error = make_service(repo)
        .create_card(&owner, request("Ball", "https://x.test/a.png"))
        .await
        .expect_err("unknown owner");

    assert_eq!(error.code(), ErrorCode::InvalidRequest);
    assert_eq!(error.message(), INVALID_CARD_DATA_MESSAGE);
}

#[rstest]
#[tokio::test]
async fn list_cards_maps_storage_failures_to_internal() {
    let mut repo = MockCardRepository::new();
    repo.expect_list_with_owners()
        .times(1)
        .return_once(|| Err(CardPersistenceError::connection("refused")));

    let error = make_service(repo)
        .list_cards()
        .await
        .expect_err("storage failure");

    assert_eq!(error.code(), ErrorCode::InternalError);
}

#[rstest]
#[tokio::test]
async fn delete_card_removes_owned_card(owner: Identity) {
    let card = card_owned_by(&owner);
    let id = card.id;
    let mut repo = MockCardRepository::new();
    repo.expect_find_by_id()
        .withf(move |candidate| *candidate == id)
        .times(1)
        .return_once(move |_| Ok(Some(card)));
    repo.expect_delete()
        .withf(move |candidate| *candidate == id)
        .times(1)
        .return_once(|_| Ok(true));

    make_service(repo)
        .delete_card(&owner, &id.to_string())
        .await
        .expect("owner deletes card");
}

#[rstest]
#[tokio::test]
async fn delete_card_forbids_non_owner_and_keeps_card(owner: Identity) {
    let card = card_owned_by(&owner);
    let id = card.id;
    let mut repo = MockCardRepository::new();
    repo.expect_find_by_id()
        .times(1)
        .return_once(move |_| Ok(Some(card)));
    repo.expect_delete().never();

    let stranger = Identity::new(UserId::random());
    let error = make_service(repo)
        .delete_card(&stranger, &id.to_string())
        .await
        .expect_err("forbidden");

    assert_eq!(error.code(), ErrorCode::Forbidden);
    assert_eq!(error.message(), CARD_DELETE_FORBIDDEN_MESSAGE);
}

#[rstest]
#[tokio::test]
async fn delete_card_reports_missing_card(owner: Identity) {
    let mut repo = MockCardRepository::new();
    repo.expect_find_by_id().times(1).return_once(|_| Ok(None));
    repo.expect_delete().never();

    let error = make_service(repo)
        .delete_card(&owner, &CardId::random().to_string())
        .await
        .expect_err("not found");

    assert_eq!(error.code(), ErrorCode::NotFound);
    assert_eq!(error.message(), CARD_NOT_FOUND_MESSAGE);
}

#[rstest]
#[tokio::test]
async fn delete_card_reports_lost_race_as_not_found(owner: Identity) {
    let card = card_owned_by(&owner);
    let id = card.id;
    let mut repo = MockCardRepository::new();
    repo.expect_find_by_id()
        .times(1)
        .return_once(move |_| Ok(Some(card)));
    repo.expect_delete().times(1).return_once(|_| Ok(false));

    let error = make_service(repo)
        .delete_card(&owner, &id.to_string())
        .await
        .expect_err("already gone");

    assert_eq!(error.code(), ErrorCode::NotFound);
}

#[rstest]
#[case("not-a-uuid")]
#[case("")]
#[case("123")]
#[tokio::test]
async fn malformed_ids_never_reach_the_repository(owner: Identity, #[case] raw: &str) {
    let mut repo = MockCardRepository::new();
    repo.expect_find_by_id().never();
    repo.expect_delete().never();
    repo.expect_add_like().never();
    repo.expect_remove_like().never();
    let service = make_service(repo);

    for error in [
        service.delete_card(&owner, raw).await.expect_err("delete"),
        service.like_card(&owner, raw).await.expect_err("like"),
        service.dislike_card(&owner, raw).await.expect_err("dislike"),
    ] {
        assert_eq!(error.code(), ErrorCode::InvalidRequest);
        assert_eq!(error.message(), INVALID_CARD_ID_MESSAGE);
    }
}

#[rstest]
#[tokio::test]
async fn like_card_returns_updated_card(owner: Identity) {
    let liker = Identity::new(UserId::random());
    let mut card = card_owned_by(&owner);
    card.likes = Likes::from([*liker.user_id()]);
    let id = card.id;
    let expected_user = *liker.user_id();
    let mut repo = MockCardRepository::new();
    repo.expect_add_like()
        .withf(move |card_id, user| *card_id == id && *user == expected_user)
        .times(1)
        .return_once(move |_, _| Ok(Some(card)));

    let updated = make_service(repo)
        .like_card(&liker, &id.to_string())
        .await
        .expect("liked");

    assert_eq!(updated.likes, Likes::from([*liker.user_id()]));
}

#[rstest]
#[tokio::test]
async fn like_card_reports_missing_card(owner: Identity) {
    let mut repo = MockCardRepository::new();
    repo.expect_add_like().times(1).return_once(|_, _| Ok(None));

    let error = make_service(repo)
        .like_card(&owner, &CardId::random().to_string())
        .await
        .expect_err("not found");

    assert_eq!(error.code(), ErrorCode::NotFound);
}

#[rstest]
#[tokio::test]
async fn dislike_card_returns_updated_card(owner: Identity) {
    let card = card_owned_by(&owner);
    let id = card.id;
    let mut repo = MockCardRepository::new();
    repo.expect_remove_like()
        .times(1)
        .return_once(move |_, _| Ok(Some(card)));

    let updated = make_service(repo)
        .dislike_card(&owner, &id.to_string())
        .await
        .expect("disliked");

    assert!(updated.likes.is_empty());
}

#[rstest]
#[tokio::test]
async fn dislike_card_maps_query_failure_to_internal(owner: Identity) {
    let mut repo = MockCardRepository::new();
    repo.expect_remove_like()
        .times(1)
        .return_once(|_, _| Err(CardPersistenceError::query("deadlock")));

    let error = make_service(repo)
        .dislike_card(&owner, &CardId::random().to_string())
        .await
        .expect_err("query failure");

    assert_eq!(error.code(), ErrorCode::InternalError);
}
