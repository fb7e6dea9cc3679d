//! Tests for card validation and projection.

use super::*;
use chrono::TimeZone;
use rstest::{fixture, rstest};
use serde_json::{Value, json};

use crate::domain::{NewUser, NewUserInput};

#[fixture]
fn owner() -> UserId {
    UserId::new("11111111-1111-1111-1111-111111111111").expect("valid owner id")
}

#[fixture]
fn created_at() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 10, 16, 9, 0, 0)
        .single()
        .expect("valid fixture timestamp")
}

#[fixture]
fn card(owner: UserId, created_at: DateTime<Utc>) -> Card {
    NewCard::try_new("Ball", "https://x.test/a.png", owner)
        .expect("valid card")
        .into_card(
            CardId::parse("22222222-2222-2222-2222-222222222222").expect("valid card id"),
            created_at,
        )
}

#[rstest]
#[case("Ba".to_owned())]
#[case("a".repeat(30))]
#[case("Мяч".to_owned())]
fn names_within_bounds_are_accepted(owner: UserId, #[case] name: String) {
    let card = NewCard::try_new(name.clone(), "https://x.test/a.png", owner).expect("valid");
    assert_eq!(card.name.as_ref(), name);
    assert_eq!(card.owner, owner);
}

#[rstest]
#[case("B".to_owned(), CardValidationError::NameLength { min: 2, max: 30 })]
#[case("a".repeat(31), CardValidationError::NameLength { min: 2, max: 30 })]
#[case("   ".to_owned(), CardValidationError::EmptyName)]
#[case(String::new(), CardValidationError::EmptyName)]
fn names_out_of_bounds_are_rejected(
    owner: UserId,
    #[case] name: String,
    #[case] expected: CardValidationError,
) {
    let err = NewCard::try_new(name, "https://x.test/a.png", owner).expect_err("invalid name");
    assert_eq!(err, expected);
    assert_eq!(err.field(), "name");
}

#[rstest]
#[case("http://localhost/a.png", CardValidationError::InvalidLink)]
#[case("javascript:alert(1)", CardValidationError::InvalidLink)]
#[case("https://", CardValidationError::InvalidLink)]
#[case("", CardValidationError::EmptyLink)]
fn invalid_links_are_rejected(
    owner: UserId,
    #[case] link: &str,
    #[case] expected: CardValidationError,
) {
    let err = NewCard::try_new("Ball", link, owner).expect_err("invalid link");
    assert_eq!(err, expected);
    assert_eq!(err.field(), "link");
}

#[rstest]
#[case("not-a-uuid")]
#[case("")]
#[case("123")]
#[case("22222222-2222-2222-2222-22222222222")]
fn malformed_ids_are_rejected(#[case] raw: &str) {
    assert_eq!(CardId::parse(raw), Err(CardValidationError::InvalidId));
}

#[rstest]
fn new_cards_start_without_likes(card: Card, owner: UserId) {
    assert!(card.likes.is_empty());
    assert!(card.is_owned_by(&owner));
    assert!(!card.is_owned_by(&UserId::random()));
}

#[rstest]
fn card_serialises_camel_case(card: Card) {
    let value = serde_json::to_value(&card).expect("serialise");
    assert_eq!(
        value,
        json!({
            "id": "22222222-2222-2222-2222-222222222222",
            "name": "Ball",
            "link": "https://x.test/a.png",
            "owner": "11111111-1111-1111-1111-111111111111",
            "likes": [],
            "createdAt": "2026-10-16T09:00:00Z",
        })
    );
}

fn profile_for(id: UserId) -> UserProfile {
    let mut user = NewUser::try_new(NewUserInput {
        email: "owner@example.com".to_owned(),
        password: "pw".to_owned(),
        name: Some("Owner".to_owned()),
        about: None,
        avatar: None,
    })
    .expect("valid user")
    .into_user(UserId::random())
    .expect("password digest");
    user.id = id;
    user.profile()
}

#[rstest]
fn resolve_embeds_owner_profile(card: Card, owner: UserId) {
    let resolved = CardWithOwner::resolve(card, profile_for(owner)).expect("matching owner");
    let value = serde_json::to_value(&resolved).expect("serialise");
    assert_eq!(
        value.pointer("/owner/name").and_then(Value::as_str),
        Some("Owner")
    );
    assert!(value.pointer("/owner/password").is_none());
}

#[rstest]
fn resolve_rejects_mismatched_owner(card: Card) {
    assert!(CardWithOwner::resolve(card, profile_for(UserId::random())).is_none());
}
