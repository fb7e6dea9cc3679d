//! PostgreSQL-backed `CardRepository` implementation.
//!
//! Likes live in `card_likes` keyed by `(card_id, user_id)`, so the set
//! semantics come from the primary key. Like and dislike lock the card row
//! for the rest of their transaction, which serialises them per card while
//! leaving other cards untouched.

use std::collections::HashMap;

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::AsyncConnection as _;
use diesel_async::scoped_futures::ScopedFutureExt as _;
use diesel_async::{AsyncPgConnection, RunQueryDsl};
use uuid::Uuid;

use crate::domain::ports::{CardPersistenceError, CardRepository};
use crate::domain::{
    Card, CardId, CardLink, CardName, CardValidationError, CardWithOwner, Likes, UserId,
    UserProfile,
};

use super::error_mapping::{DieselFailure, classify_diesel_error, pool_error_message};
use super::models::{CardLikeRow, CardRow, NewCardRow, UserRow};
use super::pool::{DbPool, PoolError};
use super::schema::{card_likes, cards, users};

/// Diesel-backed card repository.
#[derive(Clone)]
pub struct DieselCardRepository {
    pool: DbPool,
}

impl DieselCardRepository {
    /// Create a repository over `pool`.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> CardPersistenceError {
    CardPersistenceError::connection(pool_error_message(error))
}

fn map_diesel_error(error: diesel::result::Error) -> CardPersistenceError {
    match classify_diesel_error(&error) {
        DieselFailure::Connection(message) => CardPersistenceError::connection(message),
        DieselFailure::ForeignKey | DieselFailure::Unique => {
            CardPersistenceError::query("constraint violation")
        }
        DieselFailure::Query(message) => CardPersistenceError::query(message),
    }
}

/// Map a write failure, attributing foreign key violations to `user`.
fn map_write_error(error: diesel::result::Error, user: UserId) -> CardPersistenceError {
    match classify_diesel_error(&error) {
        DieselFailure::ForeignKey => CardPersistenceError::unknown_user(user),
        _ => map_diesel_error(error),
    }
}

fn invalid_row(id: Uuid, err: &CardValidationError) -> CardPersistenceError {
    CardPersistenceError::query(format!("stored card {id} is invalid: {err}"))
}

fn row_to_card(row: CardRow, likes: Likes) -> Result<Card, CardPersistenceError> {
    let id = row.id;
    Ok(Card {
        id: CardId::from_uuid(id),
        name: CardName::new(row.name).map_err(|err| invalid_row(id, &err))?,
        link: CardLink::new(row.link).map_err(|err| invalid_row(id, &err))?,
        owner: UserId::from_uuid(row.owner_id),
        likes,
        created_at: row.created_at,
    })
}

fn row_to_profile(row: UserRow) -> Result<UserProfile, CardPersistenceError> {
    let id = row.id;
    UserProfile::from_stored(row.id, row.name, row.about, row.avatar, &row.email)
        .map_err(|err| CardPersistenceError::query(format!("stored user {id} is invalid: {err}")))
}

fn group_likes(rows: Vec<CardLikeRow>) -> HashMap<Uuid, Likes> {
    let mut grouped: HashMap<Uuid, Likes> = HashMap::new();
    for row in rows {
        grouped
            .entry(row.card_id)
            .or_default()
            .insert(UserId::from_uuid(row.user_id));
    }
    grouped
}

async fn load_likes(conn: &mut AsyncPgConnection, card_id: Uuid) -> QueryResult<Likes> {
    let users: Vec<Uuid> = card_likes::table
        .filter(card_likes::card_id.eq(card_id))
        .select(card_likes::user_id)
        .load(conn)
        .await?;
    Ok(users.into_iter().map(UserId::from_uuid).collect())
}

/// Lock the card row for the surrounding transaction.
async fn lock_card(conn: &mut AsyncPgConnection, card_id: Uuid) -> QueryResult<Option<CardRow>> {
    cards::table
        .filter(cards::id.eq(card_id))
        .select(CardRow::as_select())
        .for_update()
        .first::<CardRow>(conn)
        .await
        .optional()
}

#[async_trait]
impl CardRepository for DieselCardRepository {
    async fn list_with_owners(&self) -> Result<Vec<CardWithOwner>, CardPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        // One snapshot for cards and likes so a concurrent like is either
        // fully visible or not at all.
        let (rows, like_rows) = conn
            .transaction(|conn| {
                async move {
                    let rows: Vec<(CardRow, UserRow)> = cards::table
                        .inner_join(users::table)
                        .order((cards::created_at.asc(), cards::id.asc()))
                        .select((CardRow::as_select(), UserRow::as_select()))
                        .load(conn)
                        .await?;
                    let like_rows: Vec<CardLikeRow> = card_likes::table
                        .select(CardLikeRow::as_select())
                        .load(conn)
                        .await?;
                    Ok((rows, like_rows))
                }
                .scope_boxed()
            })
            .await
            .map_err(map_diesel_error)?;

        let mut likes = group_likes(like_rows);
        rows.into_iter()
            .map(|(card_row, owner_row)| {
                let card_likes = likes.remove(&card_row.id).unwrap_or_default();
                let card = row_to_card(card_row, card_likes)?;
                let owner = row_to_profile(owner_row)?;
                CardWithOwner::resolve(card, owner)
                    .ok_or_else(|| CardPersistenceError::query("card joined to wrong owner"))
            })
            .collect()
    }

    async fn insert(&self, card: &Card) -> Result<(), CardPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = NewCardRow {
            id: *card.id.as_uuid(),
            name: card.name.as_ref(),
            link: card.link.as_ref(),
            owner_id: *card.owner.as_uuid(),
            created_at: card.created_at,
        };

        diesel::insert_into(cards::table)
            .values(&row)
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(|err| map_write_error(err, card.owner))
    }

    async fn find_by_id(&self, id: &CardId) -> Result<Option<Card>, CardPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let card_id = *id.as_uuid();

        let found = conn
            .transaction(|conn| {
                async move {
                    let row = cards::table
                        .filter(cards::id.eq(card_id))
                        .select(CardRow::as_select())
                        .first::<CardRow>(conn)
                        .await
                        .optional()?;
                    match row {
                        Some(row) => Ok(Some((row, load_likes(conn, card_id).await?))),
                        None => Ok(None),
                    }
                }
                .scope_boxed()
            })
            .await
            .map_err(map_diesel_error)?;

        found
            .map(|(row, likes)| row_to_card(row, likes))
            .transpose()
    }

    async fn delete(&self, id: &CardId) -> Result<bool, CardPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let removed = diesel::delete(cards::table.filter(cards::id.eq(id.as_uuid())))
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(removed > 0)
    }

    async fn add_like(
        &self,
        id: &CardId,
        user: &UserId,
    ) -> Result<Option<Card>, CardPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let like = CardLikeRow {
            card_id: *id.as_uuid(),
            user_id: *user.as_uuid(),
        };

        let updated = conn
            .transaction(|conn| {
                async move {
                    let Some(row) = lock_card(conn, like.card_id).await? else {
                        return Ok(None);
                    };
                    diesel::insert_into(card_likes::table)
                        .values(&like)
                        .on_conflict_do_nothing()
                        .execute(conn)
                        .await?;
                    Ok(Some((row, load_likes(conn, like.card_id).await?)))
                }
                .scope_boxed()
            })
            .await
            .map_err(|err| map_write_error(err, *user))?;

        updated
            .map(|(row, likes)| row_to_card(row, likes))
            .transpose()
    }

    async fn remove_like(
        &self,
        id: &CardId,
        user: &UserId,
    ) -> Result<Option<Card>, CardPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let card_id = *id.as_uuid();
        let user_id = *user.as_uuid();

        let updated = conn
            .transaction(|conn| {
                async move {
                    let Some(row) = lock_card(conn, card_id).await? else {
                        return Ok(None);
                    };
                    diesel::delete(
                        card_likes::table
                            .filter(card_likes::card_id.eq(card_id))
                            .filter(card_likes::user_id.eq(user_id)),
                    )
                    .execute(conn)
                    .await?;
                    Ok(Some((row, load_likes(conn, card_id).await?)))
                }
                .scope_boxed()
            })
            .await
            .map_err(map_diesel_error)?;

        updated
            .map(|(row, likes)| row_to_card(row, likes))
            .transpose()
    }
}
