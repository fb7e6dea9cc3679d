//! Diesel table definitions mirroring `backend/migrations`.

diesel::table! {
    users (id) {
        id -> Uuid,
        name -> Text,
        about -> Text,
        avatar -> Text,
        email -> Text,
        password_hash -> Text,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    cards (id) {
        id -> Uuid,
        name -> Text,
        link -> Text,
        owner_id -> Uuid,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    card_likes (card_id, user_id) {
        card_id -> Uuid,
        user_id -> Uuid,
    }
}

diesel::joinable!(cards -> users (owner_id));
diesel::joinable!(card_likes -> cards (card_id));

diesel::allow_tables_to_appear_in_same_query!(users, cards, card_likes);
