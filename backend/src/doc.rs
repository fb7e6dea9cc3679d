//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] registers every card, user and health endpoint together with
//! the schemas they exchange. The caller identity header is declared as an
//! API key scheme; routes that work anonymously opt out with `security([])`.
//!
//! The document backs Swagger UI in debug builds and is exported by
//! `cargo run --bin openapi-dump`.

use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::domain::ports::{CreateCardRequest, RegisterUserRequest};
use crate::domain::{Card, CardWithOwner, Error, ErrorCode, UserProfile};
use crate::inbound::http::cards::DeleteCardResponse;
use crate::middleware::DEFAULT_IDENTITY_HEADER;

/// Name of the identity security scheme in the generated document.
pub const IDENTITY_SCHEME: &str = "UserIdHeader";

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        components.add_security_scheme(
            IDENTITY_SCHEME,
            SecurityScheme::ApiKey(ApiKey::Header(ApiKeyValue::with_description(
                DEFAULT_IDENTITY_HEADER,
                "Identifier (UUID) of the user acting on the request.",
            ))),
        );
    }
}

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "Cards API",
        description = "Share image cards, see who owns them, and like them."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    security(("UserIdHeader" = [])),
    paths(
        crate::inbound::http::cards::list_cards,
        crate::inbound::http::cards::create_card,
        crate::inbound::http::cards::delete_card,
        crate::inbound::http::cards::like_card,
        crate::inbound::http::cards::dislike_card,
        crate::inbound::http::users::register_user,
        crate::inbound::http::users::list_users,
        crate::inbound::http::users::current_user,
        crate::inbound::http::users::get_user,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        Card,
        CardWithOwner,
        UserProfile,
        Error,
        ErrorCode,
        CreateCardRequest,
        RegisterUserRequest,
        DeleteCardResponse
    )),
    tags(
        (name = "cards", description = "Card listing, creation, deletion and likes"),
        (name = "users", description = "User registration and profiles"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;
