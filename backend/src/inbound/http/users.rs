//! Users API handlers.
//!
//! ```text
//! POST /users            {"email":"ada@example.com","password":"secret"}
//! GET  /users
//! GET  /users/me
//! GET  /users/{userId}
//! ```

use actix_web::{HttpResponse, get, post, web};

use crate::domain::ports::RegisterUserRequest;
use crate::domain::{Error, Identity, UserProfile};
use crate::inbound::http::ApiResult;
use crate::inbound::http::state::HttpState;

/// Register a user.
///
/// Omitted profile fields take their defaults. The password is never echoed.
#[utoipa::path(
    post,
    path = "/users",
    request_body = RegisterUserRequest,
    responses(
        (status = 201, description = "User registered", body = UserProfile),
        (status = 400, description = "Invalid user data", body = Error),
        (status = 409, description = "Email already registered", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["users"],
    operation_id = "registerUser",
    security([])
)]
#[post("/users")]
pub async fn register_user(
    state: web::Data<HttpState>,
    payload: web::Json<RegisterUserRequest>,
) -> ApiResult<HttpResponse> {
    let profile = state.users.register(payload.into_inner()).await?;
    Ok(HttpResponse::Created().json(profile))
}

/// List registered users.
///
/// # Examples
/// ```
/// use actix_web::App;
/// use backend::inbound::http::users::list_users;
///
/// let app = App::new().service(list_users);
/// ```
#[utoipa::path(
    get,
    path = "/users",
    responses(
        (status = 200, description = "Users", body = [UserProfile]),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["users"],
    operation_id = "listUsers",
    security([])
)]
#[get("/users")]
pub async fn list_users(state: web::Data<HttpState>) -> ApiResult<web::Json<Vec<UserProfile>>> {
    let users = state.users_query.list_users().await?;
    Ok(web::Json(users))
}

/// Profile of the calling user.
#[utoipa::path(
    get,
    path = "/users/me",
    responses(
        (status = 200, description = "Caller profile", body = UserProfile),
        (status = 401, description = "Identity required", body = Error),
        (status = 404, description = "Caller is not a registered user", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["users"],
    operation_id = "currentUser"
)]
#[get("/users/me")]
pub async fn current_user(
    state: web::Data<HttpState>,
    identity: Identity,
) -> ApiResult<web::Json<UserProfile>> {
    let profile = state.users_query.current_user(&identity).await?;
    Ok(web::Json(profile))
}

/// Fetch one user's public profile.
#[utoipa::path(
    get,
    path = "/users/{userId}",
    params(("userId" = String, Path, description = "User identifier (UUID)")),
    responses(
        (status = 200, description = "User profile", body = UserProfile),
        (status = 400, description = "Invalid user id", body = Error),
        (status = 404, description = "User not found", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["users"],
    operation_id = "getUser",
    security([])
)]
#[get("/users/{userId}")]
pub async fn get_user(
    state: web::Data<HttpState>,
    user_id: web::Path<String>,
) -> ApiResult<web::Json<UserProfile>> {
    let profile = state.users_query.get_user(&user_id).await?;
    Ok(web::Json(profile))
}

/// Register every user route on `cfg`.
///
/// `/users/me` is registered ahead of `/users/{userId}` so it is not read as
/// an identifier.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(register_user)
        .service(list_users)
        .service(current_user)
        .service(get_user);
}
