//! User handlers.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use utoipa_axum::router::OpenApiRouter;
use utoipa_axum::routes;
use uuid::Uuid;
use validator::Validate;

use crate::api::doc::USER_TAG;
use crate::api::dto::{CreateUserRequest, UpdateUserRequest, UserResponse};
use crate::error::AppResult;
use crate::state::AppState;

/// Public registration route, mounted outside the auth layer.
pub fn registration_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new().routes(routes!(create_user))
}

/// Authenticated user routes, nested under /users.
pub fn user_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new().routes(routes!(get_user, update_user))
}

/// POST /api/users - register a new user.
#[utoipa::path(
    post,
    path = "/users",
    tag = USER_TAG,
    request_body = CreateUserRequest,
    responses(
        (status = 201, description = "User created", body = UserResponse),
        (status = 400, description = "Invalid request data"),
        (status = 409, description = "Email address already registered")
    )
)]
async fn create_user(
    State(state): State<AppState>,
    Json(payload): Json<CreateUserRequest>,
) -> AppResult<(StatusCode, Json<UserResponse>)> {
    payload.validate()?;

    let user = state
        .services
        .users
        .create_user(payload.into_register_user())
        .await?;

    Ok((StatusCode::CREATED, Json(UserResponse::from(user))))
}

/// GET /api/users/{id} - fetch a user by id.
#[utoipa::path(
    get,
    path = "/{id}",
    tag = USER_TAG,
    params(("id" = Uuid, Path, description = "User UUID")),
    responses(
        (status = 200, description = "User found", body = UserResponse),
        (status = 404, description = "User not found")
    ),
    security(("bearerAuth" = []))
)]
async fn get_user(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<UserResponse>> {
    let user = state.services.users.get_user(id).await?;
    Ok(Json(UserResponse::from(user)))
}

/// PUT /api/users/{id} - update a user profile.
#[utoipa::path(
    put,
    path = "/{id}",
    tag = USER_TAG,
    params(("id" = Uuid, Path, description = "User UUID")),
    request_body = UpdateUserRequest,
    responses(
        (status = 200, description = "User updated", body = UserResponse),
        (status = 404, description = "User not found")
    ),
    security(("bearerAuth" = []))
)]
async fn update_user(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateUserRequest>,
) -> AppResult<Json<UserResponse>> {
    payload.validate()?;

    let user = state
        .services
        .users
        .update_user(id, payload.into_user_changes())
        .await?;

    Ok(Json(UserResponse::from(user)))
}
