//! Authentication handlers: login and token refresh.

use axum::{extract::State, http::StatusCode, Json};
use utoipa_axum::router::OpenApiRouter;
use utoipa_axum::routes;
use validator::Validate;

use crate::api::doc::AUTH_TAG;
use crate::api::dto::{
    LoginRequest, LoginResponse, RefreshTokenRequest, RefreshTokenResponse,
};
use crate::error::AppResult;
use crate::state::AppState;
use crate::utils::jwt::{generate_token_pair, validate_refresh_token};

pub fn auth_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(login))
        .routes(routes!(refresh_token))
}

/// POST /api/auth/login - authenticate and issue a token pair.
#[utoipa::path(
    post,
    path = "/login",
    tag = AUTH_TAG,
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login successful", body = LoginResponse),
        (status = 401, description = "Invalid credentials")
    )
)]
async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> AppResult<(StatusCode, Json<LoginResponse>)> {
    payload.validate()?;

    let (user, access_token, refresh_token) = state
        .services
        .users
        .authenticate(
            &payload.email_address,
            &payload.password,
            &state.jwt_config.secret,
            state.jwt_config.access_token_expiration,
            state.jwt_config.refresh_token_expiration,
        )
        .await?;

    let response = LoginResponse {
        user: user.into(),
        access_token,
        refresh_token,
    };

    Ok((StatusCode::OK, Json(response)))
}

/// POST /api/auth/refresh - rotate an access/refresh token pair.
#[utoipa::path(
    post,
    path = "/refresh",
    tag = AUTH_TAG,
    request_body = RefreshTokenRequest,
    responses(
        (status = 200, description = "Tokens refreshed", body = RefreshTokenResponse),
        (status = 401, description = "Invalid or expired refresh token")
    )
)]
async fn refresh_token(
    State(state): State<AppState>,
    Json(payload): Json<RefreshTokenRequest>,
) -> AppResult<Json<RefreshTokenResponse>> {
    payload.validate()?;

    let claims = validate_refresh_token(&payload.refresh_token, &state.jwt_config.secret)?;
    let user_uuid = claims.user_uuid()?;

    // The account must still exist (and the lookup refreshes the email in
    // case it changed since the token was minted).
    let user = state.services.users.get_user(user_uuid).await?;

    let (access_token, refresh_token) = generate_token_pair(
        user.user_uuid,
        user.email_address.clone(),
        &state.jwt_config.secret,
        state.jwt_config.access_token_expiration,
        state.jwt_config.refresh_token_expiration,
    )?;

    Ok(Json(RefreshTokenResponse {
        access_token,
        refresh_token,
    }))
}
