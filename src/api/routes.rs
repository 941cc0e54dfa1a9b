//! Router configuration.
//!
//! Public surface: health probes, login/refresh, user registration and the
//! Swagger UI. Everything else sits behind the JWT auth layer.

use axum::{middleware, Router};
use tower_http::cors::CorsLayer;
use utoipa::OpenApi;
use utoipa_axum::router::OpenApiRouter;
use utoipa_swagger_ui::SwaggerUi;

use crate::api::doc::ApiDoc;
use crate::api::handlers;
use crate::api::middleware::{auth_middleware, logging_middleware, request_id_middleware};
use crate::state::AppState;

/// Creates the application router with all routes and middleware.
///
/// Middleware runs in reverse declaration order: request-id first, then
/// logging, so every log line carries the correlation id.
pub fn create_router(state: AppState) -> Router {
    // Everything addressed per user: profile, fridge stock, recipe listing.
    let user_scoped = handlers::users::user_routes()
        .merge(handlers::fridge::fridge_routes())
        .merge(handlers::recipes::user_recipe_routes());

    let (protected_router, protected_api) = OpenApiRouter::new()
        .nest("/users", user_scoped)
        .nest("/ingredients", handlers::ingredients::ingredient_routes())
        .nest("/recipes", handlers::recipes::recipe_routes())
        .split_for_parts();
    let protected_router = protected_router.layer(middleware::from_fn_with_state(
        state.clone(),
        auth_middleware,
    ));

    let (public_router, mut api) = OpenApiRouter::with_openapi(ApiDoc::openapi())
        .merge(handlers::health::health_routes())
        .merge(handlers::users::registration_routes())
        .nest("/auth", handlers::auth::auth_routes())
        .split_for_parts();
    api.merge(protected_api);

    Router::new()
        .nest("/api", public_router.merge(protected_router))
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", api))
        .layer(middleware::from_fn(logging_middleware))
        .layer(middleware::from_fn(request_id_middleware))
        .layer(CorsLayer::permissive())
        .with_state(state)
}
