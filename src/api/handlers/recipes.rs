//! Recipe aggregate handlers.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use utoipa_axum::router::OpenApiRouter;
use utoipa_axum::routes;
use uuid::Uuid;
use validator::Validate;

use crate::api::doc::RECIPE_TAG;
use crate::api::dto::{
    CreateRecipeRequest, RecipeResponse, SearchRecipesRequest, UpdateRecipeRequest,
};
use crate::error::AppResult;
use crate::state::AppState;

pub fn recipe_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(create_recipe))
        .routes(routes!(search_recipes))
        .routes(routes!(get_recipe, update_recipe, delete_recipe))
}

/// Recipe listing by owner, nested under /users.
pub fn user_recipe_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new().routes(routes!(list_recipes))
}

/// POST /api/recipes - create a recipe with its line sets.
#[utoipa::path(
    post,
    path = "/",
    tag = RECIPE_TAG,
    request_body = CreateRecipeRequest,
    responses(
        (status = 201, description = "Recipe created", body = RecipeResponse),
        (status = 400, description = "Invalid request data")
    ),
    security(("bearerAuth" = []))
)]
async fn create_recipe(
    State(state): State<AppState>,
    Json(payload): Json<CreateRecipeRequest>,
) -> AppResult<(StatusCode, Json<RecipeResponse>)> {
    payload.validate()?;

    let recipe = state
        .services
        .recipes
        .create_recipe(payload.into_new_recipe())
        .await?;

    Ok((StatusCode::CREATED, Json(RecipeResponse::from(recipe))))
}

/// POST /api/recipes/search - filtered search.
#[utoipa::path(
    post,
    path = "/search",
    tag = RECIPE_TAG,
    request_body = SearchRecipesRequest,
    responses(
        (status = 200, description = "Matching recipes", body = [RecipeResponse]),
        (status = 400, description = "Empty filter")
    ),
    security(("bearerAuth" = []))
)]
async fn search_recipes(
    State(state): State<AppState>,
    Json(payload): Json<SearchRecipesRequest>,
) -> AppResult<Json<Vec<RecipeResponse>>> {
    let filter = payload.into_filter();
    let recipes = state.services.recipes.search_recipes(&filter).await?;
    Ok(Json(recipes.into_iter().map(RecipeResponse::from).collect()))
}

/// GET /api/recipes/{id} - fetch a full recipe aggregate.
#[utoipa::path(
    get,
    path = "/{id}",
    tag = RECIPE_TAG,
    params(("id" = Uuid, Path, description = "Recipe UUID")),
    responses(
        (status = 200, description = "Recipe found", body = RecipeResponse),
        (status = 404, description = "Recipe not found")
    ),
    security(("bearerAuth" = []))
)]
async fn get_recipe(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<RecipeResponse>> {
    let recipe = state.services.recipes.get_recipe(id).await?;
    Ok(Json(RecipeResponse::from(recipe)))
}

/// GET /api/users/{id}/recipes - list a user's recipes.
#[utoipa::path(
    get,
    path = "/{id}/recipes",
    tag = RECIPE_TAG,
    params(("id" = Uuid, Path, description = "User UUID")),
    responses(
        (status = 200, description = "The user's recipes", body = [RecipeResponse])
    ),
    security(("bearerAuth" = []))
)]
async fn list_recipes(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<Vec<RecipeResponse>>> {
    let recipes = state.services.recipes.list_recipes(id).await?;
    Ok(Json(recipes.into_iter().map(RecipeResponse::from).collect()))
}

/// PUT /api/recipes/{id} - replace a recipe's mutable fields and line sets.
#[utoipa::path(
    put,
    path = "/{id}",
    tag = RECIPE_TAG,
    params(("id" = Uuid, Path, description = "Recipe UUID")),
    request_body = UpdateRecipeRequest,
    responses(
        (status = 200, description = "Recipe updated", body = RecipeResponse),
        (status = 404, description = "Recipe not found")
    ),
    security(("bearerAuth" = []))
)]
async fn update_recipe(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateRecipeRequest>,
) -> AppResult<Json<RecipeResponse>> {
    payload.validate()?;

    let recipe = state
        .services
        .recipes
        .update_recipe(id, payload.into_update_recipe())
        .await?;

    Ok(Json(RecipeResponse::from(recipe)))
}

/// DELETE /api/recipes/{id} - delete a recipe and all its lines.
#[utoipa::path(
    delete,
    path = "/{id}",
    tag = RECIPE_TAG,
    params(("id" = Uuid, Path, description = "Recipe UUID")),
    responses(
        (status = 204, description = "Recipe deleted"),
        (status = 404, description = "Recipe not found")
    ),
    security(("bearerAuth" = []))
)]
async fn delete_recipe(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<StatusCode> {
    state.services.recipes.delete_recipe(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
