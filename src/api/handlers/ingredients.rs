//! Ingredient catalog handlers.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use utoipa_axum::router::OpenApiRouter;
use utoipa_axum::routes;
use uuid::Uuid;
use validator::Validate;

use crate::api::doc::INGREDIENT_TAG;
use crate::api::dto::{
    CreateIngredientRequest, IngredientResponse, SearchIngredientsRequest,
    UpdateIngredientRequest,
};
use crate::error::AppResult;
use crate::state::AppState;

pub fn ingredient_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(create_ingredient))
        .routes(routes!(search_ingredients))
        .routes(routes!(get_ingredient, update_ingredient, delete_ingredient))
}

/// POST /api/ingredients - create an ingredient.
#[utoipa::path(
    post,
    path = "/",
    tag = INGREDIENT_TAG,
    request_body = CreateIngredientRequest,
    responses(
        (status = 201, description = "Ingredient created", body = IngredientResponse),
        (status = 400, description = "Invalid request data")
    ),
    security(("bearerAuth" = []))
)]
async fn create_ingredient(
    State(state): State<AppState>,
    Json(payload): Json<CreateIngredientRequest>,
) -> AppResult<(StatusCode, Json<IngredientResponse>)> {
    payload.validate()?;

    let ingredient = state
        .services
        .ingredients
        .create_ingredient(payload.into_new_ingredient())
        .await?;

    Ok((StatusCode::CREATED, Json(IngredientResponse::from(ingredient))))
}

/// POST /api/ingredients/search - filtered search.
///
/// No matches yields an empty array; a filter with no fields set is a 400.
#[utoipa::path(
    post,
    path = "/search",
    tag = INGREDIENT_TAG,
    request_body = SearchIngredientsRequest,
    responses(
        (status = 200, description = "Matching ingredients", body = [IngredientResponse]),
        (status = 400, description = "Empty filter")
    ),
    security(("bearerAuth" = []))
)]
async fn search_ingredients(
    State(state): State<AppState>,
    Json(payload): Json<SearchIngredientsRequest>,
) -> AppResult<Json<Vec<IngredientResponse>>> {
    let filter = payload.into_filter();
    let ingredients = state.services.ingredients.search_ingredients(&filter).await?;
    Ok(Json(
        ingredients.into_iter().map(IngredientResponse::from).collect(),
    ))
}

/// GET /api/ingredients/{id} - fetch an ingredient by id.
#[utoipa::path(
    get,
    path = "/{id}",
    tag = INGREDIENT_TAG,
    params(("id" = Uuid, Path, description = "Ingredient UUID")),
    responses(
        (status = 200, description = "Ingredient found", body = IngredientResponse),
        (status = 404, description = "Ingredient not found")
    ),
    security(("bearerAuth" = []))
)]
async fn get_ingredient(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<IngredientResponse>> {
    let ingredient = state.services.ingredients.get_ingredient(id).await?;
    Ok(Json(IngredientResponse::from(ingredient)))
}

/// PUT /api/ingredients/{id} - update an ingredient.
#[utoipa::path(
    put,
    path = "/{id}",
    tag = INGREDIENT_TAG,
    params(("id" = Uuid, Path, description = "Ingredient UUID")),
    request_body = UpdateIngredientRequest,
    responses(
        (status = 200, description = "Ingredient updated", body = IngredientResponse),
        (status = 404, description = "Ingredient not found")
    ),
    security(("bearerAuth" = []))
)]
async fn update_ingredient(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateIngredientRequest>,
) -> AppResult<Json<IngredientResponse>> {
    payload.validate()?;

    let ingredient = state
        .services
        .ingredients
        .update_ingredient(id, payload.into_update_ingredient())
        .await?;

    Ok(Json(IngredientResponse::from(ingredient)))
}

/// DELETE /api/ingredients/{id} - delete an ingredient.
#[utoipa::path(
    delete,
    path = "/{id}",
    tag = INGREDIENT_TAG,
    params(("id" = Uuid, Path, description = "Ingredient UUID")),
    responses(
        (status = 204, description = "Ingredient deleted"),
        (status = 404, description = "Ingredient not found")
    ),
    security(("bearerAuth" = []))
)]
async fn delete_ingredient(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<StatusCode> {
    state.services.ingredients.delete_ingredient(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
