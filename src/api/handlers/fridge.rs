//! Fridge stock handlers, nested under /users/{id}/fridge.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use utoipa_axum::router::OpenApiRouter;
use utoipa_axum::routes;
use uuid::Uuid;
use validator::Validate;

use crate::api::doc::FRIDGE_TAG;
use crate::api::dto::{
    AddFridgeIngredientRequest, FridgeIngredientResponse, UpdateFridgeIngredientRequest,
};
use crate::error::AppResult;
use crate::state::AppState;

pub fn fridge_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(list_fridge_ingredients, create_fridge_ingredient))
        .routes(routes!(update_fridge_ingredient, delete_fridge_ingredient))
}

/// GET /api/users/{id}/fridge - list a user's fridge stock.
#[utoipa::path(
    get,
    path = "/{id}/fridge",
    tag = FRIDGE_TAG,
    params(("id" = Uuid, Path, description = "User UUID")),
    responses(
        (status = 200, description = "Fridge contents", body = [FridgeIngredientResponse])
    ),
    security(("bearerAuth" = []))
)]
async fn list_fridge_ingredients(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<Vec<FridgeIngredientResponse>>> {
    let rows = state.services.fridge.list_fridge(id).await?;
    Ok(Json(
        rows.into_iter().map(FridgeIngredientResponse::from).collect(),
    ))
}

/// POST /api/users/{id}/fridge - put an ingredient into the fridge.
#[utoipa::path(
    post,
    path = "/{id}/fridge",
    tag = FRIDGE_TAG,
    params(("id" = Uuid, Path, description = "User UUID")),
    request_body = AddFridgeIngredientRequest,
    responses(
        (status = 201, description = "Fridge ingredient stored", body = FridgeIngredientResponse),
        (status = 404, description = "Ingredient not found"),
        (status = 409, description = "This ingredient is already in the fridge")
    ),
    security(("bearerAuth" = []))
)]
async fn create_fridge_ingredient(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<AddFridgeIngredientRequest>,
) -> AppResult<(StatusCode, Json<FridgeIngredientResponse>)> {
    payload.validate()?;

    let (ingredient_uuid, input) = payload.into_parts();
    let row = state
        .services
        .fridge
        .add_item(id, ingredient_uuid, input)
        .await?;

    Ok((StatusCode::CREATED, Json(FridgeIngredientResponse::from(row))))
}

/// PUT /api/users/{id}/fridge/{ingredient_id} - update a fridge row.
#[utoipa::path(
    put,
    path = "/{id}/fridge/{ingredient_id}",
    tag = FRIDGE_TAG,
    params(
        ("id" = Uuid, Path, description = "User UUID"),
        ("ingredient_id" = Uuid, Path, description = "Ingredient UUID")
    ),
    request_body = UpdateFridgeIngredientRequest,
    responses(
        (status = 200, description = "Fridge ingredient updated", body = FridgeIngredientResponse),
        (status = 404, description = "No such fridge ingredient")
    ),
    security(("bearerAuth" = []))
)]
async fn update_fridge_ingredient(
    State(state): State<AppState>,
    Path((id, ingredient_id)): Path<(Uuid, Uuid)>,
    Json(payload): Json<UpdateFridgeIngredientRequest>,
) -> AppResult<Json<FridgeIngredientResponse>> {
    payload.validate()?;

    let row = state
        .services
        .fridge
        .update_item(id, ingredient_id, payload.into_input())
        .await?;

    Ok(Json(FridgeIngredientResponse::from(row)))
}

/// DELETE /api/users/{id}/fridge/{ingredient_id} - take an ingredient out.
///
/// Removing a pair that is not in the fridge is a 404, not a silent success.
#[utoipa::path(
    delete,
    path = "/{id}/fridge/{ingredient_id}",
    tag = FRIDGE_TAG,
    params(
        ("id" = Uuid, Path, description = "User UUID"),
        ("ingredient_id" = Uuid, Path, description = "Ingredient UUID")
    ),
    responses(
        (status = 204, description = "Fridge ingredient removed"),
        (status = 404, description = "No such fridge ingredient")
    ),
    security(("bearerAuth" = []))
)]
async fn delete_fridge_ingredient(
    State(state): State<AppState>,
    Path((id, ingredient_id)): Path<(Uuid, Uuid)>,
) -> AppResult<StatusCode> {
    state.services.fridge.remove_item(id, ingredient_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
