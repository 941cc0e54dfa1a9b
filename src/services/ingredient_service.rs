//! Ingredient catalog service.

use std::sync::Arc;

use uuid::Uuid;

use crate::error::{AppError, AppResult};
use crate::models::{Ingredient, IngredientFilter, NewIngredient, UpdateIngredient};
use crate::repositories::IngredientStore;

#[derive(Clone)]
pub struct IngredientService {
    store: Arc<dyn IngredientStore>,
}

impl IngredientService {
    pub fn new(store: Arc<dyn IngredientStore>) -> Self {
        Self { store }
    }

    pub async fn get_ingredient(&self, id: Uuid) -> AppResult<Ingredient> {
        self.store
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found("ingredient", "ingredient_uuid", id))
    }

    /// Filtered search; no matches is an empty list, not an error. An empty
    /// filter is rejected by the storage layer.
    pub async fn search_ingredients(
        &self,
        filter: &IngredientFilter,
    ) -> AppResult<Vec<Ingredient>> {
        self.store.search(filter).await
    }

    pub async fn create_ingredient(&self, new_ingredient: NewIngredient) -> AppResult<Ingredient> {
        self.store.create(new_ingredient).await
    }

    pub async fn update_ingredient(
        &self,
        id: Uuid,
        changes: UpdateIngredient,
    ) -> AppResult<Ingredient> {
        self.store.update(id, changes).await
    }

    pub async fn delete_ingredient(&self, id: Uuid) -> AppResult<()> {
        self.store.delete(id).await
    }
}
