//! Storage port: the only contract the service layer depends on.
//!
//! One trait per entity, one method per domain operation. Finds return
//! `Option` and the services decide what absence means; targeted updates and
//! deletes report absence themselves as `AppError::NotFound`, since only the
//! adapter can see the rows-affected count. Every successful write returns
//! the persisted record, server-generated fields included.

use async_trait::async_trait;
use uuid::Uuid;

use crate::error::AppResult;
use crate::models::{
    FridgeIngredient, Ingredient, IngredientFilter, NewFridgeIngredient, NewIngredient, NewRecipe,
    NewUser, Recipe, RecipeFilter, UpdateFridgeIngredient, UpdateIngredient, UpdateRecipe,
    UpdateUser, User,
};

#[async_trait]
pub trait UserStore: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<User>>;
    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>>;
    async fn create(&self, new_user: NewUser) -> AppResult<User>;
    async fn update(&self, id: Uuid, changes: UpdateUser) -> AppResult<User>;
}

#[async_trait]
pub trait IngredientStore: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Ingredient>>;
    async fn search(&self, filter: &IngredientFilter) -> AppResult<Vec<Ingredient>>;
    async fn create(&self, new_ingredient: NewIngredient) -> AppResult<Ingredient>;
    async fn update(&self, id: Uuid, changes: UpdateIngredient) -> AppResult<Ingredient>;
    async fn delete(&self, id: Uuid) -> AppResult<()>;
}

/// Fridge stock rows are addressed by the (user, ingredient) pair throughout;
/// they have no identity of their own.
#[async_trait]
pub trait FridgeStore: Send + Sync {
    async fn list_for_user(&self, user_uuid: Uuid) -> AppResult<Vec<FridgeIngredient>>;
    async fn create(&self, new_item: NewFridgeIngredient) -> AppResult<FridgeIngredient>;
    async fn update(
        &self,
        user_uuid: Uuid,
        ingredient_uuid: Uuid,
        changes: UpdateFridgeIngredient,
    ) -> AppResult<FridgeIngredient>;
    async fn delete(&self, user_uuid: Uuid, ingredient_uuid: Uuid) -> AppResult<()>;
}

/// Recipe operations work on the whole aggregate: the parent row plus both
/// child collections move together through create, update and delete.
#[async_trait]
pub trait RecipeStore: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Recipe>>;
    async fn list_for_user(&self, user_uuid: Uuid) -> AppResult<Vec<Recipe>>;
    async fn search(&self, filter: &RecipeFilter) -> AppResult<Vec<Recipe>>;
    async fn create(&self, new_recipe: NewRecipe) -> AppResult<Recipe>;
    async fn update(&self, id: Uuid, update: UpdateRecipe) -> AppResult<Recipe>;
    async fn delete(&self, id: Uuid) -> AppResult<()>;
}
