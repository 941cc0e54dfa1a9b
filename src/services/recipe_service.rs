//! Recipe service.
//!
//! Thin coordination over the recipe store; the aggregate rules (transaction
//! boundaries, replace semantics) live in the storage layer.

use std::sync::Arc;

use uuid::Uuid;

use crate::error::{AppError, AppResult};
use crate::models::{NewRecipe, Recipe, RecipeFilter, UpdateRecipe};
use crate::repositories::RecipeStore;

#[derive(Clone)]
pub struct RecipeService {
    store: Arc<dyn RecipeStore>,
}

impl RecipeService {
    pub fn new(store: Arc<dyn RecipeStore>) -> Self {
        Self { store }
    }

    pub async fn get_recipe(&self, id: Uuid) -> AppResult<Recipe> {
        self.store
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found("recipe", "recipe_uuid", id))
    }

    pub async fn list_recipes(&self, user_uuid: Uuid) -> AppResult<Vec<Recipe>> {
        self.store.list_for_user(user_uuid).await
    }

    pub async fn search_recipes(&self, filter: &RecipeFilter) -> AppResult<Vec<Recipe>> {
        self.store.search(filter).await
    }

    pub async fn create_recipe(&self, new_recipe: NewRecipe) -> AppResult<Recipe> {
        self.store.create(new_recipe).await
    }

    pub async fn update_recipe(&self, id: Uuid, update: UpdateRecipe) -> AppResult<Recipe> {
        self.store.update(id, update).await
    }

    pub async fn delete_recipe(&self, id: Uuid) -> AppResult<()> {
        self.store.delete(id).await
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::models::{NewRecipeIngredient, NewRecipeInstruction};
    use async_trait::async_trait;
    use chrono::Utc;
    use std::sync::Mutex;

    /// In-memory recipe store with the same replace semantics as the real
    /// adapter: an update swaps out the full child sets.
    #[derive(Default)]
    pub(crate) struct MockRecipeStore {
        pub(crate) recipes: Mutex<Vec<Recipe>>,
    }

    #[async_trait]
    impl RecipeStore for MockRecipeStore {
        async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Recipe>> {
            Ok(self
                .recipes
                .lock()
                .unwrap()
                .iter()
                .find(|r| r.recipe_uuid == id)
                .cloned())
        }

        async fn list_for_user(&self, user_uuid: Uuid) -> AppResult<Vec<Recipe>> {
            Ok(self
                .recipes
                .lock()
                .unwrap()
                .iter()
                .filter(|r| r.user_uuid == user_uuid)
                .cloned()
                .collect())
        }

        async fn search(&self, filter: &RecipeFilter) -> AppResult<Vec<Recipe>> {
            if filter.is_empty() {
                return Err(AppError::Validation {
                    field: "filter".to_string(),
                    reason: "recipe search requires at least one filter field".to_string(),
                });
            }
            Ok(self
                .recipes
                .lock()
                .unwrap()
                .iter()
                .filter(|r| {
                    filter.user_uuid.map_or(true, |u| r.user_uuid == u)
                        && filter
                            .recipe_name
                            .as_ref()
                            .map_or(true, |n| &r.recipe_name == n)
                        && filter.category.as_ref().map_or(true, |c| &r.category == c)
                })
                .cloned()
                .collect())
        }

        async fn create(&self, new_recipe: NewRecipe) -> AppResult<Recipe> {
            let id = Uuid::new_v4();
            let recipe = Recipe {
                recipe_uuid: id,
                user_uuid: new_recipe.user_uuid,
                recipe_name: new_recipe.recipe_name,
                category: new_recipe.category,
                ingredients: new_recipe
                    .ingredients
                    .into_iter()
                    .map(|l| l.into_line(id))
                    .collect(),
                instructions: new_recipe
                    .instructions
                    .into_iter()
                    .map(|l| l.into_line(id))
                    .collect(),
                created_at: Utc::now(),
                updated_at: Utc::now(),
            };
            self.recipes.lock().unwrap().push(recipe.clone());
            Ok(recipe)
        }

        async fn update(&self, id: Uuid, update: UpdateRecipe) -> AppResult<Recipe> {
            let mut recipes = self.recipes.lock().unwrap();
            let recipe = recipes
                .iter_mut()
                .find(|r| r.recipe_uuid == id)
                .ok_or_else(|| AppError::not_found("recipe", "recipe_uuid", id))?;
            recipe.recipe_name = update.recipe_name;
            recipe.category = update.category;
            recipe.ingredients = update
                .ingredients
                .into_iter()
                .map(|l| l.into_line(id))
                .collect();
            recipe.instructions = update
                .instructions
                .into_iter()
                .map(|l| l.into_line(id))
                .collect();
            recipe.updated_at = Utc::now();
            Ok(recipe.clone())
        }

        async fn delete(&self, id: Uuid) -> AppResult<()> {
            let mut recipes = self.recipes.lock().unwrap();
            let before = recipes.len();
            recipes.retain(|r| r.recipe_uuid != id);
            if recipes.len() == before {
                return Err(AppError::not_found("recipe", "recipe_uuid", id));
            }
            Ok(())
        }
    }

    pub(crate) fn kimchi_fried_rice(user_uuid: Uuid) -> NewRecipe {
        NewRecipe {
            user_uuid,
            recipe_name: "kimchi fried rice".to_string(),
            category: "korean".to_string(),
            ingredients: vec![
                NewRecipeIngredient {
                    ingredient_uuid: Uuid::new_v4(),
                    amount: 200,
                    unit: "g".to_string(),
                },
                NewRecipeIngredient {
                    ingredient_uuid: Uuid::new_v4(),
                    amount: 2,
                    unit: "cups".to_string(),
                },
            ],
            instructions: vec![
                NewRecipeInstruction {
                    step_num: 1,
                    instruction: "fry the kimchi".to_string(),
                },
                NewRecipeInstruction {
                    step_num: 2,
                    instruction: "add the rice and fry together".to_string(),
                },
            ],
        }
    }

    #[tokio::test]
    async fn create_returns_generated_identity_and_ordered_lines() {
        let service = RecipeService::new(Arc::new(MockRecipeStore::default()));
        let owner = Uuid::new_v4();

        let created = service
            .create_recipe(kimchi_fried_rice(owner))
            .await
            .unwrap();

        assert_ne!(created.recipe_uuid, Uuid::nil());
        assert_eq!(created.ingredients.len(), 2);
        assert_eq!(created.instructions.len(), 2);

        let read_back = service.get_recipe(created.recipe_uuid).await.unwrap();
        assert_eq!(read_back.ingredients, created.ingredients);
        assert_eq!(read_back.instructions, created.instructions);
    }

    #[tokio::test]
    async fn update_replaces_child_collections_wholesale() {
        let service = RecipeService::new(Arc::new(MockRecipeStore::default()));
        let owner = Uuid::new_v4();
        let created = service
            .create_recipe(kimchi_fried_rice(owner))
            .await
            .unwrap();

        let kept_line = created.ingredients[0].clone();
        let update = UpdateRecipe {
            recipe_name: created.recipe_name.clone(),
            category: created.category.clone(),
            ingredients: vec![NewRecipeIngredient {
                ingredient_uuid: kept_line.ingredient_uuid,
                amount: kept_line.amount,
                unit: kept_line.unit.clone(),
            }],
            instructions: vec![NewRecipeInstruction {
                step_num: 1,
                instruction: "just fry everything".to_string(),
            }],
        };

        let updated = service
            .update_recipe(created.recipe_uuid, update)
            .await
            .unwrap();

        assert_eq!(updated.ingredients.len(), 1);
        assert_eq!(updated.ingredients[0].ingredient_uuid, kept_line.ingredient_uuid);
        assert_eq!(updated.instructions.len(), 1);
    }

    #[tokio::test]
    async fn update_of_unknown_recipe_is_not_found() {
        let service = RecipeService::new(Arc::new(MockRecipeStore::default()));
        let update = UpdateRecipe {
            recipe_name: "x".to_string(),
            category: "y".to_string(),
            ingredients: vec![],
            instructions: vec![],
        };
        let err = service
            .update_recipe(Uuid::new_v4(), update)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::NotFound { .. }));
    }

    #[tokio::test]
    async fn search_requires_a_non_empty_filter() {
        let service = RecipeService::new(Arc::new(MockRecipeStore::default()));
        let err = service
            .search_recipes(&RecipeFilter::default())
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Validation { .. }));
    }
}
