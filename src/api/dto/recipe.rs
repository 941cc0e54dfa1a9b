//! Recipe aggregate DTOs.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::models::{
    NewRecipe, NewRecipeIngredient, NewRecipeInstruction, Recipe, RecipeFilter,
    RecipeIngredientLine, RecipeInstructionLine, UpdateRecipe,
};

/// One ingredient line of a recipe payload.
#[derive(Debug, Deserialize, ToSchema)]
pub struct RecipeIngredientPayload {
    pub ingredient_uuid: Uuid,
    pub amount: i32,
    pub unit: String,
}

impl RecipeIngredientPayload {
    fn into_new_line(self) -> NewRecipeIngredient {
        NewRecipeIngredient {
            ingredient_uuid: self.ingredient_uuid,
            amount: self.amount,
            unit: self.unit,
        }
    }
}

/// One instruction step of a recipe payload.
#[derive(Debug, Deserialize, ToSchema)]
pub struct RecipeInstructionPayload {
    pub step_num: i32,
    pub instruction: String,
}

impl RecipeInstructionPayload {
    fn into_new_line(self) -> NewRecipeInstruction {
        NewRecipeInstruction {
            step_num: self.step_num,
            instruction: self.instruction,
        }
    }
}

/// Request body for creating a recipe with its full line sets.
#[derive(Debug, Deserialize, ToSchema, Validate)]
pub struct CreateRecipeRequest {
    pub user_uuid: Uuid,
    #[validate(length(min = 1, max = 255, message = "Recipe name is required"))]
    pub recipe_name: String,
    #[validate(length(min = 1, max = 50, message = "Category is required"))]
    pub category: String,
    #[serde(default)]
    pub ingredients: Vec<RecipeIngredientPayload>,
    #[serde(default)]
    pub instructions: Vec<RecipeInstructionPayload>,
}

impl CreateRecipeRequest {
    pub fn into_new_recipe(self) -> NewRecipe {
        NewRecipe {
            user_uuid: self.user_uuid,
            recipe_name: self.recipe_name,
            category: self.category,
            ingredients: self
                .ingredients
                .into_iter()
                .map(RecipeIngredientPayload::into_new_line)
                .collect(),
            instructions: self
                .instructions
                .into_iter()
                .map(RecipeInstructionPayload::into_new_line)
                .collect(),
        }
    }
}

/// Request body for updating a recipe. The supplied line sets replace the
/// stored ones wholesale; omitting a line deletes it.
#[derive(Debug, Deserialize, ToSchema, Validate)]
pub struct UpdateRecipeRequest {
    #[validate(length(min = 1, max = 255, message = "Recipe name is required"))]
    pub recipe_name: String,
    #[validate(length(min = 1, max = 50, message = "Category is required"))]
    pub category: String,
    #[serde(default)]
    pub ingredients: Vec<RecipeIngredientPayload>,
    #[serde(default)]
    pub instructions: Vec<RecipeInstructionPayload>,
}

impl UpdateRecipeRequest {
    pub fn into_update_recipe(self) -> UpdateRecipe {
        UpdateRecipe {
            recipe_name: self.recipe_name,
            category: self.category,
            ingredients: self
                .ingredients
                .into_iter()
                .map(RecipeIngredientPayload::into_new_line)
                .collect(),
            instructions: self
                .instructions
                .into_iter()
                .map(RecipeInstructionPayload::into_new_line)
                .collect(),
        }
    }
}

/// Search filter; at least one field must be present.
#[derive(Debug, Deserialize, ToSchema, Default)]
pub struct SearchRecipesRequest {
    pub user_uuid: Option<Uuid>,
    pub recipe_name: Option<String>,
    pub category: Option<String>,
}

impl SearchRecipesRequest {
    pub fn into_filter(self) -> RecipeFilter {
        RecipeFilter {
            user_uuid: self.user_uuid,
            recipe_name: self.recipe_name,
            category: self.category,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct RecipeIngredientLineResponse {
    pub ingredient_uuid: Uuid,
    pub amount: i32,
    pub unit: String,
}

impl From<RecipeIngredientLine> for RecipeIngredientLineResponse {
    fn from(line: RecipeIngredientLine) -> Self {
        Self {
            ingredient_uuid: line.ingredient_uuid,
            amount: line.amount,
            unit: line.unit,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct RecipeInstructionLineResponse {
    pub step_num: i32,
    pub instruction: String,
}

impl From<RecipeInstructionLine> for RecipeInstructionLineResponse {
    fn from(line: RecipeInstructionLine) -> Self {
        Self {
            step_num: line.step_num,
            instruction: line.instruction,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct RecipeResponse {
    pub recipe_uuid: Uuid,
    pub user_uuid: Uuid,
    pub recipe_name: String,
    pub category: String,
    pub ingredients: Vec<RecipeIngredientLineResponse>,
    pub instructions: Vec<RecipeInstructionLineResponse>,
    #[schema(value_type = String, format = DateTime)]
    pub created_at: DateTime<Utc>,
    #[schema(value_type = String, format = DateTime)]
    pub updated_at: DateTime<Utc>,
}

impl From<Recipe> for RecipeResponse {
    fn from(recipe: Recipe) -> Self {
        Self {
            recipe_uuid: recipe.recipe_uuid,
            user_uuid: recipe.user_uuid,
            recipe_name: recipe.recipe_name,
            category: recipe.category,
            ingredients: recipe
                .ingredients
                .into_iter()
                .map(RecipeIngredientLineResponse::from)
                .collect(),
            instructions: recipe
                .instructions
                .into_iter()
                .map(RecipeInstructionLineResponse::from)
                .collect(),
            created_at: recipe.created_at,
            updated_at: recipe.updated_at,
        }
    }
}
