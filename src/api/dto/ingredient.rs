//! Ingredient DTOs.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::models::{
    Ingredient, IngredientCategory, IngredientFilter, NewIngredient, UpdateIngredient,
};

/// Request body for creating an ingredient.
#[derive(Debug, Deserialize, ToSchema, Validate)]
pub struct CreateIngredientRequest {
    #[validate(length(min = 1, max = 255, message = "Ingredient name is required"))]
    pub ingredient_name: String,
    pub category: IngredientCategory,
    #[validate(range(min = 1, message = "Shelf life must be at least one day"))]
    pub days_until_exp: i32,
}

impl CreateIngredientRequest {
    pub fn into_new_ingredient(self) -> NewIngredient {
        NewIngredient {
            ingredient_name: self.ingredient_name,
            category: self.category,
            days_until_exp: self.days_until_exp,
        }
    }
}

/// Request body for updating an ingredient; absent fields stay unchanged.
#[derive(Debug, Deserialize, ToSchema, Validate)]
pub struct UpdateIngredientRequest {
    #[validate(length(min = 1, max = 255, message = "Ingredient name cannot be empty"))]
    pub ingredient_name: Option<String>,
    pub category: Option<IngredientCategory>,
    #[validate(range(min = 1, message = "Shelf life must be at least one day"))]
    pub days_until_exp: Option<i32>,
}

impl UpdateIngredientRequest {
    pub fn into_update_ingredient(self) -> UpdateIngredient {
        UpdateIngredient {
            ingredient_name: self.ingredient_name,
            category: self.category,
            days_until_exp: self.days_until_exp,
        }
    }
}

/// Search filter; at least one field must be present.
#[derive(Debug, Deserialize, ToSchema, Default)]
pub struct SearchIngredientsRequest {
    pub ingredient_name: Option<String>,
    pub category: Option<IngredientCategory>,
}

impl SearchIngredientsRequest {
    pub fn into_filter(self) -> IngredientFilter {
        IngredientFilter {
            ingredient_name: self.ingredient_name,
            category: self.category,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct IngredientResponse {
    pub ingredient_uuid: Uuid,
    pub ingredient_name: String,
    pub category: IngredientCategory,
    pub days_until_exp: i32,
    #[schema(value_type = String, format = DateTime)]
    pub created_at: DateTime<Utc>,
    #[schema(value_type = String, format = DateTime)]
    pub updated_at: DateTime<Utc>,
}

impl From<Ingredient> for IngredientResponse {
    fn from(ingredient: Ingredient) -> Self {
        Self {
            ingredient_uuid: ingredient.ingredient_uuid,
            ingredient_name: ingredient.ingredient_name,
            category: ingredient.category,
            days_until_exp: ingredient.days_until_exp,
            created_at: ingredient.created_at,
            updated_at: ingredient.updated_at,
        }
    }
}
