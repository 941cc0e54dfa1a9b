//! Fridge stock DTOs.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::models::FridgeIngredient;
use crate::services::FridgeItemInput;

/// Request body for putting an ingredient into a fridge. The expiration date
/// is computed server-side from the ingredient's shelf life and cannot be
/// supplied.
#[derive(Debug, Deserialize, ToSchema, Validate)]
pub struct AddFridgeIngredientRequest {
    pub ingredient_uuid: Uuid,
    #[validate(range(min = 1, message = "Amount must be positive"))]
    pub amount: i32,
    #[validate(length(min = 1, max = 50, message = "Unit is required"))]
    pub unit: String,
    #[schema(value_type = String, format = DateTime)]
    pub purchased_date: DateTime<Utc>,
}

impl AddFridgeIngredientRequest {
    pub fn into_parts(self) -> (Uuid, FridgeItemInput) {
        (
            self.ingredient_uuid,
            FridgeItemInput {
                amount: self.amount,
                unit: self.unit,
                purchased_date: self.purchased_date,
            },
        )
    }
}

/// Request body for updating a fridge row; the row keeps its composite
/// identity, everything else is replaced.
#[derive(Debug, Deserialize, ToSchema, Validate)]
pub struct UpdateFridgeIngredientRequest {
    #[validate(range(min = 1, message = "Amount must be positive"))]
    pub amount: i32,
    #[validate(length(min = 1, max = 50, message = "Unit is required"))]
    pub unit: String,
    #[schema(value_type = String, format = DateTime)]
    pub purchased_date: DateTime<Utc>,
}

impl UpdateFridgeIngredientRequest {
    pub fn into_input(self) -> FridgeItemInput {
        FridgeItemInput {
            amount: self.amount,
            unit: self.unit,
            purchased_date: self.purchased_date,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct FridgeIngredientResponse {
    pub user_uuid: Uuid,
    pub ingredient_uuid: Uuid,
    pub amount: i32,
    pub unit: String,
    #[schema(value_type = String, format = DateTime)]
    pub purchased_date: DateTime<Utc>,
    #[schema(value_type = String, format = DateTime)]
    pub expiration_date: DateTime<Utc>,
    #[schema(value_type = String, format = DateTime)]
    pub created_at: DateTime<Utc>,
    #[schema(value_type = String, format = DateTime)]
    pub updated_at: DateTime<Utc>,
}

impl From<FridgeIngredient> for FridgeIngredientResponse {
    fn from(row: FridgeIngredient) -> Self {
        Self {
            user_uuid: row.user_uuid,
            ingredient_uuid: row.ingredient_uuid,
            amount: row.amount,
            unit: row.unit,
            purchased_date: row.purchased_date,
            expiration_date: row.expiration_date,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}
