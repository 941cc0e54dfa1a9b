//! Data Transfer Objects for API requests and responses.
//!
//! DTOs are organized by domain: users, auth, ingredients, fridge stock,
//! recipes, plus the common error envelope.

mod auth;
mod error;
mod fridge;
mod ingredient;
mod recipe;
mod user;

pub use auth::{LoginRequest, LoginResponse, RefreshTokenRequest, RefreshTokenResponse};
pub use error::ErrorResponse;
pub use fridge::{
    AddFridgeIngredientRequest, FridgeIngredientResponse, UpdateFridgeIngredientRequest,
};
pub use ingredient::{
    CreateIngredientRequest, IngredientResponse, SearchIngredientsRequest,
    UpdateIngredientRequest,
};
pub use recipe::{
    CreateRecipeRequest, RecipeIngredientLineResponse, RecipeIngredientPayload,
    RecipeInstructionLineResponse, RecipeInstructionPayload, RecipeResponse,
    SearchRecipesRequest, UpdateRecipeRequest,
};
pub use user::{CreateUserRequest, UpdateUserRequest, UserResponse};
