mod fridge;
mod ingredient;
mod recipe;
mod user;

pub use fridge::{FridgeIngredient, NewFridgeIngredient, UpdateFridgeIngredient};
pub use ingredient::{
    Ingredient, IngredientCategory, IngredientFilter, NewIngredient, UpdateIngredient,
};
pub use recipe::{
    NewRecipe, NewRecipeIngredient, NewRecipeInstruction, Recipe, RecipeFilter,
    RecipeIngredientLine, RecipeInstructionLine, RecipeRow, NewRecipeRow, UpdateRecipe,
};
pub use user::{NewUser, UpdateUser, User};
