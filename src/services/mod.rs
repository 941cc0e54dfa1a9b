//! Service layer for business logic operations.
//!
//! Services depend on the storage-port traits only (`Arc<dyn …Store>`), so
//! they can be exercised against in-memory stores in tests and wired to the
//! diesel repositories in production.

pub(crate) mod fridge_service;
pub(crate) mod ingredient_service;
pub(crate) mod recipe_service;
pub(crate) mod user_service;

pub use fridge_service::{FridgeItemInput, FridgeService};
pub use ingredient_service::IngredientService;
pub use recipe_service::RecipeService;
pub use user_service::{RegisterUser, UserChanges, UserService};

use std::sync::Arc;

use crate::repositories::Repositories;

/// Aggregates all services for convenient access from the Axum state.
///
/// Cloning is cheap; every service holds `Arc`s internally.
#[derive(Clone)]
pub struct Services {
    pub users: UserService,
    pub ingredients: IngredientService,
    pub fridge: FridgeService,
    pub recipes: RecipeService,
}

impl Services {
    /// Wires every service to the concrete repositories.
    pub fn new(repos: Repositories) -> Self {
        let ingredient_store = Arc::new(repos.ingredients);
        Self {
            users: UserService::new(Arc::new(repos.users)),
            ingredients: IngredientService::new(ingredient_store.clone()),
            fridge: FridgeService::new(Arc::new(repos.fridge), ingredient_store),
            recipes: RecipeService::new(Arc::new(repos.recipes)),
        }
    }
}
