//! Fridge stock repository for async database operations.
//!
//! Rows are addressed by the composite (user_uuid, ingredient_uuid) key in
//! every operation; there is no surrogate identity.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use uuid::Uuid;

use crate::db::AsyncDbPool;
use crate::error::{AppError, AppResult, DatabaseErrorConverter};
use crate::models::{FridgeIngredient, NewFridgeIngredient, UpdateFridgeIngredient};
use crate::repositories::{ensure_single_row, with_deadline, FridgeStore};

#[derive(Clone)]
pub struct FridgeRepository {
    pool: AsyncDbPool,
}

impl FridgeRepository {
    pub fn new(pool: AsyncDbPool) -> Self {
        Self { pool }
    }
}

fn pair(user: Uuid, ingredient: Uuid) -> String {
    format!("({}, {})", user, ingredient)
}

#[async_trait]
impl FridgeStore for FridgeRepository {
    async fn list_for_user(&self, owner: Uuid) -> AppResult<Vec<FridgeIngredient>> {
        use crate::schema::fridge_ingredients::dsl::*;

        with_deadline("list fridge ingredients", async {
            let mut conn = self.pool.get().await.map_err(|e| AppError::ConnectionPool {
                source: anyhow::Error::from(e),
            })?;

            fridge_ingredients
                .filter(user_uuid.eq(owner))
                .select(FridgeIngredient::as_select())
                .load(&mut conn)
                .await
                .map_err(|e| {
                    DatabaseErrorConverter::convert_diesel_error(e, "list fridge ingredients")
                })
        })
        .await
    }

    async fn create(&self, new_item: NewFridgeIngredient) -> AppResult<FridgeIngredient> {
        use crate::schema::fridge_ingredients::dsl::*;

        with_deadline("create fridge ingredient", async {
            let mut conn = self.pool.get().await.map_err(|e| AppError::ConnectionPool {
                source: anyhow::Error::from(e),
            })?;

            diesel::insert_into(fridge_ingredients)
                .values(&new_item)
                .returning(FridgeIngredient::as_returning())
                .get_result(&mut conn)
                .await
                .map_err(|e| {
                    DatabaseErrorConverter::convert_diesel_error(e, "create fridge ingredient")
                })
        })
        .await
    }

    async fn update(
        &self,
        user: Uuid,
        ingredient: Uuid,
        changes: UpdateFridgeIngredient,
    ) -> AppResult<FridgeIngredient> {
        use crate::schema::fridge_ingredients::dsl::*;

        with_deadline("update fridge ingredient", async {
            let mut conn = self.pool.get().await.map_err(|e| AppError::ConnectionPool {
                source: anyhow::Error::from(e),
            })?;

            diesel::update(
                fridge_ingredients
                    .filter(user_uuid.eq(user))
                    .filter(ingredient_uuid.eq(ingredient)),
            )
            .set((&changes, updated_at.eq(diesel::dsl::now)))
            .returning(FridgeIngredient::as_returning())
            .get_result(&mut conn)
            .await
            .optional()
            .map_err(|e| {
                DatabaseErrorConverter::convert_diesel_error(e, "update fridge ingredient")
            })?
            .ok_or_else(|| {
                AppError::not_found(
                    "fridge_ingredient",
                    "(user_uuid, ingredient_uuid)",
                    pair(user, ingredient),
                )
            })
        })
        .await
    }

    /// Deleting an absent pair reports NotFound rather than success, so a
    /// caller retrying a remove can tell the difference.
    async fn delete(&self, user: Uuid, ingredient: Uuid) -> AppResult<()> {
        use crate::schema::fridge_ingredients::dsl::*;

        with_deadline("delete fridge ingredient", async {
            let mut conn = self.pool.get().await.map_err(|e| AppError::ConnectionPool {
                source: anyhow::Error::from(e),
            })?;

            let affected = diesel::delete(
                fridge_ingredients
                    .filter(user_uuid.eq(user))
                    .filter(ingredient_uuid.eq(ingredient)),
            )
            .execute(&mut conn)
            .await
            .map_err(|e| {
                DatabaseErrorConverter::convert_diesel_error(e, "delete fridge ingredient")
            })?;

            ensure_single_row(
                affected,
                "delete fridge ingredient",
                "fridge_ingredient",
                "(user_uuid, ingredient_uuid)",
                pair(user, ingredient),
            )
        })
        .await
    }
}
