//! Ingredient repository for async database operations.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use uuid::Uuid;

use crate::db::AsyncDbPool;
use crate::error::{AppError, AppResult, DatabaseErrorConverter};
use crate::models::{Ingredient, IngredientFilter, NewIngredient, UpdateIngredient};
use crate::repositories::predicate::ingredient_search_query;
use crate::repositories::{ensure_single_row, with_deadline, IngredientStore};

#[derive(Clone)]
pub struct IngredientRepository {
    pool: AsyncDbPool,
}

impl IngredientRepository {
    pub fn new(pool: AsyncDbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl IngredientStore for IngredientRepository {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Ingredient>> {
        use crate::schema::ingredients::dsl::*;

        with_deadline("find ingredient by id", async {
            let mut conn = self.pool.get().await.map_err(|e| AppError::ConnectionPool {
                source: anyhow::Error::from(e),
            })?;

            ingredients
                .filter(ingredient_uuid.eq(id))
                .select(Ingredient::as_select())
                .first(&mut conn)
                .await
                .optional()
                .map_err(|e| {
                    DatabaseErrorConverter::convert_diesel_error(e, "find ingredient by id")
                })
        })
        .await
    }

    /// Runs a filtered search. The predicate builder has already rejected an
    /// empty filter by the time a query exists to execute.
    async fn search(&self, filter: &IngredientFilter) -> AppResult<Vec<Ingredient>> {
        let query = ingredient_search_query(filter)?;

        with_deadline("search ingredients", async {
            let mut conn = self.pool.get().await.map_err(|e| AppError::ConnectionPool {
                source: anyhow::Error::from(e),
            })?;

            query
                .load::<Ingredient>(&mut conn)
                .await
                .map_err(|e| DatabaseErrorConverter::convert_diesel_error(e, "search ingredients"))
        })
        .await
    }

    async fn create(&self, new_ingredient: NewIngredient) -> AppResult<Ingredient> {
        use crate::schema::ingredients::dsl::*;

        with_deadline("create ingredient", async {
            let mut conn = self.pool.get().await.map_err(|e| AppError::ConnectionPool {
                source: anyhow::Error::from(e),
            })?;

            diesel::insert_into(ingredients)
                .values(&new_ingredient)
                .returning(Ingredient::as_returning())
                .get_result(&mut conn)
                .await
                .map_err(|e| DatabaseErrorConverter::convert_diesel_error(e, "create ingredient"))
        })
        .await
    }

    async fn update(&self, id: Uuid, changes: UpdateIngredient) -> AppResult<Ingredient> {
        use crate::schema::ingredients::dsl::*;

        with_deadline("update ingredient", async {
            let mut conn = self.pool.get().await.map_err(|e| AppError::ConnectionPool {
                source: anyhow::Error::from(e),
            })?;

            diesel::update(ingredients.filter(ingredient_uuid.eq(id)))
                .set((&changes, updated_at.eq(diesel::dsl::now)))
                .returning(Ingredient::as_returning())
                .get_result(&mut conn)
                .await
                .optional()
                .map_err(|e| DatabaseErrorConverter::convert_diesel_error(e, "update ingredient"))?
                .ok_or_else(|| AppError::not_found("ingredient", "ingredient_uuid", id))
        })
        .await
    }

    async fn delete(&self, id: Uuid) -> AppResult<()> {
        use crate::schema::ingredients::dsl::*;

        with_deadline("delete ingredient", async {
            let mut conn = self.pool.get().await.map_err(|e| AppError::ConnectionPool {
                source: anyhow::Error::from(e),
            })?;

            let affected = diesel::delete(ingredients.filter(ingredient_uuid.eq(id)))
                .execute(&mut conn)
                .await
                .map_err(|e| {
                    DatabaseErrorConverter::convert_diesel_error(e, "delete ingredient")
                })?;

            ensure_single_row(affected, "delete ingredient", "ingredient", "ingredient_uuid", id)
        })
        .await
    }
}
