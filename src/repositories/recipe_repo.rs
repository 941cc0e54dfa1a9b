//! Recipe aggregate repository.
//!
//! A recipe is a parent row plus two owned child collections (ingredient
//! lines, instruction lines). Every write that touches more than one row runs
//! inside a single transaction with a fixed statement order:
//!
//! - create: parent insert, then child inserts in input order
//! - update: parent update (NotFound before any child statement), then
//!   wholesale child delete, then re-insert of the supplied sets
//! - delete: ingredient lines, instruction lines, then the guarded parent
//!
//! Reads fetch the parent and then issue the two child queries per parent.
//! That is N+2N round trips for N results; fine at household scale. Switch to
//! a batched `recipe_uuid = ANY(...)` fetch if listing ever gets hot.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::scoped_futures::ScopedFutureExt;
use diesel_async::{AsyncConnection, RunQueryDsl};
use uuid::Uuid;

use crate::db::AsyncDbPool;
use crate::error::{AppError, AppResult, DatabaseErrorConverter};
use crate::models::{
    NewRecipe, NewRecipeRow, Recipe, RecipeFilter, RecipeIngredientLine, RecipeInstructionLine,
    RecipeRow, UpdateRecipe,
};
use crate::repositories::predicate::recipe_search_query;
use crate::repositories::{ensure_single_row, with_deadline, RecipeStore};
use crate::schema::{recipe_ingredients, recipe_instructions, recipes};

#[derive(Clone)]
pub struct RecipeRepository {
    pool: AsyncDbPool,
}

impl RecipeRepository {
    pub fn new(pool: AsyncDbPool) -> Self {
        Self { pool }
    }

    /// Fetches both child collections for a parent row and assembles the
    /// aggregate. Instructions come back ordered by their caller-assigned
    /// step number.
    async fn load_aggregate(&self, parent: RecipeRow) -> AppResult<Recipe> {
        let mut conn = self.pool.get().await.map_err(|e| AppError::ConnectionPool {
            source: anyhow::Error::from(e),
        })?;

        let lines = recipe_ingredients::table
            .filter(recipe_ingredients::recipe_uuid.eq(parent.recipe_uuid))
            .select(RecipeIngredientLine::as_select())
            .load(&mut conn)
            .await
            .map_err(|e| {
                DatabaseErrorConverter::convert_diesel_error(e, "load recipe ingredient lines")
            })?;

        let steps = recipe_instructions::table
            .filter(recipe_instructions::recipe_uuid.eq(parent.recipe_uuid))
            .order(recipe_instructions::step_num.asc())
            .select(RecipeInstructionLine::as_select())
            .load(&mut conn)
            .await
            .map_err(|e| {
                DatabaseErrorConverter::convert_diesel_error(e, "load recipe instruction lines")
            })?;

        Ok(Recipe::assemble(parent, lines, steps))
    }
}

#[async_trait]
impl RecipeStore for RecipeRepository {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Recipe>> {
        with_deadline("find recipe by id", async {
            let parent = {
                let mut conn = self.pool.get().await.map_err(|e| AppError::ConnectionPool {
                    source: anyhow::Error::from(e),
                })?;

                recipes::table
                    .filter(recipes::recipe_uuid.eq(id))
                    .select(RecipeRow::as_select())
                    .first(&mut conn)
                    .await
                    .optional()
                    .map_err(|e| {
                        DatabaseErrorConverter::convert_diesel_error(e, "find recipe by id")
                    })?
            };

            match parent {
                Some(row) => Ok(Some(self.load_aggregate(row).await?)),
                None => Ok(None),
            }
        })
        .await
    }

    async fn list_for_user(&self, owner: Uuid) -> AppResult<Vec<Recipe>> {
        with_deadline("list recipes", async {
            let parents = {
                let mut conn = self.pool.get().await.map_err(|e| AppError::ConnectionPool {
                    source: anyhow::Error::from(e),
                })?;

                recipes::table
                    .filter(recipes::user_uuid.eq(owner))
                    .select(RecipeRow::as_select())
                    .load(&mut conn)
                    .await
                    .map_err(|e| DatabaseErrorConverter::convert_diesel_error(e, "list recipes"))?
            };

            let mut result = Vec::with_capacity(parents.len());
            for parent in parents {
                result.push(self.load_aggregate(parent).await?);
            }
            Ok(result)
        })
        .await
    }

    async fn search(&self, filter: &RecipeFilter) -> AppResult<Vec<Recipe>> {
        let query = recipe_search_query(filter)?;

        with_deadline("search recipes", async {
            let parents = {
                let mut conn = self.pool.get().await.map_err(|e| AppError::ConnectionPool {
                    source: anyhow::Error::from(e),
                })?;

                query
                    .load::<RecipeRow>(&mut conn)
                    .await
                    .map_err(|e| DatabaseErrorConverter::convert_diesel_error(e, "search recipes"))?
            };

            let mut result = Vec::with_capacity(parents.len());
            for parent in parents {
                result.push(self.load_aggregate(parent).await?);
            }
            Ok(result)
        })
        .await
    }

    async fn create(&self, new_recipe: NewRecipe) -> AppResult<Recipe> {
        let NewRecipe {
            user_uuid,
            recipe_name,
            category,
            ingredients,
            instructions,
        } = new_recipe;
        let parent_values = NewRecipeRow {
            user_uuid,
            recipe_name,
            category,
        };

        with_deadline("create recipe", async {
            let mut conn = self.pool.get().await.map_err(|e| AppError::ConnectionPool {
                source: anyhow::Error::from(e),
            })?;

            conn.transaction::<Recipe, AppError, _>(|conn| {
                async move {
                    let parent: RecipeRow = diesel::insert_into(recipes::table)
                        .values(&parent_values)
                        .returning(RecipeRow::as_returning())
                        .get_result(conn)
                        .await
                        .map_err(|e| {
                            DatabaseErrorConverter::convert_diesel_error(e, "insert recipe")
                        })?;

                    let lines: Vec<RecipeIngredientLine> = ingredients
                        .into_iter()
                        .map(|line| line.into_line(parent.recipe_uuid))
                        .collect();
                    if !lines.is_empty() {
                        diesel::insert_into(recipe_ingredients::table)
                            .values(&lines)
                            .execute(conn)
                            .await
                            .map_err(|e| {
                                DatabaseErrorConverter::convert_diesel_error(
                                    e,
                                    "insert recipe ingredient lines",
                                )
                            })?;
                    }

                    let steps: Vec<RecipeInstructionLine> = instructions
                        .into_iter()
                        .map(|line| line.into_line(parent.recipe_uuid))
                        .collect();
                    if !steps.is_empty() {
                        diesel::insert_into(recipe_instructions::table)
                            .values(&steps)
                            .execute(conn)
                            .await
                            .map_err(|e| {
                                DatabaseErrorConverter::convert_diesel_error(
                                    e,
                                    "insert recipe instruction lines",
                                )
                            })?;
                    }

                    Ok(Recipe::assemble(parent, lines, steps))
                }
                .scope_boxed()
            })
            .await
        })
        .await
    }

    /// Full-replace update. A caller who omits a previously-existing line is
    /// deleting it; there is no per-line merge.
    async fn update(&self, id: Uuid, update: UpdateRecipe) -> AppResult<Recipe> {
        let UpdateRecipe {
            recipe_name,
            category,
            ingredients,
            instructions,
        } = update;

        with_deadline("update recipe", async {
            let mut conn = self.pool.get().await.map_err(|e| AppError::ConnectionPool {
                source: anyhow::Error::from(e),
            })?;

            conn.transaction::<Recipe, AppError, _>(|conn| {
                async move {
                    // Parent first: a miss here must fail the whole operation
                    // before any child row is touched.
                    let parent: RecipeRow =
                        diesel::update(recipes::table.filter(recipes::recipe_uuid.eq(id)))
                            .set((
                                recipes::recipe_name.eq(recipe_name),
                                recipes::category.eq(category),
                                recipes::updated_at.eq(diesel::dsl::now),
                            ))
                            .returning(RecipeRow::as_returning())
                            .get_result(conn)
                            .await
                            .optional()
                            .map_err(|e| {
                                DatabaseErrorConverter::convert_diesel_error(e, "update recipe")
                            })?
                            .ok_or_else(|| AppError::not_found("recipe", "recipe_uuid", id))?;

                    diesel::delete(
                        recipe_ingredients::table
                            .filter(recipe_ingredients::recipe_uuid.eq(id)),
                    )
                    .execute(conn)
                    .await
                    .map_err(|e| {
                        DatabaseErrorConverter::convert_diesel_error(
                            e,
                            "delete recipe ingredient lines",
                        )
                    })?;

                    diesel::delete(
                        recipe_instructions::table
                            .filter(recipe_instructions::recipe_uuid.eq(id)),
                    )
                    .execute(conn)
                    .await
                    .map_err(|e| {
                        DatabaseErrorConverter::convert_diesel_error(
                            e,
                            "delete recipe instruction lines",
                        )
                    })?;

                    let lines: Vec<RecipeIngredientLine> = ingredients
                        .into_iter()
                        .map(|line| line.into_line(id))
                        .collect();
                    if !lines.is_empty() {
                        diesel::insert_into(recipe_ingredients::table)
                            .values(&lines)
                            .execute(conn)
                            .await
                            .map_err(|e| {
                                DatabaseErrorConverter::convert_diesel_error(
                                    e,
                                    "insert recipe ingredient lines",
                                )
                            })?;
                    }

                    let steps: Vec<RecipeInstructionLine> = instructions
                        .into_iter()
                        .map(|line| line.into_line(id))
                        .collect();
                    if !steps.is_empty() {
                        diesel::insert_into(recipe_instructions::table)
                            .values(&steps)
                            .execute(conn)
                            .await
                            .map_err(|e| {
                                DatabaseErrorConverter::convert_diesel_error(
                                    e,
                                    "insert recipe instruction lines",
                                )
                            })?;
                    }

                    Ok(Recipe::assemble(parent, lines, steps))
                }
                .scope_boxed()
            })
            .await
        })
        .await
    }

    async fn delete(&self, id: Uuid) -> AppResult<()> {
        with_deadline("delete recipe", async {
            let mut conn = self.pool.get().await.map_err(|e| AppError::ConnectionPool {
                source: anyhow::Error::from(e),
            })?;

            conn.transaction::<(), AppError, _>(|conn| {
                async move {
                    // Children before parent, for referential cleanliness.
                    diesel::delete(
                        recipe_ingredients::table
                            .filter(recipe_ingredients::recipe_uuid.eq(id)),
                    )
                    .execute(conn)
                    .await
                    .map_err(|e| {
                        DatabaseErrorConverter::convert_diesel_error(
                            e,
                            "delete recipe ingredient lines",
                        )
                    })?;

                    diesel::delete(
                        recipe_instructions::table
                            .filter(recipe_instructions::recipe_uuid.eq(id)),
                    )
                    .execute(conn)
                    .await
                    .map_err(|e| {
                        DatabaseErrorConverter::convert_diesel_error(
                            e,
                            "delete recipe instruction lines",
                        )
                    })?;

                    let affected =
                        diesel::delete(recipes::table.filter(recipes::recipe_uuid.eq(id)))
                            .execute(conn)
                            .await
                            .map_err(|e| {
                                DatabaseErrorConverter::convert_diesel_error(e, "delete recipe")
                            })?;

                    ensure_single_row(affected, "delete recipe", "recipe", "recipe_uuid", id)
                }
                .scope_boxed()
            })
            .await
        })
        .await
    }
}
