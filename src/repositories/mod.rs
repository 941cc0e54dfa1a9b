//! Relational storage layer.
//!
//! Concrete diesel_async repositories implementing the storage-port traits in
//! [`store`], plus the shared plumbing they build on: the per-call statement
//! deadline and the rows-affected guard for targeted writes.

mod fridge_repo;
mod ingredient_repo;
mod predicate;
mod recipe_repo;
mod store;
mod user_repo;

pub use fridge_repo::FridgeRepository;
pub use ingredient_repo::IngredientRepository;
pub use recipe_repo::RecipeRepository;
pub use store::{FridgeStore, IngredientStore, RecipeStore, UserStore};
pub use user_repo::UserRepository;

use std::future::Future;
use std::time::Duration;

use crate::db::AsyncDbPool;
use crate::error::{AppError, AppResult};

/// Upper bound for a single storage operation, transaction included. An
/// operation that cannot finish in time unwinds (dropping the in-flight
/// future aborts any open transaction) and reports `AppError::Timeout`.
pub(crate) const STATEMENT_DEADLINE: Duration = Duration::from_secs(5);

/// Runs a storage operation under [`STATEMENT_DEADLINE`].
pub(crate) async fn with_deadline<T, F>(operation: &str, fut: F) -> AppResult<T>
where
    F: Future<Output = AppResult<T>>,
{
    match tokio::time::timeout(STATEMENT_DEADLINE, fut).await {
        Ok(result) => result,
        Err(_) => Err(AppError::Timeout {
            operation: operation.to_string(),
        }),
    }
}

/// Guard for updates and deletes that must match exactly one row.
///
/// Zero rows means the target does not exist; more than one means the
/// statement was broader than intended and the caller must roll back.
pub(crate) fn ensure_single_row(
    affected: usize,
    operation: &str,
    entity: &str,
    field: &str,
    value: impl ToString,
) -> AppResult<()> {
    match affected {
        1 => Ok(()),
        0 => Err(AppError::not_found(entity, field, value)),
        n => Err(AppError::Conflict {
            operation: operation.to_string(),
            affected: n,
        }),
    }
}

/// Aggregates all repositories for convenient access.
///
/// Since `AsyncDbPool` uses `Arc` internally, cloning is cheap.
#[derive(Clone)]
pub struct Repositories {
    pub users: UserRepository,
    pub ingredients: IngredientRepository,
    pub fridge: FridgeRepository,
    pub recipes: RecipeRepository,
}

impl Repositories {
    /// Creates all repositories over one shared connection pool.
    pub fn new(pool: AsyncDbPool) -> Self {
        Self {
            users: UserRepository::new(pool.clone()),
            ingredients: IngredientRepository::new(pool.clone()),
            fridge: FridgeRepository::new(pool.clone()),
            recipes: RecipeRepository::new(pool),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_row_passes_the_guard() {
        assert!(ensure_single_row(1, "delete ingredient", "ingredient", "id", "x").is_ok());
    }

    #[test]
    fn zero_rows_is_not_found() {
        let err =
            ensure_single_row(0, "delete ingredient", "ingredient", "ingredient_uuid", "abc")
                .unwrap_err();
        match err {
            AppError::NotFound {
                entity,
                field,
                value,
            } => {
                assert_eq!(entity, "ingredient");
                assert_eq!(field, "ingredient_uuid");
                assert_eq!(value, "abc");
            }
            other => panic!("expected NotFound, got {:?}", other),
        }
    }

    #[test]
    fn multiple_rows_is_a_conflict() {
        let err = ensure_single_row(2, "update recipe", "recipe", "recipe_uuid", "abc")
            .unwrap_err();
        match err {
            AppError::Conflict {
                operation,
                affected,
            } => {
                assert_eq!(operation, "update recipe");
                assert_eq!(affected, 2);
            }
            other => panic!("expected Conflict, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn deadline_wrapper_returns_inner_result() {
        let ok: AppResult<i32> = with_deadline("noop", async { Ok(7) }).await;
        assert_eq!(ok.unwrap(), 7);
    }

    #[tokio::test(start_paused = true)]
    async fn deadline_wrapper_times_out() {
        let slow = async {
            tokio::time::sleep(Duration::from_secs(30)).await;
            Ok(())
        };
        let result: AppResult<()> = with_deadline("slow operation", slow).await;
        match result.unwrap_err() {
            AppError::Timeout { operation } => assert_eq!(operation, "slow operation"),
            other => panic!("expected Timeout, got {:?}", other),
        }
    }
}
