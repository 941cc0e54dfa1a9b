//! User repository for async database operations.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use uuid::Uuid;

use crate::db::AsyncDbPool;
use crate::error::{AppError, AppResult, DatabaseErrorConverter};
use crate::models::{NewUser, UpdateUser, User};
use crate::repositories::{with_deadline, UserStore};

/// User repository holding the shared async connection pool.
///
/// `AsyncDbPool` is internally an `Arc`, so cloning the repository is cheap.
#[derive(Clone)]
pub struct UserRepository {
    pool: AsyncDbPool,
}

impl UserRepository {
    pub fn new(pool: AsyncDbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserStore for UserRepository {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<User>> {
        use crate::schema::users::dsl::*;

        with_deadline("find user by id", async {
            let mut conn = self.pool.get().await.map_err(|e| AppError::ConnectionPool {
                source: anyhow::Error::from(e),
            })?;

            users
                .filter(user_uuid.eq(id))
                .select(User::as_select())
                .first(&mut conn)
                .await
                .optional()
                .map_err(|e| DatabaseErrorConverter::convert_diesel_error(e, "find user by id"))
        })
        .await
    }

    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>> {
        use crate::schema::users::dsl::*;

        with_deadline("find user by email", async {
            let mut conn = self.pool.get().await.map_err(|e| AppError::ConnectionPool {
                source: anyhow::Error::from(e),
            })?;

            users
                .filter(email_address.eq(email))
                .select(User::as_select())
                .first(&mut conn)
                .await
                .optional()
                .map_err(|e| {
                    DatabaseErrorConverter::convert_diesel_error(e, "find user by email")
                })
        })
        .await
    }

    async fn create(&self, new_user: NewUser) -> AppResult<User> {
        use crate::schema::users::dsl::*;

        with_deadline("create user", async {
            let mut conn = self.pool.get().await.map_err(|e| AppError::ConnectionPool {
                source: anyhow::Error::from(e),
            })?;

            diesel::insert_into(users)
                .values(&new_user)
                .returning(User::as_returning())
                .get_result(&mut conn)
                .await
                .map_err(|e| DatabaseErrorConverter::convert_diesel_error(e, "create user"))
        })
        .await
    }

    async fn update(&self, id: Uuid, changes: UpdateUser) -> AppResult<User> {
        use crate::schema::users::dsl::*;

        with_deadline("update user", async {
            let mut conn = self.pool.get().await.map_err(|e| AppError::ConnectionPool {
                source: anyhow::Error::from(e),
            })?;

            diesel::update(users.filter(user_uuid.eq(id)))
                .set((&changes, updated_at.eq(diesel::dsl::now)))
                .returning(User::as_returning())
                .get_result(&mut conn)
                .await
                .optional()
                .map_err(|e| DatabaseErrorConverter::convert_diesel_error(e, "update user"))?
                .ok_or_else(|| AppError::not_found("user", "user_uuid", id))
        })
        .await
    }
}
