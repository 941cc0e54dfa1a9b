//! Application state for the Axum router.

use crate::config::JwtConfig;
use crate::db::AsyncDbPool;
use crate::repositories::Repositories;
use crate::services::Services;

/// Shared state handed to every request handler.
///
/// Cloning is cheap; services and the pool are Arc-backed.
#[derive(Clone)]
pub struct AppState {
    /// All business logic services.
    pub services: Services,
    /// Direct pool access for the health endpoints.
    pub db_pool: AsyncDbPool,
    /// JWT configuration for token generation and validation.
    pub jwt_config: JwtConfig,
}

impl AppState {
    /// Builds the full repository and service stack over one pool.
    pub fn new(pool: AsyncDbPool, jwt_config: JwtConfig) -> Self {
        let repos = Repositories::new(pool.clone());
        let services = Services::new(repos);
        Self {
            services,
            db_pool: pool,
            jwt_config,
        }
    }
}
