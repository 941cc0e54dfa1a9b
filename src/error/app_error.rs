use thiserror::Error;

use crate::error::DatabaseErrorConverter;

/// Application-wide error type.
///
/// The storage layer produces `NotFound`, `Duplicate`, `Conflict`, `Timeout`,
/// `ConnectionPool` and `Database`; the HTTP layer adds the caller-facing
/// variants. Raw engine error text stays inside `source` chains and is never
/// serialized past the API boundary.
#[derive(Error, Debug)]
pub enum AppError {
    /// A targeted row does not exist (zero-row read or zero-rows-affected
    /// write).
    #[error("Resource not found: {entity} with {field}={value}")]
    NotFound {
        entity: String,
        field: String,
        value: String,
    },

    /// Unique constraint violation.
    #[error("Duplicate entry: {entity}.{field} = '{value}' already exists")]
    Duplicate {
        entity: String,
        field: String,
        value: String,
    },

    /// A guarded write affected an unexpected number of rows. The enclosing
    /// transaction has been rolled back; nothing was partially applied.
    #[error("Integrity conflict in {operation}: {affected} rows affected, expected 1")]
    Conflict { operation: String, affected: usize },

    /// Validation error with field-specific details.
    #[error("Validation failed for {field}: {reason}")]
    Validation { field: String, reason: String },

    /// Bad request error with a descriptive message.
    #[error("Bad request: {message}")]
    BadRequest { message: String },

    /// Unauthorized access error.
    #[error("Unauthorized: {message}")]
    Unauthorized { message: String },

    /// The per-call statement deadline elapsed before the engine answered.
    #[error("Operation timed out: {operation}")]
    Timeout { operation: String },

    /// Database operation error with operation context.
    #[error("Database operation failed: {operation}")]
    Database {
        operation: String,
        #[source]
        source: anyhow::Error,
    },

    /// Connection pool or connectivity error (engine unreachable, ping
    /// failure, pool exhausted).
    #[error("Connection pool error")]
    ConnectionPool {
        #[source]
        source: anyhow::Error,
    },

    /// Configuration error with key information.
    #[error("Configuration error: {key}")]
    Configuration {
        key: String,
        #[source]
        source: anyhow::Error,
    },

    /// Internal error for unexpected failures.
    #[error("Internal error")]
    Internal {
        #[source]
        source: anyhow::Error,
    },
}

impl AppError {
    /// NotFound constructor used throughout the storage layer.
    pub fn not_found(entity: &str, field: &str, value: impl ToString) -> Self {
        AppError::NotFound {
            entity: entity.to_string(),
            field: field.to_string(),
            value: value.to_string(),
        }
    }
}

impl From<anyhow::Error> for AppError {
    fn from(error: anyhow::Error) -> Self {
        AppError::Internal { source: error }
    }
}

impl From<diesel::result::Error> for AppError {
    fn from(error: diesel::result::Error) -> Self {
        DatabaseErrorConverter::convert_diesel_error(error, "database operation")
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(errors: validator::ValidationErrors) -> Self {
        let (field, reason) = errors
            .field_errors()
            .iter()
            .next()
            .map(|(field, errs)| {
                let reason = errs
                    .first()
                    .and_then(|e| e.message.as_ref())
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| "invalid value".to_string());
                (field.to_string(), reason)
            })
            .unwrap_or_else(|| ("request".to_string(), "invalid request".to_string()));

        AppError::Validation { field, reason }
    }
}

/// Type alias for Result with AppError to simplify function signatures.
pub type AppResult<T> = Result<T, AppError>;
