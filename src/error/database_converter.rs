use diesel::result::{DatabaseErrorKind, Error as DieselError};

use crate::error::{AppError, ConstraintParser};

/// Converts diesel database errors into structured AppError variants.
///
/// Unique violations become `Duplicate` with the offending column and value
/// extracted from the constraint name and DETAIL line; other constraint
/// violations become `Validation`; everything else is wrapped as `Database`
/// with the operation context preserved for logging.
pub struct DatabaseErrorConverter;

impl DatabaseErrorConverter {
    pub fn convert_diesel_error(error: DieselError, operation: &str) -> AppError {
        match error {
            DieselError::DatabaseError(kind, info) => {
                Self::convert_database_error(kind, info, operation)
            }
            DieselError::NotFound => AppError::not_found("resource", "id", "unknown"),
            other => AppError::Database {
                operation: operation.to_string(),
                source: anyhow::Error::from(other),
            },
        }
    }

    fn convert_database_error(
        kind: DatabaseErrorKind,
        info: Box<dyn diesel::result::DatabaseErrorInformation + Send + Sync>,
        operation: &str,
    ) -> AppError {
        let message = info.message();
        let constraint_name = info.constraint_name();

        match kind {
            DatabaseErrorKind::UniqueViolation => {
                let parsed = constraint_name.and_then(ConstraintParser::parse_constraint_name);
                let key_value = ConstraintParser::extract_key_value(message);
                match (parsed, key_value) {
                    (Some((entity, field)), Some((_, value))) => AppError::Duplicate {
                        entity,
                        field,
                        value,
                    },
                    (Some((entity, field)), None) => AppError::Duplicate {
                        entity,
                        field,
                        value: "unknown".to_string(),
                    },
                    // Composite-key constraints (e.g. fridge_ingredients_pkey)
                    // have no single column in the name; the DETAIL line still
                    // identifies the duplicate.
                    (None, Some((field, value))) => AppError::Duplicate {
                        entity: "resource".to_string(),
                        field,
                        value,
                    },
                    _ => AppError::Database {
                        operation: operation.to_string(),
                        source: anyhow::anyhow!("unique constraint violation: {}", message),
                    },
                }
            }
            DatabaseErrorKind::NotNullViolation => match ConstraintParser::extract_column(message)
            {
                Some(field) => AppError::Validation {
                    field,
                    reason: "value is required".to_string(),
                },
                None => AppError::Database {
                    operation: operation.to_string(),
                    source: anyhow::anyhow!("not-null constraint violation: {}", message),
                },
            },
            DatabaseErrorKind::ForeignKeyViolation => {
                match constraint_name.and_then(ConstraintParser::parse_constraint_name) {
                    Some((entity, field)) => AppError::Validation {
                        field,
                        reason: format!("references a missing row ({})", entity),
                    },
                    None => AppError::Database {
                        operation: operation.to_string(),
                        source: anyhow::anyhow!("foreign key violation: {}", message),
                    },
                }
            }
            _ => AppError::Database {
                operation: operation.to_string(),
                source: anyhow::anyhow!("database error: {}", message),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct MockDatabaseErrorInfo {
        message: String,
        constraint_name: Option<String>,
    }

    impl diesel::result::DatabaseErrorInformation for MockDatabaseErrorInfo {
        fn message(&self) -> &str {
            &self.message
        }
        fn details(&self) -> Option<&str> {
            None
        }
        fn hint(&self) -> Option<&str> {
            None
        }
        fn table_name(&self) -> Option<&str> {
            None
        }
        fn column_name(&self) -> Option<&str> {
            None
        }
        fn constraint_name(&self) -> Option<&str> {
            self.constraint_name.as_deref()
        }
        fn statement_position(&self) -> Option<i32> {
            None
        }
    }

    #[test]
    fn not_found_converts_to_not_found() {
        let result =
            DatabaseErrorConverter::convert_diesel_error(DieselError::NotFound, "find user");
        assert!(matches!(result, AppError::NotFound { .. }));
    }

    #[test]
    fn unique_violation_converts_to_duplicate() {
        let info = MockDatabaseErrorInfo {
            message: "duplicate key value violates unique constraint \"users_email_address_key\"\nDETAIL: Key (email_address)=(kim@example.com) already exists.".to_string(),
            constraint_name: Some("users_email_address_key".to_string()),
        };
        let error = DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, Box::new(info));

        let result = DatabaseErrorConverter::convert_diesel_error(error, "insert user");
        match result {
            AppError::Duplicate {
                entity,
                field,
                value,
            } => {
                assert_eq!(entity, "users");
                assert_eq!(field, "email_address");
                assert_eq!(value, "kim@example.com");
            }
            other => panic!("expected Duplicate, got {:?}", other),
        }
    }

    #[test]
    fn composite_key_violation_still_reports_duplicate() {
        let info = MockDatabaseErrorInfo {
            message: "duplicate key value violates unique constraint \"fridge_ingredients_pkey\"\nDETAIL: Key (user_uuid, ingredient_uuid)=(a, b) already exists.".to_string(),
            constraint_name: Some("fridge_ingredients_pkey".to_string()),
        };
        let error = DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, Box::new(info));

        let result = DatabaseErrorConverter::convert_diesel_error(error, "insert fridge row");
        match result {
            AppError::Duplicate { field, value, .. } => {
                assert_eq!(field, "user_uuid, ingredient_uuid");
                assert_eq!(value, "a, b");
            }
            other => panic!("expected Duplicate, got {:?}", other),
        }
    }

    #[test]
    fn not_null_violation_converts_to_validation() {
        let info = MockDatabaseErrorInfo {
            message: "null value in column \"unit\" violates not-null constraint".to_string(),
            constraint_name: None,
        };
        let error = DieselError::DatabaseError(DatabaseErrorKind::NotNullViolation, Box::new(info));

        let result = DatabaseErrorConverter::convert_diesel_error(error, "insert fridge row");
        match result {
            AppError::Validation { field, .. } => assert_eq!(field, "unit"),
            other => panic!("expected Validation, got {:?}", other),
        }
    }

    #[test]
    fn foreign_key_violation_converts_to_validation() {
        let info = MockDatabaseErrorInfo {
            message: "insert or update on table \"recipes\" violates foreign key constraint \"recipes_user_uuid_fkey\"".to_string(),
            constraint_name: Some("recipes_user_uuid_fkey".to_string()),
        };
        let error =
            DieselError::DatabaseError(DatabaseErrorKind::ForeignKeyViolation, Box::new(info));

        let result = DatabaseErrorConverter::convert_diesel_error(error, "insert recipe");
        match result {
            AppError::Validation { field, reason } => {
                assert_eq!(field, "user_uuid");
                assert!(reason.contains("recipes"));
            }
            other => panic!("expected Validation, got {:?}", other),
        }
    }

    #[test]
    fn other_database_errors_keep_operation_context() {
        let info = MockDatabaseErrorInfo {
            message: "deadlock detected".to_string(),
            constraint_name: None,
        };
        let error =
            DieselError::DatabaseError(DatabaseErrorKind::SerializationFailure, Box::new(info));

        let result = DatabaseErrorConverter::convert_diesel_error(error, "update recipe");
        match result {
            AppError::Database { operation, .. } => assert_eq!(operation, "update recipe"),
            other => panic!("expected Database, got {:?}", other),
        }
    }
}
