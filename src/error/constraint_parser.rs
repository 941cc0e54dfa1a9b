/// Parses Postgres constraint names and violation messages into
/// (table, column, value) parts for structured error reporting.
///
/// Constraint names follow the `<table>_<column>_<suffix>` convention used by
/// sql/schema.sql. Table names are matched against the known schema instead
/// of guessing at underscores, since several table names contain them.
pub struct ConstraintParser;

/// Known tables, longest names first so prefix matching is unambiguous.
const TABLES: &[&str] = &[
    "recipe_instructions",
    "recipe_ingredients",
    "fridge_ingredients",
    "ingredients",
    "recipes",
    "users",
];

const SUFFIXES: &[&str] = &["_pkey", "_key", "_fkey", "_check"];

impl ConstraintParser {
    /// Splits a constraint name like `users_email_address_key` into
    /// ("users", "email_address").
    pub fn parse_constraint_name(name: &str) -> Option<(String, String)> {
        let stem = SUFFIXES
            .iter()
            .find_map(|suffix| name.strip_suffix(suffix))?;

        let table = TABLES.iter().find(|t| stem.starts_with(**t))?;
        let column = stem.strip_prefix(*table)?.strip_prefix('_')?;
        if column.is_empty() {
            return None;
        }
        Some((table.to_string(), column.to_string()))
    }

    /// Extracts the column and value from a unique-violation DETAIL line:
    /// `Key (email_address)=(kim@example.com) already exists.`
    pub fn extract_key_value(message: &str) -> Option<(String, String)> {
        let start = message.find("Key (")?;
        let rest = &message[start + "Key (".len()..];
        let column_end = rest.find(")=(")?;
        let column = &rest[..column_end];
        let value_part = &rest[column_end + ")=(".len()..];
        let value_end = value_part.find(')')?;
        Some((column.to_string(), value_part[..value_end].to_string()))
    }

    /// Extracts the column from a not-null-violation message:
    /// `null value in column "unit" violates not-null constraint`
    pub fn extract_column(message: &str) -> Option<String> {
        let start = message.find("column \"")?;
        let rest = &message[start + "column \"".len()..];
        let end = rest.find('"')?;
        Some(rest[..end].to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_unique_constraint_name() {
        assert_eq!(
            ConstraintParser::parse_constraint_name("users_email_address_key"),
            Some(("users".to_string(), "email_address".to_string()))
        );
    }

    #[test]
    fn parses_foreign_key_constraint_on_compound_table_name() {
        assert_eq!(
            ConstraintParser::parse_constraint_name("fridge_ingredients_user_uuid_fkey"),
            Some(("fridge_ingredients".to_string(), "user_uuid".to_string()))
        );
        assert_eq!(
            ConstraintParser::parse_constraint_name("recipe_ingredients_ingredient_uuid_fkey"),
            Some((
                "recipe_ingredients".to_string(),
                "ingredient_uuid".to_string()
            ))
        );
    }

    #[test]
    fn rejects_unknown_table_and_missing_suffix() {
        assert_eq!(
            ConstraintParser::parse_constraint_name("pantry_name_key"),
            None
        );
        assert_eq!(
            ConstraintParser::parse_constraint_name("users_email_address"),
            None
        );
    }

    #[test]
    fn extracts_key_and_value_from_detail() {
        let message = "duplicate key value violates unique constraint \"users_email_address_key\"\nDETAIL: Key (email_address)=(kim@example.com) already exists.";
        assert_eq!(
            ConstraintParser::extract_key_value(message),
            Some(("email_address".to_string(), "kim@example.com".to_string()))
        );
    }

    #[test]
    fn extracts_column_from_not_null_message() {
        let message = "null value in column \"unit\" violates not-null constraint";
        assert_eq!(
            ConstraintParser::extract_column(message),
            Some("unit".to_string())
        );
    }
}
