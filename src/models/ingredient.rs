use std::io::Write;

use chrono::{DateTime, Utc};
use diesel::deserialize::{self, FromSql};
use diesel::pg::Pg;
use diesel::prelude::*;
use diesel::serialize::{self, Output, ToSql};
use diesel::sql_types::Text;
use diesel::{AsExpression, FromSqlRow};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Closed set of ingredient categories.
///
/// Stored as text; membership is enforced at the DTO boundary, the
/// persistence layer stores whichever variant it is handed.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    utoipa::ToSchema,
    AsExpression,
    FromSqlRow,
)]
#[diesel(sql_type = Text)]
#[serde(rename_all = "lowercase")]
pub enum IngredientCategory {
    Vegetables,
    Fruits,
    Meat,
    Fish,
    Eggs,
    Dairy,
    Grains,
    Legumes,
    Nuts,
    Oils,
    Spices,
    Water,
}

impl IngredientCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            IngredientCategory::Vegetables => "vegetables",
            IngredientCategory::Fruits => "fruits",
            IngredientCategory::Meat => "meat",
            IngredientCategory::Fish => "fish",
            IngredientCategory::Eggs => "eggs",
            IngredientCategory::Dairy => "dairy",
            IngredientCategory::Grains => "grains",
            IngredientCategory::Legumes => "legumes",
            IngredientCategory::Nuts => "nuts",
            IngredientCategory::Oils => "oils",
            IngredientCategory::Spices => "spices",
            IngredientCategory::Water => "water",
        }
    }
}

impl diesel::query_builder::QueryId for IngredientCategory {
    type QueryId = IngredientCategory;
    const HAS_STATIC_QUERY_ID: bool = false;
}

impl ToSql<Text, Pg> for IngredientCategory {
    fn to_sql<'b>(&'b self, out: &mut Output<'b, '_, Pg>) -> serialize::Result {
        out.write_all(self.as_str().as_bytes())?;
        Ok(serialize::IsNull::No)
    }
}

impl FromSql<Text, Pg> for IngredientCategory {
    fn from_sql(
        bytes: <Pg as diesel::backend::Backend>::RawValue<'_>,
    ) -> deserialize::Result<Self> {
        let s = <String as FromSql<Text, Pg>>::from_sql(bytes)?;
        match s.as_str() {
            "vegetables" => Ok(IngredientCategory::Vegetables),
            "fruits" => Ok(IngredientCategory::Fruits),
            "meat" => Ok(IngredientCategory::Meat),
            "fish" => Ok(IngredientCategory::Fish),
            "eggs" => Ok(IngredientCategory::Eggs),
            "dairy" => Ok(IngredientCategory::Dairy),
            "grains" => Ok(IngredientCategory::Grains),
            "legumes" => Ok(IngredientCategory::Legumes),
            "nuts" => Ok(IngredientCategory::Nuts),
            "oils" => Ok(IngredientCategory::Oils),
            "spices" => Ok(IngredientCategory::Spices),
            "water" => Ok(IngredientCategory::Water),
            _ => Err(format!("Unrecognized ingredient category: {}", s).into()),
        }
    }
}

/// Ingredient model for reading from the database.
#[derive(Debug, Queryable, Selectable, Clone)]
#[diesel(table_name = crate::schema::ingredients)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct Ingredient {
    pub ingredient_uuid: Uuid,
    pub ingredient_name: String,
    pub category: IngredientCategory,
    pub days_until_exp: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Insert model; identity and timestamps are server-generated.
#[derive(Debug, Insertable, Clone)]
#[diesel(table_name = crate::schema::ingredients)]
pub struct NewIngredient {
    pub ingredient_name: String,
    pub category: IngredientCategory,
    pub days_until_exp: i32,
}

/// Update model for partial updates.
#[derive(Debug, AsChangeset, Clone, Default)]
#[diesel(table_name = crate::schema::ingredients)]
pub struct UpdateIngredient {
    pub ingredient_name: Option<String>,
    pub category: Option<IngredientCategory>,
    pub days_until_exp: Option<i32>,
}

/// Partial filter for ingredient search. Fields are independently optional;
/// the predicate builder rejects a filter with no fields set.
#[derive(Debug, Clone, Default)]
pub struct IngredientFilter {
    pub ingredient_name: Option<String>,
    pub category: Option<IngredientCategory>,
}

impl IngredientFilter {
    pub fn is_empty(&self) -> bool {
        self.ingredient_name.is_none() && self.category.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn category_serializes_lowercase() {
        let json = serde_json::to_string(&IngredientCategory::Dairy).unwrap();
        assert_eq!(json, "\"dairy\"");
    }

    #[test]
    fn category_round_trips_through_serde() {
        for category in [
            IngredientCategory::Vegetables,
            IngredientCategory::Fruits,
            IngredientCategory::Meat,
            IngredientCategory::Fish,
            IngredientCategory::Eggs,
            IngredientCategory::Dairy,
            IngredientCategory::Grains,
            IngredientCategory::Legumes,
            IngredientCategory::Nuts,
            IngredientCategory::Oils,
            IngredientCategory::Spices,
            IngredientCategory::Water,
        ] {
            let json = serde_json::to_string(&category).unwrap();
            let back: IngredientCategory = serde_json::from_str(&json).unwrap();
            assert_eq!(category, back);
            assert_eq!(json, format!("\"{}\"", category.as_str()));
        }
    }

    #[test]
    fn empty_filter_is_detected() {
        assert!(IngredientFilter::default().is_empty());
        assert!(!IngredientFilter {
            ingredient_name: Some("garlic".to_string()),
            category: None,
        }
        .is_empty());
        assert!(!IngredientFilter {
            ingredient_name: None,
            category: Some(IngredientCategory::Spices),
        }
        .is_empty());
    }
}
