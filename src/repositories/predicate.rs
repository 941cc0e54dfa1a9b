//! Search predicate construction.
//!
//! Turns a partial filter record into a boxed diesel query. Filter fields are
//! visited in a fixed order (ingredients: name, category; recipes: owner,
//! name, category) and each present field contributes one `column = $n`
//! conjunct. The query builder keeps the placeholder index and the bind list
//! in lock-step, so filter values never appear in the statement text.
//!
//! A filter with no fields set is rejected here rather than rendered as an
//! unconstrained match-everything query.

use diesel::pg::Pg;
use diesel::prelude::*;

use crate::error::{AppError, AppResult};
use crate::models::{IngredientFilter, RecipeFilter};
use crate::schema::{ingredients, recipes};

pub(crate) type IngredientQuery<'a> = ingredients::BoxedQuery<'a, Pg>;
pub(crate) type RecipeQuery<'a> = recipes::BoxedQuery<'a, Pg>;

pub(crate) fn ingredient_search_query(
    filter: &IngredientFilter,
) -> AppResult<IngredientQuery<'_>> {
    if filter.is_empty() {
        return Err(empty_filter("ingredient"));
    }

    let mut query = ingredients::table.into_boxed();
    if let Some(name) = &filter.ingredient_name {
        query = query.filter(ingredients::ingredient_name.eq(name.as_str()));
    }
    if let Some(category) = filter.category {
        query = query.filter(ingredients::category.eq(category));
    }
    Ok(query)
}

pub(crate) fn recipe_search_query(filter: &RecipeFilter) -> AppResult<RecipeQuery<'_>> {
    if filter.is_empty() {
        return Err(empty_filter("recipe"));
    }

    let mut query = recipes::table.into_boxed();
    if let Some(owner) = filter.user_uuid {
        query = query.filter(recipes::user_uuid.eq(owner));
    }
    if let Some(name) = &filter.recipe_name {
        query = query.filter(recipes::recipe_name.eq(name.as_str()));
    }
    if let Some(category) = &filter.category {
        query = query.filter(recipes::category.eq(category.as_str()));
    }
    Ok(query)
}

fn empty_filter(entity: &str) -> AppError {
    AppError::Validation {
        field: "filter".to_string(),
        reason: format!("{} search requires at least one filter field", entity),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::IngredientCategory;
    use proptest::prelude::*;
    use uuid::Uuid;

    fn rendered(query: &IngredientQuery<'_>) -> String {
        diesel::debug_query::<Pg, _>(query).to_string()
    }

    fn rendered_recipes(query: &RecipeQuery<'_>) -> String {
        diesel::debug_query::<Pg, _>(query).to_string()
    }

    /// Placeholders in the rendered statement; bind values in these tests
    /// never contain a dollar sign.
    fn placeholder_count(sql: &str) -> usize {
        sql.matches('$').count()
    }

    #[test]
    fn empty_ingredient_filter_is_rejected() {
        let err = match ingredient_search_query(&IngredientFilter::default()) {
            Ok(_) => panic!("expected empty filter to be rejected"),
            Err(e) => e,
        };
        assert!(matches!(err, AppError::Validation { .. }));
    }

    #[test]
    fn empty_recipe_filter_is_rejected() {
        let err = match recipe_search_query(&RecipeFilter::default()) {
            Ok(_) => panic!("expected empty filter to be rejected"),
            Err(e) => e,
        };
        assert!(matches!(err, AppError::Validation { .. }));
    }

    /// The statement text from the WHERE keyword on, without the binds dump.
    fn where_clause(sql: &str) -> &str {
        let statement = sql.split(" -- binds").next().unwrap();
        let start = statement.find("WHERE").expect("query has a WHERE clause");
        &statement[start..]
    }

    #[test]
    fn single_field_filter_renders_one_bound_condition() {
        let filter = IngredientFilter {
            ingredient_name: Some("garlic".to_string()),
            category: None,
        };
        let sql = rendered(&ingredient_search_query(&filter).unwrap());
        let clause = where_clause(&sql);

        assert!(clause.contains("ingredient_name"));
        assert!(clause.contains("$1"));
        assert_eq!(placeholder_count(clause), 1);
        // The value travels as a bind, never in the statement text.
        assert!(!clause.contains("garlic"));
    }

    #[test]
    fn both_fields_render_in_fixed_order() {
        let filter = IngredientFilter {
            ingredient_name: Some("garlic".to_string()),
            category: Some(IngredientCategory::Spices),
        };
        let sql = rendered(&ingredient_search_query(&filter).unwrap());
        let clause = where_clause(&sql);

        assert_eq!(placeholder_count(clause), 2);
        let name_pos = clause.find("ingredient_name").unwrap();
        let category_pos = clause.find("category").unwrap();
        assert!(name_pos < category_pos);
    }

    #[test]
    fn recipe_filter_renders_owner_before_name_before_category() {
        let filter = RecipeFilter {
            user_uuid: Some(Uuid::new_v4()),
            recipe_name: Some("kimchi fried rice".to_string()),
            category: Some("korean".to_string()),
        };
        let sql = rendered_recipes(&recipe_search_query(&filter).unwrap());
        let clause = where_clause(&sql);

        assert_eq!(placeholder_count(clause), 3);
        let owner_pos = clause.find("user_uuid").unwrap();
        let name_pos = clause.find("recipe_name").unwrap();
        assert!(owner_pos < name_pos);
    }

    proptest! {
        /// For any non-empty filter, the rendered statement carries exactly
        /// one placeholder per present field.
        #[test]
        fn placeholder_count_tracks_present_fields(
            name in proptest::option::of("[a-z]{1,12}"),
            category in proptest::option::of(prop_oneof![
                Just(IngredientCategory::Vegetables),
                Just(IngredientCategory::Meat),
                Just(IngredientCategory::Spices),
                Just(IngredientCategory::Dairy),
            ]),
        ) {
            let filter = IngredientFilter { ingredient_name: name, category };
            let expected = filter.ingredient_name.iter().count() + filter.category.iter().count();

            let result = ingredient_search_query(&filter);
            if expected == 0 {
                prop_assert!(result.is_err());
            } else {
                let sql = rendered(&result.unwrap());
                prop_assert_eq!(placeholder_count(&sql), expected);
            }
        }
    }
}
