use chrono::{DateTime, Utc};
use diesel::prelude::*;
use uuid::Uuid;

/// Parent row of the recipe aggregate as stored in the recipes table.
#[derive(Debug, Queryable, Selectable, Clone)]
#[diesel(table_name = crate::schema::recipes)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct RecipeRow {
    pub recipe_uuid: Uuid,
    pub user_uuid: Uuid,
    pub recipe_name: String,
    pub category: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Insert model for the parent row.
#[derive(Debug, Insertable, Clone)]
#[diesel(table_name = crate::schema::recipes)]
pub struct NewRecipeRow {
    pub user_uuid: Uuid,
    pub recipe_name: String,
    pub category: String,
}

/// Ingredient line of a recipe. Fully caller-specified, so one struct serves
/// both reads and the re-insert step of a replace.
#[derive(Debug, Queryable, Selectable, Insertable, Clone, PartialEq, Eq)]
#[diesel(table_name = crate::schema::recipe_ingredients)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct RecipeIngredientLine {
    pub recipe_uuid: Uuid,
    pub ingredient_uuid: Uuid,
    pub amount: i32,
    pub unit: String,
}

/// Instruction line of a recipe.
#[derive(Debug, Queryable, Selectable, Insertable, Clone, PartialEq, Eq)]
#[diesel(table_name = crate::schema::recipe_instructions)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct RecipeInstructionLine {
    pub recipe_uuid: Uuid,
    pub step_num: i32,
    pub instruction: String,
}

/// The full recipe aggregate: parent fields plus both owned, ordered child
/// collections. Children have no lifecycle of their own; they are written and
/// removed only alongside the parent.
#[derive(Debug, Clone)]
pub struct Recipe {
    pub recipe_uuid: Uuid,
    pub user_uuid: Uuid,
    pub recipe_name: String,
    pub category: String,
    pub ingredients: Vec<RecipeIngredientLine>,
    pub instructions: Vec<RecipeInstructionLine>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Recipe {
    /// Assembles the aggregate from a parent row and its child rows.
    pub fn assemble(
        parent: RecipeRow,
        ingredients: Vec<RecipeIngredientLine>,
        instructions: Vec<RecipeInstructionLine>,
    ) -> Self {
        Self {
            recipe_uuid: parent.recipe_uuid,
            user_uuid: parent.user_uuid,
            recipe_name: parent.recipe_name,
            category: parent.category,
            ingredients,
            instructions,
            created_at: parent.created_at,
            updated_at: parent.updated_at,
        }
    }
}

/// Ingredient line as supplied by the caller, before the parent identity
/// exists. Stamped with the recipe id when the parent row has been written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewRecipeIngredient {
    pub ingredient_uuid: Uuid,
    pub amount: i32,
    pub unit: String,
}

impl NewRecipeIngredient {
    pub fn into_line(self, recipe_uuid: Uuid) -> RecipeIngredientLine {
        RecipeIngredientLine {
            recipe_uuid,
            ingredient_uuid: self.ingredient_uuid,
            amount: self.amount,
            unit: self.unit,
        }
    }
}

/// Instruction line as supplied by the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewRecipeInstruction {
    pub step_num: i32,
    pub instruction: String,
}

impl NewRecipeInstruction {
    pub fn into_line(self, recipe_uuid: Uuid) -> RecipeInstructionLine {
        RecipeInstructionLine {
            recipe_uuid,
            step_num: self.step_num,
            instruction: self.instruction,
        }
    }
}

/// Input for creating a recipe aggregate. The identity and timestamps are
/// generated by the storage layer.
#[derive(Debug, Clone)]
pub struct NewRecipe {
    pub user_uuid: Uuid,
    pub recipe_name: String,
    pub category: String,
    pub ingredients: Vec<NewRecipeIngredient>,
    pub instructions: Vec<NewRecipeInstruction>,
}

/// Input for updating a recipe aggregate. The update is a full replace: the
/// supplied child sets become the aggregate's only children. Identity and
/// owner are immutable.
#[derive(Debug, Clone)]
pub struct UpdateRecipe {
    pub recipe_name: String,
    pub category: String,
    pub ingredients: Vec<NewRecipeIngredient>,
    pub instructions: Vec<NewRecipeInstruction>,
}

/// Partial filter for recipe search; the predicate builder rejects a filter
/// with no fields set.
#[derive(Debug, Clone, Default)]
pub struct RecipeFilter {
    pub user_uuid: Option<Uuid>,
    pub recipe_name: Option<String>,
    pub category: Option<String>,
}

impl RecipeFilter {
    pub fn is_empty(&self) -> bool {
        self.user_uuid.is_none() && self.recipe_name.is_none() && self.category.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn assemble_preserves_child_order() {
        let parent = RecipeRow {
            recipe_uuid: Uuid::new_v4(),
            user_uuid: Uuid::new_v4(),
            recipe_name: "kimchi fried rice".to_string(),
            category: "korean".to_string(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        let rid = parent.recipe_uuid;
        let lines = vec![
            NewRecipeIngredient {
                ingredient_uuid: Uuid::new_v4(),
                amount: 200,
                unit: "g".to_string(),
            }
            .into_line(rid),
            NewRecipeIngredient {
                ingredient_uuid: Uuid::new_v4(),
                amount: 2,
                unit: "cups".to_string(),
            }
            .into_line(rid),
        ];
        let steps = vec![
            NewRecipeInstruction {
                step_num: 1,
                instruction: "fry the kimchi".to_string(),
            }
            .into_line(rid),
            NewRecipeInstruction {
                step_num: 2,
                instruction: "add the rice".to_string(),
            }
            .into_line(rid),
        ];

        let recipe = Recipe::assemble(parent, lines.clone(), steps.clone());
        assert_eq!(recipe.ingredients, lines);
        assert_eq!(recipe.instructions, steps);
        assert!(recipe.ingredients.iter().all(|l| l.recipe_uuid == rid));
    }

    #[test]
    fn empty_filter_is_detected() {
        assert!(RecipeFilter::default().is_empty());
        assert!(!RecipeFilter {
            user_uuid: Some(Uuid::new_v4()),
            ..Default::default()
        }
        .is_empty());
    }
}
