use chrono::{DateTime, Utc};
use diesel::prelude::*;
use uuid::Uuid;

/// Fridge stock row. Identity is the (user_uuid, ingredient_uuid) pair; there
/// is no surrogate key.
#[derive(Debug, Queryable, Selectable, Clone)]
#[diesel(table_name = crate::schema::fridge_ingredients)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct FridgeIngredient {
    pub user_uuid: Uuid,
    pub ingredient_uuid: Uuid,
    pub amount: i32,
    pub unit: String,
    pub purchased_date: DateTime<Utc>,
    pub expiration_date: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Insert model. The expiration date is computed by the service layer from
/// the ingredient's shelf life before this record is built; the storage layer
/// persists it as given.
#[derive(Debug, Insertable, Clone)]
#[diesel(table_name = crate::schema::fridge_ingredients)]
pub struct NewFridgeIngredient {
    pub user_uuid: Uuid,
    pub ingredient_uuid: Uuid,
    pub amount: i32,
    pub unit: String,
    pub purchased_date: DateTime<Utc>,
    pub expiration_date: DateTime<Utc>,
}

/// Update model. Fridge updates replace the whole stock record (the service
/// recomputes the expiration date from the purchase date on every update).
#[derive(Debug, AsChangeset, Clone)]
#[diesel(table_name = crate::schema::fridge_ingredients)]
pub struct UpdateFridgeIngredient {
    pub amount: i32,
    pub unit: String,
    pub purchased_date: DateTime<Utc>,
    pub expiration_date: DateTime<Utc>,
}
