use chrono::{DateTime, Utc};
use diesel::prelude::*;
use uuid::Uuid;

/// User model for reading from the database.
///
/// The credential hash travels inside the service only; response DTOs never
/// serialize it.
#[derive(Debug, Queryable, Selectable, Clone)]
#[diesel(table_name = crate::schema::users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct User {
    pub user_uuid: Uuid,
    pub hashed_password: String,
    pub active: bool,
    pub first_name: String,
    pub last_name: String,
    pub email_address: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Insert model. The identity and both timestamps are generated by the
/// database and come back via RETURNING.
#[derive(Debug, Insertable, Clone)]
#[diesel(table_name = crate::schema::users)]
pub struct NewUser {
    pub hashed_password: String,
    pub active: bool,
    pub first_name: String,
    pub last_name: String,
    pub email_address: String,
}

/// Update model for partial updates; `None` fields are left untouched.
#[derive(Debug, AsChangeset, Clone, Default)]
#[diesel(table_name = crate::schema::users)]
pub struct UpdateUser {
    pub active: Option<bool>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email_address: Option<String>,
    pub hashed_password: Option<String>,
}
