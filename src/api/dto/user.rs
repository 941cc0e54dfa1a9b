//! User-related DTOs for API requests and responses.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::models::User;
use crate::services::{RegisterUser, UserChanges};

/// Request body for registering a new user.
#[derive(Debug, Deserialize, ToSchema, Validate)]
pub struct CreateUserRequest {
    #[validate(length(min = 1, max = 255, message = "First name is required"))]
    pub first_name: String,
    #[validate(length(min = 1, max = 255, message = "Last name is required"))]
    pub last_name: String,
    #[validate(email(message = "Invalid email format"))]
    #[schema(format = "email")]
    pub email_address: String,
    #[validate(length(min = 8, max = 72, message = "Password must be between 8 and 72 characters"))]
    #[schema(format = "password", min_length = 8, max_length = 72)]
    pub password: String,
}

impl CreateUserRequest {
    pub fn into_register_user(self) -> RegisterUser {
        RegisterUser {
            first_name: self.first_name,
            last_name: self.last_name,
            email_address: self.email_address,
            password: self.password,
        }
    }
}

/// Request body for updating a user profile.
#[derive(Debug, Deserialize, ToSchema, Validate)]
pub struct UpdateUserRequest {
    pub active: Option<bool>,
    #[validate(length(min = 1, max = 255, message = "First name cannot be empty"))]
    pub first_name: Option<String>,
    #[validate(length(min = 1, max = 255, message = "Last name cannot be empty"))]
    pub last_name: Option<String>,
    #[validate(email(message = "Invalid email format"))]
    pub email_address: Option<String>,
    #[validate(length(min = 8, max = 72, message = "Password must be between 8 and 72 characters"))]
    pub password: Option<String>,
}

impl UpdateUserRequest {
    pub fn into_user_changes(self) -> UserChanges {
        UserChanges {
            active: self.active,
            first_name: self.first_name,
            last_name: self.last_name,
            email_address: self.email_address,
            password: self.password,
        }
    }
}

/// User data for responses. The credential hash is deliberately absent.
#[derive(Debug, Serialize, ToSchema)]
pub struct UserResponse {
    pub user_uuid: Uuid,
    pub active: bool,
    pub first_name: String,
    pub last_name: String,
    pub email_address: String,
    #[schema(value_type = String, format = DateTime)]
    pub created_at: DateTime<Utc>,
    #[schema(value_type = String, format = DateTime)]
    pub updated_at: DateTime<Utc>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            user_uuid: user.user_uuid,
            active: user.active,
            first_name: user.first_name,
            last_name: user.last_name,
            email_address: user.email_address,
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}
