//! User service for business logic operations.
//!
//! Owns credential handling: passwords are hashed here before they reach the
//! storage port, and verified here during authentication. The stored hash
//! never leaves the service layer in any response.

use std::sync::Arc;

use uuid::Uuid;

use crate::error::{AppError, AppResult};
use crate::models::{NewUser, UpdateUser, User};
use crate::repositories::UserStore;
use crate::utils::jwt::generate_token_pair;
use crate::utils::password::{hash_password, verify_password};

/// Registration input; the service derives the stored record from it.
#[derive(Debug, Clone)]
pub struct RegisterUser {
    pub first_name: String,
    pub last_name: String,
    pub email_address: String,
    pub password: String,
}

/// Profile changes; a present password is re-hashed before storage.
#[derive(Debug, Clone, Default)]
pub struct UserChanges {
    pub active: Option<bool>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email_address: Option<String>,
    pub password: Option<String>,
}

#[derive(Clone)]
pub struct UserService {
    store: Arc<dyn UserStore>,
}

impl UserService {
    pub fn new(store: Arc<dyn UserStore>) -> Self {
        Self { store }
    }

    /// Creates a new user with a freshly hashed credential. New accounts
    /// start out active.
    pub async fn create_user(&self, input: RegisterUser) -> AppResult<User> {
        let new_user = NewUser {
            hashed_password: hash_password(&input.password)?,
            active: true,
            first_name: input.first_name,
            last_name: input.last_name,
            email_address: input.email_address,
        };
        self.store.create(new_user).await
    }

    pub async fn get_user(&self, id: Uuid) -> AppResult<User> {
        self.store
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found("user", "user_uuid", id))
    }

    pub async fn update_user(&self, id: Uuid, changes: UserChanges) -> AppResult<User> {
        let hashed_password = match &changes.password {
            Some(password) => Some(hash_password(password)?),
            None => None,
        };
        let update = UpdateUser {
            active: changes.active,
            first_name: changes.first_name,
            last_name: changes.last_name,
            email_address: changes.email_address,
            hashed_password,
        };
        self.store.update(id, update).await
    }

    /// Verifies credentials and issues an access/refresh token pair.
    ///
    /// Unknown addresses, wrong passwords and deactivated accounts all come
    /// back as the same `Unauthorized` so the response does not reveal which
    /// part failed.
    pub async fn authenticate(
        &self,
        email: &str,
        password: &str,
        secret: &str,
        access_expiration_hours: i64,
        refresh_expiration_hours: i64,
    ) -> AppResult<(User, String, String)> {
        let invalid = || AppError::Unauthorized {
            message: "Invalid email or password".to_string(),
        };

        let user = self
            .store
            .find_by_email(email)
            .await?
            .ok_or_else(invalid)?;

        if !verify_password(password, &user.hashed_password)? {
            return Err(invalid());
        }
        if !user.active {
            return Err(invalid());
        }

        let (access_token, refresh_token) = generate_token_pair(
            user.user_uuid,
            user.email_address.clone(),
            secret,
            access_expiration_hours,
            refresh_expiration_hours,
        )?;

        Ok((user, access_token, refresh_token))
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use async_trait::async_trait;
    use chrono::Utc;
    use std::sync::Mutex;

    /// In-memory stand-in for the user store, in the spirit of the mock store
    /// the service tests have always used.
    #[derive(Default)]
    pub(crate) struct MockUserStore {
        users: Mutex<Vec<User>>,
    }

    impl MockUserStore {
        fn with_user(user: User) -> Arc<Self> {
            Arc::new(Self {
                users: Mutex::new(vec![user]),
            })
        }
    }

    #[async_trait]
    impl UserStore for MockUserStore {
        async fn find_by_id(&self, id: Uuid) -> AppResult<Option<User>> {
            Ok(self
                .users
                .lock()
                .unwrap()
                .iter()
                .find(|u| u.user_uuid == id)
                .cloned())
        }

        async fn find_by_email(&self, email: &str) -> AppResult<Option<User>> {
            Ok(self
                .users
                .lock()
                .unwrap()
                .iter()
                .find(|u| u.email_address == email)
                .cloned())
        }

        async fn create(&self, new_user: NewUser) -> AppResult<User> {
            let user = User {
                user_uuid: Uuid::new_v4(),
                hashed_password: new_user.hashed_password,
                active: new_user.active,
                first_name: new_user.first_name,
                last_name: new_user.last_name,
                email_address: new_user.email_address,
                created_at: Utc::now(),
                updated_at: Utc::now(),
            };
            self.users.lock().unwrap().push(user.clone());
            Ok(user)
        }

        async fn update(&self, id: Uuid, changes: UpdateUser) -> AppResult<User> {
            let mut users = self.users.lock().unwrap();
            let user = users
                .iter_mut()
                .find(|u| u.user_uuid == id)
                .ok_or_else(|| AppError::not_found("user", "user_uuid", id))?;
            if let Some(active) = changes.active {
                user.active = active;
            }
            if let Some(first_name) = changes.first_name {
                user.first_name = first_name;
            }
            if let Some(last_name) = changes.last_name {
                user.last_name = last_name;
            }
            if let Some(email_address) = changes.email_address {
                user.email_address = email_address;
            }
            if let Some(hashed_password) = changes.hashed_password {
                user.hashed_password = hashed_password;
            }
            user.updated_at = Utc::now();
            Ok(user.clone())
        }
    }

    const TEST_SECRET: &str = "test_secret_key_at_least_32_characters_long";

    fn register_input() -> RegisterUser {
        RegisterUser {
            first_name: "Hana".to_string(),
            last_name: "Kim".to_string(),
            email_address: "hana@example.com".to_string(),
            password: "very-secret-1".to_string(),
        }
    }

    #[tokio::test]
    async fn create_user_hashes_the_password() {
        let service = UserService::new(Arc::new(MockUserStore::default()));
        let user = service.create_user(register_input()).await.unwrap();

        assert!(user.hashed_password.starts_with("$argon2"));
        assert!(verify_password("very-secret-1", &user.hashed_password).unwrap());
        assert!(user.active);
    }

    #[tokio::test]
    async fn get_user_maps_absence_to_not_found() {
        let service = UserService::new(Arc::new(MockUserStore::default()));
        let err = service.get_user(Uuid::new_v4()).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound { .. }));
    }

    #[tokio::test]
    async fn authenticate_returns_token_pair() {
        let service = UserService::new(Arc::new(MockUserStore::default()));
        let created = service.create_user(register_input()).await.unwrap();

        // Reuse the same backing store for the lookup.
        let (user, access, refresh) = service
            .authenticate("hana@example.com", "very-secret-1", TEST_SECRET, 1, 168)
            .await
            .unwrap();

        assert_eq!(user.user_uuid, created.user_uuid);
        assert!(!access.is_empty());
        assert!(!refresh.is_empty());
        assert_ne!(access, refresh);
    }

    #[tokio::test]
    async fn authenticate_rejects_wrong_password() {
        let service = UserService::new(Arc::new(MockUserStore::default()));
        service.create_user(register_input()).await.unwrap();

        let err = service
            .authenticate("hana@example.com", "wrong", TEST_SECRET, 1, 168)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Unauthorized { .. }));
    }

    #[tokio::test]
    async fn authenticate_rejects_unknown_email() {
        let service = UserService::new(Arc::new(MockUserStore::default()));
        let err = service
            .authenticate("nobody@example.com", "whatever", TEST_SECRET, 1, 168)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Unauthorized { .. }));
    }

    #[tokio::test]
    async fn authenticate_rejects_deactivated_account() {
        let user = User {
            user_uuid: Uuid::new_v4(),
            hashed_password: hash_password("very-secret-1").unwrap(),
            active: false,
            first_name: "Hana".to_string(),
            last_name: "Kim".to_string(),
            email_address: "hana@example.com".to_string(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        let service = UserService::new(MockUserStore::with_user(user));

        let err = service
            .authenticate("hana@example.com", "very-secret-1", TEST_SECRET, 1, 168)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Unauthorized { .. }));
    }

    #[tokio::test]
    async fn update_user_rehashes_a_new_password() {
        let service = UserService::new(Arc::new(MockUserStore::default()));
        let created = service.create_user(register_input()).await.unwrap();
        let old_hash = created.hashed_password.clone();

        let updated = service
            .update_user(
                created.user_uuid,
                UserChanges {
                    password: Some("new-password-2".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        assert_ne!(updated.hashed_password, old_hash);
        assert!(verify_password("new-password-2", &updated.hashed_password).unwrap());
    }
}
