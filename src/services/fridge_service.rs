//! Fridge stock service.
//!
//! Owns the expiration rule: the stored expiration date is always the
//! purchase date plus the ingredient's shelf life in days, resolved here
//! before anything reaches the storage port. The storage layer itself treats
//! the expiration date as opaque data.

use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use crate::models::{FridgeIngredient, NewFridgeIngredient, UpdateFridgeIngredient};
use crate::repositories::{FridgeStore, IngredientStore};

/// Caller-supplied stock fields; the expiration date is computed, never
/// accepted from outside.
#[derive(Debug, Clone)]
pub struct FridgeItemInput {
    pub amount: i32,
    pub unit: String,
    pub purchased_date: DateTime<Utc>,
}

#[derive(Clone)]
pub struct FridgeService {
    fridge: Arc<dyn FridgeStore>,
    ingredients: Arc<dyn IngredientStore>,
}

impl FridgeService {
    pub fn new(fridge: Arc<dyn FridgeStore>, ingredients: Arc<dyn IngredientStore>) -> Self {
        Self {
            fridge,
            ingredients,
        }
    }

    pub async fn list_fridge(&self, user_uuid: Uuid) -> AppResult<Vec<FridgeIngredient>> {
        self.fridge.list_for_user(user_uuid).await
    }

    pub async fn add_item(
        &self,
        user_uuid: Uuid,
        ingredient_uuid: Uuid,
        input: FridgeItemInput,
    ) -> AppResult<FridgeIngredient> {
        let expiration_date = self
            .expiration_for(ingredient_uuid, input.purchased_date)
            .await?;

        self.fridge
            .create(NewFridgeIngredient {
                user_uuid,
                ingredient_uuid,
                amount: input.amount,
                unit: input.unit,
                purchased_date: input.purchased_date,
                expiration_date,
            })
            .await
    }

    pub async fn update_item(
        &self,
        user_uuid: Uuid,
        ingredient_uuid: Uuid,
        input: FridgeItemInput,
    ) -> AppResult<FridgeIngredient> {
        let expiration_date = self
            .expiration_for(ingredient_uuid, input.purchased_date)
            .await?;

        self.fridge
            .update(
                user_uuid,
                ingredient_uuid,
                UpdateFridgeIngredient {
                    amount: input.amount,
                    unit: input.unit,
                    purchased_date: input.purchased_date,
                    expiration_date,
                },
            )
            .await
    }

    pub async fn remove_item(&self, user_uuid: Uuid, ingredient_uuid: Uuid) -> AppResult<()> {
        self.fridge.delete(user_uuid, ingredient_uuid).await
    }

    async fn expiration_for(
        &self,
        ingredient_uuid: Uuid,
        purchased_date: DateTime<Utc>,
    ) -> AppResult<DateTime<Utc>> {
        let ingredient = self
            .ingredients
            .find_by_id(ingredient_uuid)
            .await?
            .ok_or_else(|| {
                AppError::not_found("ingredient", "ingredient_uuid", ingredient_uuid)
            })?;

        Ok(purchased_date + Duration::days(i64::from(ingredient.days_until_exp)))
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::services::ingredient_service::tests::{garlic, MockIngredientStore};
    use async_trait::async_trait;
    use chrono::TimeZone;
    use std::sync::Mutex;

    #[derive(Default)]
    pub(crate) struct MockFridgeStore {
        rows: Mutex<Vec<FridgeIngredient>>,
    }

    #[async_trait]
    impl FridgeStore for MockFridgeStore {
        async fn list_for_user(&self, user_uuid: Uuid) -> AppResult<Vec<FridgeIngredient>> {
            Ok(self
                .rows
                .lock()
                .unwrap()
                .iter()
                .filter(|r| r.user_uuid == user_uuid)
                .cloned()
                .collect())
        }

        async fn create(&self, new_item: NewFridgeIngredient) -> AppResult<FridgeIngredient> {
            let row = FridgeIngredient {
                user_uuid: new_item.user_uuid,
                ingredient_uuid: new_item.ingredient_uuid,
                amount: new_item.amount,
                unit: new_item.unit,
                purchased_date: new_item.purchased_date,
                expiration_date: new_item.expiration_date,
                created_at: Utc::now(),
                updated_at: Utc::now(),
            };
            self.rows.lock().unwrap().push(row.clone());
            Ok(row)
        }

        async fn update(
            &self,
            user_uuid: Uuid,
            ingredient_uuid: Uuid,
            changes: UpdateFridgeIngredient,
        ) -> AppResult<FridgeIngredient> {
            let mut rows = self.rows.lock().unwrap();
            let row = rows
                .iter_mut()
                .find(|r| r.user_uuid == user_uuid && r.ingredient_uuid == ingredient_uuid)
                .ok_or_else(|| {
                    AppError::not_found(
                        "fridge_ingredient",
                        "(user_uuid, ingredient_uuid)",
                        format!("({}, {})", user_uuid, ingredient_uuid),
                    )
                })?;
            row.amount = changes.amount;
            row.unit = changes.unit;
            row.purchased_date = changes.purchased_date;
            row.expiration_date = changes.expiration_date;
            row.updated_at = Utc::now();
            Ok(row.clone())
        }

        async fn delete(&self, user_uuid: Uuid, ingredient_uuid: Uuid) -> AppResult<()> {
            let mut rows = self.rows.lock().unwrap();
            let before = rows.len();
            rows.retain(|r| !(r.user_uuid == user_uuid && r.ingredient_uuid == ingredient_uuid));
            if rows.len() == before {
                return Err(AppError::not_found(
                    "fridge_ingredient",
                    "(user_uuid, ingredient_uuid)",
                    format!("({}, {})", user_uuid, ingredient_uuid),
                ));
            }
            Ok(())
        }
    }

    fn input(purchased: DateTime<Utc>) -> FridgeItemInput {
        FridgeItemInput {
            amount: 3,
            unit: "pcs".to_string(),
            purchased_date: purchased,
        }
    }

    #[tokio::test]
    async fn add_item_computes_expiration_from_shelf_life() {
        let ingredient = garlic(); // 30 days of shelf life
        let ingredient_id = ingredient.ingredient_uuid;
        let service = FridgeService::new(
            Arc::new(MockFridgeStore::default()),
            MockIngredientStore::with_ingredient(ingredient),
        );

        let purchased = Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap();
        let row = service
            .add_item(Uuid::new_v4(), ingredient_id, input(purchased))
            .await
            .unwrap();

        assert_eq!(row.purchased_date, purchased);
        assert_eq!(
            row.expiration_date,
            Utc.with_ymd_and_hms(2024, 3, 31, 12, 0, 0).unwrap()
        );
    }

    #[tokio::test]
    async fn add_item_with_unknown_ingredient_is_not_found() {
        let service = FridgeService::new(
            Arc::new(MockFridgeStore::default()),
            Arc::new(MockIngredientStore::default()),
        );

        let err = service
            .add_item(Uuid::new_v4(), Uuid::new_v4(), input(Utc::now()))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::NotFound { .. }));
    }

    #[tokio::test]
    async fn update_item_recomputes_expiration() {
        let ingredient = garlic();
        let ingredient_id = ingredient.ingredient_uuid;
        let user_id = Uuid::new_v4();
        let service = FridgeService::new(
            Arc::new(MockFridgeStore::default()),
            MockIngredientStore::with_ingredient(ingredient),
        );

        let first_purchase = Utc.with_ymd_and_hms(2024, 3, 1, 0, 0, 0).unwrap();
        service
            .add_item(user_id, ingredient_id, input(first_purchase))
            .await
            .unwrap();

        let later_purchase = Utc.with_ymd_and_hms(2024, 4, 10, 0, 0, 0).unwrap();
        let updated = service
            .update_item(user_id, ingredient_id, input(later_purchase))
            .await
            .unwrap();

        assert_eq!(
            updated.expiration_date,
            Utc.with_ymd_and_hms(2024, 5, 10, 0, 0, 0).unwrap()
        );
    }

    #[tokio::test]
    async fn remove_missing_pair_is_not_found() {
        let ingredient = garlic();
        let ingredient_id = ingredient.ingredient_uuid;
        let service = FridgeService::new(
            Arc::new(MockFridgeStore::default()),
            MockIngredientStore::with_ingredient(ingredient),
        );

        let err = service
            .remove_item(Uuid::new_v4(), ingredient_id)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::NotFound { .. }));
    }
}
