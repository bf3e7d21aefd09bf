use std::sync::Arc;
use tracing::instrument;
use validator::Validate;

use crate::error::{ProductError, ProductResult};
use crate::models::{Product, ProductDraft};
use crate::repository::ProductRepository;

/// Service layer for Product business logic
#[derive(Clone)]
pub struct ProductService<R: ProductRepository> {
    repository: Arc<R>,
}

impl<R: ProductRepository> ProductService<R> {
    pub fn new(repository: R) -> Self {
        Self {
            repository: Arc::new(repository),
        }
    }

    #[instrument(skip(self))]
    pub async fn find_all(&self) -> ProductResult<Vec<Product>> {
        self.repository.find_all().await
    }

    #[instrument(skip(self))]
    pub async fn find_by_id(&self, id: i64) -> ProductResult<Product> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or(ProductError::NotFound(id))
    }

    #[instrument(skip(self, draft), fields(name = %draft.name))]
    pub async fn create(&self, draft: ProductDraft) -> ProductResult<Product> {
        validate(&draft)?;
        self.repository.insert(draft).await
    }

    /// Replace the mutable fields of product `id`.
    #[instrument(skip(self, draft))]
    pub async fn update(&self, id: i64, draft: ProductDraft) -> ProductResult<Product> {
        validate(&draft)?;

        let mut product = self.find_by_id(id).await?;
        product.apply_draft(draft);

        self.repository.save(product).await
    }

    /// Delete product `id`. Deleting an unknown id is not an error.
    #[instrument(skip(self))]
    pub async fn delete(&self, id: i64) -> ProductResult<()> {
        if !self.repository.delete_by_id(id).await? {
            tracing::debug!(product_id = id, "Nothing to delete");
        }
        Ok(())
    }
}

fn validate(draft: &ProductDraft) -> ProductResult<()> {
    draft
        .validate()
        .map_err(|e| ProductError::Validation(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::MockProductRepository;
    use chrono::Utc;
    use mockall::predicate::eq;
    use rust_decimal::Decimal;

    fn product(id: i64, name: &str) -> Product {
        Product {
            id,
            name: name.to_string(),
            description: Some("desc".to_string()),
            price: Decimal::new(50, 0),
            quantity: 1,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn draft(name: &str) -> ProductDraft {
        ProductDraft {
            name: name.to_string(),
            description: None,
            price: Decimal::new(700, 2),
            quantity: 7,
        }
    }

    #[tokio::test]
    async fn test_find_all_passes_through() {
        let mut mock_repo = MockProductRepository::new();
        mock_repo
            .expect_find_all()
            .times(1)
            .returning(|| Ok(vec![product(1, "P1"), product(2, "P2")]));

        let service = ProductService::new(mock_repo);
        let products = service.find_all().await.unwrap();

        let names: Vec<_> = products.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, ["P1", "P2"]);
    }

    #[tokio::test]
    async fn test_find_by_id_missing_is_not_found() {
        let mut mock_repo = MockProductRepository::new();
        mock_repo
            .expect_find_by_id()
            .with(eq(99))
            .returning(|_| Ok(None));

        let service = ProductService::new(mock_repo);
        let err = service.find_by_id(99).await.unwrap_err();

        assert!(matches!(err, ProductError::NotFound(99)));
        assert_eq!(err.to_string(), "Product not found with id 99");
    }

    #[tokio::test]
    async fn test_create_delegates_to_insert() {
        let mut mock_repo = MockProductRepository::new();
        mock_repo
            .expect_insert()
            .withf(|d| d.name == "New" && d.quantity == 7)
            .returning(|d| {
                let mut p = product(10, &d.name);
                p.quantity = d.quantity;
                Ok(p)
            });

        let service = ProductService::new(mock_repo);
        let created = service.create(draft("New")).await.unwrap();

        assert_eq!(created.id, 10);
        assert_eq!(created.quantity, 7);
    }

    #[tokio::test]
    async fn test_create_rejects_invalid_draft_without_touching_store() {
        let mut mock_repo = MockProductRepository::new();
        mock_repo.expect_insert().never();

        let service = ProductService::new(mock_repo);
        let mut bad = draft("Bad");
        bad.price = Decimal::new(-1, 0);

        let err = service.create(bad).await.unwrap_err();
        assert!(matches!(err, ProductError::Validation(_)));
    }

    #[tokio::test]
    async fn test_update_overwrites_fields_and_keeps_identity() {
        let existing = product(5, "Solo");
        let created_at = existing.created_at;

        let mut mock_repo = MockProductRepository::new();
        mock_repo
            .expect_find_by_id()
            .with(eq(5))
            .returning(move |_| Ok(Some(existing.clone())));
        mock_repo
            .expect_save()
            .withf(move |p| p.id == 5 && p.name == "Renamed" && p.created_at == created_at)
            .returning(Ok);

        let service = ProductService::new(mock_repo);
        let updated = service.update(5, draft("Renamed")).await.unwrap();

        assert_eq!(updated.id, 5);
        assert_eq!(updated.name, "Renamed");
        assert_eq!(updated.description, None);
        assert_eq!(updated.price, Decimal::new(7, 0));
        assert_eq!(updated.quantity, 7);
    }

    #[tokio::test]
    async fn test_update_missing_is_not_found_and_never_saves() {
        let mut mock_repo = MockProductRepository::new();
        mock_repo.expect_find_by_id().returning(|_| Ok(None));
        mock_repo.expect_save().never();

        let service = ProductService::new(mock_repo);
        let err = service.update(42, draft("X")).await.unwrap_err();

        assert!(matches!(err, ProductError::NotFound(42)));
    }

    #[tokio::test]
    async fn test_delete_is_idempotent() {
        let mut mock_repo = MockProductRepository::new();
        mock_repo
            .expect_delete_by_id()
            .with(eq(8))
            .times(2)
            .returning({
                let mut removed = false;
                move |_| {
                    let was_present = !removed;
                    removed = true;
                    Ok(was_present)
                }
            });

        let service = ProductService::new(mock_repo);
        assert!(service.delete(8).await.is_ok());
        assert!(service.delete(8).await.is_ok());
    }

    #[tokio::test]
    async fn test_store_errors_propagate() {
        let mut mock_repo = MockProductRepository::new();
        mock_repo
            .expect_find_all()
            .returning(|| Err(ProductError::Internal("store offline".to_string())));

        let service = ProductService::new(mock_repo);
        let err = service.find_all().await.unwrap_err();
        assert!(matches!(err, ProductError::Internal(_)));
    }
}
