use async_trait::async_trait;
use sea_orm::{ActiveModelTrait, DatabaseConnection, DbErr, EntityTrait, QueryOrder};

use crate::{
    entity,
    error::{ProductError, ProductResult},
    models::{Product, ProductDraft},
    repository::ProductRepository,
};

/// PostgreSQL implementation of [`ProductRepository`].
#[derive(Clone)]
pub struct PgProductRepository {
    db: DatabaseConnection,
}

impl PgProductRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl ProductRepository for PgProductRepository {
    async fn find_all(&self) -> ProductResult<Vec<Product>> {
        let models = entity::Entity::find()
            .order_by_asc(entity::Column::Id)
            .all(&self.db)
            .await?;

        Ok(models.into_iter().map(Product::from).collect())
    }

    async fn find_by_id(&self, id: i64) -> ProductResult<Option<Product>> {
        let model = entity::Entity::find_by_id(id).one(&self.db).await?;
        Ok(model.map(Product::from))
    }

    async fn insert(&self, draft: ProductDraft) -> ProductResult<Product> {
        let active_model: entity::ActiveModel = draft.into();
        let model = active_model.insert(&self.db).await?;

        tracing::info!(product_id = model.id, "Created product");
        Ok(model.into())
    }

    async fn save(&self, product: Product) -> ProductResult<Product> {
        let id = product.id;
        let active_model: entity::ActiveModel = product.into();

        match active_model.update(&self.db).await {
            Ok(model) => {
                tracing::info!(product_id = id, "Updated product");
                Ok(model.into())
            }
            // Deleted between the caller's read and this write
            Err(DbErr::RecordNotUpdated) => Err(ProductError::NotFound(id)),
            Err(e) => Err(e.into()),
        }
    }

    async fn delete_by_id(&self, id: i64) -> ProductResult<bool> {
        let result = entity::Entity::delete_by_id(id).exec(&self.db).await?;

        if result.rows_affected > 0 {
            tracing::info!(product_id = id, "Deleted product");
        }
        Ok(result.rows_affected > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use rust_decimal::Decimal;
    use sea_orm::{DatabaseBackend, MockDatabase, MockExecResult};

    fn model(id: i64, name: &str) -> entity::Model {
        let at = Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap();
        entity::Model {
            id,
            name: name.to_string(),
            description: None,
            price: Decimal::new(5000, 2),
            quantity: 1,
            created_at: at.into(),
            updated_at: at.into(),
        }
    }

    fn repo(db: MockDatabase) -> PgProductRepository {
        PgProductRepository::new(db.into_connection())
    }

    #[tokio::test]
    async fn test_find_all_maps_models() {
        let repo = repo(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([vec![model(1, "P1"), model(2, "P2")]]),
        );

        let products = repo.find_all().await.unwrap();

        assert_eq!(products.len(), 2);
        assert_eq!(products[0].name, "P1");
        assert_eq!(products[1].id, 2);
        assert_eq!(products[1].price, Decimal::new(50, 0));
    }

    #[tokio::test]
    async fn test_find_by_id_missing_is_none() {
        let repo = repo(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([Vec::<entity::Model>::new()]),
        );

        assert!(repo.find_by_id(5).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_insert_returns_store_assigned_id() {
        let repo = repo(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([vec![model(10, "New")]]),
        );

        let created = repo
            .insert(ProductDraft {
                name: "New".to_string(),
                description: None,
                price: Decimal::new(7, 0),
                quantity: 7,
            })
            .await
            .unwrap();

        assert_eq!(created.id, 10);
        assert_eq!(created.name, "New");
    }

    #[tokio::test]
    async fn test_save_of_vanished_row_is_not_found() {
        let repo = repo(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([Vec::<entity::Model>::new()]),
        );

        let err = repo.save(model(3, "Gone").into()).await.unwrap_err();
        assert!(matches!(err, ProductError::NotFound(3)));
    }

    #[tokio::test]
    async fn test_delete_reports_rows_affected() {
        let repo = repo(MockDatabase::new(DatabaseBackend::Postgres).append_exec_results([
            MockExecResult {
                last_insert_id: 0,
                rows_affected: 1,
            },
            MockExecResult {
                last_insert_id: 0,
                rows_affected: 0,
            },
        ]));

        assert!(repo.delete_by_id(8).await.unwrap());
        assert!(!repo.delete_by_id(8).await.unwrap());
    }

    #[tokio::test]
    async fn test_query_errors_propagate() {
        let repo = repo(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_errors([DbErr::Custom("connection reset".to_string())]),
        );

        let err = repo.find_all().await.unwrap_err();
        assert!(matches!(err, ProductError::Database(_)));
    }
}
