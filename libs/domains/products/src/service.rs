//! Product use-case: the five catalog operations over a [`ProductRepository`]

use rust_decimal::Decimal;
use std::sync::Arc;
use tracing::instrument;
use uuid::Uuid;
use validator::Validate;

use crate::error::{ProductError, ProductResult};
use crate::models::{CreateProduct, PriceRange, Product, UpdateProduct};
use crate::repository::ProductRepository;

/// Product catalog operations
///
/// Validates input shapes, turns missing records into
/// [`ProductError::NotFound`], and delegates storage to the repository.
pub struct ProductService<R: ProductRepository> {
    repository: Arc<R>,
}

impl<R: ProductRepository> ProductService<R> {
    pub fn new(repository: R) -> Self {
        Self {
            repository: Arc::new(repository),
        }
    }

    /// Build a full record from `input`, store it and return it.
    #[instrument(skip(self, input), fields(product_name = %input.name))]
    pub async fn create(&self, input: CreateProduct) -> ProductResult<Product> {
        input.validate()?;
        self.repository.insert(Product::new(input)).await
    }

    #[instrument(skip(self))]
    pub async fn get(&self, id: Uuid) -> ProductResult<Product> {
        self.repository
            .get_by_id(id)
            .await?
            .ok_or(ProductError::NotFound(id))
    }

    /// Products priced within the given bounds; a missing bound is open.
    #[instrument(skip(self))]
    pub async fn query(
        &self,
        min_price: Option<Decimal>,
        max_price: Option<Decimal>,
    ) -> ProductResult<Vec<Product>> {
        self.repository
            .find_by_price(PriceRange::new(min_price, max_price))
            .await
    }

    /// Apply the set fields of `patch` to an existing product.
    #[instrument(skip(self, patch))]
    pub async fn update(&self, id: Uuid, patch: UpdateProduct) -> ProductResult<Product> {
        patch.validate()?;

        let mut product = self.get(id).await?;
        product.apply_update(patch);

        self.repository.replace(product).await
    }

    /// Remove a product. Missing ids fail before any delete is issued.
    #[instrument(skip(self))]
    pub async fn delete(&self, id: Uuid) -> ProductResult<bool> {
        if self.repository.get_by_id(id).await?.is_none() {
            return Err(ProductError::NotFound(id));
        }

        self.repository.delete(id).await
    }
}

impl<R: ProductRepository> Clone for ProductService<R> {
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::MockProductRepository;
    use mockall::predicate::eq;
    use rust_decimal::dec;

    fn stored_product() -> Product {
        Product::new(CreateProduct {
            name: "Iphone 14 Pro Max".to_string(),
            quantity: 10,
            price: dec!(8500.00),
            status: true,
        })
    }

    #[tokio::test]
    async fn test_create_returns_inserted_record() {
        let mut mock_repo = MockProductRepository::new();
        mock_repo
            .expect_insert()
            .times(1)
            .returning(|product| Ok(product));

        let service = ProductService::new(mock_repo);
        let created = service
            .create(CreateProduct {
                name: "Galaxy S23".to_string(),
                quantity: 3,
                price: dec!(4999.90),
                status: true,
            })
            .await
            .unwrap();

        assert_eq!(created.name, "Galaxy S23");
        assert_eq!(created.quantity, 3);
        assert_eq!(created.price, dec!(4999.90));
        assert!(created.status);
        assert_eq!(created.created_at, created.updated_at);
    }

    #[tokio::test]
    async fn test_create_rejects_invalid_input_without_touching_storage() {
        let mut mock_repo = MockProductRepository::new();
        mock_repo.expect_insert().never();

        let service = ProductService::new(mock_repo);
        let result = service
            .create(CreateProduct {
                name: String::new(),
                quantity: 1,
                price: dec!(1),
                status: true,
            })
            .await;

        assert!(matches!(result, Err(ProductError::Validation(_))));
    }

    #[tokio::test]
    async fn test_create_propagates_insertion_failure() {
        let mut mock_repo = MockProductRepository::new();
        mock_repo.expect_insert().returning(|product| {
            Err(ProductError::Insertion(format!(
                "product {} already exists",
                product.id
            )))
        });

        let service = ProductService::new(mock_repo);
        let result = service
            .create(CreateProduct {
                name: "Pixel 8".to_string(),
                quantity: 1,
                price: dec!(3000),
                status: false,
            })
            .await;

        assert!(matches!(result, Err(ProductError::Insertion(_))));
    }

    #[tokio::test]
    async fn test_get_returns_stored_product() {
        let product = stored_product();
        let id = product.id;
        let mut mock_repo = MockProductRepository::new();
        let stored = product.clone();
        mock_repo
            .expect_get_by_id()
            .with(eq(id))
            .returning(move |_| Ok(Some(stored.clone())));

        let service = ProductService::new(mock_repo);
        assert_eq!(service.get(id).await.unwrap(), product);
    }

    #[tokio::test]
    async fn test_get_missing_is_not_found() {
        let id = Uuid::now_v7();
        let mut mock_repo = MockProductRepository::new();
        mock_repo
            .expect_get_by_id()
            .with(eq(id))
            .returning(|_| Ok(None));

        let service = ProductService::new(mock_repo);
        let result = service.get(id).await;

        assert!(matches!(result, Err(ProductError::NotFound(missing)) if missing == id));
    }

    #[tokio::test]
    async fn test_query_passes_bounds_through() {
        let mut mock_repo = MockProductRepository::new();
        mock_repo
            .expect_find_by_price()
            .with(eq(PriceRange::new(Some(dec!(10)), Some(dec!(20)))))
            .times(1)
            .returning(|_| Ok(vec![]));

        let service = ProductService::new(mock_repo);
        let products = service.query(Some(dec!(10)), Some(dec!(20))).await.unwrap();
        assert!(products.is_empty());
    }

    #[tokio::test]
    async fn test_query_with_only_max_price() {
        let cheap = stored_product();
        let mut mock_repo = MockProductRepository::new();
        mock_repo
            .expect_find_by_price()
            .with(eq(PriceRange::new(None, Some(dec!(9000)))))
            .returning(move |_| Ok(vec![cheap.clone()]));

        let service = ProductService::new(mock_repo);
        let products = service.query(None, Some(dec!(9000))).await.unwrap();
        assert_eq!(products.len(), 1);
    }

    #[tokio::test]
    async fn test_update_merges_only_set_fields() {
        let product = stored_product();
        let id = product.id;
        let stored = product.clone();

        let mut mock_repo = MockProductRepository::new();
        mock_repo
            .expect_get_by_id()
            .with(eq(id))
            .returning(move |_| Ok(Some(stored.clone())));
        mock_repo
            .expect_replace()
            .times(1)
            .returning(|product| Ok(product));

        let service = ProductService::new(mock_repo);
        let updated = service
            .update(
                id,
                UpdateProduct {
                    quantity: Some(3),
                    status: Some(false),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.id, id);
        assert_eq!(updated.quantity, 3);
        assert!(!updated.status);
        assert_eq!(updated.name, product.name);
        assert_eq!(updated.price, product.price);
        assert_eq!(updated.created_at, product.created_at);
        assert!(updated.updated_at > product.updated_at);
    }

    #[tokio::test]
    async fn test_update_missing_is_not_found_and_skips_write() {
        let id = Uuid::now_v7();
        let mut mock_repo = MockProductRepository::new();
        mock_repo.expect_get_by_id().returning(|_| Ok(None));
        mock_repo.expect_replace().never();

        let service = ProductService::new(mock_repo);
        let result = service
            .update(
                id,
                UpdateProduct {
                    price: Some(dec!(1)),
                    ..Default::default()
                },
            )
            .await;

        assert!(matches!(result, Err(ProductError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_update_rejects_negative_price() {
        let mut mock_repo = MockProductRepository::new();
        mock_repo.expect_get_by_id().never();
        mock_repo.expect_replace().never();

        let service = ProductService::new(mock_repo);
        let result = service
            .update(
                Uuid::now_v7(),
                UpdateProduct {
                    price: Some(dec!(-1)),
                    ..Default::default()
                },
            )
            .await;

        assert!(matches!(result, Err(ProductError::Validation(_))));
    }

    #[tokio::test]
    async fn test_delete_existing_reports_true() {
        let product = stored_product();
        let id = product.id;
        let mut mock_repo = MockProductRepository::new();
        mock_repo
            .expect_get_by_id()
            .with(eq(id))
            .returning(move |_| Ok(Some(product.clone())));
        mock_repo
            .expect_delete()
            .with(eq(id))
            .times(1)
            .returning(|_| Ok(true));

        let service = ProductService::new(mock_repo);
        assert!(service.delete(id).await.unwrap());
    }

    #[tokio::test]
    async fn test_delete_missing_fails_before_deleting() {
        let id = Uuid::now_v7();
        let mut mock_repo = MockProductRepository::new();
        mock_repo.expect_get_by_id().returning(|_| Ok(None));
        mock_repo.expect_delete().never();

        let service = ProductService::new(mock_repo);
        let result = service.delete(id).await;

        assert!(matches!(result, Err(ProductError::NotFound(missing)) if missing == id));
    }
}
