use async_trait::async_trait;
use uuid::Uuid;

use crate::error::ProductResult;
use crate::models::{PriceRange, Product};

/// Persistence for products
///
/// Implementations store complete records; merging partial updates and
/// turning missing records into errors is the service's job.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProductRepository: Send + Sync {
    /// Insert a new record; fails with `ProductError::Insertion` on any insert error
    async fn insert(&self, product: Product) -> ProductResult<Product>;

    /// Look up a record by its application-level id
    async fn get_by_id(&self, id: Uuid) -> ProductResult<Option<Product>>;

    /// Records whose price falls inside `range`, cheapest first
    async fn find_by_price(&self, range: PriceRange) -> ProductResult<Vec<Product>>;

    /// Overwrite the stored record with the same id; `ProductError::NotFound` if none matched
    async fn replace(&self, product: Product) -> ProductResult<Product>;

    /// Delete by id, reporting whether a document was removed
    async fn delete(&self, id: Uuid) -> ProductResult<bool>;
}
