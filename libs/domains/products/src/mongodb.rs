//! MongoDB implementation of ProductRepository

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use futures::TryStreamExt;
use mongodb::{
    Collection, Database, IndexModel,
    bson::{self, Document, doc},
    options::{FindOptions, IndexOptions},
};
use rust_decimal::{Decimal, prelude::ToPrimitive};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use tracing::instrument;
use uuid::Uuid;

use crate::error::{ProductError, ProductResult};
use crate::models::{PriceRange, Product};
use crate::repository::ProductRepository;

/// Default collection name
pub const PRODUCTS_COLLECTION: &str = "products";

/// Stored shape of a product.
///
/// `id` is a binary UUID and timestamps are native BSON dates. The price is
/// kept twice: `price` is a double that `$gte`/`$lte` and the price index work
/// on, `price_text` is the exact decimal (scale included) that reads use.
/// MongoDB's own `_id` is left to the server and ignored on read.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct ProductDocument {
    id: bson::Uuid,
    name: String,
    quantity: i32,
    price: f64,
    price_text: String,
    status: bool,
    created_at: bson::DateTime,
    updated_at: bson::DateTime,
}

impl TryFrom<&Product> for ProductDocument {
    type Error = ProductError;

    fn try_from(product: &Product) -> ProductResult<Self> {
        Ok(Self {
            id: bson::Uuid::from(product.id),
            name: product.name.clone(),
            quantity: product.quantity,
            price: price_to_f64(product.price)?,
            price_text: product.price.to_string(),
            status: product.status,
            created_at: bson::DateTime::from_chrono(product.created_at),
            updated_at: bson::DateTime::from_chrono(product.updated_at),
        })
    }
}

impl TryFrom<ProductDocument> for Product {
    type Error = ProductError;

    fn try_from(doc: ProductDocument) -> ProductResult<Self> {
        Ok(Self {
            id: Uuid::from(doc.id),
            name: doc.name,
            quantity: doc.quantity,
            price: price_from_text(&doc.price_text)?,
            status: doc.status,
            created_at: DateTime::<Utc>::from(doc.created_at),
            updated_at: DateTime::<Utc>::from(doc.updated_at),
        })
    }
}

fn price_to_f64(value: Decimal) -> ProductResult<f64> {
    value
        .to_f64()
        .ok_or_else(|| ProductError::Validation(format!("price {} is out of range", value)))
}

fn price_from_text(text: &str) -> ProductResult<Decimal> {
    Decimal::from_str(text)
        .map_err(|e| ProductError::Database(format!("stored price {:?} is invalid: {}", text, e)))
}

/// MongoDB implementation of the ProductRepository
pub struct MongoProductRepository {
    collection: Collection<ProductDocument>,
}

impl MongoProductRepository {
    /// Repository over the `"products"` collection of `db`
    pub fn new(db: &Database) -> Self {
        Self::with_collection(db, PRODUCTS_COLLECTION)
    }

    pub fn with_collection(db: &Database, collection_name: &str) -> Self {
        let collection = db.collection::<ProductDocument>(collection_name);
        Self { collection }
    }

    /// Create the unique `id` index and the price index. Idempotent.
    pub async fn init_indexes(&self) -> ProductResult<()> {
        let indexes = vec![
            IndexModel::builder()
                .keys(doc! { "id": 1 })
                .options(
                    IndexOptions::builder()
                        .unique(true)
                        .name("idx_id_unique".to_string())
                        .build(),
                )
                .build(),
            IndexModel::builder()
                .keys(doc! { "price": 1 })
                .options(IndexOptions::builder().name("idx_price".to_string()).build())
                .build(),
        ];

        self.collection.create_indexes(indexes).await?;
        tracing::info!(collection = %self.collection.name(), "Product indexes ensured");
        Ok(())
    }

    fn id_filter(id: Uuid) -> Document {
        doc! { "id": bson::Uuid::from(id) }
    }

    /// Only the bounds that are present end up in the filter.
    fn build_price_filter(range: &PriceRange) -> ProductResult<Document> {
        let mut price = doc! {};
        if let Some(min) = range.min_price {
            price.insert("$gte", price_to_f64(min)?);
        }
        if let Some(max) = range.max_price {
            price.insert("$lte", price_to_f64(max)?);
        }

        if price.is_empty() {
            Ok(doc! {})
        } else {
            Ok(doc! { "price": price })
        }
    }
}

#[async_trait]
impl ProductRepository for MongoProductRepository {
    #[instrument(skip(self, product), fields(product_id = %product.id, product_name = %product.name))]
    async fn insert(&self, product: Product) -> ProductResult<Product> {
        let document = ProductDocument::try_from(&product)?;

        if let Err(e) = self.collection.insert_one(&document).await {
            tracing::warn!(error = %e, "Product insert failed");
            return Err(ProductError::insertion(product.id, &e));
        }

        tracing::info!(product_id = %product.id, "Product created successfully");
        Ok(product)
    }

    #[instrument(skip(self))]
    async fn get_by_id(&self, id: Uuid) -> ProductResult<Option<Product>> {
        let document = self.collection.find_one(Self::id_filter(id)).await?;
        document.map(Product::try_from).transpose()
    }

    #[instrument(skip(self))]
    async fn find_by_price(&self, range: PriceRange) -> ProductResult<Vec<Product>> {
        let filter = Self::build_price_filter(&range)?;

        let options = FindOptions::builder()
            .sort(doc! { "price": 1, "created_at": 1 })
            .build();

        let cursor = self.collection.find(filter).with_options(options).await?;
        let documents: Vec<ProductDocument> = cursor.try_collect().await?;

        documents.into_iter().map(Product::try_from).collect()
    }

    #[instrument(skip(self, product), fields(product_id = %product.id))]
    async fn replace(&self, product: Product) -> ProductResult<Product> {
        let result = self
            .collection
            .replace_one(Self::id_filter(product.id), ProductDocument::try_from(&product)?)
            .await?;

        if result.matched_count == 0 {
            return Err(ProductError::NotFound(product.id));
        }

        tracing::info!(product_id = %product.id, "Product updated successfully");
        Ok(product)
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: Uuid) -> ProductResult<bool> {
        let result = self.collection.delete_one(Self::id_filter(id)).await?;
        let deleted = result.deleted_count > 0;

        if deleted {
            tracing::info!(product_id = %id, "Product deleted successfully");
        }
        Ok(deleted)
    }
}
