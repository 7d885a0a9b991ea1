//! Products Domain
//!
//! Catalog entries stored in a single MongoDB collection (`"products"`),
//! keyed by an application-level UUID.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐
//! │   Service   │  ← create / get / query / update / delete, validation, not-found
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │ Repository  │  ← Data access (trait + MongoDB implementation)
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │   Models    │  ← Product, input shapes, price range
//! └─────────────┘
//! ```
//!
//! # Usage
//!
//! ```rust,no_run
//! use domain_products::{CreateProduct, MongoProductRepository, ProductService};
//! use rust_decimal::Decimal;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = mongodb::Client::with_uri_str("mongodb://localhost:27017").await?;
//! let db = client.database("store");
//!
//! let repository = MongoProductRepository::new(&db);
//! repository.init_indexes().await?;
//! let service = ProductService::new(repository);
//!
//! let product = service
//!     .create(CreateProduct {
//!         name: "Iphone 14 Pro Max".to_string(),
//!         quantity: 10,
//!         price: Decimal::new(850000, 2),
//!         status: true,
//!     })
//!     .await?;
//! let affordable = service.query(None, Some(Decimal::new(9000, 0))).await?;
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod models;
pub mod mongodb;
pub mod repository;
pub mod service;

pub use error::{ProductError, ProductResult};
pub use models::{CreateProduct, PriceRange, Product, UpdateProduct};
pub use crate::mongodb::{MongoProductRepository, PRODUCTS_COLLECTION};
pub use repository::ProductRepository;
pub use service::ProductService;
