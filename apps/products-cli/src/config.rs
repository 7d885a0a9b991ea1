//! Configuration for the products CLI

use core_config::{FromEnv, env_or_default};
use database::mongodb::MongoConfig;
use domain_products::PRODUCTS_COLLECTION;

pub use core_config::Environment;

#[derive(Debug, Clone)]
pub struct Config {
    pub environment: Environment,
    pub mongodb: MongoConfig,
    /// Collection holding the catalog, `PRODUCTS_COLLECTION`
    pub collection: String,
}

impl Config {
    pub fn from_env() -> eyre::Result<Self> {
        Ok(Self {
            environment: Environment::from_env(),
            mongodb: MongoConfig::from_env()?,
            collection: env_or_default("PRODUCTS_COLLECTION", PRODUCTS_COLLECTION),
        })
    }
}
