use chrono::{DateTime, SubsecRound, TimeDelta, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::{Validate, ValidationError};

/// A catalog entry
///
/// Timestamps carry millisecond precision, which is what the database stores,
/// so a record read back compares equal to the one that was written.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    /// Application-level identifier (not MongoDB's `_id`)
    pub id: Uuid,
    pub name: String,
    /// Units on hand
    pub quantity: i32,
    pub price: Decimal,
    /// Whether the product is active in the catalog
    pub status: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Input for creating a product
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateProduct {
    #[validate(length(min = 1, max = 200))]
    pub name: String,
    #[validate(range(min = 0))]
    pub quantity: i32,
    #[validate(custom(function = "validate_price"))]
    pub price: Decimal,
    #[serde(default = "default_status")]
    pub status: bool,
}

/// Partial update: only the fields that are `Some` are applied
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Validate)]
#[validate(schema(function = "validate_update_price"))]
pub struct UpdateProduct {
    #[validate(length(min = 1, max = 200))]
    pub name: Option<String>,
    #[validate(range(min = 0))]
    pub quantity: Option<i32>,
    pub price: Option<Decimal>,
    pub status: Option<bool>,
}

/// Price bounds for [`crate::ProductService::query`]; both ends inclusive, absent ends open.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
pub struct PriceRange {
    pub min_price: Option<Decimal>,
    pub max_price: Option<Decimal>,
}

impl PriceRange {
    pub fn new(min_price: Option<Decimal>, max_price: Option<Decimal>) -> Self {
        Self {
            min_price,
            max_price,
        }
    }

    /// Whether `price` falls inside the range.
    pub fn contains(&self, price: Decimal) -> bool {
        self.min_price.is_none_or(|min| price >= min)
            && self.max_price.is_none_or(|max| price <= max)
    }
}

fn default_status() -> bool {
    true
}

fn validate_price(price: &Decimal) -> Result<(), ValidationError> {
    if price.is_sign_negative() && !price.is_zero() {
        return Err(ValidationError::new("price_negative"));
    }
    Ok(())
}

fn validate_update_price(update: &UpdateProduct) -> Result<(), ValidationError> {
    match update.price {
        Some(ref price) => validate_price(price),
        None => Ok(()),
    }
}

fn now_millis() -> DateTime<Utc> {
    Utc::now().trunc_subsecs(3)
}

impl Product {
    /// Build a new record with a fresh id and both timestamps set to now.
    pub fn new(input: CreateProduct) -> Self {
        let now = now_millis();
        Self {
            id: Uuid::now_v7(),
            name: input.name,
            quantity: input.quantity,
            price: input.price,
            status: input.status,
            created_at: now,
            updated_at: now,
        }
    }

    /// Merge the set fields of `update` and refresh `updated_at`.
    pub fn apply_update(&mut self, update: UpdateProduct) {
        if let Some(name) = update.name {
            self.name = name;
        }
        if let Some(quantity) = update.quantity {
            self.quantity = quantity;
        }
        if let Some(price) = update.price {
            self.price = price;
        }
        if let Some(status) = update.status {
            self.status = status;
        }
        self.touch();
    }

    // updated_at must move forward even when two writes land in the same millisecond.
    fn touch(&mut self) {
        let now = now_millis();
        self.updated_at = if now > self.updated_at {
            now
        } else {
            self.updated_at + TimeDelta::milliseconds(1)
        };
    }
}
