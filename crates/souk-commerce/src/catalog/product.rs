//! Product types.

use crate::catalog::slugify;
use crate::error::CommerceError;
use crate::ids::{CategoryId, ProductId};
use crate::money::Money;
use serde::{Deserialize, Serialize};

/// A product in the catalog.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Product {
    /// Unique product identifier.
    pub id: ProductId,
    /// Product name.
    pub name: String,
    /// Product code / stock keeping unit (unique).
    pub code: String,
    /// URL-friendly slug, derived from the name.
    pub slug: String,
    /// Unit price.
    pub price: Money,
    /// Quantity on hand. Decremented only at checkout.
    pub quantity: i64,
    /// Whether the product can currently be purchased.
    pub available: bool,
    /// Category this product belongs to.
    pub category_id: CategoryId,
    /// Path to the product image under the public images directory.
    pub image_path: Option<String>,
    /// Manufacturer name.
    pub manufacturer: Option<String>,
    /// Full description.
    pub description: Option<String>,
    /// Unix timestamp of creation.
    pub created_at: i64,
    /// Unix timestamp of last update.
    pub updated_at: i64,
}

impl Product {
    /// Create a new product.
    ///
    /// Returns an error if the price is negative or the quantity is negative.
    pub fn new(
        name: impl Into<String>,
        code: impl Into<String>,
        price: Money,
        quantity: i64,
        category_id: CategoryId,
    ) -> Result<Self, CommerceError> {
        if price.is_negative() {
            return Err(CommerceError::InvalidPrice(price.minor_units));
        }
        if quantity < 0 {
            return Err(CommerceError::InvalidQuantity(quantity));
        }
        let name = name.into();
        let now = crate::current_timestamp();
        Ok(Self {
            id: ProductId::generate(),
            slug: slugify(&name),
            name,
            code: code.into(),
            price,
            quantity,
            available: quantity > 0,
            category_id,
            image_path: None,
            manufacturer: None,
            description: None,
            created_at: now,
            updated_at: now,
        })
    }

    /// Check if the product is available for purchase.
    pub fn is_available(&self) -> bool {
        self.available
    }

    /// Deduct sold stock after a checkout.
    ///
    /// The quantity may go negative when concurrent checkouts race; the
    /// product is marked unavailable as soon as it reaches zero or below.
    pub fn deduct_stock(&mut self, sold: i64) {
        self.quantity -= sold;
        if self.quantity <= 0 {
            self.available = false;
        }
        self.updated_at = crate::current_timestamp();
    }

    /// Restock the product, making it available again if the level is positive.
    pub fn set_quantity(&mut self, quantity: i64) {
        self.quantity = quantity;
        self.available = quantity > 0;
        self.updated_at = crate::current_timestamp();
    }

    /// Update the unit price.
    pub fn set_price(&mut self, price: Money) -> Result<(), CommerceError> {
        if price.is_negative() {
            return Err(CommerceError::InvalidPrice(price.minor_units));
        }
        self.price = price;
        self.updated_at = crate::current_timestamp();
        Ok(())
    }
}
