//! Storefront domain types and logic for Souk.
//!
//! This crate provides the domain layer of the server-rendered storefront:
//!
//! - **Catalog**: categories and products
//! - **Cart**: session- or account-bound carts with running aggregates
//! - **Checkout**: the linear checkout stage machine and immutable orders
//! - **Listing**: pagination over catalog and admin listings
//!
//! # Example
//!
//! ```rust
//! use souk_commerce::prelude::*;
//!
//! let category = Category::new("Kitchen");
//! let product = Product::new(
//!     "Kettle",
//!     "KTL-1",
//!     Money::new(1500, Currency::AED),
//!     5,
//!     category.id.clone(),
//! )
//! .unwrap();
//!
//! let mut cart = Cart::new(Currency::AED);
//! cart.add_item(&product).unwrap();
//! assert_eq!(cart.total_cost, product.price);
//! ```

pub mod error;
pub mod ids;
pub mod listing;
pub mod money;

pub mod cart;
pub mod catalog;
pub mod checkout;

pub use cart::{Cart, CartDisposition, LineItem};
pub use catalog::{Category, Product};
pub use checkout::{generate_order_number, CheckoutStage, Order, OrderCart};
pub use error::CommerceError;
pub use ids::*;
pub use money::{Currency, Money};

/// Get current Unix timestamp.
pub fn current_timestamp() -> i64 {
    use std::time::{SystemTime, UNIX_EPOCH};
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs() as i64)
        .unwrap_or(0)
}

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::error::CommerceError;
    pub use crate::ids::*;
    pub use crate::money::{Currency, Money};

    // Catalog
    pub use crate::catalog::{slugify, Category, Product};

    // Cart
    pub use crate::cart::{Cart, CartDisposition, LineItem};

    // Checkout
    pub use crate::checkout::{generate_order_number, CheckoutStage, Order, OrderCart};

    // Listing
    pub use crate::listing::{Page, Pagination, ADMIN_PAGE_SIZE, SHOP_PAGE_SIZE};
}
