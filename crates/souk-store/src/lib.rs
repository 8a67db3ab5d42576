//! Embedded document store for Souk.
//!
//! Process-local collections for accounts, categories, products, carts and
//! orders, with uniqueness enforcement and filtered, sorted, paginated
//! reads. Shared across request handlers behind an `Arc`.

mod error;
mod store;

pub use error::StoreError;
pub use store::Store;
