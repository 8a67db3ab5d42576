//! Catalog types: categories and products.

mod category;
mod product;

pub use category::{slugify, Category};
pub use product::Product;
