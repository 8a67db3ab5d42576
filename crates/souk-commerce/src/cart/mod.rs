//! Shopping cart types.

mod cart;

pub use cart::{Cart, CartDisposition, LineItem};
