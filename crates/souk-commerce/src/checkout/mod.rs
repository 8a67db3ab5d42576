//! Checkout types: the stage machine and the immutable order record.

mod order;
mod stage;

pub use order::{generate_order_number, Order, OrderCart};
pub use stage::CheckoutStage;
