//! Order types.
//!
//! An order is an immutable snapshot of a cart plus payment and shipping
//! metadata, created at successful checkout and never updated afterwards.

use crate::cart::{Cart, LineItem};
use crate::error::CommerceError;
use crate::ids::{AccountId, OrderId};
use crate::money::Money;
use serde::{Deserialize, Serialize};

/// Immutable copy of a cart embedded in an order.
///
/// The snapshot owns its items; mutating the live cart after checkout has
/// no effect on it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OrderCart {
    /// Line items as they were at checkout.
    pub items: Vec<LineItem>,
    /// Aggregate quantity at checkout.
    pub total_qty: i64,
    /// Aggregate cost at checkout.
    pub total_cost: Money,
}

/// A completed order.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Order {
    /// Unique order identifier.
    pub id: OrderId,
    /// Human-readable order number (unique, 6 decimal digits).
    pub order_number: String,
    /// Owning account.
    pub account_id: AccountId,
    /// Immutable copy of the cart at checkout.
    pub cart: OrderCart,
    /// Shipping address supplied at checkout.
    pub address: String,
    /// Charge reference returned by the payment collaborator.
    pub payment_ref: String,
    /// Unix timestamp of creation.
    pub created_at: i64,
}

impl Order {
    /// Build an order from a cart at successful checkout.
    ///
    /// Fails if the cart is empty; a checkout must never record an order
    /// with nothing in it.
    pub fn from_cart(
        order_number: impl Into<String>,
        account_id: AccountId,
        cart: &Cart,
        address: impl Into<String>,
        payment_ref: impl Into<String>,
    ) -> Result<Self, CommerceError> {
        if cart.is_empty() {
            return Err(CommerceError::EmptyCart);
        }
        Ok(Self {
            id: OrderId::generate(),
            order_number: order_number.into(),
            account_id,
            cart: OrderCart {
                items: cart.items.clone(),
                total_qty: cart.total_qty,
                total_cost: cart.total_cost,
            },
            address: address.into(),
            payment_ref: payment_ref.into(),
            created_at: crate::current_timestamp(),
        })
    }

    /// Total item count in the order.
    pub fn item_count(&self) -> i64 {
        self.cart.total_qty
    }
}

/// Generate a candidate order number: 6 random decimal digits.
///
/// Uniqueness is enforced by the store on insert; callers regenerate on
/// collision.
pub fn generate_order_number() -> String {
    use rand::Rng;

    let n: u32 = rand::thread_rng().gen_range(0..1_000_000);
    format!("{:06}", n)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ids::CategoryId;
    use crate::money::Currency;
    use crate::Product;

    fn cart_with_items() -> (Cart, Product) {
        let mut cart = Cart::new(Currency::AED);
        let product = Product::new(
            "Kettle",
            "KTL-1",
            Money::new(1500, Currency::AED),
            5,
            CategoryId::generate(),
        )
        .unwrap();
        cart.add_item(&product).unwrap();
        cart.add_item(&product).unwrap();
        (cart, product)
    }

    #[test]
    fn test_order_snapshots_cart() {
        let (cart, _) = cart_with_items();
        let order = Order::from_cart(
            generate_order_number(),
            AccountId::generate(),
            &cart,
            "12 Palm Street, Dubai",
            "ch_test_1",
        )
        .unwrap();

        assert_eq!(order.cart.total_qty, 2);
        assert_eq!(order.cart.total_cost.minor_units, 3000);
        assert_eq!(order.cart.items.len(), 1);
    }

    #[test]
    fn test_order_totals_immutable_after_cart_mutation() {
        let (mut cart, product) = cart_with_items();
        let order = Order::from_cart(
            generate_order_number(),
            AccountId::generate(),
            &cart,
            "12 Palm Street, Dubai",
            "ch_test_1",
        )
        .unwrap();

        // Keep shopping after checkout; the recorded order must not move.
        cart.add_item(&product).unwrap();
        cart.add_item(&product).unwrap();

        assert_eq!(order.cart.total_qty, 2);
        assert_eq!(order.cart.total_cost.minor_units, 3000);
        assert_eq!(cart.total_qty, 4);
    }

    #[test]
    fn test_empty_cart_rejected() {
        let cart = Cart::new(Currency::AED);
        let result = Order::from_cart(
            generate_order_number(),
            AccountId::generate(),
            &cart,
            "nowhere",
            "ch_test_1",
        );
        assert!(matches!(result, Err(CommerceError::EmptyCart)));
    }

    #[test]
    fn test_order_number_shape() {
        let n = generate_order_number();
        assert_eq!(n.len(), 6);
        assert!(n.chars().all(|c| c.is_ascii_digit()));
    }
}
