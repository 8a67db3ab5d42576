//! Cart and line item types.
//!
//! The cart keeps running aggregates (`total_qty`, `total_cost`) that are
//! updated incrementally by every mutation rather than derived on read.
//! A cart whose aggregate quantity drops to zero must not persist; mutations
//! report that through [`CartDisposition`] so the caller can delete the
//! record and clear the session.

use crate::error::CommerceError;
use crate::ids::{AccountId, CartId, ProductId};
use crate::money::{Currency, Money};
use crate::Product;
use serde::{Deserialize, Serialize};

/// What to do with the cart after a mutation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CartDisposition {
    /// The cart still holds items and should be kept.
    Active,
    /// The aggregate quantity reached zero; the persisted record must be
    /// removed and the session reference cleared.
    Depleted,
}

/// A shopping cart, owned by either a browser session or one account.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Cart {
    /// Unique cart identifier.
    pub id: CartId,
    /// Owning account, once the customer has signed in.
    pub account_id: Option<AccountId>,
    /// Items in the cart.
    pub items: Vec<LineItem>,
    /// Aggregate quantity: sum of item quantities.
    pub total_qty: i64,
    /// Aggregate cost: sum of item line totals.
    pub total_cost: Money,
    /// Cart currency.
    pub currency: Currency,
    /// Unix timestamp of creation.
    pub created_at: i64,
    /// Unix timestamp of last update.
    pub updated_at: i64,
}

impl Cart {
    /// Create a new empty cart for an anonymous session.
    pub fn new(currency: Currency) -> Self {
        let now = crate::current_timestamp();
        Self {
            id: CartId::generate(),
            account_id: None,
            items: Vec::new(),
            total_qty: 0,
            total_cost: Money::zero(currency),
            currency,
            created_at: now,
            updated_at: now,
        }
    }

    /// Adopt the cart into an account, e.g. when the customer signs in or
    /// signs up with a session cart in hand.
    pub fn assign_account(&mut self, account_id: AccountId) {
        self.account_id = Some(account_id);
        self.updated_at = crate::current_timestamp();
    }

    /// Add one unit of a product.
    ///
    /// If the product is already in the cart its quantity grows by one and
    /// the line price is recomputed as quantity x unit price; otherwise a
    /// new line item with quantity 1 is appended. Display fields are
    /// snapshotted from the product at add time.
    pub fn add_item(&mut self, product: &Product) -> Result<(), CommerceError> {
        let unit = self.checked_unit_price(product)?;

        if let Some(item) = self.items.iter_mut().find(|i| i.product_id == product.id) {
            item.qty = item.qty.checked_add(1).ok_or(CommerceError::Overflow)?;
            item.price = unit
                .try_multiply(item.qty)
                .ok_or(CommerceError::Overflow)?;
        } else {
            self.items.push(LineItem {
                product_id: product.id.clone(),
                qty: 1,
                price: unit,
                title: product.name.clone(),
                code: product.code.clone(),
            });
        }

        self.total_qty += 1;
        self.total_cost = self
            .total_cost
            .try_add(&unit)
            .ok_or(CommerceError::Overflow)?;
        self.updated_at = crate::current_timestamp();
        Ok(())
    }

    /// Remove one unit of a product.
    ///
    /// The line price and both aggregates shrink by one unit price. A line
    /// item that reaches quantity zero is removed outright.
    pub fn decrement_item(&mut self, product: &Product) -> Result<CartDisposition, CommerceError> {
        let unit = self.checked_unit_price(product)?;
        let idx = self
            .items
            .iter()
            .position(|i| i.product_id == product.id)
            .ok_or_else(|| CommerceError::ItemNotInCart(product.id.to_string()))?;

        {
            let item = &mut self.items[idx];
            item.qty -= 1;
            item.price = item
                .price
                .try_subtract(&unit)
                .ok_or(CommerceError::Overflow)?;
        }
        if self.items[idx].qty <= 0 {
            self.items.remove(idx);
        }

        self.total_qty -= 1;
        self.total_cost = self
            .total_cost
            .try_subtract(&unit)
            .ok_or(CommerceError::Overflow)?;
        self.updated_at = crate::current_timestamp();
        Ok(self.disposition())
    }

    /// Remove every unit of a product in one step.
    pub fn remove_item(&mut self, product_id: &ProductId) -> Result<CartDisposition, CommerceError> {
        let idx = self
            .items
            .iter()
            .position(|i| &i.product_id == product_id)
            .ok_or_else(|| CommerceError::ItemNotInCart(product_id.to_string()))?;

        let item = self.items.remove(idx);
        self.total_qty -= item.qty;
        self.total_cost = self
            .total_cost
            .try_subtract(&item.price)
            .ok_or(CommerceError::Overflow)?;
        self.updated_at = crate::current_timestamp();
        Ok(self.disposition())
    }

    /// Whether the cart holds anything.
    pub fn is_empty(&self) -> bool {
        self.total_qty <= 0
    }

    /// Number of distinct products.
    pub fn unique_item_count(&self) -> usize {
        self.items.len()
    }

    /// Look up a line item by product.
    pub fn get_item(&self, product_id: &ProductId) -> Option<&LineItem> {
        self.items.iter().find(|i| &i.product_id == product_id)
    }

    fn disposition(&self) -> CartDisposition {
        if self.total_qty <= 0 {
            CartDisposition::Depleted
        } else {
            CartDisposition::Active
        }
    }

    fn checked_unit_price(&self, product: &Product) -> Result<Money, CommerceError> {
        if product.price.currency != self.currency {
            return Err(CommerceError::CurrencyMismatch {
                expected: self.currency.code().to_string(),
                got: product.price.currency.code().to_string(),
            });
        }
        Ok(product.price)
    }
}

/// A line item in the cart.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LineItem {
    /// Product being purchased.
    pub product_id: ProductId,
    /// Quantity, always at least 1 while the line exists.
    pub qty: i64,
    /// Line total: qty x unit price at time of add.
    pub price: Money,
    /// Product name snapshotted at add time.
    pub title: String,
    /// Product code snapshotted at add time.
    pub code: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ids::CategoryId;

    fn product(name: &str, code: &str, fils: i64) -> Product {
        Product::new(
            name,
            code,
            Money::new(fils, Currency::AED),
            10,
            CategoryId::generate(),
        )
        .unwrap()
    }

    #[test]
    fn test_add_to_empty_cart() {
        let mut cart = Cart::new(Currency::AED);
        let p = product("Kettle", "KTL-1", 1500);

        cart.add_item(&p).unwrap();

        assert_eq!(cart.total_qty, 1);
        assert_eq!(cart.total_cost.minor_units, 1500);
        assert_eq!(cart.unique_item_count(), 1);
        let item = cart.get_item(&p.id).unwrap();
        assert_eq!(item.qty, 1);
        assert_eq!(item.price.minor_units, 1500);
        assert_eq!(item.title, "Kettle");
        assert_eq!(item.code, "KTL-1");
    }

    #[test]
    fn test_add_same_product_twice() {
        let mut cart = Cart::new(Currency::AED);
        let p = product("Kettle", "KTL-1", 1500);

        cart.add_item(&p).unwrap();
        cart.add_item(&p).unwrap();

        assert_eq!(cart.unique_item_count(), 1);
        let item = cart.get_item(&p.id).unwrap();
        assert_eq!(item.qty, 2);
        assert_eq!(item.price.minor_units, 3000);
        assert_eq!(cart.total_qty, 2);
        assert_eq!(cart.total_cost.minor_units, 3000);
    }

    #[test]
    fn test_decrement_removes_line_at_zero() {
        let mut cart = Cart::new(Currency::AED);
        let a = product("Kettle", "KTL-1", 1500);
        let b = product("Toaster", "TST-1", 2000);

        cart.add_item(&a).unwrap();
        cart.add_item(&b).unwrap();

        let disposition = cart.decrement_item(&a).unwrap();
        assert_eq!(disposition, CartDisposition::Active);
        assert!(cart.get_item(&a.id).is_none());
        assert_eq!(cart.total_qty, 1);
        assert_eq!(cart.total_cost.minor_units, 2000);
    }

    #[test]
    fn test_decrement_last_item_depletes_cart() {
        let mut cart = Cart::new(Currency::AED);
        let p = product("Kettle", "KTL-1", 1500);
        cart.add_item(&p).unwrap();

        let disposition = cart.decrement_item(&p).unwrap();

        assert_eq!(disposition, CartDisposition::Depleted);
        assert_eq!(cart.total_qty, 0);
        assert_eq!(cart.total_cost.minor_units, 0);
        assert!(cart.is_empty());
    }

    #[test]
    fn test_remove_all_of_item() {
        let mut cart = Cart::new(Currency::AED);
        let a = product("Kettle", "KTL-1", 1500);
        let b = product("Toaster", "TST-1", 2000);
        cart.add_item(&a).unwrap();
        cart.add_item(&a).unwrap();
        cart.add_item(&a).unwrap();
        cart.add_item(&b).unwrap();

        let disposition = cart.remove_item(&a.id).unwrap();

        assert_eq!(disposition, CartDisposition::Active);
        assert_eq!(cart.total_qty, 1);
        assert_eq!(cart.total_cost.minor_units, 2000);
    }

    #[test]
    fn test_remove_only_item_depletes_cart() {
        let mut cart = Cart::new(Currency::AED);
        let p = product("Kettle", "KTL-1", 1500);
        cart.add_item(&p).unwrap();
        cart.add_item(&p).unwrap();

        let disposition = cart.remove_item(&p.id).unwrap();
        assert_eq!(disposition, CartDisposition::Depleted);
    }

    #[test]
    fn test_decrement_missing_item_is_an_error() {
        let mut cart = Cart::new(Currency::AED);
        let p = product("Kettle", "KTL-1", 1500);
        assert!(matches!(
            cart.decrement_item(&p),
            Err(CommerceError::ItemNotInCart(_))
        ));
    }

    #[test]
    fn test_currency_mismatch_rejected() {
        let mut cart = Cart::new(Currency::AED);
        let mut p = product("Kettle", "KTL-1", 1500);
        p.price = Money::new(1500, Currency::USD);
        assert!(matches!(
            cart.add_item(&p),
            Err(CommerceError::CurrencyMismatch { .. })
        ));
    }

    #[test]
    fn test_assign_account() {
        let mut cart = Cart::new(Currency::AED);
        let account = AccountId::generate();
        cart.assign_account(account.clone());
        assert_eq!(cart.account_id, Some(account));
    }
}
