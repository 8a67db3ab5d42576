//! The embedded document store.
//!
//! Five collections behind independent `RwLock`s. Individual reads and
//! writes are serialized; read-modify-write sequences are not, matching
//! the persistence semantics of the storefront (lost updates between
//! concurrent cart requests are possible and accepted).

use crate::StoreError;
use parking_lot::RwLock;
use souk_auth::Account;
use souk_commerce::ids::{AccountId, CartId, CategoryId, OrderId, ProductId};
use souk_commerce::listing::{Page, Pagination};
use souk_commerce::{Cart, Category, Order, Product};
use std::collections::HashMap;

/// In-process document store.
///
/// Cheap to share behind an `Arc`; all methods take `&self`.
#[derive(Default)]
pub struct Store {
    accounts: RwLock<HashMap<AccountId, Account>>,
    categories: RwLock<HashMap<CategoryId, Category>>,
    products: RwLock<HashMap<ProductId, Product>>,
    carts: RwLock<HashMap<CartId, Cart>>,
    orders: RwLock<HashMap<OrderId, Order>>,
}

impl Store {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    // ------------------------------------------------------------------
    // Accounts
    // ------------------------------------------------------------------

    /// Insert a new account. Email and username must be unused.
    ///
    /// Email comparison is case-insensitive.
    pub fn insert_account(&self, account: Account) -> Result<(), StoreError> {
        let mut accounts = self.accounts.write();
        let email = account.email.to_lowercase();
        for existing in accounts.values() {
            if existing.email.to_lowercase() == email {
                return Err(StoreError::Duplicate(format!("email {}", account.email)));
            }
            if existing.username == account.username {
                return Err(StoreError::Duplicate(format!(
                    "username {}",
                    account.username
                )));
            }
        }
        accounts.insert(account.id.clone(), account);
        Ok(())
    }

    /// Look up an account by ID.
    pub fn account(&self, id: &AccountId) -> Result<Account, StoreError> {
        self.accounts
            .read()
            .get(id)
            .cloned()
            .ok_or_else(|| StoreError::NotFound(format!("account {}", id)))
    }

    /// Find an account by email, case-insensitively.
    pub fn find_account_by_email(&self, email: &str) -> Option<Account> {
        let email = email.to_lowercase();
        self.accounts
            .read()
            .values()
            .find(|a| a.email.to_lowercase() == email)
            .cloned()
    }

    /// Replace a stored account.
    pub fn update_account(&self, account: Account) -> Result<(), StoreError> {
        let mut accounts = self.accounts.write();
        if !accounts.contains_key(&account.id) {
            return Err(StoreError::NotFound(format!("account {}", account.id)));
        }
        accounts.insert(account.id.clone(), account);
        Ok(())
    }

    /// Delete an account.
    pub fn delete_account(&self, id: &AccountId) -> Result<(), StoreError> {
        self.accounts
            .write()
            .remove(id)
            .map(|_| ())
            .ok_or_else(|| StoreError::NotFound(format!("account {}", id)))
    }

    /// List accounts, newest first, paginated.
    pub fn list_accounts(&self, page: i64, per_page: i64) -> Page<Account> {
        let accounts: Vec<Account> = self.accounts.read().values().cloned().collect();
        paginate(accounts, page, per_page, |a| (a.created_at, a.id.to_string()))
    }

    /// Total number of accounts.
    pub fn count_accounts(&self) -> i64 {
        self.accounts.read().len() as i64
    }

    // ------------------------------------------------------------------
    // Categories
    // ------------------------------------------------------------------

    /// Insert a new category. The slug must be unused.
    pub fn insert_category(&self, category: Category) -> Result<(), StoreError> {
        let mut categories = self.categories.write();
        if categories.values().any(|c| c.slug == category.slug) {
            return Err(StoreError::Duplicate(format!("slug {}", category.slug)));
        }
        categories.insert(category.id.clone(), category);
        Ok(())
    }

    /// Look up a category by ID.
    pub fn category(&self, id: &CategoryId) -> Result<Category, StoreError> {
        self.categories
            .read()
            .get(id)
            .cloned()
            .ok_or_else(|| StoreError::NotFound(format!("category {}", id)))
    }

    /// Find a category by slug.
    pub fn find_category_by_slug(&self, slug: &str) -> Option<Category> {
        self.categories
            .read()
            .values()
            .find(|c| c.slug == slug)
            .cloned()
    }

    /// Replace a stored category. The new slug must not belong to another
    /// category.
    pub fn update_category(&self, category: Category) -> Result<(), StoreError> {
        let mut categories = self.categories.write();
        if !categories.contains_key(&category.id) {
            return Err(StoreError::NotFound(format!("category {}", category.id)));
        }
        if categories
            .values()
            .any(|c| c.slug == category.slug && c.id != category.id)
        {
            return Err(StoreError::Duplicate(format!("slug {}", category.slug)));
        }
        categories.insert(category.id.clone(), category);
        Ok(())
    }

    /// Delete a category.
    pub fn delete_category(&self, id: &CategoryId) -> Result<(), StoreError> {
        self.categories
            .write()
            .remove(id)
            .map(|_| ())
            .ok_or_else(|| StoreError::NotFound(format!("category {}", id)))
    }

    /// All categories sorted by name, for navigation menus.
    pub fn list_categories(&self) -> Vec<Category> {
        let mut categories: Vec<Category> = self.categories.read().values().cloned().collect();
        categories.sort_by(|a, b| a.name.cmp(&b.name));
        categories
    }

    /// List categories, newest first, paginated.
    pub fn list_categories_page(&self, page: i64, per_page: i64) -> Page<Category> {
        let categories: Vec<Category> = self.categories.read().values().cloned().collect();
        paginate(categories, page, per_page, |c| {
            (c.created_at, c.id.to_string())
        })
    }

    /// Total number of categories.
    pub fn count_categories(&self) -> i64 {
        self.categories.read().len() as i64
    }

    // ------------------------------------------------------------------
    // Products
    // ------------------------------------------------------------------

    /// Insert a new product. The product code must be unused.
    pub fn insert_product(&self, product: Product) -> Result<(), StoreError> {
        let mut products = self.products.write();
        if products.values().any(|p| p.code == product.code) {
            return Err(StoreError::Duplicate(format!("code {}", product.code)));
        }
        products.insert(product.id.clone(), product);
        Ok(())
    }

    /// Look up a product by ID.
    pub fn product(&self, id: &ProductId) -> Result<Product, StoreError> {
        self.products
            .read()
            .get(id)
            .cloned()
            .ok_or_else(|| StoreError::NotFound(format!("product {}", id)))
    }

    /// Find a product by slug.
    pub fn find_product_by_slug(&self, slug: &str) -> Option<Product> {
        self.products
            .read()
            .values()
            .find(|p| p.slug == slug)
            .cloned()
    }

    /// Replace a stored product. The code must not belong to another
    /// product.
    pub fn update_product(&self, product: Product) -> Result<(), StoreError> {
        let mut products = self.products.write();
        if !products.contains_key(&product.id) {
            return Err(StoreError::NotFound(format!("product {}", product.id)));
        }
        if products
            .values()
            .any(|p| p.code == product.code && p.id != product.id)
        {
            return Err(StoreError::Duplicate(format!("code {}", product.code)));
        }
        products.insert(product.id.clone(), product);
        Ok(())
    }

    /// Delete a product.
    pub fn delete_product(&self, id: &ProductId) -> Result<(), StoreError> {
        self.products
            .write()
            .remove(id)
            .map(|_| ())
            .ok_or_else(|| StoreError::NotFound(format!("product {}", id)))
    }

    /// List all products, newest first, paginated.
    pub fn list_products(&self, page: i64, per_page: i64) -> Page<Product> {
        let products: Vec<Product> = self.products.read().values().cloned().collect();
        paginate(products, page, per_page, |p| (p.created_at, p.id.to_string()))
    }

    /// List products in a category, newest first, paginated.
    pub fn list_products_by_category(
        &self,
        category_id: &CategoryId,
        page: i64,
        per_page: i64,
    ) -> Page<Product> {
        let products: Vec<Product> = self
            .products
            .read()
            .values()
            .filter(|p| &p.category_id == category_id)
            .cloned()
            .collect();
        paginate(products, page, per_page, |p| (p.created_at, p.id.to_string()))
    }

    /// Case-insensitive substring search on product name, newest first,
    /// paginated.
    pub fn search_products(&self, query: &str, page: i64, per_page: i64) -> Page<Product> {
        let needle = query.to_lowercase();
        let products: Vec<Product> = self
            .products
            .read()
            .values()
            .filter(|p| p.name.to_lowercase().contains(&needle))
            .cloned()
            .collect();
        paginate(products, page, per_page, |p| (p.created_at, p.id.to_string()))
    }

    /// Total number of products.
    pub fn count_products(&self) -> i64 {
        self.products.read().len() as i64
    }

    // ------------------------------------------------------------------
    // Carts
    // ------------------------------------------------------------------

    /// Insert or replace a cart.
    pub fn upsert_cart(&self, cart: Cart) {
        self.carts.write().insert(cart.id.clone(), cart);
    }

    /// Look up a cart by ID.
    pub fn cart(&self, id: &CartId) -> Result<Cart, StoreError> {
        self.carts
            .read()
            .get(id)
            .cloned()
            .ok_or_else(|| StoreError::NotFound(format!("cart {}", id)))
    }

    /// Find the cart persisted for an account, if any.
    pub fn find_cart_by_account(&self, account_id: &AccountId) -> Option<Cart> {
        self.carts
            .read()
            .values()
            .find(|c| c.account_id.as_ref() == Some(account_id))
            .cloned()
    }

    /// Delete a cart. Deleting a missing cart is a no-op.
    pub fn delete_cart(&self, id: &CartId) {
        self.carts.write().remove(id);
    }

    /// Total number of persisted carts.
    pub fn count_carts(&self) -> i64 {
        self.carts.read().len() as i64
    }

    // ------------------------------------------------------------------
    // Orders
    // ------------------------------------------------------------------

    /// Insert a new order. The order number must be unused; callers
    /// regenerate the number and retry on `Duplicate`.
    pub fn insert_order(&self, order: Order) -> Result<(), StoreError> {
        let mut orders = self.orders.write();
        if orders.values().any(|o| o.order_number == order.order_number) {
            return Err(StoreError::Duplicate(format!(
                "order number {}",
                order.order_number
            )));
        }
        orders.insert(order.id.clone(), order);
        Ok(())
    }

    /// Look up an order by ID.
    pub fn order(&self, id: &OrderId) -> Result<Order, StoreError> {
        self.orders
            .read()
            .get(id)
            .cloned()
            .ok_or_else(|| StoreError::NotFound(format!("order {}", id)))
    }

    /// Find an order by its human-readable number.
    pub fn find_order_by_number(&self, number: &str) -> Option<Order> {
        self.orders
            .read()
            .values()
            .find(|o| o.order_number == number)
            .cloned()
    }

    /// Orders for an account, newest first.
    pub fn list_orders_by_account(&self, account_id: &AccountId) -> Vec<Order> {
        let mut orders: Vec<Order> = self
            .orders
            .read()
            .values()
            .filter(|o| &o.account_id == account_id)
            .cloned()
            .collect();
        orders.sort_by(|a, b| {
            (b.created_at, b.id.to_string()).cmp(&(a.created_at, a.id.to_string()))
        });
        orders
    }

    /// List all orders, newest first, paginated.
    pub fn list_orders(&self, page: i64, per_page: i64) -> Page<Order> {
        let orders: Vec<Order> = self.orders.read().values().cloned().collect();
        paginate(orders, page, per_page, |o| (o.created_at, o.id.to_string()))
    }

    /// Delete an order.
    pub fn delete_order(&self, id: &OrderId) -> Result<(), StoreError> {
        self.orders
            .write()
            .remove(id)
            .map(|_| ())
            .ok_or_else(|| StoreError::NotFound(format!("order {}", id)))
    }

    /// Total number of orders.
    pub fn count_orders(&self) -> i64 {
        self.orders.read().len() as i64
    }
}

/// Sort descending by the given key and slice out one page.
fn paginate<T, K, F>(mut items: Vec<T>, page: i64, per_page: i64, key: F) -> Page<T>
where
    K: Ord,
    F: Fn(&T) -> K,
{
    items.sort_by(|a, b| key(b).cmp(&key(a)));
    let pagination = Pagination::new(page, per_page, items.len() as i64);

    let start = (pagination.offset() as usize).min(items.len());
    let end = (start + per_page as usize).min(items.len());
    let items = items.drain(start..end).collect();

    Page::new(items, pagination)
}

#[cfg(test)]
mod tests {
    use super::*;
    use souk_commerce::money::{Currency, Money};

    fn store_with_category() -> (Store, Category) {
        let store = Store::new();
        let category = Category::new("Kitchen");
        store.insert_category(category.clone()).unwrap();
        (store, category)
    }

    fn product(name: &str, code: &str, category_id: CategoryId, created_at: i64) -> Product {
        let mut p = Product::new(
            name,
            code,
            Money::new(1000, Currency::AED),
            5,
            category_id,
        )
        .unwrap();
        p.created_at = created_at;
        p
    }

    #[test]
    fn test_account_uniqueness() {
        let store = Store::new();
        store
            .insert_account(Account::new("a@example.com", "aya", "$h"))
            .unwrap();

        // Email uniqueness is case-insensitive.
        let dup_email = Account::new("A@Example.com", "other", "$h");
        assert!(matches!(
            store.insert_account(dup_email),
            Err(StoreError::Duplicate(_))
        ));

        let dup_username = Account::new("b@example.com", "aya", "$h");
        assert!(matches!(
            store.insert_account(dup_username),
            Err(StoreError::Duplicate(_))
        ));
    }

    #[test]
    fn test_find_account_by_email_case_insensitive() {
        let store = Store::new();
        store
            .insert_account(Account::new("Aya@Example.com", "aya", "$h"))
            .unwrap();
        assert!(store.find_account_by_email("aya@example.com").is_some());
        assert!(store.find_account_by_email("nobody@example.com").is_none());
    }

    #[test]
    fn test_category_slug_uniqueness() {
        let (store, first) = store_with_category();
        assert!(matches!(
            store.insert_category(Category::new("Kitchen")),
            Err(StoreError::Duplicate(_))
        ));

        // Renaming to a free slug is fine.
        let mut renamed = first.clone();
        renamed.rename("Kitchenware");
        store.update_category(renamed).unwrap();
        assert!(store.find_category_by_slug("kitchenware").is_some());
    }

    #[test]
    fn test_product_listing_newest_first_paginated() {
        let (store, category) = store_with_category();
        for i in 0..9 {
            store
                .insert_product(product(
                    &format!("Item {}", i),
                    &format!("SKU-{}", i),
                    category.id.clone(),
                    1000 + i,
                ))
                .unwrap();
        }

        let page1 = store.list_products(1, 8);
        assert_eq!(page1.len(), 8);
        assert_eq!(page1.pagination.total, 9);
        assert_eq!(page1.pagination.total_pages, 2);
        assert_eq!(page1.items[0].name, "Item 8");

        let page2 = store.list_products(2, 8);
        assert_eq!(page2.len(), 1);
        assert_eq!(page2.items[0].name, "Item 0");
    }

    #[test]
    fn test_search_is_case_insensitive_substring() {
        let (store, category) = store_with_category();
        store
            .insert_product(product("Copper Kettle", "SKU-1", category.id.clone(), 1))
            .unwrap();
        store
            .insert_product(product("Teapot", "SKU-2", category.id.clone(), 2))
            .unwrap();

        let hits = store.search_products("KETT", 1, 8);
        assert_eq!(hits.len(), 1);
        assert_eq!(hits.items[0].name, "Copper Kettle");
        assert!(store.search_products("missing", 1, 8).is_empty());
    }

    #[test]
    fn test_cart_by_account() {
        let store = Store::new();
        let account_id = AccountId::generate();

        let mut cart = Cart::new(Currency::AED);
        cart.assign_account(account_id.clone());
        let cart_id = cart.id.clone();
        store.upsert_cart(cart);

        assert!(store.find_cart_by_account(&account_id).is_some());
        store.delete_cart(&cart_id);
        assert!(store.find_cart_by_account(&account_id).is_none());
    }

    #[test]
    fn test_order_number_collision_rejected() {
        let (store, category) = store_with_category();
        let p = product("Kettle", "SKU-1", category.id.clone(), 1);
        let account_id = AccountId::generate();

        let mut cart = Cart::new(Currency::AED);
        cart.add_item(&p).unwrap();

        let first =
            Order::from_cart("123456", account_id.clone(), &cart, "addr", "ch_1").unwrap();
        let second = Order::from_cart("123456", account_id, &cart, "addr", "ch_2").unwrap();

        store.insert_order(first).unwrap();
        assert!(matches!(
            store.insert_order(second),
            Err(StoreError::Duplicate(_))
        ));
    }
}
