//! Working-cart resolution.
//!
//! Every cart-touching request resolves its cart through the same
//! precedence: a cart persisted for the signed-in account wins and is
//! adopted into the session; otherwise the session cart is used; otherwise
//! a fresh empty cart. Empty carts are never persisted.

use crate::state::AppState;
use souk_auth::SessionId;
use souk_commerce::ids::AccountId;
use souk_commerce::{Cart, Currency};

/// Resolve the working cart for the current request.
pub fn resolve_active_cart(state: &AppState, session_id: &SessionId) -> Cart {
    let session = state.sessions.snapshot(session_id);

    if let Some(account_id) = &session.account_id {
        if let Some(cart) = state.store.find_cart_by_account(account_id) {
            state
                .sessions
                .update(session_id, |s| s.cart = Some(cart.clone()));
            return cart;
        }
    }

    if let Some(cart) = session.cart {
        return cart;
    }

    Cart::new(Currency::default())
}

/// Write a mutated cart back: into the session always, and into the store
/// when it belongs to an account.
pub fn save_cart(state: &AppState, session_id: &SessionId, cart: Cart) {
    if cart.account_id.is_some() {
        state.store.upsert_cart(cart.clone());
    }
    state.sessions.update(session_id, |s| s.cart = Some(cart));
}

/// Drop a depleted cart from the store and the session.
pub fn discard_cart(state: &AppState, session_id: &SessionId, cart: &Cart) {
    state.store.delete_cart(&cart.id);
    state.sessions.update(session_id, |s| s.cart = None);
}

/// Reconcile carts when a visitor signs in or signs up.
///
/// An existing account cart wins and is loaded into the session. When the
/// account has none and the session cart holds items, the session cart is
/// claimed for the account and persisted. Items are never merged line by
/// line.
pub fn merge_on_login(state: &AppState, session_id: &SessionId, account_id: &AccountId) {
    if let Some(account_cart) = state.store.find_cart_by_account(account_id) {
        state
            .sessions
            .update(session_id, |s| s.cart = Some(account_cart));
        return;
    }

    let session_cart = state.sessions.snapshot(session_id).cart;
    if let Some(mut cart) = session_cart {
        if cart.is_empty() {
            return;
        }
        cart.assign_account(account_id.clone());
        state.store.upsert_cart(cart.clone());
        state.sessions.update(session_id, |s| s.cart = Some(cart));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collaborators::mock::{MockMailClient, MockNewsletterClient, MockPaymentClient};
    use crate::config::Config;
    use crate::state::{AppState, SharedState};
    use souk_commerce::ids::CategoryId;
    use souk_commerce::{Money, Product};
    use souk_store::Store;
    use std::sync::Arc;

    fn test_state() -> SharedState {
        AppState::with_collaborators(
            Config::default(),
            Arc::new(Store::new()),
            Arc::new(MockPaymentClient::new()),
            Arc::new(MockMailClient::new()),
            Arc::new(MockNewsletterClient::new()),
        )
    }

    fn product(name: &str, code: &str) -> Product {
        Product::new(
            name,
            code,
            Money::new(2500, Currency::AED),
            3,
            CategoryId::generate(),
        )
        .unwrap()
    }

    #[test]
    fn test_fresh_cart_for_new_visitor() {
        let state = test_state();
        let (session_id, _) = state.sessions.load_or_create(None);

        let cart = resolve_active_cart(&state, &session_id);
        assert!(cart.is_empty());
        // Empty carts are not persisted anywhere.
        assert_eq!(state.store.count_carts(), 0);
        assert!(state.sessions.snapshot(&session_id).cart.is_none());
    }

    #[test]
    fn test_session_cart_adopted_by_new_account() {
        let state = test_state();
        let (session_id, _) = state.sessions.load_or_create(None);

        let mut cart = resolve_active_cart(&state, &session_id);
        cart.add_item(&product("Kettle", "SKU-1")).unwrap();
        cart.add_item(&product("Teapot", "SKU-2")).unwrap();
        save_cart(&state, &session_id, cart);

        let account_id = AccountId::generate();
        merge_on_login(&state, &session_id, &account_id);

        let persisted = state.store.find_cart_by_account(&account_id).unwrap();
        assert_eq!(persisted.total_qty, 2);
        assert_eq!(
            state.sessions.snapshot(&session_id).cart.unwrap().total_qty,
            2
        );
    }

    #[test]
    fn test_account_cart_wins_over_session_cart() {
        let state = test_state();
        let (session_id, _) = state.sessions.load_or_create(None);
        let account_id = AccountId::generate();

        // The account already has a 1-item cart from an earlier visit.
        let mut account_cart = Cart::new(Currency::AED);
        account_cart.assign_account(account_id.clone());
        account_cart.add_item(&product("Kettle", "SKU-1")).unwrap();
        state.store.upsert_cart(account_cart);

        // This browser session carried a different cart.
        let mut session_cart = Cart::new(Currency::AED);
        session_cart.add_item(&product("Teapot", "SKU-2")).unwrap();
        session_cart.add_item(&product("Teapot", "SKU-2")).unwrap();
        save_cart(&state, &session_id, session_cart);

        merge_on_login(&state, &session_id, &account_id);

        let working = resolve_active_cart(&state, &session_id);
        assert_eq!(working.total_qty, 1);
        assert_eq!(working.items[0].title, "Kettle");
    }

    #[test]
    fn test_discard_clears_everywhere() {
        let state = test_state();
        let (session_id, _) = state.sessions.load_or_create(None);
        let account_id = AccountId::generate();

        let mut cart = Cart::new(Currency::AED);
        cart.assign_account(account_id.clone());
        cart.add_item(&product("Kettle", "SKU-1")).unwrap();
        save_cart(&state, &session_id, cart.clone());

        discard_cart(&state, &session_id, &cart);
        assert!(state.store.find_cart_by_account(&account_id).is_none());
        assert!(state.sessions.snapshot(&session_id).cart.is_none());
    }
}
