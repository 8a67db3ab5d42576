//! Checkout orchestration.
//!
//! Runs the linear stage sequence Pending, Charging, OrderRecorded,
//! StockAdjusted, CartCleared, AddressBackfilled, Done. A declined charge
//! is terminal and leaves the cart untouched. After a successful charge
//! the remaining writes run independently with no rollback; failures are
//! logged and the checkout still completes.

use crate::carts::{discard_cart, resolve_active_cart};
use crate::collaborators::CollaboratorError;
use crate::error::WebError;
use crate::state::AppState;
use souk_auth::{Account, SessionId};
use souk_commerce::{generate_order_number, CheckoutStage, CommerceError, Order};
use souk_store::StoreError;

/// Checkout form input.
#[derive(Debug, Clone)]
pub struct CheckoutRequest {
    /// Shipping address.
    pub address: String,
    /// Card token from the payment form.
    pub payment_token: String,
}

/// How a checkout ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckoutOutcome {
    /// Charge accepted; the order is recorded.
    Completed {
        /// Human-readable order number.
        order_number: String,
    },
    /// Charge declined; nothing was written.
    Declined {
        /// Processor-supplied reason.
        reason: String,
    },
}

/// Run a checkout for the signed-in account.
pub async fn run_checkout(
    state: &AppState,
    session_id: &SessionId,
    account: &Account,
    request: CheckoutRequest,
) -> Result<CheckoutOutcome, WebError> {
    let mut stage = CheckoutStage::Pending;

    let cart = resolve_active_cart(state, session_id);
    if cart.is_empty() {
        return Err(CommerceError::EmptyCart.into());
    }
    let amount = cart.total_cost;
    tracing::info!(
        stage = stage.as_str(),
        account = %account.id,
        amount = %amount,
        "checkout started"
    );

    stage = CheckoutStage::Charging;
    let description = format!("souk order for {}", account.email);
    let receipt = match state
        .payment
        .charge(
            amount.minor_units,
            amount.currency.code(),
            &request.payment_token,
            &description,
        )
        .await
    {
        Ok(receipt) => receipt,
        Err(CollaboratorError::ChargeDeclined(reason)) => {
            stage = CheckoutStage::Failed;
            tracing::warn!(stage = stage.as_str(), account = %account.id, %reason, "charge declined");
            return Ok(CheckoutOutcome::Declined { reason });
        }
        Err(e) => {
            stage = CheckoutStage::Failed;
            tracing::error!(stage = stage.as_str(), account = %account.id, error = %e, "charge failed");
            return Err(e.into());
        }
    };

    // Order numbers are random 6-digit strings; regenerate on collision.
    stage = CheckoutStage::OrderRecorded;
    let order_number = loop {
        let candidate = generate_order_number();
        let order = Order::from_cart(
            candidate.clone(),
            account.id.clone(),
            &cart,
            request.address.clone(),
            receipt.reference.clone(),
        )?;
        match state.store.insert_order(order) {
            Ok(()) => break candidate,
            Err(StoreError::Duplicate(_)) => continue,
            Err(e) => return Err(e.into()),
        }
    };
    tracing::info!(stage = stage.as_str(), %order_number, "order recorded");

    // Stock writes are independent; a failed one is logged and skipped.
    stage = CheckoutStage::StockAdjusted;
    for item in &cart.items {
        match state.store.product(&item.product_id) {
            Ok(mut product) => {
                product.deduct_stock(item.qty);
                if let Err(e) = state.store.update_product(product) {
                    tracing::error!(stage = stage.as_str(), product = %item.product_id, error = %e, "stock update failed");
                }
            }
            Err(e) => {
                tracing::error!(stage = stage.as_str(), product = %item.product_id, error = %e, "product lookup failed");
            }
        }
    }

    stage = CheckoutStage::CartCleared;
    tracing::debug!(stage = stage.as_str(), cart = %cart.id, "cart cleared");
    discard_cart(state, session_id, &cart);

    stage = CheckoutStage::AddressBackfilled;
    match state.store.account(&account.id) {
        Ok(mut stored) => {
            if stored.backfill_address(&request.address) {
                if let Err(e) = state.store.update_account(stored) {
                    tracing::error!(stage = stage.as_str(), account = %account.id, error = %e, "address backfill failed");
                }
            }
        }
        Err(e) => {
            tracing::error!(stage = stage.as_str(), account = %account.id, error = %e, "account lookup failed");
        }
    }

    stage = CheckoutStage::Done;
    tracing::info!(stage = stage.as_str(), %order_number, "checkout complete");
    Ok(CheckoutOutcome::Completed { order_number })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::carts::save_cart;
    use crate::collaborators::mock::{MockMailClient, MockNewsletterClient, MockPaymentClient};
    use crate::config::Config;
    use crate::state::SharedState;
    use souk_auth::Account;
    use souk_commerce::ids::CategoryId;
    use souk_commerce::{Cart, Currency, Money, Product};
    use souk_store::Store;
    use std::sync::Arc;

    fn state_with_payment(payment: MockPaymentClient) -> SharedState {
        crate::state::AppState::with_collaborators(
            Config::default(),
            Arc::new(Store::new()),
            Arc::new(payment),
            Arc::new(MockMailClient::new()),
            Arc::new(MockNewsletterClient::new()),
        )
    }

    fn seed(state: &SharedState) -> (SessionId, Account, Product) {
        let account = Account::new("buyer@example.com", "buyer", "$h");
        state.store.insert_account(account.clone()).unwrap();

        let product = Product::new(
            "Last Kettle",
            "SKU-1",
            Money::new(4200, Currency::AED),
            1,
            CategoryId::generate(),
        )
        .unwrap();
        state.store.insert_product(product.clone()).unwrap();

        let (session_id, _) = state.sessions.load_or_create(None);
        state
            .sessions
            .update(&session_id, |s| s.sign_in(account.id.clone(), false));

        let mut cart = Cart::new(Currency::AED);
        cart.assign_account(account.id.clone());
        cart.add_item(&product).unwrap();
        save_cart(state, &session_id, cart);

        (session_id, account, product)
    }

    #[tokio::test]
    async fn test_successful_checkout_end_to_end() {
        let state = state_with_payment(MockPaymentClient::new());
        let (session_id, account, product) = seed(&state);

        let outcome = run_checkout(
            &state,
            &session_id,
            &account,
            CheckoutRequest {
                address: "12 Palm Street, Dubai".to_string(),
                payment_token: "tok_visa".to_string(),
            },
        )
        .await
        .unwrap();

        let order_number = match outcome {
            CheckoutOutcome::Completed { order_number } => order_number,
            other => panic!("expected completion, got {:?}", other),
        };

        // Order recorded with the cart snapshot.
        let order = state.store.find_order_by_number(&order_number).unwrap();
        assert_eq!(order.cart.total_cost.minor_units, 4200);

        // Stock drained 1 -> 0 and the product pulled from sale.
        let stored = state.store.product(&product.id).unwrap();
        assert_eq!(stored.quantity, 0);
        assert!(!stored.available);

        // Cart gone from store and session.
        assert_eq!(state.store.count_carts(), 0);
        assert!(state.sessions.snapshot(&session_id).cart.is_none());

        // Address back-filled onto the account.
        let stored_account = state.store.account(&account.id).unwrap();
        assert_eq!(
            stored_account.address.as_deref(),
            Some("12 Palm Street, Dubai")
        );
    }

    #[tokio::test]
    async fn test_declined_charge_leaves_cart_intact() {
        let state = state_with_payment(MockPaymentClient::declining());
        let (session_id, account, _) = seed(&state);

        let outcome = run_checkout(
            &state,
            &session_id,
            &account,
            CheckoutRequest {
                address: "12 Palm Street, Dubai".to_string(),
                payment_token: "tok_declined".to_string(),
            },
        )
        .await
        .unwrap();

        assert!(matches!(outcome, CheckoutOutcome::Declined { .. }));
        assert_eq!(state.store.count_orders(), 0);

        let cart = resolve_active_cart(&state, &session_id);
        assert_eq!(cart.total_qty, 1);
    }

    #[tokio::test]
    async fn test_existing_address_not_overwritten() {
        let state = state_with_payment(MockPaymentClient::new());
        let (session_id, account, _) = seed(&state);

        let mut stored = state.store.account(&account.id).unwrap();
        stored.backfill_address("original address");
        state.store.update_account(stored).unwrap();

        run_checkout(
            &state,
            &session_id,
            &account,
            CheckoutRequest {
                address: "new address".to_string(),
                payment_token: "tok_visa".to_string(),
            },
        )
        .await
        .unwrap();

        let after = state.store.account(&account.id).unwrap();
        assert_eq!(after.address.as_deref(), Some("original address"));
    }

    #[tokio::test]
    async fn test_empty_cart_rejected() {
        let state = state_with_payment(MockPaymentClient::new());
        let account = Account::new("buyer@example.com", "buyer", "$h");
        state.store.insert_account(account.clone()).unwrap();
        let (session_id, _) = state.sessions.load_or_create(None);

        let result = run_checkout(
            &state,
            &session_id,
            &account,
            CheckoutRequest {
                address: "addr".to_string(),
                payment_token: "tok_visa".to_string(),
            },
        )
        .await;
        assert!(result.is_err());
    }
}
