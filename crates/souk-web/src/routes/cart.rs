//! Cart and checkout handlers.

use crate::carts::{discard_cart, resolve_active_cart, save_cart};
use crate::checkout::{run_checkout, CheckoutOutcome, CheckoutRequest};
use crate::state::SharedState;
use crate::views::{self, cart as cart_views, PageContext};
use axum::extract::{Extension, Path, State};
use axum::response::{Html, IntoResponse, Redirect, Response};
use axum::Form;
use serde::Deserialize;
use souk_auth::{Account, Flash, SessionId};
use souk_commerce::ids::ProductId;
use souk_commerce::CartDisposition;

/// GET /add-to-cart/{id} - add one unit and return to the shop.
///
/// A failed product lookup is a logged no-op; the visitor just goes back
/// to browsing.
pub async fn add_to_cart(
    State(state): State<SharedState>,
    Extension(session_id): Extension<SessionId>,
    Path(id): Path<String>,
) -> Redirect {
    let product_id = ProductId::new(id);
    let product = match state.store.product(&product_id) {
        Ok(product) => product,
        Err(e) => {
            tracing::warn!(product = %product_id, error = %e, "add-to-cart lookup failed");
            return Redirect::to("/");
        }
    };

    let mut cart = resolve_active_cart(&state, &session_id);
    if let Some(account_id) = state.sessions.snapshot(&session_id).account_id {
        cart.assign_account(account_id);
    }
    match cart.add_item(&product) {
        Ok(()) => save_cart(&state, &session_id, cart),
        Err(e) => {
            tracing::error!(product = %product_id, error = %e, "add-to-cart failed");
            state
                .sessions
                .push_flash(&session_id, Flash::error("Could not add that item."));
        }
    }
    Redirect::to("/")
}

/// GET /reduce/{id} - take one unit off a line.
pub async fn reduce(
    State(state): State<SharedState>,
    Extension(session_id): Extension<SessionId>,
    Path(id): Path<String>,
) -> Redirect {
    let product_id = ProductId::new(id);
    let product = match state.store.product(&product_id) {
        Ok(product) => product,
        Err(e) => {
            tracing::warn!(product = %product_id, error = %e, "reduce lookup failed");
            return Redirect::to("/cart");
        }
    };

    let mut cart = resolve_active_cart(&state, &session_id);
    match cart.decrement_item(&product) {
        Ok(CartDisposition::Depleted) => discard_cart(&state, &session_id, &cart),
        Ok(CartDisposition::Active) => save_cart(&state, &session_id, cart),
        Err(e) => {
            tracing::warn!(product = %product_id, error = %e, "reduce failed");
        }
    }
    Redirect::to("/cart")
}

/// GET /remove/{id} - drop a whole line.
pub async fn remove(
    State(state): State<SharedState>,
    Extension(session_id): Extension<SessionId>,
    Path(id): Path<String>,
) -> Redirect {
    let product_id = ProductId::new(id);
    let mut cart = resolve_active_cart(&state, &session_id);
    match cart.remove_item(&product_id) {
        Ok(CartDisposition::Depleted) => discard_cart(&state, &session_id, &cart),
        Ok(CartDisposition::Active) => save_cart(&state, &session_id, cart),
        Err(e) => {
            tracing::warn!(product = %product_id, error = %e, "remove failed");
        }
    }
    Redirect::to("/cart")
}

/// GET /cart - the cart page.
pub async fn show_cart(
    State(state): State<SharedState>,
    Extension(session_id): Extension<SessionId>,
) -> Html<String> {
    let cart = resolve_active_cart(&state, &session_id);
    let ctx = PageContext::build(&state, &session_id, "Your cart");
    Html(views::render_page(&ctx, &cart_views::cart_page(&cart)))
}

/// Look up the signed-in account, or send the visitor to signin with the
/// way back remembered. Authorization failures flash nothing.
fn require_account(
    state: &SharedState,
    session_id: &SessionId,
    return_to: &str,
) -> Result<Account, Redirect> {
    let session = state.sessions.snapshot(session_id);
    let Some(account_id) = session.account_id else {
        state.sessions.update(session_id, |s| {
            s.return_to = Some(return_to.to_string());
        });
        return Err(Redirect::to("/user/signin"));
    };
    state.store.account(&account_id).map_err(|e| {
        tracing::error!(account = %account_id, error = %e, "session account missing");
        Redirect::to("/user/signin")
    })
}

/// GET /checkout - the checkout form.
pub async fn checkout_form(
    State(state): State<SharedState>,
    Extension(session_id): Extension<SessionId>,
) -> Response {
    let account = match require_account(&state, &session_id, "/checkout") {
        Ok(account) => account,
        Err(redirect) => return redirect.into_response(),
    };

    let cart = resolve_active_cart(&state, &session_id);
    if cart.is_empty() {
        return Redirect::to("/cart").into_response();
    }

    let ctx = PageContext::build(&state, &session_id, "Checkout");
    let body = cart_views::checkout_page(&cart, account.address.as_deref());
    Html(views::render_page(&ctx, &body)).into_response()
}

#[derive(Deserialize)]
pub struct CheckoutForm {
    pub address: String,
    pub payment_token: String,
}

/// POST /checkout - run the checkout sequence.
pub async fn submit_checkout(
    State(state): State<SharedState>,
    Extension(session_id): Extension<SessionId>,
    Form(form): Form<CheckoutForm>,
) -> Response {
    let account = match require_account(&state, &session_id, "/checkout") {
        Ok(account) => account,
        Err(redirect) => return redirect.into_response(),
    };

    if form.address.trim().is_empty() {
        state
            .sessions
            .push_flash(&session_id, Flash::error("Shipping address is required."));
        return Redirect::to("/checkout").into_response();
    }

    let request = CheckoutRequest {
        address: form.address.trim().to_string(),
        payment_token: form.payment_token,
    };
    match run_checkout(&state, &session_id, &account, request).await {
        Ok(CheckoutOutcome::Completed { order_number }) => {
            state.sessions.push_flash(
                &session_id,
                Flash::success(format!("Order #{} placed. Thank you!", order_number)),
            );
            Redirect::to("/user/profile").into_response()
        }
        Ok(CheckoutOutcome::Declined { reason }) => {
            state
                .sessions
                .push_flash(&session_id, Flash::error(format!("Payment declined: {}", reason)));
            Redirect::to("/checkout").into_response()
        }
        Err(e) => {
            tracing::error!(error = %e, "checkout failed");
            state.sessions.push_flash(
                &session_id,
                Flash::error("Something went wrong, please try again."),
            );
            Redirect::to("/checkout").into_response()
        }
    }
}
