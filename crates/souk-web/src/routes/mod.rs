//! Route handlers.
//!
//! The browser tree (shop, cart, user, marketing pages) merged with the
//! admin tree, everything behind the session middleware.

pub mod admin;
pub mod cart;
pub mod pages;
pub mod shop;
pub mod user;

use crate::session::session_middleware;
use crate::state::SharedState;
use axum::middleware;
use axum::routing::{get, post};
use axum::Router;
use tower_http::trace::TraceLayer;

/// Assemble the full application router.
pub fn build_router(state: SharedState) -> Router {
    let browser = Router::new()
        .route("/", get(shop::index))
        .route("/category/{slug}", get(shop::by_category))
        .route("/search", get(shop::search))
        .route("/product/{slug}", get(shop::product_detail))
        .route("/add-to-cart/{id}", get(cart::add_to_cart))
        .route("/reduce/{id}", get(cart::reduce))
        .route("/remove/{id}", get(cart::remove))
        .route("/cart", get(cart::show_cart))
        .route("/checkout", get(cart::checkout_form).post(cart::submit_checkout))
        .route("/user/signup", get(user::signup_form).post(user::signup))
        .route("/user/signin", get(user::signin_form).post(user::signin))
        .route("/user/signout", get(user::signout))
        .route("/user/profile", get(user::profile))
        .route(
            "/user/edit-profile",
            get(user::edit_profile_form).post(user::edit_profile),
        )
        .route("/about-us", get(pages::about_us))
        .route("/shipping-policy", get(pages::shipping_policy))
        .route("/careers", get(pages::careers))
        .route("/contact", get(pages::contact_form).post(pages::submit_contact))
        .route("/newsletter", post(pages::subscribe_newsletter));

    browser
        .nest("/admin", admin::router(state.clone()))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            session_middleware,
        ))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
