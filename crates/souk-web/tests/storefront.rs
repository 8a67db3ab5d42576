//! End-to-end tests over the router with mock collaborators.

use axum::body::Body;
use axum::http::header::{CONTENT_TYPE, COOKIE, LOCATION, SET_COOKIE};
use axum::http::{Request, StatusCode};
use axum::Router;
use souk_commerce::ids::CategoryId;
use souk_commerce::{Currency, Money, Product};
use souk_store::Store;
use souk_web::collaborators::mock::{MockMailClient, MockNewsletterClient, MockPaymentClient};
use souk_web::{build_router, AppState, Config, SharedState};
use std::sync::Arc;
use tower::ServiceExt;

fn app() -> (Router, SharedState) {
    app_with_payment(MockPaymentClient::new())
}

fn app_with_payment(payment: MockPaymentClient) -> (Router, SharedState) {
    let state = AppState::with_collaborators(
        Config::default(),
        Arc::new(Store::new()),
        Arc::new(payment),
        Arc::new(MockMailClient::new()),
        Arc::new(MockNewsletterClient::new()),
    );
    (build_router(state.clone()), state)
}

fn seed_product(state: &SharedState, name: &str, code: &str, quantity: i64) -> Product {
    let category = souk_commerce::Category::new("Kitchen");
    let category_id = match state.store.insert_category(category.clone()) {
        Ok(()) => category.id,
        Err(_) => state.store.find_category_by_slug("kitchen").unwrap().id,
    };
    let product = Product::new(
        name,
        code,
        Money::new(1500, Currency::AED),
        quantity,
        category_id,
    )
    .unwrap();
    state.store.insert_product(product.clone()).unwrap();
    product
}

async fn get(router: &Router, uri: &str, cookie: Option<&str>) -> axum::http::Response<Body> {
    let mut builder = Request::builder().method("GET").uri(uri);
    if let Some(cookie) = cookie {
        builder = builder.header(COOKIE, cookie);
    }
    router
        .clone()
        .oneshot(builder.body(Body::empty()).unwrap())
        .await
        .unwrap()
}

async fn post_form(
    router: &Router,
    uri: &str,
    body: &str,
    cookie: Option<&str>,
) -> axum::http::Response<Body> {
    let mut builder = Request::builder()
        .method("POST")
        .uri(uri)
        .header(CONTENT_TYPE, "application/x-www-form-urlencoded");
    if let Some(cookie) = cookie {
        builder = builder.header(COOKIE, cookie);
    }
    router
        .clone()
        .oneshot(builder.body(Body::from(body.to_string())).unwrap())
        .await
        .unwrap()
}

fn session_cookie(response: &axum::http::Response<Body>) -> String {
    let raw = response
        .headers()
        .get(SET_COOKIE)
        .expect("session cookie")
        .to_str()
        .unwrap();
    raw.split(';').next().unwrap().to_string()
}

fn cookie_max_age(response: &axum::http::Response<Body>) -> i64 {
    let raw = response
        .headers()
        .get(SET_COOKIE)
        .expect("session cookie")
        .to_str()
        .unwrap();
    raw.split(';')
        .filter_map(|attr| attr.trim().strip_prefix("Max-Age="))
        .next()
        .expect("Max-Age attribute")
        .parse()
        .unwrap()
}

fn location(response: &axum::http::Response<Body>) -> &str {
    response
        .headers()
        .get(LOCATION)
        .expect("redirect location")
        .to_str()
        .unwrap()
}

#[tokio::test]
async fn anonymous_visitor_gets_a_session_cookie() {
    let (router, _state) = app();
    let response = get(&router, "/", None).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(session_cookie(&response).starts_with("souk_session=sess_"));
}

#[tokio::test]
async fn signup_adopts_the_session_cart() {
    let (router, state) = app();
    let product = seed_product(&state, "Kettle", "SKU-1", 5);

    let first = get(&router, "/", None).await;
    let cookie = session_cookie(&first);

    // Two anonymous adds.
    let uri = format!("/add-to-cart/{}", product.id.as_str());
    get(&router, &uri, Some(&cookie)).await;
    get(&router, &uri, Some(&cookie)).await;

    let response = post_form(
        &router,
        "/user/signup",
        "email=aya%40example.com&username=aya&password=sesame&confirm_password=sesame",
        Some(&cookie),
    )
    .await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);

    let account = state.store.find_account_by_email("aya@example.com").unwrap();
    let cart = state.store.find_cart_by_account(&account.id).unwrap();
    assert_eq!(cart.total_qty, 2);
    assert_eq!(cart.total_cost.minor_units, 3000);
}

#[tokio::test]
async fn checkout_drains_stock_and_clears_the_cart() {
    let (router, state) = app();
    let product = seed_product(&state, "Last Kettle", "SKU-1", 1);

    let first = get(&router, "/", None).await;
    let cookie = session_cookie(&first);

    post_form(
        &router,
        "/user/signup",
        "email=buyer%40example.com&username=buyer&password=sesame&confirm_password=sesame",
        Some(&cookie),
    )
    .await;
    get(
        &router,
        &format!("/add-to-cart/{}", product.id.as_str()),
        Some(&cookie),
    )
    .await;

    let response = post_form(
        &router,
        "/checkout",
        "address=12+Palm+Street%2C+Dubai&payment_token=tok_visa",
        Some(&cookie),
    )
    .await;
    assert_eq!(location(&response), "/user/profile");

    // Order recorded against the account.
    let account = state
        .store
        .find_account_by_email("buyer@example.com")
        .unwrap();
    let orders = state.store.list_orders_by_account(&account.id);
    assert_eq!(orders.len(), 1);
    assert_eq!(orders[0].cart.total_cost.minor_units, 1500);

    // Stock drained 1 -> 0, product off sale, cart gone, address kept.
    let stored = state.store.product(&product.id).unwrap();
    assert_eq!(stored.quantity, 0);
    assert!(!stored.available);
    assert_eq!(state.store.count_carts(), 0);
    let account = state.store.account(&account.id).unwrap();
    assert_eq!(account.address.as_deref(), Some("12 Palm Street, Dubai"));
}

#[tokio::test]
async fn declined_payment_keeps_the_cart() {
    let (router, state) = app_with_payment(MockPaymentClient::declining());
    let product = seed_product(&state, "Kettle", "SKU-1", 5);

    let first = get(&router, "/", None).await;
    let cookie = session_cookie(&first);

    post_form(
        &router,
        "/user/signup",
        "email=buyer%40example.com&username=buyer&password=sesame&confirm_password=sesame",
        Some(&cookie),
    )
    .await;
    get(
        &router,
        &format!("/add-to-cart/{}", product.id.as_str()),
        Some(&cookie),
    )
    .await;

    let response = post_form(
        &router,
        "/checkout",
        "address=somewhere&payment_token=tok_bad",
        Some(&cookie),
    )
    .await;
    assert_eq!(location(&response), "/checkout");

    assert_eq!(state.store.count_orders(), 0);
    let account = state
        .store
        .find_account_by_email("buyer@example.com")
        .unwrap();
    let cart = state.store.find_cart_by_account(&account.id).unwrap();
    assert_eq!(cart.total_qty, 1);
    let stored = state.store.product(&product.id).unwrap();
    assert_eq!(stored.quantity, 5);
}

#[tokio::test]
async fn admin_gate_redirects_by_role() {
    let (router, state) = app();

    // Anonymous visitors are sent to signin.
    let first = get(&router, "/admin", None).await;
    let cookie = session_cookie(&first);
    assert_eq!(location(&first), "/user/signin");

    // A signed-in customer is sent to their own profile.
    post_form(
        &router,
        "/user/signup",
        "email=aya%40example.com&username=aya&password=sesame&confirm_password=sesame",
        Some(&cookie),
    )
    .await;
    let response = get(&router, "/admin", Some(&cookie)).await;
    assert_eq!(location(&response), "/user/profile");

    // Promote and try again.
    let mut account = state.store.find_account_by_email("aya@example.com").unwrap();
    account.promote();
    state.store.update_account(account).unwrap();
    let response = get(&router, "/admin", Some(&cookie)).await;
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn remember_me_extends_the_cookie_lifetime() {
    let (router, _state) = app();

    let first = get(&router, "/", None).await;
    let cookie = session_cookie(&first);
    let initial = cookie_max_age(&first);
    assert!(initial > 0);
    assert!(initial <= 3 * 60 * 60);

    post_form(
        &router,
        "/user/signup",
        "email=aya%40example.com&username=aya&password=sesame&confirm_password=sesame",
        Some(&cookie),
    )
    .await;

    // Signing in with "remember me" re-issues the cookie for 7 days.
    let response = post_form(
        &router,
        "/user/signin",
        "email=aya%40example.com&password=sesame&remember=1",
        Some(&cookie),
    )
    .await;
    let extended = cookie_max_age(&response);
    assert!(extended > 3 * 60 * 60);
    assert!(extended <= 7 * 24 * 60 * 60);
}

#[tokio::test]
async fn decrementing_the_last_item_deletes_the_cart() {
    let (router, state) = app();
    let product = seed_product(&state, "Kettle", "SKU-1", 5);

    let first = get(&router, "/", None).await;
    let cookie = session_cookie(&first);

    get(
        &router,
        &format!("/add-to-cart/{}", product.id.as_str()),
        Some(&cookie),
    )
    .await;
    get(
        &router,
        &format!("/reduce/{}", product.id.as_str()),
        Some(&cookie),
    )
    .await;

    let (session_id, _) = state.sessions.load_or_create(Some(
        cookie.trim_start_matches("souk_session="),
    ));
    assert!(state.sessions.snapshot(&session_id).cart.is_none());
    assert_eq!(state.store.count_carts(), 0);
}

#[tokio::test]
async fn newsletter_signup_reports_duplicates() {
    let (router, _state) = app();

    let first = get(&router, "/", None).await;
    let cookie = session_cookie(&first);

    let ok = post_form(
        &router,
        "/newsletter",
        "email=aya%40example.com",
        Some(&cookie),
    )
    .await;
    assert_eq!(location(&ok), "/");

    // Second subscription flashes the duplicate as an error on the next page.
    post_form(
        &router,
        "/newsletter",
        "email=aya%40example.com",
        Some(&cookie),
    )
    .await;
    let page = get(&router, "/", Some(&cookie)).await;
    let body = axum::body::to_bytes(page.into_body(), usize::MAX).await.unwrap();
    let html = String::from_utf8(body.to_vec()).unwrap();
    assert!(html.contains("already subscribed"));
}
