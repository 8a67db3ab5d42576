//! Back-office routes, all behind the admin role gate.

pub mod categories;
pub mod orders;
pub mod products;
pub mod users;

use crate::state::SharedState;
use crate::views::{self, admin as admin_views, PageContext};
use axum::extract::{Extension, Request, State};
use axum::middleware::{self, Next};
use axum::response::{Html, IntoResponse, Redirect, Response};
use axum::routing::{get, post};
use axum::Router;
use souk_auth::SessionId;

/// The admin router: dashboard plus the four managed collections.
pub fn router(state: SharedState) -> Router<SharedState> {
    Router::new()
        .route("/", get(dashboard))
        .route("/categories", get(categories::list).post(categories::create))
        .route("/categories/{id}/rename", post(categories::rename))
        .route("/categories/{id}/delete", post(categories::delete))
        .route("/products", get(products::list).post(products::create))
        .route("/products/{id}/edit", get(products::edit_form).post(products::edit))
        .route("/products/{id}/delete", post(products::delete))
        .route("/orders", get(orders::list))
        .route("/orders/{id}/delete", post(orders::delete))
        .route("/users", get(users::list))
        .route("/users/{id}/promote", post(users::promote))
        .route("/users/{id}/delete", post(users::delete))
        .route_layer(middleware::from_fn_with_state(state, require_admin))
}

/// Role gate: anonymous visitors go to signin, signed-in customers to
/// their own profile. Nothing is flashed either way.
pub async fn require_admin(
    State(state): State<SharedState>,
    req: Request,
    next: Next,
) -> Response {
    let Some(session_id) = req.extensions().get::<SessionId>().cloned() else {
        return Redirect::to("/user/signin").into_response();
    };
    let session = state.sessions.snapshot(&session_id);
    let Some(account_id) = session.account_id else {
        state.sessions.update(&session_id, |s| {
            s.return_to = Some("/admin".to_string());
        });
        return Redirect::to("/user/signin").into_response();
    };
    match state.store.account(&account_id) {
        Ok(account) if account.is_admin() => next.run(req).await,
        Ok(_) => Redirect::to("/user/profile").into_response(),
        Err(e) => {
            tracing::error!(account = %account_id, error = %e, "admin gate account lookup failed");
            Redirect::to("/user/signin").into_response()
        }
    }
}

/// GET /admin - dashboard with collection counts.
pub async fn dashboard(
    State(state): State<SharedState>,
    Extension(session_id): Extension<SessionId>,
) -> Html<String> {
    let body = admin_views::dashboard(
        state.store.count_products(),
        state.store.count_categories(),
        state.store.count_orders(),
        state.store.count_accounts(),
    );
    let ctx = PageContext::build(&state, &session_id, "Back office");
    Html(views::render_page(&ctx, &body))
}
