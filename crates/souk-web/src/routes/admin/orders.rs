//! Order management.

use crate::state::SharedState;
use crate::views::{self, admin as admin_views, PageContext};
use axum::extract::{Extension, Path, Query, State};
use axum::response::{Html, Redirect};
use serde::Deserialize;
use souk_auth::{Flash, SessionId};
use souk_commerce::ids::OrderId;
use souk_commerce::listing::{Page, Pagination, ADMIN_PAGE_SIZE};

#[derive(Deserialize)]
pub struct OrdersQuery {
    #[serde(default)]
    pub page: Option<i64>,
    #[serde(default)]
    pub number: Option<String>,
}

/// GET /admin/orders - list, or find one by number.
pub async fn list(
    State(state): State<SharedState>,
    Extension(session_id): Extension<SessionId>,
    Query(query): Query<OrdersQuery>,
) -> Html<String> {
    let number = query.number.as_deref().map(str::trim).unwrap_or("");
    let page = if number.is_empty() {
        state
            .store
            .list_orders(query.page.unwrap_or(1), ADMIN_PAGE_SIZE)
    } else {
        match state.store.find_order_by_number(number) {
            Some(order) => Page::new(vec![order], Pagination::new(1, ADMIN_PAGE_SIZE, 1)),
            None => {
                state.sessions.push_flash(
                    &session_id,
                    Flash::error(format!("No order #{} found.", number)),
                );
                Page::empty()
            }
        }
    };

    let ctx = PageContext::build(&state, &session_id, "Orders");
    Html(views::render_page(&ctx, &admin_views::orders_page(&page)))
}

/// POST /admin/orders/{id}/delete.
pub async fn delete(
    State(state): State<SharedState>,
    Extension(session_id): Extension<SessionId>,
    Path(id): Path<String>,
) -> Redirect {
    let order_id = OrderId::new(id);
    match state.store.delete_order(&order_id) {
        Ok(()) => {
            state
                .sessions
                .push_flash(&session_id, Flash::success("Order deleted."));
        }
        Err(e) => {
            tracing::warn!(order = %order_id, error = %e, "order delete failed");
            state
                .sessions
                .push_flash(&session_id, Flash::error("Could not delete the order."));
        }
    }
    Redirect::to("/admin/orders")
}
