//! User management.

use crate::state::SharedState;
use crate::views::{self, admin as admin_views, PageContext};
use axum::extract::{Extension, Path, Query, State};
use axum::response::{Html, Redirect};
use serde::Deserialize;
use souk_auth::{Flash, SessionId};
use souk_commerce::ids::AccountId;
use souk_commerce::listing::ADMIN_PAGE_SIZE;

#[derive(Deserialize)]
pub struct ListQuery {
    #[serde(default)]
    pub page: Option<i64>,
}

/// GET /admin/users.
pub async fn list(
    State(state): State<SharedState>,
    Extension(session_id): Extension<SessionId>,
    Query(query): Query<ListQuery>,
) -> Html<String> {
    let page = state
        .store
        .list_accounts(query.page.unwrap_or(1), ADMIN_PAGE_SIZE);
    let ctx = PageContext::build(&state, &session_id, "Users");
    Html(views::render_page(&ctx, &admin_views::users_page(&page)))
}

/// POST /admin/users/{id}/promote.
pub async fn promote(
    State(state): State<SharedState>,
    Extension(session_id): Extension<SessionId>,
    Path(id): Path<String>,
) -> Redirect {
    let account_id = AccountId::new(id);
    match state.store.account(&account_id) {
        Ok(mut account) => {
            account.promote();
            match state.store.update_account(account) {
                Ok(()) => {
                    state
                        .sessions
                        .push_flash(&session_id, Flash::success("User promoted to admin."));
                }
                Err(e) => {
                    tracing::error!(account = %account_id, error = %e, "promote failed");
                    state
                        .sessions
                        .push_flash(&session_id, Flash::error("Could not promote the user."));
                }
            }
        }
        Err(e) => {
            tracing::warn!(account = %account_id, error = %e, "promote target missing");
            state
                .sessions
                .push_flash(&session_id, Flash::error("Could not promote the user."));
        }
    }
    Redirect::to("/admin/users")
}

/// POST /admin/users/{id}/delete.
pub async fn delete(
    State(state): State<SharedState>,
    Extension(session_id): Extension<SessionId>,
    Path(id): Path<String>,
) -> Redirect {
    let account_id = AccountId::new(id);
    match state.store.delete_account(&account_id) {
        Ok(()) => {
            state
                .sessions
                .push_flash(&session_id, Flash::success("User deleted."));
        }
        Err(e) => {
            tracing::warn!(account = %account_id, error = %e, "user delete failed");
            state
                .sessions
                .push_flash(&session_id, Flash::error("Could not delete the user."));
        }
    }
    Redirect::to("/admin/users")
}
