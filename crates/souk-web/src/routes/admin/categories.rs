//! Category management.

use crate::state::SharedState;
use crate::views::{self, admin as admin_views, PageContext};
use axum::extract::{Extension, Path, Query, State};
use axum::response::{Html, Redirect};
use axum::Form;
use serde::Deserialize;
use souk_auth::{Flash, SessionId};
use souk_commerce::ids::CategoryId;
use souk_commerce::listing::ADMIN_PAGE_SIZE;
use souk_commerce::Category;
use souk_store::StoreError;

#[derive(Deserialize)]
pub struct ListQuery {
    #[serde(default)]
    pub page: Option<i64>,
}

#[derive(Deserialize)]
pub struct CategoryForm {
    pub name: String,
}

/// GET /admin/categories.
pub async fn list(
    State(state): State<SharedState>,
    Extension(session_id): Extension<SessionId>,
    Query(query): Query<ListQuery>,
) -> Html<String> {
    let page = state
        .store
        .list_categories_page(query.page.unwrap_or(1), ADMIN_PAGE_SIZE);
    let ctx = PageContext::build(&state, &session_id, "Categories");
    Html(views::render_page(&ctx, &admin_views::categories_page(&page)))
}

/// POST /admin/categories - create when the slug is free.
pub async fn create(
    State(state): State<SharedState>,
    Extension(session_id): Extension<SessionId>,
    Form(form): Form<CategoryForm>,
) -> Redirect {
    let name = form.name.trim();
    if name.is_empty() {
        state
            .sessions
            .push_flash(&session_id, Flash::error("A category name is required."));
        return Redirect::to("/admin/categories");
    }

    match state.store.insert_category(Category::new(name)) {
        Ok(()) => {
            state
                .sessions
                .push_flash(&session_id, Flash::success("Category created."));
        }
        Err(StoreError::Duplicate(_)) => {
            state
                .sessions
                .push_flash(&session_id, Flash::error("That category already exists."));
        }
        Err(e) => {
            tracing::error!(error = %e, "category create failed");
            state
                .sessions
                .push_flash(&session_id, Flash::error("Could not create the category."));
        }
    }
    Redirect::to("/admin/categories")
}

/// POST /admin/categories/{id}/rename.
pub async fn rename(
    State(state): State<SharedState>,
    Extension(session_id): Extension<SessionId>,
    Path(id): Path<String>,
    Form(form): Form<CategoryForm>,
) -> Redirect {
    let category_id = CategoryId::new(id);
    let mut category = match state.store.category(&category_id) {
        Ok(category) => category,
        Err(e) => {
            tracing::warn!(category = %category_id, error = %e, "rename target missing");
            return Redirect::to("/admin/categories");
        }
    };

    category.rename(form.name.trim());
    match state.store.update_category(category) {
        Ok(()) => {
            state
                .sessions
                .push_flash(&session_id, Flash::success("Category renamed."));
        }
        Err(StoreError::Duplicate(_)) => {
            state
                .sessions
                .push_flash(&session_id, Flash::error("That name is already in use."));
        }
        Err(e) => {
            tracing::error!(category = %category_id, error = %e, "rename failed");
            state
                .sessions
                .push_flash(&session_id, Flash::error("Could not rename the category."));
        }
    }
    Redirect::to("/admin/categories")
}

/// POST /admin/categories/{id}/delete.
pub async fn delete(
    State(state): State<SharedState>,
    Extension(session_id): Extension<SessionId>,
    Path(id): Path<String>,
) -> Redirect {
    let category_id = CategoryId::new(id);
    match state.store.delete_category(&category_id) {
        Ok(()) => {
            state
                .sessions
                .push_flash(&session_id, Flash::success("Category deleted."));
        }
        Err(e) => {
            tracing::warn!(category = %category_id, error = %e, "category delete failed");
            state
                .sessions
                .push_flash(&session_id, Flash::error("Could not delete the category."));
        }
    }
    Redirect::to("/admin/categories")
}
