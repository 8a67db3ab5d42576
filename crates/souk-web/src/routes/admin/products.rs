//! Product management.

use crate::state::SharedState;
use crate::views::{self, admin as admin_views, PageContext};
use axum::extract::{Extension, Path, Query, State};
use axum::response::{Html, IntoResponse, Redirect, Response};
use axum::Form;
use serde::Deserialize;
use souk_auth::{Flash, SessionId};
use souk_commerce::ids::{CategoryId, ProductId};
use souk_commerce::listing::ADMIN_PAGE_SIZE;
use souk_commerce::{Currency, Money, Product};
use souk_store::StoreError;

#[derive(Deserialize)]
pub struct ListQuery {
    #[serde(default)]
    pub page: Option<i64>,
}

#[derive(Deserialize)]
pub struct ProductForm {
    pub name: String,
    pub code: String,
    pub price_minor: i64,
    pub quantity: i64,
    pub category_id: String,
    #[serde(default)]
    pub manufacturer: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub image_path: String,
}

fn non_empty(value: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// GET /admin/products.
pub async fn list(
    State(state): State<SharedState>,
    Extension(session_id): Extension<SessionId>,
    Query(query): Query<ListQuery>,
) -> Html<String> {
    let page = state
        .store
        .list_products(query.page.unwrap_or(1), ADMIN_PAGE_SIZE);
    let categories = state.store.list_categories();
    let ctx = PageContext::build(&state, &session_id, "Products");
    Html(views::render_page(
        &ctx,
        &admin_views::products_page(&page, &categories),
    ))
}

/// POST /admin/products - create a product.
pub async fn create(
    State(state): State<SharedState>,
    Extension(session_id): Extension<SessionId>,
    Form(form): Form<ProductForm>,
) -> Redirect {
    let category_id = CategoryId::new(form.category_id.clone());
    if state.store.category(&category_id).is_err() {
        state
            .sessions
            .push_flash(&session_id, Flash::error("Pick a valid category."));
        return Redirect::to("/admin/products");
    }

    let mut product = match Product::new(
        form.name.trim(),
        form.code.trim(),
        Money::new(form.price_minor, Currency::default()),
        form.quantity,
        category_id,
    ) {
        Ok(product) => product,
        Err(e) => {
            state
                .sessions
                .push_flash(&session_id, Flash::error(format!("Invalid product: {}", e)));
            return Redirect::to("/admin/products");
        }
    };
    product.manufacturer = non_empty(&form.manufacturer);
    product.description = non_empty(&form.description);
    product.image_path = non_empty(&form.image_path);

    match state.store.insert_product(product) {
        Ok(()) => {
            state
                .sessions
                .push_flash(&session_id, Flash::success("Product created."));
        }
        Err(StoreError::Duplicate(_)) => {
            state
                .sessions
                .push_flash(&session_id, Flash::error("That product code is already in use."));
        }
        Err(e) => {
            tracing::error!(error = %e, "product create failed");
            state
                .sessions
                .push_flash(&session_id, Flash::error("Could not create the product."));
        }
    }
    Redirect::to("/admin/products")
}

/// GET /admin/products/{id}/edit.
pub async fn edit_form(
    State(state): State<SharedState>,
    Extension(session_id): Extension<SessionId>,
    Path(id): Path<String>,
) -> Response {
    let product_id = ProductId::new(id);
    let product = match state.store.product(&product_id) {
        Ok(product) => product,
        Err(e) => {
            tracing::warn!(product = %product_id, error = %e, "edit target missing");
            return Redirect::to("/admin/products").into_response();
        }
    };

    let categories = state.store.list_categories();
    let ctx = PageContext::build(&state, &session_id, "Edit product");
    Html(views::render_page(
        &ctx,
        &admin_views::edit_product_page(&product, &categories),
    ))
    .into_response()
}

/// POST /admin/products/{id}/edit.
///
/// An empty image field keeps the stored image, same boundary rule as
/// avatar uploads.
pub async fn edit(
    State(state): State<SharedState>,
    Extension(session_id): Extension<SessionId>,
    Path(id): Path<String>,
    Form(form): Form<ProductForm>,
) -> Redirect {
    let product_id = ProductId::new(id);
    let mut product = match state.store.product(&product_id) {
        Ok(product) => product,
        Err(e) => {
            tracing::warn!(product = %product_id, error = %e, "edit target missing");
            return Redirect::to("/admin/products");
        }
    };

    if form.name.trim().is_empty() || form.code.trim().is_empty() {
        state
            .sessions
            .push_flash(&session_id, Flash::error("Name and code are required."));
        return Redirect::to("/admin/products");
    }
    if let Err(e) = product.set_price(Money::new(form.price_minor, product.price.currency)) {
        state
            .sessions
            .push_flash(&session_id, Flash::error(format!("Invalid price: {}", e)));
        return Redirect::to("/admin/products");
    }
    if form.quantity < 0 {
        state
            .sessions
            .push_flash(&session_id, Flash::error("Quantity cannot be negative."));
        return Redirect::to("/admin/products");
    }
    product.set_quantity(form.quantity);

    product.name = form.name.trim().to_string();
    product.code = form.code.trim().to_string();
    product.category_id = CategoryId::new(form.category_id.clone());
    product.manufacturer = non_empty(&form.manufacturer);
    product.description = non_empty(&form.description);
    if let Some(path) = non_empty(&form.image_path) {
        product.image_path = Some(path);
    }

    match state.store.update_product(product) {
        Ok(()) => {
            state
                .sessions
                .push_flash(&session_id, Flash::success("Product updated."));
        }
        Err(StoreError::Duplicate(_)) => {
            state
                .sessions
                .push_flash(&session_id, Flash::error("That product code is already in use."));
        }
        Err(e) => {
            tracing::error!(product = %product_id, error = %e, "product update failed");
            state
                .sessions
                .push_flash(&session_id, Flash::error("Could not update the product."));
        }
    }
    Redirect::to("/admin/products")
}

/// POST /admin/products/{id}/delete.
pub async fn delete(
    State(state): State<SharedState>,
    Extension(session_id): Extension<SessionId>,
    Path(id): Path<String>,
) -> Redirect {
    let product_id = ProductId::new(id);
    match state.store.delete_product(&product_id) {
        Ok(()) => {
            state
                .sessions
                .push_flash(&session_id, Flash::success("Product deleted."));
        }
        Err(e) => {
            tracing::warn!(product = %product_id, error = %e, "product delete failed");
            state
                .sessions
                .push_flash(&session_id, Flash::error("Could not delete the product."));
        }
    }
    Redirect::to("/admin/products")
}
