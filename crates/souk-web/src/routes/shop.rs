//! Shop-front handlers: listings, search, product pages.

use crate::state::SharedState;
use crate::views::{self, shop, PageContext};
use axum::extract::{Extension, Path, Query, State};
use axum::response::{Html, IntoResponse, Redirect, Response};
use serde::Deserialize;
use souk_auth::SessionId;
use souk_commerce::listing::SHOP_PAGE_SIZE;

#[derive(Deserialize)]
pub struct ListQuery {
    #[serde(default)]
    pub page: Option<i64>,
}

#[derive(Deserialize)]
pub struct SearchQuery {
    #[serde(default)]
    pub q: String,
    #[serde(default)]
    pub page: Option<i64>,
}

/// GET / - all products, newest first.
pub async fn index(
    State(state): State<SharedState>,
    Extension(session_id): Extension<SessionId>,
    Query(query): Query<ListQuery>,
) -> Html<String> {
    let page = state
        .store
        .list_products(query.page.unwrap_or(1), SHOP_PAGE_SIZE);
    let ctx = PageContext::build(&state, &session_id, "Shop");
    Html(views::render_page(&ctx, &shop::listing("All products", &page, "/")))
}

/// GET /category/{slug} - products in one category.
pub async fn by_category(
    State(state): State<SharedState>,
    Extension(session_id): Extension<SessionId>,
    Path(slug): Path<String>,
    Query(query): Query<ListQuery>,
) -> Response {
    let Some(category) = state.store.find_category_by_slug(&slug) else {
        tracing::warn!(%slug, "unknown category slug");
        return Redirect::to("/").into_response();
    };

    let page = state.store.list_products_by_category(
        &category.id,
        query.page.unwrap_or(1),
        SHOP_PAGE_SIZE,
    );
    let ctx = PageContext::build(&state, &session_id, category.name.clone());
    let base = format!("/category/{}", category.slug);
    Html(views::render_page(&ctx, &shop::listing(&category.name, &page, &base))).into_response()
}

/// GET /search?q= - case-insensitive name search.
pub async fn search(
    State(state): State<SharedState>,
    Extension(session_id): Extension<SessionId>,
    Query(query): Query<SearchQuery>,
) -> Html<String> {
    let page = state
        .store
        .search_products(&query.q, query.page.unwrap_or(1), SHOP_PAGE_SIZE);
    let heading = format!("Results for \"{}\"", query.q);
    let ctx = PageContext::build(&state, &session_id, "Search");
    let base = format!("/search?q={}", query.q);
    Html(views::render_page(&ctx, &shop::listing(&heading, &page, &base)))
}

/// GET /product/{slug} - single product page.
pub async fn product_detail(
    State(state): State<SharedState>,
    Extension(session_id): Extension<SessionId>,
    Path(slug): Path<String>,
) -> Response {
    let Some(product) = state.store.find_product_by_slug(&slug) else {
        tracing::warn!(%slug, "unknown product slug");
        return Redirect::to("/").into_response();
    };

    let ctx = PageContext::build(&state, &session_id, product.name.clone());
    Html(views::render_page(&ctx, &shop::product_detail(&product))).into_response()
}
