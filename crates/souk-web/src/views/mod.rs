//! Server-rendered HTML.
//!
//! Pages are plain strings assembled with `format!`: a shared shell with
//! navigation, flash block and footer, and per-screen body builders in the
//! submodules. No template engine.

pub mod admin;
pub mod cart;
pub mod pages;
pub mod shop;
pub mod user;

use crate::state::AppState;
use souk_auth::{Flash, SessionId};
use souk_commerce::Category;

/// Everything the page shell needs, gathered once per rendered request.
pub struct PageContext {
    /// Document title.
    pub title: String,
    /// Flash messages drained from the session.
    pub flashes: Vec<Flash>,
    /// Cart badge count.
    pub cart_qty: i64,
    /// Whether a visitor is signed in.
    pub signed_in: bool,
    /// Whether the visitor is an admin.
    pub is_admin: bool,
    /// Categories for the navigation menu.
    pub categories: Vec<Category>,
}

impl PageContext {
    /// Gather the shell context for the current request. Draining the
    /// flash queue here is what makes flashes one-shot.
    pub fn build(state: &AppState, session_id: &SessionId, title: impl Into<String>) -> Self {
        let flashes = state.sessions.take_flash(session_id);
        let session = state.sessions.snapshot(session_id);
        let is_admin = session
            .account_id
            .as_ref()
            .and_then(|id| state.store.account(id).ok())
            .map(|a| a.is_admin())
            .unwrap_or(false);

        Self {
            title: title.into(),
            flashes,
            cart_qty: session.cart_qty(),
            signed_in: session.is_signed_in(),
            is_admin,
            categories: state.store.list_categories(),
        }
    }
}

/// Escape text for interpolation into HTML.
pub fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Render a full document: shell around the given body.
pub fn render_page(ctx: &PageContext, body_html: &str) -> String {
    let category_links: String = ctx
        .categories
        .iter()
        .map(|c| {
            format!(
                r#"<li><a href="/category/{}">{}</a></li>"#,
                escape_html(&c.slug),
                escape_html(&c.name)
            )
        })
        .collect();

    let flash_block: String = ctx
        .flashes
        .iter()
        .map(|f| {
            format!(
                r#"<div class="alert {}">{}</div>"#,
                f.css_class(),
                escape_html(&f.message)
            )
        })
        .collect();

    let account_links = if ctx.signed_in {
        let admin_link = if ctx.is_admin {
            r#"<a href="/admin">Back office</a>"#
        } else {
            ""
        };
        format!(
            r#"{}<a href="/user/profile">Profile</a> <a href="/user/signout">Sign out</a>"#,
            admin_link
        )
    } else {
        r#"<a href="/user/signin">Sign in</a> <a href="/user/signup">Sign up</a>"#.to_string()
    };

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="utf-8">
    <meta name="viewport" content="width=device-width, initial-scale=1">
    <title>{title} - Souk</title>
</head>
<body>
    <header>
        <a class="brand" href="/">Souk</a>
        <nav>
            <ul>{category_links}</ul>
        </nav>
        <form action="/search" method="get">
            <input type="text" name="q" placeholder="Search products">
            <button type="submit">Search</button>
        </form>
        <div class="account">{account_links}</div>
        <a class="cart-badge" href="/cart">Cart ({cart_qty})</a>
    </header>
    {flash_block}
    <main>
    {body_html}
    </main>
    <footer>
        <a href="/about-us">About us</a>
        <a href="/shipping-policy">Shipping policy</a>
        <a href="/careers">Careers</a>
        <a href="/contact">Contact</a>
        <form action="/newsletter" method="post">
            <input type="email" name="email" placeholder="Join our newsletter">
            <button type="submit">Subscribe</button>
        </form>
    </footer>
</body>
</html>"#,
        title = escape_html(&ctx.title),
        category_links = category_links,
        flash_block = flash_block,
        account_links = account_links,
        cart_qty = ctx.cart_qty,
        body_html = body_html,
    )
}

/// Pagination links for a listing page.
pub fn pagination_links(base_path: &str, pagination: &souk_commerce::listing::Pagination) -> String {
    if pagination.total_pages <= 1 {
        return String::new();
    }
    let separator = if base_path.contains('?') { '&' } else { '?' };
    let mut out = String::from(r#"<nav class="pagination">"#);
    if pagination.has_prev {
        out.push_str(&format!(
            r#"<a href="{}{}page={}">Previous</a>"#,
            base_path,
            separator,
            pagination.page - 1
        ));
    }
    out.push_str(&format!(
        "<span>Page {} of {}</span>",
        pagination.page, pagination.total_pages
    ));
    if pagination.has_next {
        out.push_str(&format!(
            r#"<a href="{}{}page={}">Next</a>"#,
            base_path,
            separator,
            pagination.page + 1
        ));
    }
    out.push_str("</nav>");
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_html() {
        assert_eq!(
            escape_html(r#"<b>"a" & 'b'</b>"#),
            "&lt;b&gt;&quot;a&quot; &amp; &#39;b&#39;&lt;/b&gt;"
        );
        assert_eq!(escape_html("plain"), "plain");
    }

    #[test]
    fn test_pagination_links() {
        let p = souk_commerce::listing::Pagination::new(2, 8, 30);
        let html = pagination_links("/", &p);
        assert!(html.contains("page=1"));
        assert!(html.contains("page=3"));
        assert!(html.contains("Page 2 of 4"));

        let single = souk_commerce::listing::Pagination::new(1, 8, 3);
        assert!(pagination_links("/", &single).is_empty());
    }
}
