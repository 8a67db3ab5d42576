//! Shop screens: product listings and the product page.

use super::{escape_html, pagination_links};
use souk_commerce::listing::Page;
use souk_commerce::Product;

fn product_card(product: &Product) -> String {
    let image = product
        .image_path
        .as_deref()
        .map(|p| format!(r#"<img src="{}" alt="{}">"#, escape_html(p), escape_html(&product.name)))
        .unwrap_or_default();
    let action = if product.available {
        format!(
            r#"<a href="/add-to-cart/{}">Add to cart</a>"#,
            product.id.as_str()
        )
    } else {
        r#"<span class="sold-out">Sold out</span>"#.to_string()
    };
    format!(
        r#"<div class="product-card">
    {image}
    <h3><a href="/product/{slug}">{name}</a></h3>
    <p class="price">{price}</p>
    {action}
</div>"#,
        image = image,
        slug = escape_html(&product.slug),
        name = escape_html(&product.name),
        price = product.price,
        action = action,
    )
}

/// Product grid with pagination, shared by the index, category and search
/// screens.
pub fn listing(heading: &str, page: &Page<Product>, base_path: &str) -> String {
    if page.is_empty() {
        return format!(
            "<h1>{}</h1><p>No products found.</p>",
            escape_html(heading)
        );
    }
    let cards: String = page.items.iter().map(product_card).collect();
    format!(
        r#"<h1>{heading}</h1>
<div class="product-grid">
{cards}
</div>
{pagination}"#,
        heading = escape_html(heading),
        cards = cards,
        pagination = pagination_links(base_path, &page.pagination),
    )
}

/// Single product page.
pub fn product_detail(product: &Product) -> String {
    let image = product
        .image_path
        .as_deref()
        .map(|p| format!(r#"<img src="{}" alt="{}">"#, escape_html(p), escape_html(&product.name)))
        .unwrap_or_default();
    let manufacturer = product
        .manufacturer
        .as_deref()
        .map(|m| format!("<p>By {}</p>", escape_html(m)))
        .unwrap_or_default();
    let description = product
        .description
        .as_deref()
        .map(escape_html)
        .unwrap_or_default();
    let action = if product.available {
        format!(
            r#"<a href="/add-to-cart/{}">Add to cart</a>"#,
            product.id.as_str()
        )
    } else {
        r#"<span class="sold-out">Sold out</span>"#.to_string()
    };
    format!(
        r#"<article class="product">
    {image}
    <h1>{name}</h1>
    <p class="code">{code}</p>
    {manufacturer}
    <p class="price">{price}</p>
    <p>{description}</p>
    {action}
</article>"#,
        image = image,
        name = escape_html(&product.name),
        code = escape_html(&product.code),
        manufacturer = manufacturer,
        price = product.price,
        description = description,
        action = action,
    )
}
