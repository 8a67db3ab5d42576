//! Back-office screens.

use super::{escape_html, pagination_links};
use souk_auth::Account;
use souk_commerce::listing::Page;
use souk_commerce::{Category, Order, Product};

/// Dashboard with collection counts.
pub fn dashboard(products: i64, categories: i64, orders: i64, accounts: i64) -> String {
    format!(
        r#"<h1>Back office</h1>
<ul class="counts">
    <li><a href="/admin/products">{products} products</a></li>
    <li><a href="/admin/categories">{categories} categories</a></li>
    <li><a href="/admin/orders">{orders} orders</a></li>
    <li><a href="/admin/users">{accounts} users</a></li>
</ul>"#
    )
}

/// Category list with create and rename forms.
pub fn categories_page(page: &Page<Category>) -> String {
    let rows: String = page
        .items
        .iter()
        .map(|c| {
            format!(
                r#"<tr>
    <td>{name}</td>
    <td>{slug}</td>
    <td>
        <form action="/admin/categories/{id}/rename" method="post">
            <input type="text" name="name" value="{name}">
            <button type="submit">Rename</button>
        </form>
        <form action="/admin/categories/{id}/delete" method="post">
            <button type="submit">Delete</button>
        </form>
    </td>
</tr>"#,
                name = escape_html(&c.name),
                slug = escape_html(&c.slug),
                id = c.id.as_str(),
            )
        })
        .collect();

    format!(
        r#"<h1>Categories</h1>
<form action="/admin/categories" method="post">
    <input type="text" name="name" placeholder="New category" required>
    <button type="submit">Create</button>
</form>
<table>
    <thead><tr><th>Name</th><th>Slug</th><th></th></tr></thead>
    <tbody>{rows}</tbody>
</table>
{pagination}"#,
        rows = rows,
        pagination = pagination_links("/admin/categories", &page.pagination),
    )
}

fn product_form(action: &str, product: Option<&Product>, categories: &[Category]) -> String {
    let options: String = categories
        .iter()
        .map(|c| {
            let selected = product
                .map(|p| p.category_id == c.id)
                .unwrap_or(false);
            format!(
                r#"<option value="{}"{}>{}</option>"#,
                c.id.as_str(),
                if selected { " selected" } else { "" },
                escape_html(&c.name)
            )
        })
        .collect();
    let name = product.map(|p| escape_html(&p.name)).unwrap_or_default();
    let code = product.map(|p| escape_html(&p.code)).unwrap_or_default();
    let price = product.map(|p| p.price.minor_units).unwrap_or(0);
    let quantity = product.map(|p| p.quantity).unwrap_or(0);
    let manufacturer = product
        .and_then(|p| p.manufacturer.as_deref())
        .map(escape_html)
        .unwrap_or_default();
    let description = product
        .and_then(|p| p.description.as_deref())
        .map(escape_html)
        .unwrap_or_default();

    format!(
        r#"<form action="{action}" method="post" enctype="multipart/form-data">
    <label>Name <input type="text" name="name" value="{name}" required></label>
    <label>Code <input type="text" name="code" value="{code}" required></label>
    <label>Price (fils) <input type="number" name="price_minor" value="{price}" required></label>
    <label>Quantity <input type="number" name="quantity" value="{quantity}" required></label>
    <label>Category <select name="category_id">{options}</select></label>
    <label>Manufacturer <input type="text" name="manufacturer" value="{manufacturer}"></label>
    <label>Description <textarea name="description">{description}</textarea></label>
    <label>Image <input type="text" name="image_path" placeholder="leave empty to keep current"></label>
    <button type="submit">Save</button>
</form>"#
    )
}

/// Product list with a create form.
pub fn products_page(page: &Page<Product>, categories: &[Category]) -> String {
    let rows: String = page
        .items
        .iter()
        .map(|p| {
            format!(
                r#"<tr>
    <td>{name}</td>
    <td>{code}</td>
    <td>{price}</td>
    <td>{quantity}</td>
    <td>{available}</td>
    <td>
        <a href="/admin/products/{id}/edit">Edit</a>
        <form action="/admin/products/{id}/delete" method="post">
            <button type="submit">Delete</button>
        </form>
    </td>
</tr>"#,
                name = escape_html(&p.name),
                code = escape_html(&p.code),
                price = p.price,
                quantity = p.quantity,
                available = if p.available { "yes" } else { "no" },
                id = p.id.as_str(),
            )
        })
        .collect();

    format!(
        r#"<h1>Products</h1>
<h2>New product</h2>
{form}
<table>
    <thead><tr><th>Name</th><th>Code</th><th>Price</th><th>Qty</th><th>Available</th><th></th></tr></thead>
    <tbody>{rows}</tbody>
</table>
{pagination}"#,
        form = product_form("/admin/products", None, categories),
        rows = rows,
        pagination = pagination_links("/admin/products", &page.pagination),
    )
}

/// Product edit screen.
pub fn edit_product_page(product: &Product, categories: &[Category]) -> String {
    format!(
        "<h1>Edit {}</h1>\n{}",
        escape_html(&product.name),
        product_form(
            &format!("/admin/products/{}/edit", product.id.as_str()),
            Some(product),
            categories
        )
    )
}

/// Order list with the search-by-number form.
pub fn orders_page(page: &Page<Order>) -> String {
    let rows: String = page
        .items
        .iter()
        .map(|o| {
            format!(
                r#"<tr>
    <td>{number}</td>
    <td>{qty}</td>
    <td>{total}</td>
    <td>{address}</td>
    <td>
        <form action="/admin/orders/{id}/delete" method="post">
            <button type="submit">Delete</button>
        </form>
    </td>
</tr>"#,
                number = escape_html(&o.order_number),
                qty = o.cart.total_qty,
                total = o.cart.total_cost,
                address = escape_html(&o.address),
                id = o.id.as_str(),
            )
        })
        .collect();

    format!(
        r#"<h1>Orders</h1>
<form action="/admin/orders" method="get">
    <input type="text" name="number" placeholder="Order number">
    <button type="submit">Find</button>
</form>
<table>
    <thead><tr><th>Number</th><th>Items</th><th>Total</th><th>Address</th><th></th></tr></thead>
    <tbody>{rows}</tbody>
</table>
{pagination}"#,
        rows = rows,
        pagination = pagination_links("/admin/orders", &page.pagination),
    )
}

/// User list with promote and delete actions.
pub fn users_page(page: &Page<Account>) -> String {
    let rows: String = page
        .items
        .iter()
        .map(|a| {
            let promote = if a.is_admin() {
                String::new()
            } else {
                format!(
                    r#"<form action="/admin/users/{}/promote" method="post">
            <button type="submit">Promote</button>
        </form>"#,
                    a.id.as_str()
                )
            };
            format!(
                r#"<tr>
    <td>{username}</td>
    <td>{email}</td>
    <td>{role}</td>
    <td>
        {promote}
        <form action="/admin/users/{id}/delete" method="post">
            <button type="submit">Delete</button>
        </form>
    </td>
</tr>"#,
                username = escape_html(&a.username),
                email = escape_html(&a.email),
                role = a.role.as_str(),
                promote = promote,
                id = a.id.as_str(),
            )
        })
        .collect();

    format!(
        r#"<h1>Users</h1>
<table>
    <thead><tr><th>Username</th><th>Email</th><th>Role</th><th></th></tr></thead>
    <tbody>{rows}</tbody>
</table>
{pagination}"#,
        rows = rows,
        pagination = pagination_links("/admin/users", &page.pagination),
    )
}
