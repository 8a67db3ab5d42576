//! Account screens: signup, signin, profile, profile edit.

use super::escape_html;
use souk_auth::Account;
use souk_commerce::Order;

/// Signup form.
pub fn signup_page() -> String {
    r#"<h1>Create an account</h1>
<form action="/user/signup" method="post">
    <label>Email <input type="email" name="email" required></label>
    <label>Username <input type="text" name="username" required></label>
    <label>Password <input type="password" name="password" required></label>
    <label>Confirm password <input type="password" name="confirm_password" required></label>
    <button type="submit">Sign up</button>
</form>
<p>Already have an account? <a href="/user/signin">Sign in</a></p>"#
        .to_string()
}

/// Signin form.
pub fn signin_page() -> String {
    r#"<h1>Sign in</h1>
<form action="/user/signin" method="post">
    <label>Email <input type="email" name="email" required></label>
    <label>Password <input type="password" name="password" required></label>
    <label><input type="checkbox" name="remember" value="1"> Remember me</label>
    <button type="submit">Sign in</button>
</form>
<p>New here? <a href="/user/signup">Create an account</a></p>"#
        .to_string()
}

fn order_row(order: &Order) -> String {
    let items: String = order
        .cart
        .items
        .iter()
        .map(|i| format!("<li>{} x {}</li>", i.qty, escape_html(&i.title)))
        .collect();
    format!(
        r#"<div class="order">
    <h3>Order #{number}</h3>
    <ul>{items}</ul>
    <p>{total_qty} items, {total_cost}</p>
    <p class="address">Shipped to {address}</p>
</div>"#,
        number = escape_html(&order.order_number),
        items = items,
        total_qty = order.cart.total_qty,
        total_cost = order.cart.total_cost,
        address = escape_html(&order.address),
    )
}

/// Profile page with order history.
pub fn profile_page(account: &Account, orders: &[Order]) -> String {
    let avatar = account
        .avatar_path
        .as_deref()
        .map(|p| format!(r#"<img class="avatar" src="{}" alt="avatar">"#, escape_html(p)))
        .unwrap_or_default();
    let history = if orders.is_empty() {
        "<p>No orders yet.</p>".to_string()
    } else {
        orders.iter().map(order_row).collect()
    };
    format!(
        r#"{avatar}
<h1>{username}</h1>
<p>{email}</p>
<a href="/user/edit-profile">Edit profile</a>
<h2>Order history</h2>
{history}"#,
        avatar = avatar,
        username = escape_html(&account.username),
        email = escape_html(&account.email),
        history = history,
    )
}

/// Profile edit form.
pub fn edit_profile_page(account: &Account) -> String {
    format!(
        r#"<h1>Edit profile</h1>
<form action="/user/edit-profile" method="post" enctype="multipart/form-data">
    <label>Username <input type="text" name="username" value="{username}" required></label>
    <label>Address <input type="text" name="address" value="{address}"></label>
    <label>Avatar <input type="text" name="avatar_path" placeholder="leave empty to keep current"></label>
    <button type="submit">Save</button>
</form>"#,
        username = escape_html(&account.username),
        address = account.address.as_deref().map(escape_html).unwrap_or_default(),
    )
}
