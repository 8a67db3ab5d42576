//! Cart and checkout screens.

use super::escape_html;
use souk_commerce::Cart;

/// The cart page.
pub fn cart_page(cart: &Cart) -> String {
    if cart.is_empty() {
        return r#"<h1>Your cart</h1><p>Your cart is empty.</p><a href="/">Continue shopping</a>"#
            .to_string();
    }

    let rows: String = cart
        .items
        .iter()
        .map(|item| {
            format!(
                r#"<tr>
    <td>{title}</td>
    <td>{code}</td>
    <td>{qty}</td>
    <td>{price}</td>
    <td>
        <a href="/add-to-cart/{id}">+</a>
        <a href="/reduce/{id}">-</a>
        <a href="/remove/{id}">Remove</a>
    </td>
</tr>"#,
                title = escape_html(&item.title),
                code = escape_html(&item.code),
                qty = item.qty,
                price = item.price,
                id = item.product_id.as_str(),
            )
        })
        .collect();

    format!(
        r#"<h1>Your cart</h1>
<table class="cart">
    <thead><tr><th>Item</th><th>Code</th><th>Qty</th><th>Price</th><th></th></tr></thead>
    <tbody>{rows}</tbody>
</table>
<p class="totals">{total_qty} items, total {total_cost}</p>
<a class="checkout" href="/checkout">Proceed to checkout</a>"#,
        rows = rows,
        total_qty = cart.total_qty,
        total_cost = cart.total_cost,
    )
}

/// The checkout form.
pub fn checkout_page(cart: &Cart, prefill_address: Option<&str>) -> String {
    let address = prefill_address.map(escape_html).unwrap_or_default();
    format!(
        r#"<h1>Checkout</h1>
<p class="totals">Paying {total_cost} for {total_qty} items</p>
<form action="/checkout" method="post">
    <label>Shipping address
        <input type="text" name="address" value="{address}" required>
    </label>
    <label>Card token
        <input type="text" name="payment_token" required>
    </label>
    <button type="submit">Pay now</button>
</form>"#,
        total_cost = cart.total_cost,
        total_qty = cart.total_qty,
        address = address,
    )
}
