//! Marketing pages and the contact form.

/// About-us page.
pub fn about_us() -> String {
    r#"<h1>About us</h1>
<p>Souk is a small family-run store shipping household goods across the
Emirates since 2015. Everything we list is in our own warehouse.</p>"#
        .to_string()
}

/// Shipping policy page.
pub fn shipping_policy() -> String {
    r#"<h1>Shipping policy</h1>
<p>Orders placed before 2pm ship the same day. Delivery within the UAE
takes one to three working days. Shipping is free on orders over 200 AED.</p>"#
        .to_string()
}

/// Careers page.
pub fn careers() -> String {
    r#"<h1>Careers</h1>
<p>We are not hiring right now. Check back soon, or send us a note through
the <a href="/contact">contact form</a>.</p>"#
        .to_string()
}

/// Contact form.
pub fn contact() -> String {
    r#"<h1>Contact us</h1>
<form action="/contact" method="post">
    <label>Name <input type="text" name="name" required></label>
    <label>Email <input type="email" name="email" required></label>
    <label>Message <textarea name="message" required></textarea></label>
    <button type="submit">Send</button>
</form>"#
        .to_string()
}
