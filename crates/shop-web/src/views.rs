//! # Views
//!
//! Server-rendered HTML pages. Every interpolated value goes through
//! [`escape`].

use axum::http::StatusCode;
use shop_core::{Currency, Page, Product};

/// Escape text for HTML element and attribute content
pub fn escape(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for ch in input.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            _ => out.push(ch),
        }
    }
    out
}

fn price_label(product: &Product, currency: Currency) -> String {
    match product.price_in(currency) {
        Ok(price) => price.display(),
        Err(_) => format!("{} {}", currency, product.price),
    }
}

/// Wrap page content in the shared layout
pub fn layout(title: &str, content: &str) -> String {
    format!(
        r#"<!doctype html>
<html lang="en">
<head>
  <meta charset="utf-8">
  <meta name="viewport" content="width=device-width, initial-scale=1">
  <title>{title} · Storefront</title>
  <link href="https://cdn.jsdelivr.net/npm/bootstrap@5.3.3/dist/css/bootstrap.min.css" rel="stylesheet">
</head>
<body>
<nav class="navbar navbar-expand-lg navbar-dark bg-dark">
  <div class="container-fluid">
    <a class="navbar-brand" href="/">Storefront</a>
    <div>
      <a class="btn btn-primary btn-sm" href="/products">Products</a>
    </div>
  </div>
</nav>
<main class="py-4">
<div class="container">
{content}
</div>
</main>
</body>
</html>
"#,
        title = escape(title),
        content = content,
    )
}

fn pagination(page: &Page<Product>) -> String {
    if page.total_pages() <= 1 {
        return String::new();
    }

    let mut links = String::from(r#"<nav><ul class="pagination">"#);
    if page.has_previous() {
        links.push_str(&format!(
            r#"<li class="page-item"><a class="page-link" href="/products?page={}">Previous</a></li>"#,
            page.page - 1
        ));
    }
    links.push_str(&format!(
        r#"<li class="page-item disabled"><span class="page-link">Page {} of {}</span></li>"#,
        page.page,
        page.total_pages()
    ));
    if page.has_next() {
        links.push_str(&format!(
            r#"<li class="page-item"><a class="page-link" href="/products?page={}">Next</a></li>"#,
            page.page + 1
        ));
    }
    links.push_str("</ul></nav>");
    links
}

/// Product list with view and buy links for every product on the page
pub fn product_list(page: &Page<Product>, currency: Currency) -> String {
    let mut cards = String::new();
    for product in &page.items {
        cards.push_str(&format!(
            r#"
  <div class="col-md-4">
    <div class="card mb-3">
      <div class="card-body">
        <h5 class="card-title">{title}</h5>
        <p class="card-text">{description}</p>
        <p class="fw-bold">{price}</p>
        <a href="/products/{id}" class="btn btn-outline-primary btn-sm">View</a>
        <a href="/checkout/{id}" class="btn btn-primary btn-sm">Buy</a>
      </div>
    </div>
  </div>"#,
            id = product.id,
            title = escape(&product.title),
            description = escape(&product.description),
            price = escape(&price_label(product, currency)),
        ));
    }

    if page.items.is_empty() {
        cards.push_str(r#"<p class="text-muted">No products available.</p>"#);
    }

    layout(
        "Products",
        &format!(
            "<h1 class=\"mb-3\">Products</h1>\n<div class=\"row\">{}\n</div>\n{}",
            cards,
            pagination(page)
        ),
    )
}

/// Detail page for one product
pub fn product_detail(product: &Product, currency: Currency) -> String {
    layout(
        &product.title,
        &format!(
            r#"<h1>{title}</h1>
<p>{description}</p>
<p class="fw-bold">{price}</p>
<a href="/checkout/{id}" class="btn btn-primary">Proceed to Checkout</a>
<a href="/products" class="btn btn-link">Back</a>"#,
            id = product.id,
            title = escape(&product.title),
            description = escape(&product.description),
            price = escape(&price_label(product, currency)),
        ),
    )
}

/// Confirmation page with the form that starts the payment
pub fn checkout_confirmation(product: &Product, currency: Currency) -> String {
    layout(
        &format!("Checkout: {}", product.title),
        &format!(
            r#"<h1 class="mb-3">Checkout: {title}</h1>
<p>Amount: <strong>{price}</strong></p>
<form method="POST" action="/checkout/{id}">
  <button class="btn btn-primary">Pay with Stripe</button>
</form>
<p class="mt-3 text-muted">Test card: 4242 4242 4242 4242 (any future expiry, any CVC)</p>"#,
            id = product.id,
            title = escape(&product.title),
            price = escape(&price_label(product, currency)),
        ),
    )
}

pub fn payment_success(session_id: Option<&str>) -> String {
    let session = session_id
        .map(|id| format!("<p>Session: <code>{}</code></p>", escape(id)))
        .unwrap_or_default();

    layout(
        "Payment Successful",
        &format!(
            r#"<h1>Payment Successful</h1>
{session}
<p class="text-muted">Thank you! Your payment was submitted to the provider.</p>
<a href="/products" class="btn btn-primary">Continue shopping</a>"#,
            session = session
        ),
    )
}

pub fn payment_cancel() -> String {
    layout(
        "Payment Cancelled",
        r#"<h1>Payment Cancelled</h1>
<p class="text-muted">No charges were made.</p>
<a href="/products" class="btn btn-primary">Back to products</a>"#,
    )
}

/// Error page for a failed request
pub fn error_page(status: StatusCode, message: &str) -> String {
    let heading = match status {
        StatusCode::NOT_FOUND => "Not Found",
        s if s.is_server_error() => "Something went wrong",
        _ => "Request failed",
    };

    layout(
        heading,
        &format!(
            r#"<h1>{code} · {heading}</h1>
<p>{message}</p>
<a href="/products" class="btn btn-link">Back to products</a>"#,
            code = status.as_u16(),
            heading = heading,
            message = escape(message),
        ),
    )
}
