//! Public catalogue pages.

use super::escape;
use crate::domain::{Category, Product};

pub fn category_list(categories: &[Category]) -> String {
    if categories.is_empty() {
        return "<p>No categories yet.</p>".to_owned();
    }
    let mut out = String::from(r#"<ul class="categories">"#);
    for category in categories {
        out.push_str(&format!(
            r#"<li><a href="/category/{id}">{name}</a></li>"#,
            id = category.id(),
            name = escape(category.name())
        ));
    }
    out.push_str("</ul>");
    out
}

pub fn product_list(products: &[Product]) -> String {
    if products.is_empty() {
        return "<p>No products in this category.</p>".to_owned();
    }
    let mut out = String::from(r#"<ul class="products">"#);
    for product in products {
        out.push_str(&format!(
            r#"<li><strong>{name}</strong> ${price} <span class="stock">{stock} in stock</span>"#,
            name = escape(product.name()),
            price = product.price(),
            stock = product.stock()
        ));
        if let Some(description) = product.description() {
            out.push_str(&format!("<p>{}</p>", escape(description)));
        }
        out.push_str("</li>");
    }
    out.push_str("</ul>");
    out
}

pub fn not_found() -> String {
    r#"<p>The page you asked for does not exist. <a href="/">Back to the catalogue</a></p>"#
        .to_owned()
}
