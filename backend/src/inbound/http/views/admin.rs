//! Admin dashboard and product form.

use std::collections::HashMap;

use super::{Field, error_list, escape};
use crate::domain::{Category, CategoryId, Product};
use crate::inbound::http::forms::{FieldErrors, ProductForm};

pub fn dashboard(products: &[Product], categories: &[Category]) -> String {
    let names: HashMap<CategoryId, &str> = categories
        .iter()
        .map(|category| (category.id(), category.name()))
        .collect();

    let mut out = String::from(r#"<p><a href="/admin/product/add">Add / Update Product</a></p>"#);
    if products.is_empty() {
        out.push_str("<p>No products yet.</p>");
        return out;
    }
    out.push_str(
        "<table><thead><tr><th>ID</th><th>Name</th><th>Category</th><th>Price</th>\
         <th>Stock</th><th></th></tr></thead><tbody>",
    );
    for product in products {
        let category = names
            .get(&product.category_id())
            .copied()
            .unwrap_or("(unknown)");
        out.push_str(&format!(
            "<tr><td>{id}</td><td>{name}</td><td>{category}</td><td>{price}</td><td>{stock}</td>\
             <td><a href=\"/admin/product/{id}/edit\">Edit</a> \
             <form method=\"post\" action=\"/admin/product/{id}/delete\" class=\"inline\">\
             <button type=\"submit\">Delete</button></form></td></tr>",
            id = product.id(),
            name = escape(product.name()),
            category = escape(category),
            price = product.price(),
            stock = product.stock(),
        ));
    }
    out.push_str("</tbody></table>");
    out
}

/// Product form with the category selector built from the form's choices.
pub fn product_form(action: &str, form: &ProductForm, errors: &FieldErrors) -> String {
    let input = form.input();
    let mut out = format!(r#"<form method="post" action="{}">"#, escape(action));
    let fields = [
        Field {
            name: "name",
            label: "Product Name",
            kind: "text",
            value: &input.name,
        },
        Field {
            name: "description",
            label: "Description",
            kind: "textarea",
            value: &input.description,
        },
        Field {
            name: "price",
            label: "Price",
            kind: "text",
            value: &input.price,
        },
        Field {
            name: "stock",
            label: "Stock",
            kind: "text",
            value: &input.stock,
        },
    ];
    for field in &fields {
        out.push_str(&field.render(errors));
    }

    out.push_str(
        r#"<p><label for="category">Category</label> <select id="category" name="category">"#,
    );
    for category in form.choices() {
        let id = category.id().to_string();
        let selected = if id == input.category.trim() {
            " selected"
        } else {
            ""
        };
        out.push_str(&format!(
            r#"<option value="{id}"{selected}>{name}</option>"#,
            name = escape(category.name())
        ));
    }
    out.push_str("</select>");
    out.push_str(&error_list(errors.get("category")));
    out.push_str(
        r#"</p><p><button type="submit">Save</button> <a href="/admin">Cancel</a></p></form>"#,
    );
    out
}
