//! Registration and login pages.

use super::{Field, escape};
use crate::inbound::http::forms::FieldErrors;

/// Registration form; passwords are never echoed back.
pub fn register_form(username: &str, errors: &FieldErrors) -> String {
    let fields = [
        Field {
            name: "username",
            label: "Username",
            kind: "text",
            value: username,
        },
        Field {
            name: "password",
            label: "Password",
            kind: "password",
            value: "",
        },
        Field {
            name: "password2",
            label: "Repeat Password",
            kind: "password",
            value: "",
        },
    ];
    let rendered: String = fields.iter().map(|field| field.render(errors)).collect();
    format!(
        r#"<form method="post" action="/register">{rendered}<p><button type="submit">Register</button></p></form>"#
    )
}

/// Login form posting back to itself with the return path preserved.
pub fn login_form(action: &str, username: &str, remember: bool, errors: &FieldErrors) -> String {
    let fields = [
        Field {
            name: "username",
            label: "Username",
            kind: "text",
            value: username,
        },
        Field {
            name: "password",
            label: "Password",
            kind: "password",
            value: "",
        },
    ];
    let rendered: String = fields.iter().map(|field| field.render(errors)).collect();
    let checked = if remember { " checked" } else { "" };
    format!(
        r#"<form method="post" action="{action}">{rendered}<p><label><input type="checkbox" name="remember_me" value="y"{checked}> Remember Me</label></p><p><button type="submit">Sign In</button></p></form><p>New here? <a href="/register">Register</a></p>"#,
        action = escape(action),
    )
}
