//! Server-rendered HTML.
//!
//! Pages are assembled with `format!`; every interpolated value that came from
//! a user or the database goes through [`escape`].

use actix_web::HttpResponse;
use actix_web::http::StatusCode;
use actix_web::http::header::{CACHE_CONTROL, ContentType};

use crate::domain::User;
use crate::inbound::http::context::RequestContext;
use crate::inbound::http::forms::FieldErrors;

pub mod admin;
pub mod auth;
pub mod catalogue;

/// Escape text for use in HTML element content and quoted attributes.
pub fn escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#x27;"),
            other => escaped.push(other),
        }
    }
    escaped
}

/// Chrome shared by every page.
pub struct Layout<'a> {
    pub title: &'a str,
    pub actor: Option<&'a User>,
    pub flashes: &'a [String],
}

impl Layout<'_> {
    pub fn render(&self, body: &str) -> String {
        let mut nav = String::from(r#"<a href="/">Home</a>"#);
        match self.actor {
            Some(user) => {
                if user.is_admin() {
                    nav.push_str(r#" <a href="/admin">Admin</a>"#);
                }
                nav.push_str(&format!(
                    r#" <span class="user">{}</span> <a href="/logout">Logout</a>"#,
                    escape(user.username().as_ref())
                ));
            }
            None => nav.push_str(r#" <a href="/login">Login</a> <a href="/register">Register</a>"#),
        }

        let mut flashes = String::new();
        if !self.flashes.is_empty() {
            flashes.push_str(r#"<ul class="flashes">"#);
            for message in self.flashes {
                flashes.push_str(&format!("<li>{}</li>", escape(message)));
            }
            flashes.push_str("</ul>");
        }

        format!(
            "<!DOCTYPE html>\n<html lang=\"en\">\n<head><meta charset=\"utf-8\">\
             <title>{title} - PC Parts</title></head>\n<body>\n<nav>{nav}</nav>\n{flashes}\n\
             <main>\n<h1>{title}</h1>\n{body}\n</main>\n</body>\n</html>\n",
            title = escape(self.title),
        )
    }
}

/// Wrap a rendered page in an HTML response.
pub fn html(status: StatusCode, page: String) -> HttpResponse {
    HttpResponse::build(status)
        .content_type(ContentType::html())
        .insert_header((CACHE_CONTROL, "no-store"))
        .body(page)
}

/// Render a full page for the current actor, consuming pending flashes.
pub fn page(ctx: &RequestContext, status: StatusCode, title: &str, body: &str) -> HttpResponse {
    let flashes = ctx.take_flashes();
    let layout = Layout {
        title,
        actor: ctx.actor(),
        flashes: &flashes,
    };
    html(status, layout.render(body))
}

/// One labelled form control plus its error list.
pub(crate) struct Field<'a> {
    pub name: &'static str,
    pub label: &'a str,
    pub kind: &'a str,
    pub value: &'a str,
}

impl Field<'_> {
    pub(crate) fn render(&self, errors: &FieldErrors) -> String {
        let control = match self.kind {
            "textarea" => format!(
                r#"<textarea id="{name}" name="{name}">{value}</textarea>"#,
                name = self.name,
                value = escape(self.value)
            ),
            kind => format!(
                r#"<input id="{name}" name="{name}" type="{kind}" value="{value}">"#,
                name = self.name,
                value = escape(self.value)
            ),
        };
        format!(
            r#"<p><label for="{name}">{label}</label> {control}{errors}</p>"#,
            name = self.name,
            label = escape(self.label),
            errors = error_list(errors.get(self.name)),
        )
    }
}

pub(crate) fn error_list(messages: &[String]) -> String {
    if messages.is_empty() {
        return String::new();
    }
    let mut out = String::from(r#"<ul class="errors">"#);
    for message in messages {
        out.push_str(&format!("<li>{}</li>", escape(message)));
    }
    out.push_str("</ul>");
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("plain", "plain")]
    #[case("<script>alert('x')</script>", "&lt;script&gt;alert(&#x27;x&#x27;)&lt;/script&gt;")]
    #[case("a & \"b\"", "a &amp; &quot;b&quot;")]
    fn escapes_markup(#[case] raw: &str, #[case] expected: &str) {
        assert_eq!(escape(raw), expected);
    }

    #[rstest]
    fn layout_lists_flashes_once() {
        let flashes = vec!["Product added.".to_owned()];
        let page = Layout {
            title: "Admin",
            actor: None,
            flashes: &flashes,
        }
        .render("<p>body</p>");

        assert_eq!(page.matches("Product added.").count(), 1);
        assert!(page.contains(r#"<a href="/login">Login</a>"#));
    }

    #[rstest]
    fn error_list_escapes_each_message() {
        let messages = vec!["Too <long>".to_owned(), "Required.".to_owned()];

        assert_eq!(
            error_list(&messages),
            r#"<ul class="errors"><li>Too &lt;long&gt;</li><li>Required.</li></ul>"#
        );
        assert_eq!(error_list(&[]), "");
    }

    #[rstest]
    fn field_shows_its_errors() {
        let mut errors = FieldErrors::new();
        errors.add("price", "Number must be at least 0.");

        let html = Field {
            name: "price",
            label: "Price",
            kind: "text",
            value: "-1",
        }
        .render(&errors);

        assert!(html.contains(r#"value="-1""#));
        assert!(html.contains("<li>Number must be at least 0.</li>"));
    }
}
