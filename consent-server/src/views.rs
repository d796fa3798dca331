//! Minimal server-side HTML rendering for the consent and error pages

use crate::authority::ConsentRecord;

/// Escape text for safe interpolation into HTML
fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            _ => out.push(c),
        }
    }
    out
}

fn page(title: &str, body: &str) -> String {
    format!(
        "<!DOCTYPE html>\n<html>\n<head><meta charset=\"utf-8\"><title>{}</title></head>\n<body>\n{}\n</body>\n</html>\n",
        escape_html(title),
        body
    )
}

/// Error page shown for authority-supplied errors and missing consent IDs
pub fn error_page(error: &str, error_description: Option<&str>) -> String {
    let mut body = format!("<h1>Error: {}</h1>", escape_html(error));
    if let Some(description) = error_description {
        body.push_str(&format!("\n<p>{}</p>", escape_html(description)));
    }
    page("Error", &body)
}

/// Consent decision page: lists the requested scopes and posts the
/// approval form back to `/consent?consent=<id>`
pub fn consent_page(id: &str, consent: &ConsentRecord) -> String {
    let scopes: String = consent
        .requested_scopes
        .iter()
        .map(|scope| format!("<li>{}</li>", escape_html(scope)))
        .collect();

    let body = format!(
        "<h1>An application requests access on your behalf</h1>\n\
         <p>Requested scopes:</p>\n\
         <ul>{}</ul>\n\
         <form method=\"post\" action=\"/consent?consent={}\">\n\
         <label>Scheme <input type=\"text\" name=\"scheme\" value=\"saml\"></label>\n\
         <label>Identifier <input type=\"text\" name=\"identifier\"></label>\n\
         <button type=\"submit\">Approve</button>\n\
         </form>",
        scopes,
        escape_html(id)
    );
    page("Consent request", &body)
}
