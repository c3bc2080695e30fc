//! HTTP response handling
//!
//! Defines response construction and the directory-listing page renderer.

use crate::storage::Listing;

/// Common HTTP status codes used by the server
pub const OK: u16 = 200;
pub const BAD_REQUEST: u16 = 400;
pub const UNAUTHORIZED: u16 = 401;
pub const NOT_FOUND: u16 = 404;
pub const PAYLOAD_TOO_LARGE: u16 = 413;
pub const INTERNAL_ERROR: u16 = 500;

/// An HTTP response ready to be serialized onto the wire
#[derive(Debug)]
pub struct Response {
    pub status: u16,
    content_type: &'static str,
    challenge: bool,
    body: Vec<u8>,
}

impl Response {
    pub fn html(status: u16, body: String) -> Self {
        Self {
            status,
            content_type: "text/html; charset=utf-8",
            challenge: false,
            body: body.into_bytes(),
        }
    }

    pub fn json(status: u16, value: serde_json::Value) -> Self {
        Self {
            status,
            content_type: "application/json",
            challenge: false,
            body: value.to_string().into_bytes(),
        }
    }

    /// 401 with the Basic challenge header the client needs to retry
    pub fn unauthorized() -> Self {
        Self {
            status: UNAUTHORIZED,
            content_type: "application/json",
            challenge: true,
            body: serde_json::json!({"detail": "Incorrect username or password"})
                .to_string()
                .into_bytes(),
        }
    }

    /// Serializes status line, headers, and body
    pub fn into_bytes(self) -> Vec<u8> {
        let mut head = format!(
            "HTTP/1.1 {} {}\r\n",
            self.status,
            reason_phrase(self.status)
        );
        head.push_str(&format!("Content-Type: {}\r\n", self.content_type));
        head.push_str(&format!("Content-Length: {}\r\n", self.body.len()));
        if self.challenge {
            head.push_str("WWW-Authenticate: Basic\r\n");
        }
        head.push_str("Connection: close\r\n\r\n");

        let mut bytes = head.into_bytes();
        bytes.extend_from_slice(&self.body);
        bytes
    }
}

/// Reason phrase for a status code
pub fn reason_phrase(status: u16) -> &'static str {
    match status {
        OK => "OK",
        BAD_REQUEST => "Bad Request",
        UNAUTHORIZED => "Unauthorized",
        NOT_FOUND => "Not Found",
        PAYLOAD_TOO_LARGE => "Payload Too Large",
        INTERNAL_ERROR => "Internal Server Error",
        _ => "Unknown",
    }
}

/// Renders the directory listing page.
///
/// Entries are emitted in the exact order the listing carries them; each
/// entry links back through the listing endpoint so directories stay
/// browsable and `..` walks up.
pub fn listing_page(listing: &Listing) -> String {
    let mut page = String::from(
        "<!DOCTYPE html>\n<html>\n<head><title>File server</title></head>\n<body>\n",
    );

    page.push_str(&format!(
        "<h1>Index of /{}</h1>\n",
        escape_html(&listing.base_path)
    ));

    if let Some(error) = &listing.error {
        page.push_str(&format!("<p class=\"error\">{}</p>\n", escape_html(error)));
    }

    page.push_str("<ul>\n");
    for entry in &listing.entries {
        page.push_str(&format!(
            "<li><a href=\"/files/get-file/{}{}\">{}</a></li>\n",
            escape_html(&listing.base_path),
            escape_html(entry),
            escape_html(entry)
        ));
    }
    page.push_str("</ul>\n</body>\n</html>\n");

    page
}

fn escape_html(input: &str) -> String {
    let mut escaped = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
