//! HTTP request parsing
//!
//! Reads an HTTP/1.1 request from a buffered stream: request line, headers,
//! and a Content-Length delimited body. Only what the file server needs;
//! no chunked encoding, no keep-alive.

use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncReadExt};

use crate::error::ProtocolError;

const MAX_REQUEST_LINE: usize = 8192;
const MAX_HEADERS: usize = 100;

/// A parsed HTTP request
#[derive(Debug)]
pub struct Request {
    pub method: String,
    /// Percent-decoded request path, query string stripped
    pub path: String,
    pub headers: Vec<(String, String)>,
    pub body: Vec<u8>,
}

impl Request {
    /// Case-insensitive header lookup
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }

    pub fn content_length(&self) -> Option<usize> {
        self.header("content-length")
            .and_then(|value| value.trim().parse().ok())
    }
}

/// Reads one request from the stream.
///
/// `max_body` caps the accepted Content-Length; larger bodies fail with
/// [`ProtocolError::PayloadTooLarge`] before anything is read.
pub async fn read_request<R>(reader: &mut R, max_body: usize) -> Result<Request, ProtocolError>
where
    R: AsyncBufRead + Unpin,
{
    let mut line = String::new();

    let n = reader.read_line(&mut line).await?;
    if n == 0 {
        return Err(ProtocolError::ConnectionClosed);
    }
    if n > MAX_REQUEST_LINE {
        return Err(ProtocolError::MalformedRequestLine("too long".into()));
    }

    let request_line = line.trim_end_matches("\r\n").trim_end_matches('\n');
    let mut parts = request_line.split_whitespace();
    let method = parts
        .next()
        .ok_or_else(|| ProtocolError::MalformedRequestLine(request_line.to_string()))?
        .to_string();
    let target = parts
        .next()
        .ok_or_else(|| ProtocolError::MalformedRequestLine(request_line.to_string()))?;
    let version = parts
        .next()
        .ok_or_else(|| ProtocolError::MalformedRequestLine(request_line.to_string()))?;

    if !version.starts_with("HTTP/") {
        return Err(ProtocolError::MalformedRequestLine(request_line.to_string()));
    }

    // Query string is carried but unused; the path grammar does all the work
    let raw_path = target.split('?').next().unwrap_or(target);
    let path = percent_decode(raw_path);

    let mut headers = Vec::new();
    loop {
        line.clear();
        let n = reader.read_line(&mut line).await?;
        if n == 0 {
            return Err(ProtocolError::ConnectionClosed);
        }

        let header_line = line.trim_end_matches("\r\n").trim_end_matches('\n');
        if header_line.is_empty() {
            break;
        }

        if headers.len() >= MAX_HEADERS {
            return Err(ProtocolError::MalformedHeader("too many headers".into()));
        }

        let (name, value) = header_line
            .split_once(':')
            .ok_or_else(|| ProtocolError::MalformedHeader(header_line.to_string()))?;
        headers.push((name.trim().to_string(), value.trim().to_string()));
    }

    let mut request = Request {
        method,
        path,
        headers,
        body: Vec::new(),
    };

    if let Some(length) = request.content_length() {
        if length > max_body {
            return Err(ProtocolError::PayloadTooLarge(length));
        }
        let mut body = vec![0u8; length];
        reader.read_exact(&mut body).await?;
        request.body = body;
    }

    Ok(request)
}

/// Decodes %XX escapes in a request path. Invalid escapes pass through
/// unchanged; the result is lossily converted to UTF-8.
pub fn percent_decode(input: &str) -> String {
    let bytes = input.as_bytes();
    let mut decoded = Vec::with_capacity(bytes.len());

    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'%' && i + 2 < bytes.len() {
            if let (Some(hi), Some(lo)) = (hex_value(bytes[i + 1]), hex_value(bytes[i + 2])) {
                decoded.push(hi * 16 + lo);
                i += 3;
                continue;
            }
        }
        decoded.push(bytes[i]);
        i += 1;
    }

    String::from_utf8_lossy(&decoded).into_owned()
}

fn hex_value(byte: u8) -> Option<u8> {
    (byte as char).to_digit(16).map(|v| v as u8)
}
