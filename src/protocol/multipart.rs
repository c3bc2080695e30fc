//! Multipart form-data parsing
//!
//! Extracts the uploaded file (original filename plus raw bytes) from a
//! `multipart/form-data` body. Only the first part carrying a filename is
//! used; everything else in the body is ignored.

use crate::error::ProtocolError;

/// A file extracted from a multipart body
#[derive(Debug, PartialEq)]
pub struct FilePart {
    pub filename: String,
    pub content: Vec<u8>,
}

/// Pulls the boundary parameter out of a Content-Type header value.
pub fn boundary_from_content_type(value: &str) -> Option<String> {
    value.split(';').find_map(|param| {
        let param = param.trim();
        let boundary = param.strip_prefix("boundary=")?;
        Some(boundary.trim_matches('"').to_string())
    })
}

/// Scans a multipart body for the first part with a filename.
///
/// Part layout: `--boundary CRLF headers CRLF CRLF content CRLF --boundary`,
/// terminated by `--boundary--`. Content is returned verbatim, byte for
/// byte.
pub fn extract_file_part(body: &[u8], boundary: &str) -> Result<FilePart, ProtocolError> {
    let delimiter = format!("--{}", boundary).into_bytes();

    let mut pos = find_bytes(body, &delimiter, 0)
        .ok_or_else(|| ProtocolError::MalformedMultipart("boundary not found".into()))?
        + delimiter.len();

    loop {
        // Terminal delimiter: no file part anywhere in the body
        if body[pos..].starts_with(b"--") {
            return Err(ProtocolError::MissingFilePart);
        }
        if body[pos..].starts_with(b"\r\n") {
            pos += 2;
        }

        let headers_end = find_bytes(body, b"\r\n\r\n", pos)
            .ok_or_else(|| ProtocolError::MalformedMultipart("unterminated part headers".into()))?;
        let headers = String::from_utf8_lossy(&body[pos..headers_end]);
        let filename = headers.lines().find_map(filename_from_disposition);

        let content_start = headers_end + 4;
        let mut closing = b"\r\n".to_vec();
        closing.extend_from_slice(&delimiter);
        let content_end = find_bytes(body, &closing, content_start)
            .ok_or_else(|| ProtocolError::MalformedMultipart("unterminated part content".into()))?;

        if let Some(filename) = filename {
            return Ok(FilePart {
                filename,
                content: body[content_start..content_end].to_vec(),
            });
        }

        pos = content_end + closing.len();
    }
}

/// Parses `filename="..."` out of a Content-Disposition header line.
fn filename_from_disposition(line: &str) -> Option<String> {
    let (name, value) = line.split_once(':')?;
    if !name.trim().eq_ignore_ascii_case("content-disposition") {
        return None;
    }

    let marker = "filename=\"";
    let start = value.find(marker)? + marker.len();
    let end = value[start..].find('"')? + start;
    Some(value[start..end].to_string())
}

fn find_bytes(haystack: &[u8], needle: &[u8], from: usize) -> Option<usize> {
    if needle.is_empty() || from > haystack.len() {
        return None;
    }
    haystack[from..]
        .windows(needle.len())
        .position(|window| window == needle)
        .map(|i| i + from)
}
