//! Module `routes`
//!
//! Defines the explicit request-to-handler mapping: a parsed request's
//! method and path are matched against a fixed route table, replacing any
//! framework-style declarative binding.

/// Represents a route matched from an HTTP request.
///
/// Path-carrying variants store the request-supplied relative path, still
/// untrusted at this point; confinement happens in the storage layer.
#[derive(Debug, PartialEq)]
pub enum Route {
    UploadFile(String), // POST /files/upload-file/{path}
    GetFile(String),    // GET /files/get-file/{path}
    Docs,               // GET /docs
    Redoc,              // GET /redoc
    OpenApi,            // GET /openapi.json
    Unknown,            // Anything else
}

/// Matches a method and percent-decoded path against the route table.
pub fn route(method: &str, path: &str) -> Route {
    match (method, path) {
        ("GET", "/docs") => Route::Docs,
        ("GET", "/redoc") => Route::Redoc,
        ("GET", "/openapi.json") => Route::OpenApi,
        _ => {
            if method == "POST" {
                if let Some(rest) = strip_route_prefix(path, "/files/upload-file") {
                    return Route::UploadFile(rest);
                }
            }
            if method == "GET" {
                if let Some(rest) = strip_route_prefix(path, "/files/get-file") {
                    return Route::GetFile(rest);
                }
            }
            Route::Unknown
        }
    }
}

/// Strips `prefix` (and the separator after it) from `path`, returning the
/// remainder. `/files/get-file` and `/files/get-file/` both yield an empty
/// remainder; `/files/get-filex` does not match.
fn strip_route_prefix(path: &str, prefix: &str) -> Option<String> {
    let rest = path.strip_prefix(prefix)?;
    if rest.is_empty() {
        Some(String::new())
    } else {
        rest.strip_prefix('/').map(|r| r.to_string())
    }
}
