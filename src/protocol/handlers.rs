//! Route handlers module for the Rook file server.
//!
//! This module defines handler functions for the HTTP routes, covering
//! authentication, file uploads, and directory listing per request.

use log::{info, warn};
use serde_json::json;

use crate::auth;
use crate::config::ServerConfig;
use crate::docs;
use crate::error::handlers::{error_to_http_status, handle_error};
use crate::error::{FileServerError, StorageError};
use crate::protocol::Request;
use crate::protocol::multipart;
use crate::protocol::responses::{self, Response};
use crate::protocol::routes::Route;
use crate::storage;
use crate::storage::ListOutcome;

/// Dispatches a matched route to its corresponding handler.
///
/// Every known route sits behind the credential check; unknown routes get
/// a plain 404 with no challenge.
pub fn handle_route(route: &Route, request: &Request, config: &ServerConfig) -> Response {
    if matches!(route, Route::Unknown) {
        return Response::json(responses::NOT_FOUND, json!({"detail": "Not Found"}));
    }

    if let Err(e) = auth::check_credentials(request.header("authorization"), config) {
        info!("Rejected {} {}: {}", request.method, request.path, e);
        return Response::unauthorized();
    }

    match route {
        Route::UploadFile(path) => handle_upload(path, request, config),
        Route::GetFile(path) => handle_get_file(path, config),
        Route::Docs => Response::html(responses::OK, docs::swagger_page()),
        Route::Redoc => Response::html(responses::OK, docs::redoc_page()),
        Route::OpenApi => Response::json(responses::OK, docs::openapi_document()),
        Route::Unknown => Response::json(responses::NOT_FOUND, json!({"detail": "Not Found"})),
    }
}

/// Handles an upload: extracts the file from the multipart body, confines
/// the target directory, and stores the file.
fn handle_upload(relative_dir: &str, request: &Request, config: &ServerConfig) -> Response {
    let content_type = request.header("content-type").unwrap_or("");
    if !content_type.starts_with("multipart/form-data") {
        return upload_failure(responses::BAD_REQUEST, "expected multipart file body");
    }

    let boundary = match multipart::boundary_from_content_type(content_type) {
        Some(boundary) => boundary,
        None => return upload_failure(responses::BAD_REQUEST, "missing multipart boundary"),
    };

    let part = match multipart::extract_file_part(&request.body, &boundary) {
        Ok(part) => part,
        Err(e) => {
            warn!("Rejected upload body for {}: {}", relative_dir, e);
            return upload_failure(responses::BAD_REQUEST, "malformed upload body");
        }
    };

    match storage::store_file(
        &config.root_path(),
        relative_dir,
        &part.filename,
        &part.content,
    ) {
        Ok(stored) => {
            info!(
                "Upload complete: {} -> {}",
                part.filename,
                stored.file_path.display()
            );
            Response::json(responses::OK, json!({"status": "Success"}))
        }
        Err(StorageError::PathTraversal(path)) => {
            warn!("Rejected upload path {}: escapes server root", path);
            upload_failure(responses::BAD_REQUEST, "wrong filepath")
        }
        Err(StorageError::InvalidFilename(name)) => {
            warn!("Rejected upload filename {}", name);
            upload_failure(responses::BAD_REQUEST, "invalid filename")
        }
        Err(e) => {
            // Write errors are reported, never masked as success
            let err = FileServerError::from(e);
            handle_error(&err);
            upload_failure(error_to_http_status(&err), "write failed")
        }
    }
}

fn upload_failure(status: u16, detail: &str) -> Response {
    Response::json(status, json!({"status": format!("Failed: {}", detail)}))
}

/// Handles a listing/fetch request: directories render as a listing page,
/// markup documents are returned raw. Both outcomes are 200s; failures
/// show up as an annotated, empty listing page.
fn handle_get_file(relative: &str, config: &ServerConfig) -> Response {
    match storage::list_path(&config.root_path(), relative) {
        ListOutcome::Document(text) => Response::html(responses::OK, text),
        ListOutcome::Page(listing) => {
            Response::html(responses::OK, responses::listing_page(&listing))
        }
    }
}
