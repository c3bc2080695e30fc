//! Error handlers
//!
//! Provides error handling and recovery functions.

use crate::error::types::{FileServerError, ProtocolError, StorageError};
use log::error;

/// Handle a file server error
pub fn handle_error(err: &FileServerError) {
    error!("File Server Error: {}", err);
}

/// Convert error to HTTP status code
pub fn error_to_http_status(err: &FileServerError) -> u16 {
    match err {
        FileServerError::Storage(e) => match e {
            StorageError::PathTraversal(_)
            | StorageError::InvalidFilename(_)
            | StorageError::EmptyPath => 400,
            StorageError::NotADirectory(_) | StorageError::IoError(_) => 500,
        },
        FileServerError::Protocol(e) => match e {
            ProtocolError::PayloadTooLarge(_) => 413,
            _ => 400,
        },
    }
}
