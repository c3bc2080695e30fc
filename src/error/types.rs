//! Error types
//!
//! Defines domain-specific error types for each module of the file server.

use std::fmt;
use std::io;

/// Authentication module errors
#[derive(Debug)]
pub enum AuthError {
    MissingCredentials,
    UnsupportedScheme(String),
    MalformedHeader,
    InvalidCredentials(String),
}

impl fmt::Display for AuthError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AuthError::MissingCredentials => write!(f, "Missing Authorization header"),
            AuthError::UnsupportedScheme(s) => write!(f, "Unsupported auth scheme: {}", s),
            AuthError::MalformedHeader => write!(f, "Malformed Authorization header"),
            AuthError::InvalidCredentials(u) => {
                write!(f, "Incorrect username or password for: {}", u)
            }
        }
    }
}

impl std::error::Error for AuthError {}

/// Storage module errors
#[derive(Debug)]
pub enum StorageError {
    PathTraversal(String),
    InvalidFilename(String),
    EmptyPath,
    NotADirectory(String),
    IoError(io::Error),
}

impl fmt::Display for StorageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StorageError::PathTraversal(p) => write!(f, "Path escapes server root: {}", p),
            StorageError::InvalidFilename(n) => write!(f, "Invalid filename: {}", n),
            StorageError::EmptyPath => write!(f, "No directory set"),
            StorageError::NotADirectory(p) => write!(f, "Not a directory: {}", p),
            StorageError::IoError(e) => write!(f, "IO error: {}", e),
        }
    }
}

impl std::error::Error for StorageError {}

impl From<io::Error> for StorageError {
    fn from(error: io::Error) -> Self {
        StorageError::IoError(error)
    }
}

/// HTTP protocol errors
#[derive(Debug)]
pub enum ProtocolError {
    ConnectionClosed,
    MalformedRequestLine(String),
    MalformedHeader(String),
    PayloadTooLarge(usize),
    MalformedMultipart(String),
    MissingFilePart,
    IoError(io::Error),
}

impl fmt::Display for ProtocolError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProtocolError::ConnectionClosed => write!(f, "Connection closed by peer"),
            ProtocolError::MalformedRequestLine(l) => write!(f, "Malformed request line: {}", l),
            ProtocolError::MalformedHeader(h) => write!(f, "Malformed header line: {}", h),
            ProtocolError::PayloadTooLarge(n) => write!(f, "Request body too large: {} bytes", n),
            ProtocolError::MalformedMultipart(m) => write!(f, "Malformed multipart body: {}", m),
            ProtocolError::MissingFilePart => write!(f, "No file part in multipart body"),
            ProtocolError::IoError(e) => write!(f, "IO error: {}", e),
        }
    }
}

impl std::error::Error for ProtocolError {}

impl From<io::Error> for ProtocolError {
    fn from(error: io::Error) -> Self {
        ProtocolError::IoError(error)
    }
}

/// Umbrella for request failures that map to an HTTP status and a failure
/// body. Auth failures stay outside it: they answer with the challenge
/// response, not a generic status mapping.
#[derive(Debug)]
pub enum FileServerError {
    Storage(StorageError),
    Protocol(ProtocolError),
}

impl fmt::Display for FileServerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FileServerError::Storage(e) => write!(f, "Storage error: {}", e),
            FileServerError::Protocol(e) => write!(f, "Protocol error: {}", e),
        }
    }
}

impl std::error::Error for FileServerError {}

impl From<StorageError> for FileServerError {
    fn from(error: StorageError) -> Self {
        FileServerError::Storage(error)
    }
}

impl From<ProtocolError> for FileServerError {
    fn from(error: ProtocolError) -> Self {
        FileServerError::Protocol(error)
    }
}
