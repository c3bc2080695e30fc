//! HTTP protocol implementation
//!
//! Handles request parsing, route matching, multipart extraction, and
//! response generation.

pub mod handlers;
pub mod multipart;
pub mod request;
pub mod responses;
pub mod routes;

pub use handlers::handle_route;
pub use request::{Request, read_request};
pub use responses::Response;
pub use routes::{Route, route};
