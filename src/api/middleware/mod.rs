//! Middleware components for request processing.
//!
//! This module contains middleware for logging, request ID tracking,
//! error handling, and session extraction.

mod error_handler;
mod logging;
mod request_id;
mod session;

pub use error_handler::error_to_status_code;
pub use logging::logging_middleware;
pub use request_id::{RequestId, request_id_middleware};
pub use session::{CurrentSession, session_middleware};
