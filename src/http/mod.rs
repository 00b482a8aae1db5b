//! HTTP protocol layer module
//!
//! Provides HTTP protocol-related base functionality, decoupled from specific business logic.

pub mod cache;
pub mod cors;
pub mod mime;
pub mod response;

// Re-export commonly used types
pub use response::{
    build_file_response, build_options_response, json_response, FilePayload, HttpResponse,
};
