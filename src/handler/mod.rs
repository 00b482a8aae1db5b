//! Request handler module
//!
//! Routing dispatch plus the contact, static file and metadata endpoints.

mod contact;
mod meta;
pub mod router;
mod static_files;

// Re-export main entry point
pub use router::{handle_request, Endpoint, Route, RouteMatch, RouteTable};
