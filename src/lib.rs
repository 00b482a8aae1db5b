//! Portfolio backend
//!
//! HTTP service behind a personal portfolio site: it stores contact form
//! submissions in MongoDB and serves the résumé PDF and certification
//! images from a static directory.

pub mod assets;
pub mod config;
pub mod contact;
pub mod error;
pub mod handler;
pub mod http;
pub mod logger;
pub mod server;
pub mod storage;
