//! Backend services.
//!
//! # Services
//!
//! - [`http`] - Base path, timeout and the global error-to-notice mapping
//! - [`catalog`] - Search, export, import and category calls
//! - [`download`] - Saving binary payloads as browser downloads

pub mod catalog;
pub mod download;
pub mod http;

pub use catalog::*;
pub use download::*;
pub use http::*;
