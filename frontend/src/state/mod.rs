//! Client-side state machines.
//!
//! Everything here is plain Rust without browser calls (apart from the
//! notice timers), so the behavior is unit tested natively.
//!
//! - [`query`] - Translates table state into the canonical search query
//! - [`table`] - Owns the last query and the displayed page
//! - [`import`] - Upload dialog lifecycle and error table paging
//! - [`notifications`] - Transient notices raised by services

pub mod import;
pub mod notifications;
pub mod query;
pub mod table;

pub use import::*;
pub use notifications::*;
pub use query::*;
pub use table::*;
