//! Application configuration.
//!
//! Centralized configuration for the catalog admin frontend.
//! The backend is expected behind the same origin, so the API is
//! addressed by path only.

/// Application name shown in the header and the browser title.
pub const APP_NAME: &str = "Catalog Admin";

/// Base path prepended to every backend call.
pub const API_BASE_PATH: &str = "/api";

/// Upper bound on a single request before it is aborted (30 s).
pub const REQUEST_TIMEOUT_MS: u32 = 30_000;

/// Page size used before the user picks one.
pub const DEFAULT_PAGE_SIZE: u32 = 20;

/// Choices offered by the page size selector.
pub const PAGE_SIZE_OPTIONS: [u32; 4] = [10, 20, 50, 100];

/// The only file extension accepted by the import dialog.
pub const IMPORT_ACCEPT: &str = ".xlsx";

/// Rows per page in the import error table.
pub const IMPORT_ERROR_PAGE_SIZE: usize = 10;

/// MIME type of the exported spreadsheet.
pub const EXPORT_MIME: &str = "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";

/// How long a notice stays on screen (in milliseconds).
pub const NOTICE_TTL_MS: u32 = 3_000;

/// Maximum notices kept at once; the oldest are dropped first.
pub const MAX_NOTICES: usize = 5;

/// Message used when neither the backend nor the transport gives one.
pub const FALLBACK_ERROR_MESSAGE: &str = "A request error occurred";
