//! UI Components for the catalog admin application.
//!
//! # Layout Components
//! - [`Header`] - Title bar and navigation
//! - [`Footer`] - Page footer
//! - [`NoticeStack`] - Transient notices raised by services
//! - [`Modal`] - Dialog frame
//!
//! # Pages
//! - [`DashboardPage`] - Landing page
//! - [`ProductsPage`] - Product list with search, export and import
//!
//! # Feature Components
//! - [`ProductTable`] - Sortable, filterable, paginated product table
//! - [`SearchForm`] - Keyword and price range form
//! - [`PaginationControls`] - Page navigation and page size selector
//! - [`ImportModal`] - Excel upload with per-row error report

mod dashboard;
mod footer;
mod header;
mod import_modal;
mod modal;
mod notices;
mod pagination;
mod product_table;
mod search_form;

pub use dashboard::*;
pub use footer::*;
pub use header::*;
pub use import_modal::*;
pub use modal::*;
pub use notices::*;
pub use pagination::*;
pub use product_table::*;
pub use search_form::*;
