//! Catalog Admin - Frontend Rust/Leptos Application
//!
//! A WebAssembly frontend for browsing the product catalog, downloading
//! the filtered list as Excel and bulk-updating products from an Excel
//! upload. All business rules live in the backend behind `/api`.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                        App                                   │
//! ├─────────────────────────────────────────────────────────────┤
//! │  Header (title, navigation)                                  │
//! ├─────────────────────────────────────────────────────────────┤
//! │  Routes                                                      │
//! │  ├── /dashboard      DashboardPage                          │
//! │  └── /products/list  ProductsPage                           │
//! │      ├── SearchForm                                         │
//! │      ├── ProductTable ── PaginationControls                 │
//! │      └── ImportModal  (reloads the table on clean import)   │
//! ├─────────────────────────────────────────────────────────────┤
//! │  Footer                     NoticeStack (transient errors)   │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Modules
//!
//! - [`types`] - Catalog types, import reports, errors
//! - [`state`] - Query builder, table controller, import workflow
//! - [`services`] - Backend communication (search, export, import)
//! - [`components`] - UI components
//!
//! The binary in `main.rs` mounts [`App`] to the document body.

use leptos::*;
use leptos_meta::*;
use leptos_router::*;

// =============================================================================
// Module declarations
// =============================================================================

pub mod components;
pub mod config;
pub mod services;
pub mod state;
pub mod types;

// =============================================================================
// Re-exports
// =============================================================================

// Configuration
pub use config::*;

// Types
pub use types::{
    // Catalog
    Category, Product, ProductStatus,
    // API
    ImportOutcome, ImportRowError, PageResult,
    // Errors
    AppError, AppResult,
};

// Components
pub use components::*;

// Services
pub use services::*;

#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    // One notifier for the whole app; the HTTP layer reports through it
    let notifier = state::Notifier::new();
    provide_context(notifier);
    provide_context(CatalogService::new(notifier));

    view! {
        <Title text=APP_NAME/>
        <Router>
            <Header/>
            <main class="container">
                <Routes>
                    <Route path="/" view=|| view! { <Redirect path="/dashboard"/> }/>
                    <Route path="/dashboard" view=DashboardPage/>
                    <Route path="/products/list" view=ProductsPage/>
                </Routes>
            </main>
            <Footer/>
            <NoticeStack/>
        </Router>
    }
}
