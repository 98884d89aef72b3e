//! Entry point for the WASM application

use catalog_admin::App;
use leptos::*;

pub fn main() {
    console_error_panic_hook::set_once();
    _ = console_log::init_with_level(log::Level::Debug);

    log::info!("🦀 Catalog Admin - Starting Leptos App");

    mount_to_body(|| view! { <App/> })
}
