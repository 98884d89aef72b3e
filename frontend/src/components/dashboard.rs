//! Landing page

use leptos::*;
use leptos_router::*;

use crate::APP_NAME;

#[component]
pub fn DashboardPage() -> impl IntoView {
    view! {
        <div class="hero card">
            <h1>"Welcome to " {APP_NAME}</h1>
            <p class="subtitle">
                "Search and browse the product catalog, download the filtered list "
                "as an Excel file, and bulk-update products by uploading one."
            </p>
            <p>
                "Open " <A href="/products/list">"Products"</A> " to get started."
            </p>
        </div>
    }
}
