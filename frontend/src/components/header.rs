use leptos::*;
use leptos_router::*;

use crate::APP_NAME;

/// Top bar with the application title and the main navigation.
#[component]
pub fn Header() -> impl IntoView {
    view! {
        <header>
            <div class="header-left">
                <A href="/dashboard" class="logo">{APP_NAME}</A>
            </div>
            <nav class="header-right">
                <A href="/dashboard" class="nav-link" active_class="active">"Dashboard"</A>
                <A href="/products/list" class="nav-link" active_class="active">"Products"</A>
            </nav>
        </header>
    }
}
