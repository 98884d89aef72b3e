use leptos::*;

/// Page navigation with an optional page size selector.
///
/// Pages are 1-based.
#[component]
pub fn PaginationControls(
    /// Current page
    current_page: Signal<u32>,
    /// Total number of pages
    total_pages: Signal<u32>,
    /// Total count of items
    total_count: Signal<u64>,
    /// Callback when page changes
    on_page_change: Callback<u32>,
    /// Current page size, shown in the selector
    #[prop(optional)]
    page_size: Option<Signal<u32>>,
    /// Callback when page size changes; the selector is hidden without it
    #[prop(optional)]
    on_page_size_change: Option<Callback<u32>>,
    /// Available page size options
    #[prop(optional)]
    page_size_options: Vec<u32>,
) -> impl IntoView {
    let last_page = move || total_pages.get().max(1);

    let size_selector = on_page_size_change.map(|on_change| {
        let options = page_size_options.clone();
        let size = page_size.unwrap_or_else(|| Signal::derive(|| crate::DEFAULT_PAGE_SIZE));
        view! {
            <select
                class="page-size-select"
                on:change=move |ev| {
                    if let Ok(value) = event_target_value(&ev).parse::<u32>() {
                        on_change.call(value);
                    }
                }
                prop:value=move || size.get().to_string()
            >
                {options
                    .into_iter()
                    .map(|option| {
                        view! {
                            <option value=option.to_string() selected=move || size.get() == option>
                                {format!("{} / page", option)}
                            </option>
                        }
                    })
                    .collect_view()}
            </select>
        }
    });

    view! {
        <div class="pagination-controls">
            <span class="pagination-total">{move || format!("{} items", total_count.get())}</span>
            <button
                class="pagination-btn"
                on:click=move |_| on_page_change.call(1)
                disabled=move || current_page.get() <= 1
                title="First page"
            >
                "«"
            </button>
            <button
                class="pagination-btn"
                on:click=move |_| {
                    let page = current_page.get();
                    if page > 1 {
                        on_page_change.call(page - 1);
                    }
                }
                disabled=move || current_page.get() <= 1
                title="Previous page"
            >
                "‹"
            </button>
            <span class="pagination-info">
                {move || format!("{} / {}", current_page.get(), last_page())}
            </span>
            <button
                class="pagination-btn"
                on:click=move |_| {
                    let page = current_page.get();
                    if page < last_page() {
                        on_page_change.call(page + 1);
                    }
                }
                disabled=move || current_page.get() >= last_page()
                title="Next page"
            >
                "›"
            </button>
            <button
                class="pagination-btn"
                on:click=move |_| on_page_change.call(last_page())
                disabled=move || current_page.get() >= last_page()
                title="Last page"
            >
                "»"
            </button>
            {size_selector}
        </div>
    }
}
