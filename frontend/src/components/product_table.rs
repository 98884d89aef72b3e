//! Product list page: search form, toolbar, sortable/filterable table and
//! pagination.
//!
//! The table state lives in a [`QueryFragment`] signal. An effect watches
//! it and asks the [`TableController`] for a fetch each time it changes;
//! the import dialog gets a `reload` callback that re-issues the last
//! fragment without knowing what it was.

use leptos::*;
use wasm_bindgen::JsCast;
use web_sys::{HtmlOptionElement, HtmlSelectElement};

use crate::components::{ImportModal, PaginationControls, SearchForm};
use crate::services::CatalogService;
use crate::state::{
    LoadState, PendingFetch, QueryFragment, SortOrder, TableController, CATEGORY_FILTER,
    STATUS_FILTER,
};
use crate::types::{Category, Product, ProductStatus};
use crate::PAGE_SIZE_OPTIONS;

/// Formats a price with thousands separators and two decimals.
pub fn format_money(value: f64) -> String {
    let fixed = format!("{:.2}", value.abs());
    let (int_part, frac_part) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, digit) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    let sign = if value < 0.0 { "-" } else { "" };
    format!("{}{}.{}", sign, grouped, frac_part)
}

/// `For` key of a table row.
///
/// A row view is only rebuilt when its key changes, so the key includes
/// the generation of the page it came from. A reload that returns the
/// same products with new values still redraws them.
pub fn row_key(generation: u64, number: u64, product: &Product) -> (u64, u64, i64) {
    (generation, number, product.id)
}

#[component]
pub fn ProductsPage() -> impl IntoView {
    view! {
        <div class="page">
            <h1 class="page-title">"Products"</h1>
            <ProductTable/>
        </div>
    }
}

#[component]
pub fn ProductTable() -> impl IntoView {
    let service = expect_context::<CatalogService>();

    let fragment = create_rw_signal(QueryFragment::default());
    let table = create_rw_signal(TableController::new());
    let categories = create_rw_signal(Vec::<Category>::new());
    let (import_open, set_import_open) = create_signal(false);
    let (exporting, set_exporting) = create_signal(false);

    // Reference data, once per mount
    spawn_local(async move {
        if let Ok(list) = service.categories().await {
            log::info!("📚 Loaded {} categories", list.len());
            categories.set(list);
        }
    });

    // Re-fetch whenever the table state changes
    create_effect(move |_| {
        let next = fragment.get();
        if let Some(pending) = table.try_update(|t| t.fetch(next)) {
            run_fetch(service, table, pending);
        }
    });

    let reload = Callback::new(move |_: ()| {
        log::info!("🔄 Reloading product table");
        if let Some(pending) = table.try_update(|t| t.reload()) {
            run_fetch(service, table, pending);
        }
    });

    let on_export = move |_| {
        let query = table.with_untracked(|t| t.export_query());
        set_exporting.set(true);
        service.notifier().info("Preparing Excel download...");
        spawn_local(async move {
            let _ = service.export_and_download(&query).await;
            set_exporting.set(false);
        });
    };

    let category_options = Signal::derive(move || {
        categories.with(|list| {
            list.iter()
                .map(|c| (c.category_name.clone(), c.category_name.clone()))
                .collect::<Vec<_>>()
        })
    });
    let status_options = Signal::derive(|| {
        ProductStatus::ALL
            .iter()
            .map(|s| (s.as_param().to_string(), s.label().to_string()))
            .collect::<Vec<_>>()
    });

    let numbered_rows = move || {
        table.with(|t| {
            let page = t.page();
            let generation = t.generation();
            let offset = u64::from(page.current.saturating_sub(1)) * u64::from(page.page_size);
            t.rows()
                .iter()
                .cloned()
                .enumerate()
                .map(|(i, product)| (generation, offset + i as u64 + 1, product))
                .collect::<Vec<_>>()
        })
    };

    view! {
        <SearchForm fragment=fragment/>

        <div class="table-card card">
            <div class="table-toolbar">
                <button
                    class="btn btn-secondary"
                    on:click=on_export
                    disabled=move || exporting.get()
                >
                    {move || if exporting.get() { "⏳ Exporting..." } else { "📥 Excel download" }}
                </button>
                <button class="btn btn-primary" on:click=move |_| set_import_open.set(true)>
                    "📤 Excel upload"
                </button>
            </div>

            <Show when=move || table.with(|t| t.state() == LoadState::Error) fallback=|| ()>
                <div class="alert alert-warning">
                    "The last request failed; showing the previously loaded page."
                </div>
            </Show>

            <div class="table-wrapper" class:loading=move || table.with(|t| t.is_loading())>
                <table class="product-table">
                    <thead>
                        <tr>
                            <th class="col-index">"No"</th>
                            <SortableHeader label="Code" field="productCode" fragment=fragment/>
                            <SortableHeader label="Name" field="productName" fragment=fragment/>
                            <FilterHeader
                                label="Category"
                                column=CATEGORY_FILTER
                                options=category_options
                                fragment=fragment
                            />
                            <SortableHeader label="Price" field="price" fragment=fragment align_right=true/>
                            <SortableHeader label="Stock" field="stockQuantity" fragment=fragment align_right=true/>
                            <FilterHeader
                                label="Status"
                                column=STATUS_FILTER
                                options=status_options
                                fragment=fragment
                            />
                            <SortableHeader label="Updated" field="updatedAt" fragment=fragment/>
                        </tr>
                    </thead>
                    <tbody>
                        <For
                            each=numbered_rows
                            key=|(generation, number, product)| row_key(*generation, *number, product)
                            children=move |(_, number, product)| view! { <ProductRow number=number product=product/> }
                        />
                    </tbody>
                </table>
                <Show when=move || table.with(|t| t.rows().is_empty() && !t.is_loading()) fallback=|| ()>
                    <div class="table-empty">"No products match the current filters"</div>
                </Show>
                <Show when=move || table.with(|t| t.is_loading()) fallback=|| ()>
                    <div class="table-loading">"Loading..."</div>
                </Show>
            </div>

            <PaginationControls
                current_page=Signal::derive(move || fragment.with(|f| f.current.unwrap_or(1)))
                total_pages=Signal::derive(move || table.with(|t| t.page().page_count()))
                total_count=Signal::derive(move || table.with(|t| t.page().total))
                on_page_change=Callback::new(move |page: u32| fragment.update(|f| f.go_to_page(page)))
                page_size=Signal::derive(move || {
                    fragment.with(|f| f.page_size.unwrap_or(crate::DEFAULT_PAGE_SIZE))
                })
                on_page_size_change=Callback::new(move |size: u32| fragment.update(|f| f.set_page_size(size)))
                page_size_options=PAGE_SIZE_OPTIONS.to_vec()
            />
        </div>

        <ImportModal
            open=import_open
            on_close=Callback::new(move |_: ()| set_import_open.set(false))
            on_success=reload
        />
    }
}

/// Sends a pending fetch and hands the answer back to the controller.
fn run_fetch(service: CatalogService, table: RwSignal<TableController>, pending: PendingFetch) {
    spawn_local(async move {
        let result = service.search(&pending.query).await;
        table.update(|t| {
            t.resolve(pending.ticket, result);
        });
    });
}

#[component]
fn ProductRow(number: u64, product: Product) -> impl IntoView {
    let updated = product.updated_at.format("%Y-%m-%d %H:%M:%S").to_string();
    view! {
        <tr title=product.description.clone().unwrap_or_default()>
            <td class="col-index">{number}</td>
            <td class="mono">{product.product_code}</td>
            <td class="ellipsis">{product.product_name}</td>
            <td>{product.category}</td>
            <td class="align-right">{format_money(product.price)}</td>
            <td class="align-right">{product.stock_quantity}</td>
            <td><span class=product.status.css_class()>{product.status.label()}</span></td>
            <td>{updated}</td>
        </tr>
    }
}

/// Column header that cycles its sort direction when clicked.
#[component]
fn SortableHeader(
    label: &'static str,
    field: &'static str,
    fragment: RwSignal<QueryFragment>,
    #[prop(optional)] align_right: bool,
) -> impl IntoView {
    let order = move || fragment.with(|f| f.sort_order(field));
    let class = if align_right { "sortable align-right" } else { "sortable" };

    view! {
        <th class=class on:click=move |_| fragment.update(|f| f.toggle_sort(field))>
            {label}
            <span class="sort-indicator" class:active=move || order().is_some()>
                {move || SortOrder::indicator(order())}
            </span>
        </th>
    }
}

/// Column header with a multi-select filter.
///
/// Every selected value is reported; the query builder decides how many
/// reach the backend.
#[component]
fn FilterHeader(
    label: &'static str,
    column: &'static str,
    /// `(value, text)` pairs
    options: Signal<Vec<(String, String)>>,
    fragment: RwSignal<QueryFragment>,
) -> impl IntoView {
    let on_change = move |ev: ev::Event| {
        let select: HtmlSelectElement = event_target(&ev);
        let values = selected_values(&select);
        fragment.update(|f| f.set_filter(column, values));
    };

    view! {
        <th class="filterable">
            <span>{label}</span>
            <select multiple class="column-filter" on:change=on_change>
                <For
                    each=move || options.get()
                    key=|(value, _)| value.clone()
                    children=move |(value, text)| {
                        let current = value.clone();
                        let selected = move || fragment.with(|f| f.filter(column).contains(&current));
                        view! { <option value=value prop:selected=selected>{text}</option> }
                    }
                />
            </select>
        </th>
    }
}

fn selected_values(select: &HtmlSelectElement) -> Vec<String> {
    let options = select.selected_options();
    (0..options.length())
        .filter_map(|i| options.item(i))
        .filter_map(|element| element.dyn_into::<HtmlOptionElement>().ok())
        .map(|option| option.value())
        .collect()
}
