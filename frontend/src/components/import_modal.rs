//! Excel upload dialog.
//!
//! Handles file selection, upload to backend, and result display. A clean
//! report fires `on_success` (which reloads the product table); a report
//! with rejected rows lists them in a paginated error table instead.

use leptos::*;
use web_sys::{Event, HtmlInputElement};

use crate::components::{Modal, PaginationControls};
use crate::services::CatalogService;
use crate::state::{ImportExit, ImportWorkflow};
use crate::IMPORT_ACCEPT;

#[component]
pub fn ImportModal(
    open: ReadSignal<bool>,
    on_close: Callback<()>,
    on_success: Callback<()>,
) -> impl IntoView {
    let service = expect_context::<CatalogService>();
    let workflow = create_rw_signal(ImportWorkflow::new());

    // A reopened dialog shows the report of an upload still in flight
    create_effect(move |_| {
        if open.get() {
            workflow.update(|w| w.resume());
        }
    });

    let handle_close = Callback::new(move |_: ()| {
        workflow.update(|w| w.dismiss());
        on_close.call(());
    });

    let on_file_change = move |ev: Event| {
        let input: HtmlInputElement = event_target(&ev);
        let Some(file) = input.files().and_then(|files| files.get(0)) else {
            return;
        };
        // Allow picking the same file again later
        input.set_value("");

        let file_name = file.name();
        let ticket = match workflow.try_update(|w| w.begin(&file_name)) {
            Some(Ok(ticket)) => ticket,
            Some(Err(rejection)) => {
                log::warn!("⚠️ Upload refused: {}", rejection);
                service.notifier().error(rejection.to_string());
                return;
            }
            None => return,
        };

        spawn_local(async move {
            match service.import(&file).await {
                Ok(outcome) => {
                    log::info!(
                        "✅ Import of {} processed: {} rows, {} errors",
                        file_name,
                        outcome.total_rows,
                        outcome.error_count
                    );
                    let exit = workflow.try_update(|w| w.finish(ticket, outcome));
                    if exit == Some(ImportExit::ReloadTable) {
                        on_success.call(());
                    }
                }
                Err(e) => {
                    // Already reported by the HTTP layer
                    log::warn!("Import of {} failed: {}", file_name, e);
                    workflow.update(|w| w.abort(ticket));
                }
            }
        });
    };

    let is_uploading = move || workflow.with(|w| w.is_uploading());

    view! {
        <Show when=move || open.get() fallback=|| ()>
            <Modal title="Excel upload" on_close=handle_close>
                <label class="upload-section" class:disabled=is_uploading>
                    <div class="upload-icon">"📤"</div>
                    <div class="upload-text">
                        {move || if is_uploading() {
                            "⏳ Uploading and processing..."
                        } else {
                            "Click to choose an Excel file"
                        }}
                    </div>
                    <div class="upload-hint">"Supported format: " {IMPORT_ACCEPT}</div>
                    <input
                        type="file"
                        accept=IMPORT_ACCEPT
                        style="display:none"
                        disabled=is_uploading
                        on:change=on_file_change
                    />
                </label>

                <ImportResult workflow=workflow/>
            </Modal>
        </Show>
    }
}

/// Summary alert plus the paginated error table.
#[component]
fn ImportResult(workflow: RwSignal<ImportWorkflow>) -> impl IntoView {
    let outcome = move || workflow.with(|w| w.outcome().cloned());

    view! {
        {move || {
            outcome()
                .map(|outcome| {
                    let alert_class = if outcome.is_clean() {
                        "alert alert-success"
                    } else {
                        "alert alert-warning"
                    };
                    let has_errors = !outcome.errors.is_empty();
                    view! {
                        <div class="import-result">
                            <div class=alert_class>{outcome.summary()}</div>
                            <Show when=move || has_errors fallback=|| ()>
                                <ErrorTable workflow=workflow/>
                            </Show>
                        </div>
                    }
                })
        }}
    }
}

#[component]
fn ErrorTable(workflow: RwSignal<ImportWorkflow>) -> impl IntoView {
    view! {
        <table class="error-table">
            <thead>
                <tr>
                    <th class="col-row">"Row"</th>
                    <th class="col-field">"Field"</th>
                    <th>"Error"</th>
                </tr>
            </thead>
            <tbody>
                // Row and field alone may repeat, so the position is part of the key
                <For
                    each=move || workflow.with(|w| {
                        w.visible_errors().iter().cloned().enumerate().collect::<Vec<_>>()
                    })
                    key=|(position, error)| format!("{}:{}", position, error.key())
                    children=|(_, error)| {
                        view! {
                            <tr>
                                <td>{error.row}</td>
                                <td>{error.field}</td>
                                <td class="error-message">{error.message}</td>
                            </tr>
                        }
                    }
                />
            </tbody>
        </table>
        <PaginationControls
            current_page=Signal::derive(move || workflow.with(|w| w.error_page() as u32))
            total_pages=Signal::derive(move || workflow.with(|w| w.error_page_count() as u32))
            total_count=Signal::derive(move || {
                workflow.with(|w| w.outcome().map(|o| o.errors.len() as u64).unwrap_or(0))
            })
            on_page_change=Callback::new(move |page: u32| {
                workflow.update(|w| w.set_error_page(page as usize))
            })
        />
    }
}
