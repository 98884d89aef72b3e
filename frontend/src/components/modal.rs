use leptos::*;
use web_sys::KeyboardEvent;

/// Dialog frame with an overlay.
///
/// Closes on the close button, an overlay click, or Escape.
#[component]
pub fn Modal(
    /// Title of the modal
    #[prop(into)]
    title: String,
    /// Callback when modal should close
    on_close: Callback<()>,
    /// Modal content
    children: Children,
) -> impl IntoView {
    let handle = window_event_listener(ev::keydown, move |event: KeyboardEvent| {
        if event.key() == "Escape" {
            on_close.call(());
        }
    });
    on_cleanup(move || handle.remove());

    view! {
        <div class="modal-overlay" on:click=move |_| on_close.call(())>
            <div class="modal" on:click=|ev: ev::MouseEvent| ev.stop_propagation()>
                <div class="modal-header">
                    <h2 class="modal-title">{title}</h2>
                    <button class="btn btn-icon modal-close" on:click=move |_| on_close.call(())>
                        "×"
                    </button>
                </div>
                <div class="modal-body">
                    {children()}
                </div>
            </div>
        </div>
    }
}
