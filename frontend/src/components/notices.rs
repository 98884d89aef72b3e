//! Toast stack for transient notices.

use leptos::*;

use crate::state::Notifier;

#[component]
pub fn NoticeStack() -> impl IntoView {
    let notifier = expect_context::<Notifier>();

    view! {
        <div class="notice-stack">
            <For
                each=move || notifier.notices()
                key=|notice| notice.id
                children=move |notice| {
                    let id = notice.id;
                    view! {
                        <div class=notice.level.css_class()>
                            <span class="notice-icon">{notice.level.icon()}</span>
                            <span class="notice-text">{notice.text}</span>
                            <button class="notice-close" on:click=move |_| notifier.dismiss(id)>"×"</button>
                        </div>
                    }
                }
            />
        </div>
    }
}
