//! Keyword and price range search form above the product table.

use leptos::*;

use crate::state::QueryFragment;

/// Reads a price bound typed by the user.
///
/// Blank, unparsable and negative input means "no bound".
pub fn parse_price(input: &str) -> Option<f64> {
    let value: f64 = input.trim().parse().ok()?;
    (value.is_finite() && value >= 0.0).then_some(value)
}

#[component]
pub fn SearchForm(fragment: RwSignal<QueryFragment>) -> impl IntoView {
    let (keyword, set_keyword) = create_signal(String::new());
    let (price_min, set_price_min) = create_signal(String::new());
    let (price_max, set_price_max) = create_signal(String::new());

    let on_submit = move |ev: ev::SubmitEvent| {
        ev.prevent_default();
        let keyword = keyword.get_untracked();
        let keyword = (!keyword.trim().is_empty()).then_some(keyword);
        let min = parse_price(&price_min.get_untracked());
        let max = parse_price(&price_max.get_untracked());
        log::debug!("Search submitted: keyword={:?} min={:?} max={:?}", keyword, min, max);
        fragment.update(|f| f.apply_search(keyword, min, max));
    };

    let on_reset = move |_| {
        set_keyword.set(String::new());
        set_price_min.set(String::new());
        set_price_max.set(String::new());
        fragment.update(|f| f.reset_search());
    };

    view! {
        <form class="search-form card" on:submit=on_submit>
            <label class="search-field">
                <span>"Keyword"</span>
                <input
                    type="text"
                    placeholder="Code or name"
                    prop:value=move || keyword.get()
                    on:input=move |ev| set_keyword.set(event_target_value(&ev))
                />
            </label>
            <label class="search-field">
                <span>"Price (min)"</span>
                <input
                    type="number"
                    min="0"
                    step="any"
                    prop:value=move || price_min.get()
                    on:input=move |ev| set_price_min.set(event_target_value(&ev))
                />
            </label>
            <label class="search-field">
                <span>"Price (max)"</span>
                <input
                    type="number"
                    min="0"
                    step="any"
                    prop:value=move || price_max.get()
                    on:input=move |ev| set_price_max.set(event_target_value(&ev))
                />
            </label>
            <div class="search-actions">
                <button type="button" class="btn btn-secondary" on:click=on_reset>"Reset"</button>
                <button type="submit" class="btn btn-primary">"Search"</button>
            </div>
        </form>
    }
}
