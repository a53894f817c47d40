//! Debounced Search Input

use gloo_timers::future::TimeoutFuture;
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::context::use_app;

/// Fires `on_search` once typing has paused for the configured delay
#[component]
pub fn SearchBox(
    #[prop(into)] placeholder: String,
    #[prop(into)] on_search: Callback<String>,
) -> impl IntoView {
    let delay = use_app().config().search_debounce_ms;
    let (text, set_text) = signal(String::new());

    let on_input = move |value: String| {
        set_text.set(value.clone());
        spawn_local(async move {
            TimeoutFuture::new(delay).await;
            // Superseded by later input, or the box is gone
            if text.try_get_untracked().as_deref() == Some(value.as_str()) {
                on_search.run(value.trim().to_string());
            }
        });
    };

    view! {
        <div class="search-box">
            <span class="search-icon">"🔍"</span>
            <input
                type="search"
                placeholder=placeholder
                prop:value=move || text.get()
                on:input=move |ev| on_input(event_target_value(&ev))
            />
        </div>
    }
}
