//! Form Field Components
//!
//! Labelled inputs bound to signals, shared by the edit pages.

use leptos::prelude::*;

#[component]
pub fn TextField(
    #[prop(into)] label: String,
    value: RwSignal<String>,
    #[prop(optional)] required: bool,
    #[prop(default = "text")] input_type: &'static str,
) -> impl IntoView {
    view! {
        <label class="field">
            <span class="field-label">{label}</span>
            <input
                type=input_type
                required=required
                prop:value=move || value.get()
                on:input=move |ev| value.set(event_target_value(&ev))
            />
        </label>
    }
}

#[component]
pub fn TextAreaField(#[prop(into)] label: String, value: RwSignal<String>) -> impl IntoView {
    view! {
        <label class="field">
            <span class="field-label">{label}</span>
            <textarea
                prop:value=move || value.get()
                on:input=move |ev| value.set(event_target_value(&ev))
            />
        </label>
    }
}

#[component]
pub fn CheckboxField(#[prop(into)] label: String, checked: RwSignal<bool>) -> impl IntoView {
    view! {
        <label class="field checkbox">
            <input
                type="checkbox"
                prop:checked=move || checked.get()
                on:change=move |ev| checked.set(event_target_checked(&ev))
            />
            <span>{label}</span>
        </label>
    }
}

/// Inline error banner, hidden while `error` is `None`
#[component]
pub fn FormError(#[prop(into)] error: Signal<Option<String>>) -> impl IntoView {
    move || error.get().map(|msg| view! { <div class="form-error">{msg}</div> })
}

/// Header of an edit page with a way back to its list
#[component]
pub fn EditHeader(
    #[prop(into)] title: Signal<String>,
    #[prop(into)] back_label: String,
    #[prop(into)] on_back: Callback<()>,
) -> impl IntoView {
    view! {
        <div class="edit-header">
            <button class="btn-link back" on:click=move |_| on_back.run(())>{format!("← {}", back_label)}</button>
            <h1>{move || title.get()}</h1>
        </div>
    }
}
