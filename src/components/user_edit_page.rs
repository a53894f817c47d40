//! User Edit Page

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::components::{CheckboxField, EditHeader, FormError, TextField};
use crate::context::use_app;
use crate::models::{Role, UserUpdate};
use crate::store::Page;

#[component]
pub fn UserEditPage(id: String) -> impl IntoView {
    let ctx = use_app();
    let full_name = RwSignal::new(String::new());
    let username = RwSignal::new(String::new());
    let phone_number = RwSignal::new(String::new());
    let role = RwSignal::new(Role::User);
    let is_active = RwSignal::new(true);
    let (loading, set_loading) = signal(true);
    let (saving, set_saving) = signal(false);
    let (error, set_error) = signal::<Option<String>>(None);

    let user_id = id.clone();
    Effect::new(move |_| {
        let user_id = user_id.clone();
        spawn_local(async move {
            match ctx.api().get_user(&user_id).await {
                Ok(user) => {
                    full_name.set(user.full_name.unwrap_or_default());
                    username.set(user.username.unwrap_or_default());
                    phone_number.set(user.phone_number);
                    role.set(user.role);
                    is_active.set(user.is_active);
                }
                Err(e) => {
                    ctx.report(&e, "loading user");
                    set_error.set(Some("Failed to load user".to_string()));
                }
            }
            set_loading.set(false);
        });
    });

    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        if saving.get_untracked() {
            return;
        }
        let update = UserUpdate {
            full_name: Some(full_name.get_untracked()),
            username: Some(username.get_untracked()),
            phone_number: Some(phone_number.get_untracked()),
            role: Some(role.get_untracked()),
            is_active: Some(is_active.get_untracked()),
        };
        set_saving.set(true);
        set_error.set(None);
        let user_id = id.clone();
        spawn_local(async move {
            match ctx.api().update_user(&user_id, &update).await {
                Ok(()) => ctx.navigate(Page::Users),
                Err(e) => {
                    ctx.report(&e, "saving user");
                    set_error.set(Some(format!("Failed to update user: {}", e.user_message())));
                }
            }
            set_saving.set(false);
        });
    };

    view! {
        <div class="page edit-page">
            <EditHeader title="Edit user" back_label="Back to users" on_back=move |_| ctx.navigate(Page::Users) />
            <FormError error=error />

            <Show when=move || !loading.get() fallback=|| view! { <div class="loading">"Loading..."</div> }>
                <form class="edit-form" on:submit=on_submit.clone()>
                    <TextField label="Full name" value=full_name />
                    <TextField label="Username" value=username />
                    <TextField label="Phone number" value=phone_number input_type="tel" required=true />

                    <label class="field">
                        <span class="field-label">"Role"</span>
                        <select on:change=move |ev| {
                            if let Some(parsed) = Role::parse(&event_target_value(&ev)) {
                                role.set(parsed);
                            }
                        }>
                            {[Role::User, Role::Admin].into_iter().map(|option| view! {
                                <option value=option.as_str() selected=move || role.get() == option>
                                    {option.as_str()}
                                </option>
                            }).collect_view()}
                        </select>
                    </label>

                    <CheckboxField label="Active" checked=is_active />

                    <div class="form-actions">
                        <button type="button" on:click=move |_| ctx.navigate(Page::Users)>"Cancel"</button>
                        <button type="submit" class="btn-primary" disabled=move || saving.get()>
                            {move || if saving.get() { "Saving..." } else { "Save" }}
                        </button>
                    </div>
                </form>
            </Show>
        </div>
    }
}
