//! Organization Edit Page

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::components::{CheckboxField, EditHeader, FormError, TextField};
use crate::context::use_app;
use crate::models::OrganizationUpdate;
use crate::store::Page;

#[component]
pub fn OrganizationEditPage(id: String) -> impl IntoView {
    let ctx = use_app();
    let name = RwSignal::new(String::new());
    let restaurant_address = RwSignal::new(String::new());
    let country = RwSignal::new(String::new());
    let timezone = RwSignal::new(String::new());
    let is_active = RwSignal::new(true);
    let (iiko_id, set_iiko_id) = signal(String::new());
    let (loading, set_loading) = signal(true);
    let (saving, set_saving) = signal(false);
    let (error, set_error) = signal::<Option<String>>(None);

    let org_id = id.clone();
    Effect::new(move |_| {
        let org_id = org_id.clone();
        spawn_local(async move {
            match ctx.api().get_organization(&org_id).await {
                Ok(org) => {
                    let form = OrganizationUpdate::from_organization(&org);
                    name.set(form.name);
                    restaurant_address.set(form.restaurant_address);
                    country.set(form.country);
                    timezone.set(form.timezone);
                    is_active.set(form.is_active);
                    set_iiko_id.set(org.iiko_id);
                }
                Err(e) => {
                    ctx.report(&e, "loading organization");
                    set_error.set(Some("Failed to load organization".to_string()));
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
        let update = OrganizationUpdate {
            name: name.get_untracked(),
            country: country.get_untracked(),
            restaurant_address: restaurant_address.get_untracked(),
            timezone: timezone.get_untracked(),
            is_active: is_active.get_untracked(),
        };
        if update.name.trim().is_empty() {
            set_error.set(Some("Name is required".to_string()));
            return;
        }
        set_saving.set(true);
        set_error.set(None);
        let org_id = id.clone();
        spawn_local(async move {
            match ctx.api().update_organization(&org_id, &update).await {
                Ok(()) => ctx.navigate(Page::Organizations),
                Err(e) => {
                    ctx.report(&e, "saving organization");
                    set_error.set(Some(format!("Failed to update organization: {}", e.user_message())));
                }
            }
            set_saving.set(false);
        });
    };

    view! {
        <div class="page edit-page">
            <EditHeader
                title="Edit organization"
                back_label="Back to organizations"
                on_back=move |_| ctx.navigate(Page::Organizations)
            />
            <FormError error=error />

            <Show when=move || !loading.get() fallback=|| view! { <div class="loading">"Loading..."</div> }>
                <p class="cell-sub mono">{move || format!("iiko ID: {}", iiko_id.get())}</p>
                <form class="edit-form" on:submit=on_submit.clone()>
                    <TextField label="Name" value=name required=true />
                    <TextField label="Address" value=restaurant_address />
                    <div class="field-grid two">
                        <TextField label="Country" value=country />
                        <TextField label="Timezone" value=timezone />
                    </div>
                    <CheckboxField label="Active" checked=is_active />

                    <div class="form-actions">
                        <button type="button" on:click=move |_| ctx.navigate(Page::Organizations)>"Cancel"</button>
                        <button type="submit" class="btn-primary" disabled=move || saving.get()>
                            {move || if saving.get() { "Saving..." } else { "Save" }}
                        </button>
                    </div>
                </form>
            </Show>
        </div>
    }
}
