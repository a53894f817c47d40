//! Organizations Page

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::context::use_app;
use crate::models::Organization;
use crate::store::Page;

#[component]
pub fn OrganizationsPage() -> impl IntoView {
    let ctx = use_app();
    let limit = ctx.config().fetch_limit;
    let (organizations, set_organizations) = signal(Vec::<Organization>::new());
    let (total, set_total) = signal(0u64);
    let (loading, set_loading) = signal(true);
    let (syncing, set_syncing) = signal(false);
    let (reload, set_reload) = signal(0u32);

    Effect::new(move |_| {
        reload.track();
        spawn_local(async move {
            match ctx.api().list_organizations(limit).await {
                Ok(page) => {
                    set_total.set(page.total);
                    set_organizations.set(page.items);
                }
                Err(e) => ctx.report(&e, "loading organizations"),
            }
            set_loading.set(false);
        });
    });

    let on_sync = move |_| {
        if syncing.get_untracked() {
            return;
        }
        set_syncing.set(true);
        spawn_local(async move {
            match ctx.api().sync_organizations().await {
                Ok(()) => {
                    log::info!("organizations synced");
                    set_reload.update(|n| *n += 1);
                }
                Err(e) => ctx.report(&e, "syncing organizations"),
            }
            set_syncing.set(false);
        });
    };

    view! {
        <div class="page">
            <div class="page-header">
                <div>
                    <h1>"Organizations"</h1>
                    <p>{move || format!("{} organizations", total.get())}</p>
                </div>
                <button class="btn-primary" disabled=move || syncing.get() on:click=on_sync>
                    {move || if syncing.get() { "Syncing..." } else { "Sync from iiko" }}
                </button>
            </div>

            <Show when=move || !loading.get() fallback=|| view! { <div class="loading">"Loading..."</div> }>
                <Show
                    when=move || organizations.with(|o| !o.is_empty())
                    fallback=|| view! { <p class="empty">"No organizations yet. Sync from iiko to fetch them."</p> }
                >
                    <div class="card-grid">
                        <For
                            each=move || organizations.get()
                            key=|org| (org.id.clone(), org.updated_at.clone())
                            children=move |org| {
                                let edit_id = org.id.clone();
                                view! {
                                    <div class="card org-card">
                                        <div class="card-header">
                                            <div>
                                                <h3>{org.name.clone()}</h3>
                                                <p class="cell-sub">
                                                    {org.restaurant_address.clone().unwrap_or_else(|| "No address".to_string())}
                                                </p>
                                            </div>
                                            <button class="btn-link" on:click=move |_| ctx.navigate(Page::OrganizationEdit(edit_id.clone()))>
                                                "Edit"
                                            </button>
                                        </div>
                                        <span class={if org.is_active { "badge active" } else { "badge inactive" }}>
                                            {if org.is_active { "Active" } else { "Inactive" }}
                                        </span>
                                        <dl>
                                            <dt>"Country"</dt>
                                            <dd>{org.country.clone().unwrap_or_else(|| "N/A".to_string())}</dd>
                                            <dt>"Timezone"</dt>
                                            <dd>{org.timezone.clone().unwrap_or_else(|| "N/A".to_string())}</dd>
                                            <dt>"iiko ID"</dt>
                                            <dd class="mono">{org.iiko_id.clone()}</dd>
                                        </dl>
                                    </div>
                                }
                            }
                        />
                    </div>
                </Show>
            </Show>
        </div>
    }
}
