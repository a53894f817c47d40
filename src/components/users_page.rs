//! Users Page

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api::ActiveFilter;
use crate::components::{page_slice, Pagination};
use crate::context::use_app;
use crate::filters::filter_users;
use crate::format::format_date;
use crate::models::{User, UserUpdate};
use crate::store::Page;

#[component]
pub fn UsersPage() -> impl IntoView {
    let ctx = use_app();
    let config = ctx.config();
    let (limit, page_size) = (config.fetch_limit, config.page_size);

    let (users, set_users) = signal(Vec::<User>::new());
    let (total, set_total) = signal(0u64);
    let (loading, set_loading) = signal(true);
    let (filter, set_filter) = signal(ActiveFilter::All);
    let (search, set_search) = signal(String::new());
    let (page, set_page) = signal(1usize);
    let (reload, set_reload) = signal(0u32);
    let (busy, set_busy) = signal::<Option<String>>(None);

    Effect::new(move |_| {
        let active = filter.get();
        reload.track();
        set_loading.set(true);
        spawn_local(async move {
            match ctx.api().list_users(active, limit).await {
                Ok(loaded) => {
                    set_total.set(loaded.total);
                    set_users.set(loaded.items);
                }
                Err(e) => ctx.report(&e, "loading users"),
            }
            set_loading.set(false);
        });
    });

    let filtered = Memo::new(move |_| users.with(|all| filter_users(all, &search.get())));
    let visible = Memo::new(move |_| filtered.with(|all| page_slice(all, page.get(), page_size)));

    let toggle_active = move |user: User| {
        set_busy.set(Some(user.id.clone()));
        spawn_local(async move {
            let update = UserUpdate::activation(!user.is_active);
            match ctx.api().update_user(&user.id, &update).await {
                Ok(()) => {
                    log::info!("user {} is_active={}", user.id, !user.is_active);
                    set_reload.update(|n| *n += 1);
                }
                Err(e) => ctx.report(&e, "updating user status"),
            }
            set_busy.set(None);
        });
    };

    view! {
        <div class="page">
            <div class="page-header">
                <div>
                    <h1>"Users"</h1>
                    <p>{move || format!("{} users", total.get())}</p>
                </div>
            </div>

            <div class="toolbar">
                <div class="search-box">
                    <span class="search-icon">"🔍"</span>
                    <input
                        type="search"
                        placeholder="Search by name, username, phone..."
                        prop:value=move || search.get()
                        on:input=move |ev| {
                            set_search.set(event_target_value(&ev));
                            set_page.set(1);
                        }
                    />
                </div>
                <div class="filter-tabs">
                    {ActiveFilter::ALL.into_iter().map(|option| view! {
                        <button
                            class=move || if filter.get() == option { "tab active" } else { "tab" }
                            on:click=move |_| {
                                set_filter.set(option);
                                set_page.set(1);
                            }
                        >
                            {option.label()}
                        </button>
                    }).collect_view()}
                </div>
            </div>

            <Show when=move || !loading.get() fallback=|| view! { <div class="loading">"Loading users..."</div> }>
                <table class="data-table">
                    <thead>
                        <tr>
                            <th>"User"</th>
                            <th>"Phone"</th>
                            <th>"Role"</th>
                            <th>"Lang"</th>
                            <th>"Status"</th>
                            <th>"Last login"</th>
                            <th></th>
                        </tr>
                    </thead>
                    <tbody>
                        <For
                            each=move || visible.get()
                            key=|user| (user.id.clone(), user.is_active)
                            children=move |user| {
                                let edit_id = user.id.clone();
                                let row_id = user.id.clone();
                                let target = user.clone();
                                view! {
                                    <tr>
                                        <td>
                                            <div class="cell-title">{user.display_name()}</div>
                                            <div class="cell-sub">{user.username.clone().map(|u| format!("@{}", u))}</div>
                                        </td>
                                        <td>{user.phone_number.clone()}</td>
                                        <td><span class="badge">{user.role.as_str()}</span></td>
                                        <td>{user.current_lang.as_str()}</td>
                                        <td>
                                            <button
                                                class={if user.is_active { "badge active" } else { "badge inactive" }}
                                                disabled=move || busy.get().as_deref() == Some(row_id.as_str())
                                                on:click=move |_| toggle_active(target.clone())
                                            >
                                                {if user.is_active { "Active" } else { "Inactive" }}
                                            </button>
                                        </td>
                                        <td>{user.last_login.as_deref().map(format_date).unwrap_or_else(|| "Never".to_string())}</td>
                                        <td>
                                            <button class="btn-link" on:click=move |_| ctx.navigate(Page::UserEdit(edit_id.clone()))>
                                                "Edit"
                                            </button>
                                        </td>
                                    </tr>
                                }
                            }
                        />
                    </tbody>
                </table>
                <Show when=move || filtered.with(Vec::is_empty)>
                    <p class="empty">"No users found"</p>
                </Show>
                <Pagination
                    current=page
                    total_items=Signal::derive(move || filtered.with(Vec::len))
                    page_size=page_size
                    on_change=move |p: usize| set_page.set(p)
                />
            </Show>
        </div>
    }
}
