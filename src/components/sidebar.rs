//! Sidebar Component
//!
//! Navigation, signed-in user and logout.

use leptos::prelude::*;

use crate::context::use_app;
use crate::store::{use_app_store, AppStateStoreFields, Page};

fn navigation() -> [(&'static str, Page); 6] {
    [
        ("📊", Page::Dashboard),
        ("👥", Page::Users),
        ("📦", Page::Products),
        ("🗂", Page::Groups),
        ("🛒", Page::Orders),
        ("🏢", Page::Organizations),
    ]
}

#[component]
pub fn Sidebar() -> impl IntoView {
    let ctx = use_app();
    let store = use_app_store();
    let user = move || store.session().get().map(|s| s.user);

    view! {
        <aside class="sidebar">
            <div class="sidebar-brand">
                <h1>"Heat Stand-Art"</h1>
                <p>"Admin panel"</p>
            </div>

            <nav class="sidebar-nav">
                {navigation().into_iter().map(|(icon, page)| {
                    let label = page.title();
                    let target = page.clone();
                    let section = page;
                    let is_active = move || store.page().with(|current| current.section() == section);
                    view! {
                        <button
                            class=move || if is_active() { "nav-link active" } else { "nav-link" }
                            on:click=move |_| ctx.navigate(target.clone())
                        >
                            <span class="nav-icon">{icon}</span>
                            {label}
                        </button>
                    }
                }).collect_view()}
            </nav>

            <div class="sidebar-user">
                {move || user().map(|user| view! {
                    <div class="user-badge">
                        <div class="avatar">{user.initial().to_string()}</div>
                        <div class="user-info">
                            <p class="user-name">{user.display_name()}</p>
                            <p class="user-role">{user.role.as_str()}</p>
                        </div>
                    </div>
                })}
                <button class="logout-btn" on:click=move |_| ctx.logout()>"Log out"</button>
            </div>
        </aside>
    }
}
