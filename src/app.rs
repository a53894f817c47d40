//! Admin Frontend App
//!
//! Login gate, sidebar, and the page selected in the store.

use leptos::prelude::*;

use crate::components::{
    DashboardPage, GroupsPage, LoginPage, OrderEditPage, OrdersPage, OrganizationEditPage,
    OrganizationsPage, ProductEditPage, ProductsPage, Sidebar, UserEditPage, UsersPage,
};
use crate::config::AppConfig;
use crate::context::AppContext;
use crate::store::{AppStateStoreFields, Page};

#[component]
pub fn App() -> impl IntoView {
    let ctx = AppContext::new(AppConfig::from_env());
    let store = ctx.store;

    // Provide context to all children
    provide_context(ctx);
    provide_context(store);

    let signed_in = move || store.session().with(Option::is_some);

    view! {
        <Show when=signed_in fallback=|| view! { <LoginPage /> }>
            <div class="app-layout">
                <Sidebar />
                <main class="main-content">
                    {move || render_page(store.page().get())}
                </main>
            </div>
        </Show>
    }
}

fn render_page(page: Page) -> AnyView {
    match page {
        Page::Dashboard => view! { <DashboardPage /> }.into_any(),
        Page::Users => view! { <UsersPage /> }.into_any(),
        Page::UserEdit(id) => view! { <UserEditPage id=id /> }.into_any(),
        Page::Products => view! { <ProductsPage /> }.into_any(),
        Page::ProductEdit(id) => view! { <ProductEditPage id=id /> }.into_any(),
        Page::Groups => view! { <GroupsPage /> }.into_any(),
        Page::Orders => view! { <OrdersPage /> }.into_any(),
        Page::OrderEdit(id) => view! { <OrderEditPage id=id /> }.into_any(),
        Page::Organizations => view! { <OrganizationsPage /> }.into_any(),
        Page::OrganizationEdit(id) => view! { <OrganizationEditPage id=id /> }.into_any(),
    }
}
