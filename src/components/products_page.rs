//! Products Page
//!
//! Product tree by group, or flat server-side search results.

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::catalog::{reload_roots, sync_catalog, toggle_feedback, toggle_group, ProductTreeSource};
use crate::components::{CatalogTree, SearchBox};
use crate::context::use_app;
use crate::format::format_price;
use crate::models::Product;
use crate::store::Page;
use crate::tree::{visible_rows, CatalogForest};

#[component]
pub fn ProductsPage() -> impl IntoView {
    let ctx = use_app();
    let limit = ctx.config().fetch_limit;
    let forest = RwSignal::new(CatalogForest::new());
    let (loading, set_loading) = signal(true);
    let (syncing, set_syncing) = signal(false);
    let (error, set_error) = signal::<Option<String>>(None);
    // Search mode while the query is non-empty
    let (query, set_query) = signal(String::new());
    let (results, set_results) = signal::<Option<Vec<Product>>>(None);

    let source = move || ProductTreeSource::new(ctx.api(), limit);

    Effect::new(move |_| {
        spawn_local(async move {
            if let Err(e) = reload_roots(forest, &source()).await {
                ctx.report(&e, "loading product groups");
                set_error.set(Some(e.user_message()));
            }
            set_loading.set(false);
        });
    });

    let on_search = Callback::new(move |q: String| {
        set_query.set(q.clone());
        if q.is_empty() {
            set_results.set(None);
            return;
        }
        spawn_local(async move {
            let result = ctx.api().search_products(&q, limit).await;
            // A newer query owns the result list
            if query.try_get_untracked().as_deref() != Some(q.as_str()) {
                log::debug!("search results for {:?} dropped", q);
                return;
            }
            match result {
                Ok(page) => set_results.set(Some(page.items)),
                Err(e) => {
                    ctx.report(&e, "searching products");
                    set_results.set(Some(Vec::new()));
                }
            }
        });
    });

    let on_sync = move |_| {
        if syncing.get_untracked() {
            return;
        }
        set_syncing.set(true);
        set_error.set(None);
        spawn_local(async move {
            if let Err(e) = sync_catalog(forest, &source()).await {
                ctx.report(&e, "syncing products");
                set_error.set(Some(e.user_message()));
            }
            set_syncing.set(false);
        });
    };

    let on_toggle = Callback::new(move |id: String| {
        spawn_local(async move {
            let outcome = toggle_group(forest, &source(), &id).await;
            set_error.update(|e| *e = toggle_feedback(outcome, "Failed to load group contents", e.take()));
        });
    });

    let on_edit = Callback::new(move |id: String| ctx.navigate(Page::ProductEdit(id)));

    let rows = Memo::new(move |_| forest.with(|f| visible_rows(f, |_| true)));

    view! {
        <div class="page">
            <div class="page-header">
                <div>
                    <h1>"Products"</h1>
                    <p>"Catalog by group"</p>
                </div>
                <button class="btn-primary" disabled=move || syncing.get() on:click=on_sync>
                    {move || if syncing.get() { "Syncing..." } else { "Sync from iiko" }}
                </button>
            </div>

            <SearchBox placeholder="Search products..." on_search=on_search />

            {move || error.get().map(|msg| view! { <div class="form-error">{msg}</div> })}

            {move || match results.get() {
                Some(found) if found.is_empty() => view! {
                    <p class="empty">{format!("No products found for \"{}\"", query.get())}</p>
                }.into_any(),
                Some(found) => view! { <SearchResults products=found on_edit=on_edit /> }.into_any(),
                None if loading.get() => view! { <div class="loading">"Loading catalog..."</div> }.into_any(),
                None => view! { <CatalogTree rows=rows on_toggle=on_toggle on_edit_product=on_edit /> }.into_any(),
            }}
        </div>
    }
}

#[component]
fn SearchResults(products: Vec<Product>, on_edit: Callback<String>) -> impl IntoView {
    view! {
        <table class="data-table">
            <thead>
                <tr>
                    <th>"Name"</th>
                    <th>"Price"</th>
                    <th>"Status"</th>
                    <th></th>
                </tr>
            </thead>
            <tbody>
                {products.into_iter().map(|product| {
                    let id = product.id.clone();
                    view! {
                        <tr>
                            <td>
                                <div class="cell-title">{product.name_ru.clone()}</div>
                                <div class="cell-sub">{product.name_en.clone()}</div>
                            </td>
                            <td>{format_price(product.price)}</td>
                            <td>{if product.is_active { "Active" } else { "Inactive" }}</td>
                            <td>
                                <button class="btn-link" on:click=move |_| on_edit.run(id.clone())>"Edit"</button>
                            </td>
                        </tr>
                    }
                }).collect_view()}
            </tbody>
        </table>
    }
}
