//! Groups Page
//!
//! Lazily expanded category tree with a root filter.

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::catalog::{reload_roots, sync_catalog, toggle_feedback, toggle_group, GroupTreeSource};
use crate::components::{CatalogTree, SearchBox};
use crate::context::use_app;
use crate::filters::group_matches;
use crate::tree::{count_roots, visible_rows, CatalogForest};

#[component]
pub fn GroupsPage() -> impl IntoView {
    let ctx = use_app();
    let limit = ctx.config().fetch_limit;
    let forest = RwSignal::new(CatalogForest::new());
    let (query, set_query) = signal(String::new());
    let (loading, set_loading) = signal(true);
    let (syncing, set_syncing) = signal(false);
    let (error, set_error) = signal::<Option<String>>(None);

    let source = move || GroupTreeSource::new(ctx.api(), limit);

    Effect::new(move |_| {
        spawn_local(async move {
            if let Err(e) = reload_roots(forest, &source()).await {
                ctx.report(&e, "loading groups");
                set_error.set(Some(e.user_message()));
            }
            set_loading.set(false);
        });
    });

    let on_sync = move |_| {
        if syncing.get_untracked() {
            return;
        }
        set_syncing.set(true);
        set_error.set(None);
        spawn_local(async move {
            match sync_catalog(forest, &source()).await {
                Ok(count) => log::info!("groups synced, {} roots", count),
                Err(e) => {
                    ctx.report(&e, "syncing groups");
                    set_error.set(Some(e.user_message()));
                }
            }
            set_syncing.set(false);
        });
    };

    let on_toggle = Callback::new(move |id: String| {
        spawn_local(async move {
            let outcome = toggle_group(forest, &source(), &id).await;
            set_error.update(|e| *e = toggle_feedback(outcome, "Failed to load subgroups", e.take()));
        });
    });

    let rows = Memo::new(move |_| {
        let q = query.get();
        forest.with(|f| visible_rows(f, |g| group_matches(g, &q)))
    });
    let root_count = move || forest.with(|f| f.roots().len());
    let shown_roots = move || {
        let q = query.get();
        forest.with(|f| count_roots(f, |g| group_matches(g, &q)))
    };

    view! {
        <div class="page">
            <div class="page-header">
                <div>
                    <h1>"Groups"</h1>
                    <p>{move || format!("{} root groups", root_count())}</p>
                </div>
                <button class="btn-primary" disabled=move || syncing.get() on:click=on_sync>
                    {move || if syncing.get() { "Syncing..." } else { "Sync from iiko" }}
                </button>
            </div>

            <SearchBox
                placeholder="Search root groups..."
                on_search=move |q: String| set_query.set(q)
            />

            {move || error.get().map(|msg| view! { <div class="form-error">{msg}</div> })}

            <Show
                when=move || !loading.get()
                fallback=|| view! { <div class="loading">"Loading groups..."</div> }
            >
                <Show
                    when=move || { shown_roots() > 0 }
                    fallback=move || {
                        let q = query.get();
                        let msg = if q.is_empty() {
                            "No groups found. Click \"Sync from iiko\" to fetch data.".to_string()
                        } else {
                            format!("No groups found for \"{}\"", q)
                        };
                        view! { <p class="empty">{msg}</p> }
                    }
                >
                    <CatalogTree rows=rows on_toggle=on_toggle />
                </Show>
            </Show>
        </div>
    }
}
