//! Catalog Tree Component
//!
//! Renders flattened forest rows with expand/collapse chevrons.

use leptos::prelude::*;

use crate::format::format_price;
use crate::models::{Group, Product};
use crate::tree::Row;

const INDENT_PX: usize = 20;

fn indent(depth: usize) -> String {
    format!("padding-left: {}px", depth * INDENT_PX + 12)
}

#[component]
pub fn CatalogTree(
    #[prop(into)] rows: Signal<Vec<Row>>,
    /// Expand or collapse a group by id
    #[prop(into)]
    on_toggle: Callback<String>,
    /// Shown on product rows when set
    #[prop(optional, into)]
    on_edit_product: Option<Callback<String>>,
) -> impl IntoView {
    view! {
        <div class="catalog-tree">
            <For
                each=move || rows.get()
                key=|row| row.key()
                children=move |row| match row {
                    Row::Group { group, depth, state, subgroups, products } => view! {
                        <GroupRow
                            group=group
                            depth=depth
                            expanded=state.expanded
                            loading=state.loading
                            subgroups=subgroups
                            products=products
                            on_toggle=on_toggle
                        />
                    }.into_any(),
                    Row::Product { product, depth } => view! {
                        <ProductRow product=product depth=depth on_edit=on_edit_product />
                    }.into_any(),
                }
            />
        </div>
    }
}

#[component]
fn GroupRow(
    group: Group,
    depth: usize,
    expanded: bool,
    loading: bool,
    subgroups: Option<usize>,
    products: Option<usize>,
    on_toggle: Callback<String>,
) -> impl IntoView {
    let id = group.id.clone();
    let chevron = if loading {
        "⏳"
    } else if expanded {
        "▼"
    } else {
        "▶"
    };
    let counts = match (subgroups, products) {
        (Some(0), Some(0)) => "empty".to_string(),
        (Some(g), Some(0)) | (Some(g), None) => format!("{} subgroups", g),
        (Some(0), Some(p)) => format!("{} products", p),
        (Some(g), Some(p)) => format!("{} subgroups, {} products", g, p),
        (None, _) => format!("{} active products", group.active_products_count),
    };

    view! {
        <div
            class="tree-row group-row"
            class:expanded=expanded
            class:loading=loading
            style=indent(depth)
            on:click=move |_| on_toggle.run(id.clone())
        >
            <span class="toggle-icon">{chevron}</span>
            <span class="group-icon">"📁"</span>
            <span class="group-name">{group.name_ru.clone()}</span>
            <span class="group-name-alt">{group.name_en.clone()}</span>
            <span class="group-counts">{counts}</span>
            {(!group.is_active).then(|| view! { <span class="badge inactive">"Inactive"</span> })}
        </div>
    }
}

#[component]
fn ProductRow(product: Product, depth: usize, on_edit: Option<Callback<String>>) -> impl IntoView {
    let id = product.id.clone();
    view! {
        <div class="tree-row product-row" style=indent(depth)>
            <span class="product-icon">"🍽"</span>
            <span class="product-name">{product.name_ru.clone()}</span>
            <span class="product-name-alt">{product.name_en.clone()}</span>
            <span class="product-price">{format_price(product.price)}</span>
            {if product.is_active {
                view! { <span class="badge active">"Active"</span> }.into_any()
            } else {
                view! { <span class="badge inactive">"Inactive"</span> }.into_any()
            }}
            {on_edit.map(|on_edit| view! {
                <button class="btn-link" on:click=move |_| on_edit.run(id.clone())>"Edit"</button>
            })}
        </div>
    }
}
