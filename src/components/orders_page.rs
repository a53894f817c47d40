//! Orders Page

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::components::{page_slice, Pagination};
use crate::context::use_app;
use crate::filters::filter_orders;
use crate::format::{format_date, format_price, status_class, status_label};
use crate::models::{Order, OrderStatus};
use crate::store::Page;

/// Status tabs; `None` lists every order
const STATUS_TABS: [(Option<OrderStatus>, &str); 4] = [
    (None, "All"),
    (Some(OrderStatus::Pending), "Pending"),
    (Some(OrderStatus::Confirmed), "Confirmed"),
    (Some(OrderStatus::Declined), "Declined"),
];

#[component]
pub fn OrdersPage() -> impl IntoView {
    let ctx = use_app();
    let config = ctx.config();
    let (limit, page_size) = (config.fetch_limit, config.page_size);

    let (orders, set_orders) = signal(Vec::<Order>::new());
    let (total, set_total) = signal(0u64);
    let (loading, set_loading) = signal(true);
    let (status, set_status) = signal::<Option<OrderStatus>>(None);
    let (search, set_search) = signal(String::new());
    let (page, set_page) = signal(1usize);

    Effect::new(move |_| {
        let status = status.get();
        set_loading.set(true);
        spawn_local(async move {
            match ctx.api().list_orders(status, limit).await {
                Ok(loaded) => {
                    set_total.set(loaded.total);
                    set_orders.set(loaded.items);
                }
                Err(e) => ctx.report(&e, "loading orders"),
            }
            set_loading.set(false);
        });
    });

    let filtered = Memo::new(move |_| orders.with(|all| filter_orders(all, &search.get())));
    let visible = Memo::new(move |_| filtered.with(|all| page_slice(all, page.get(), page_size)));

    view! {
        <div class="page">
            <div class="page-header">
                <div>
                    <h1>"Orders"</h1>
                    <p>{move || format!("{} orders", total.get())}</p>
                </div>
            </div>

            <div class="toolbar">
                <div class="search-box">
                    <span class="search-icon">"🔍"</span>
                    <input
                        type="search"
                        placeholder="Search by order # or customer..."
                        prop:value=move || search.get()
                        on:input=move |ev| {
                            set_search.set(event_target_value(&ev));
                            set_page.set(1);
                        }
                    />
                </div>
                <div class="filter-tabs">
                    {STATUS_TABS.into_iter().map(|(tab, label)| view! {
                        <button
                            class=move || if status.get() == tab { "tab active" } else { "tab" }
                            on:click=move |_| {
                                set_status.set(tab);
                                set_page.set(1);
                            }
                        >
                            {label}
                        </button>
                    }).collect_view()}
                </div>
            </div>

            <Show when=move || !loading.get() fallback=|| view! { <div class="loading">"Loading orders..."</div> }>
                <Show
                    when=move || filtered.with(|o| !o.is_empty())
                    fallback=|| view! { <p class="empty">"No orders found"</p> }
                >
                    <table class="data-table">
                        <thead>
                            <tr>
                                <th>"Order #"</th>
                                <th>"Customer"</th>
                                <th>"Phone"</th>
                                <th>"Total"</th>
                                <th>"Status"</th>
                                <th>"Date"</th>
                                <th></th>
                            </tr>
                        </thead>
                        <tbody>
                            <For
                                each=move || visible.get()
                                key=|order| (order.id.clone(), order.updated_at.clone())
                                children=move |order| {
                                    let row_id = order.id.clone();
                                    let open_id = order.id.clone();
                                    view! {
                                        <tr class="clickable" on:click=move |_| ctx.navigate(Page::OrderEdit(row_id.clone()))>
                                            <td class="order-number">{format!("#{}", order.order_number)}</td>
                                            <td>{order.customer_name.clone()}</td>
                                            <td>{order.customer_phone.clone()}</td>
                                            <td>{format_price(order.total_amount)}</td>
                                            <td><span class=status_class(order.status)>{status_label(order.status)}</span></td>
                                            <td>{format_date(&order.created_at)}</td>
                                            <td>
                                                <button
                                                    class="btn-link"
                                                    on:click=move |ev| {
                                                        ev.stop_propagation();
                                                        ctx.navigate(Page::OrderEdit(open_id.clone()));
                                                    }
                                                >
                                                    "Open"
                                                </button>
                                            </td>
                                        </tr>
                                    }
                                }
                            />
                        </tbody>
                    </table>
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
