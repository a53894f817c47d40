//! Order Edit Page
//!
//! Customer info, line items, and the admin-editable status and notes.

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::components::{EditHeader, FormError, TextAreaField};
use crate::context::use_app;
use crate::format::{format_amount, format_date, status_class, status_label};
use crate::models::{Order, OrderStatus, OrderUpdate};
use crate::store::Page;

#[component]
pub fn OrderEditPage(id: String) -> impl IntoView {
    let ctx = use_app();
    let (order, set_order) = signal::<Option<Order>>(None);
    let status = RwSignal::new(OrderStatus::Pending);
    let notes = RwSignal::new(String::new());
    let (loading, set_loading) = signal(true);
    let (saving, set_saving) = signal(false);
    let (error, set_error) = signal::<Option<String>>(None);

    let order_id = id.clone();
    Effect::new(move |_| {
        let order_id = order_id.clone();
        spawn_local(async move {
            match ctx.api().get_order(&order_id).await {
                Ok(loaded) => {
                    status.set(loaded.status);
                    notes.set(loaded.notes.clone().unwrap_or_default());
                    set_order.set(Some(loaded));
                }
                Err(e) => {
                    ctx.report(&e, "loading order");
                    set_error.set(Some("Failed to load order".to_string()));
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
        let update = OrderUpdate {
            status: status.get_untracked(),
            notes: notes.get_untracked(),
        };
        set_saving.set(true);
        set_error.set(None);
        let order_id = id.clone();
        spawn_local(async move {
            match ctx.api().update_order(&order_id, &update).await {
                Ok(()) => {
                    log::info!("order {} set to {}", order_id, update.status.as_str());
                    ctx.navigate(Page::Orders);
                }
                Err(e) => {
                    ctx.report(&e, "saving order");
                    set_error.set(Some(format!("Failed to update order: {}", e.user_message())));
                }
            }
            set_saving.set(false);
        });
    };

    let details = move |order: Order| {
        view! {
            <div class="order-summary">
                <div class="card">
                    <h2>"Customer"</h2>
                    <dl>
                        <dt>"Name"</dt><dd>{order.customer_name.clone()}</dd>
                        <dt>"Phone"</dt><dd>{order.customer_phone.clone()}</dd>
                        <dt>"Address"</dt>
                        <dd>{order.customer_address.clone().unwrap_or_else(|| "N/A".to_string())}</dd>
                    </dl>
                </div>
                <div class="card">
                    <h2>"Summary"</h2>
                    <dl>
                        <dt>"Status"</dt>
                        <dd><span class=status_class(order.status)>{status_label(order.status)}</span></dd>
                        <dt>"Total"</dt><dd>{format!("{} UZS", format_amount(order.total_amount))}</dd>
                        <dt>"Created"</dt><dd>{format_date(&order.created_at)}</dd>
                        <dt>"Updated"</dt><dd>{format_date(&order.updated_at)}</dd>
                    </dl>
                </div>
            </div>

            <div class="card">
                <h2>"Items"</h2>
                <table class="data-table">
                    <thead>
                        <tr>
                            <th>"Product"</th>
                            <th>"Qty"</th>
                            <th>"Price"</th>
                            <th>"Total"</th>
                        </tr>
                    </thead>
                    <tbody>
                        {order.items.into_iter().map(|item| view! {
                            <tr>
                                <td>{item.product_name}</td>
                                <td>{item.quantity}</td>
                                <td>{format_amount(item.price)}</td>
                                <td>{format_amount(item.total)}</td>
                            </tr>
                        }).collect_view()}
                    </tbody>
                </table>
            </div>
        }
    };

    view! {
        <div class="page edit-page">
            <EditHeader
                title=Signal::derive(move || {
                    order.get().map(|o| format!("Order #{}", o.order_number)).unwrap_or_else(|| "Order".to_string())
                })
                back_label="Back to orders"
                on_back=move |_| ctx.navigate(Page::Orders)
            />
            <FormError error=error />

            <Show when=move || !loading.get() fallback=|| view! { <div class="loading">"Loading..."</div> }>
                {move || order.get().map(details)}

                <form class="edit-form card" on:submit=on_submit.clone()>
                    <h2>"Manage order"</h2>
                    <label class="field">
                        <span class="field-label">"Status"</span>
                        <select on:change=move |ev| {
                            if let Some(parsed) = OrderStatus::parse(&event_target_value(&ev)) {
                                status.set(parsed);
                            }
                        }>
                            {OrderStatus::EDITABLE.into_iter().map(|option| view! {
                                <option value=option.as_str() selected=move || status.get() == option>
                                    {status_label(option)}
                                </option>
                            }).collect_view()}
                        </select>
                    </label>
                    <TextAreaField label="Notes" value=notes />

                    <div class="form-actions">
                        <button type="button" on:click=move |_| ctx.navigate(Page::Orders)>"Cancel"</button>
                        <button type="submit" class="btn-primary" disabled=move || saving.get()>
                            {move || if saving.get() { "Saving..." } else { "Save" }}
                        </button>
                    </div>
                </form>
            </Show>
        </div>
    }
}
