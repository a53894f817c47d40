//! Dashboard Page
//!
//! Collection totals, quick links and recent warnings.

use leptos::prelude::*;
use leptos::task::spawn_local;
use log::Level;
use rolling_logger::LogEntry;

use crate::api::ApiResult;
use crate::context::use_app;
use crate::store::Page;

/// Problems listed on the dashboard
const RECENT_PROBLEMS: usize = 10;

#[derive(Debug, Clone, Copy, Default, PartialEq)]
struct Totals {
    users: u64,
    products: u64,
    orders: u64,
    organizations: u64,
}

async fn fetch_totals(api: &crate::api::ApiClient) -> ApiResult<Totals> {
    let (users, products, orders, organizations) = futures::try_join!(
        api.count("users"),
        api.count("products"),
        api.count("orders"),
        api.count("organizations"),
    )?;
    Ok(Totals { users, products, orders, organizations })
}

/// Newest warnings and errors first
fn recent_problems() -> Vec<LogEntry> {
    rolling_logger::global()
        .map(|logger| {
            let mut entries = logger.recent(Level::Warn);
            entries.reverse();
            entries.truncate(RECENT_PROBLEMS);
            entries
        })
        .unwrap_or_default()
}

#[component]
pub fn DashboardPage() -> impl IntoView {
    let ctx = use_app();
    let (totals, set_totals) = signal::<Option<Totals>>(None);
    let (problems, set_problems) = signal(recent_problems());

    Effect::new(move |_| {
        spawn_local(async move {
            match fetch_totals(&ctx.api()).await {
                Ok(loaded) => set_totals.set(Some(loaded)),
                Err(e) => {
                    ctx.report(&e, "loading dashboard totals");
                    set_totals.set(Some(Totals::default()));
                }
            }
            set_problems.set(recent_problems());
        });
    });

    let stat = move |label: &'static str, pick: fn(&Totals) -> u64| {
        view! {
            <div class="stat-card">
                <p class="stat-label">{label}</p>
                <p class="stat-value">
                    {move || totals.get().map(|t| pick(&t).to_string()).unwrap_or_else(|| "...".to_string())}
                </p>
            </div>
        }
    };

    view! {
        <div class="page">
            <div class="page-header">
                <h1>"Dashboard"</h1>
                <p>"Welcome to the Heat Stand-Art admin panel"</p>
            </div>

            <div class="stat-grid">
                {stat("Users", |t| t.users)}
                {stat("Products", |t| t.products)}
                {stat("Orders", |t| t.orders)}
                {stat("Organizations", |t| t.organizations)}
            </div>

            <div class="card">
                <h2>"Quick actions"</h2>
                <div class="quick-actions">
                    <button on:click=move |_| ctx.navigate(Page::Orders)>"Review orders"</button>
                    <button on:click=move |_| ctx.navigate(Page::Products)>"Manage products"</button>
                    <button on:click=move |_| ctx.navigate(Page::Users)>"Manage users"</button>
                </div>
            </div>

            <div class="card">
                <div class="card-header">
                    <h2>"Recent problems"</h2>
                    <button class="btn-link" on:click=move |_| set_problems.set(recent_problems())>"Refresh"</button>
                </div>
                <Show
                    when=move || problems.with(|p| !p.is_empty())
                    fallback=|| view! { <p class="empty">"No warnings or errors"</p> }
                >
                    <ul class="problem-list">
                        <For
                            each=move || problems.get()
                            key=|entry| (entry.timestamp, entry.message.clone())
                            children=|entry| {
                                let class = if entry.level == Level::Error { "problem error" } else { "problem warn" };
                                view! {
                                    <li class=class>
                                        <span class="problem-time">{entry.timestamp.format("%H:%M:%S").to_string()}</span>
                                        <span class="problem-level">{entry.level.as_str()}</span>
                                        <span class="problem-message">{entry.message}</span>
                                    </li>
                                }
                            }
                        />
                    </ul>
                </Show>
            </div>
        </div>
    }
}
