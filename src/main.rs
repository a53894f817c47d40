//! Restaurant Admin Frontend Entry Point

mod api;
mod app;
mod catalog;
mod components;
mod config;
mod context;
mod filters;
mod format;
mod models;
mod session;
mod store;
mod tree;

use app::App;
use leptos::prelude::*;
use rolling_logger::LoggerConfig;

fn main() {
    console_error_panic_hook::set_once();

    let config = config::AppConfig::from_env();
    let level = if cfg!(debug_assertions) {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    };
    if rolling_logger::init(LoggerConfig { level, capacity: config.log_capacity }).is_err() {
        web_sys::console::warn_1(&"logger already installed".into());
    }
    log::info!("admin panel starting, API at {}", config.api_base_url);

    mount_to_body(App);
}
