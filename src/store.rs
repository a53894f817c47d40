//! Global Application State Store
//!
//! Uses Leptos reactive_stores for fine-grained reactivity.

use leptos::prelude::*;
use reactive_stores::Store;

use crate::session::Session;

/// Screen currently shown in the main column
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum Page {
    #[default]
    Dashboard,
    Users,
    UserEdit(String),
    Products,
    ProductEdit(String),
    Groups,
    Orders,
    OrderEdit(String),
    Organizations,
    OrganizationEdit(String),
}

impl Page {
    /// Sidebar entry this page belongs to
    pub fn section(&self) -> Page {
        match self {
            Page::UserEdit(_) => Page::Users,
            Page::ProductEdit(_) => Page::Products,
            Page::OrderEdit(_) => Page::Orders,
            Page::OrganizationEdit(_) => Page::Organizations,
            other => other.clone(),
        }
    }

    pub fn title(&self) -> &'static str {
        match self.section() {
            Page::Dashboard => "Dashboard",
            Page::Users => "Users",
            Page::Products => "Products",
            Page::Groups => "Groups",
            Page::Orders => "Orders",
            Page::Organizations => "Organizations",
            _ => "",
        }
    }
}

/// Global application state with field-level reactivity
#[derive(Clone, Debug, Default, Store)]
pub struct AppState {
    /// Signed-in admin, `None` shows the login screen
    pub session: Option<Session>,
    pub page: Page,
}

impl AppState {
    pub fn new(session: Option<Session>) -> Self {
        Self {
            session,
            ..Default::default()
        }
    }
}

/// Type alias for the store
pub type AppStore = Store<AppState>;

/// Get the app store from context
pub fn use_app_store() -> AppStore {
    expect_context::<AppStore>()
}
