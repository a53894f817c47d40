//! Application Context
//!
//! Shared state provided via Leptos Context API.

use leptos::prelude::*;
use reactive_stores::Store;

use crate::api::{ApiClient, ApiError};
use crate::config::AppConfig;
use crate::session::{BrowserStorage, Session, SessionStore};
use crate::store::{AppState, AppStateStoreFields, AppStore, Page};

/// App-wide handles provided via context
#[derive(Clone, Copy)]
pub struct AppContext {
    pub store: AppStore,
    config: StoredValue<AppConfig>,
    /// Absolute API root
    api_root: StoredValue<String>,
    sessions: StoredValue<SessionStore<BrowserStorage>>,
}

impl AppContext {
    pub fn new(config: AppConfig) -> Self {
        let sessions = SessionStore::new(BrowserStorage);
        let session = sessions.init();
        if let Some(session) = &session {
            log::info!("restored session for {}", session.user.display_name());
        }

        let origin = web_sys::window().and_then(|w| w.location().origin().ok());
        let api_root = config.absolute_api_url(origin.as_deref());
        log::debug!("API root: {}", api_root);

        Self {
            store: Store::new(AppState::new(session)),
            config: StoredValue::new(config),
            api_root: StoredValue::new(api_root),
            sessions: StoredValue::new(sessions),
        }
    }

    pub fn config(&self) -> AppConfig {
        self.config.get_value()
    }

    /// Client carrying the signed-in user's token
    pub fn api(&self) -> ApiClient {
        let token = self.store.session().with_untracked(|s| s.as_ref().map(|s| s.token.clone()));
        let api = self.anonymous_api().with_token(token);
        if !api.has_token() {
            log::debug!("no session, request goes out unauthenticated");
        }
        api
    }

    /// Client without credentials, for the login call
    pub fn anonymous_api(&self) -> ApiClient {
        self.api_root.with_value(|root| ApiClient::new(root.as_str()))
    }

    pub fn navigate(&self, page: Page) {
        self.store.page().set(page);
    }

    pub fn login(&self, session: Session) {
        if let Err(e) = self.sessions.with_value(|s| s.persist(&session)) {
            log::warn!("session not persisted: {}", e);
        }
        log::info!("signed in as {}", session.user.display_name());
        self.store.session().set(Some(session));
        self.store.page().set(Page::Dashboard);
    }

    pub fn logout(&self) {
        self.sessions.with_value(|s| s.clear());
        self.store.session().set(None);
        self.store.page().set(Page::Dashboard);
        log::info!("signed out");
    }

    /// Log a failed call; an expired token ends the session
    pub fn report(&self, err: &ApiError, what: &str) {
        log::error!("{} failed: {}", what, err);
        if err.is_unauthorized() {
            self.logout();
        }
    }
}

/// Get the app context
pub fn use_app() -> AppContext {
    expect_context::<AppContext>()
}
