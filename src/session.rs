//! Session Store
//!
//! Bearer token and signed-in user, persisted across page reloads.

use serde::{Deserialize, Serialize};

use crate::api::ApiError;
use crate::models::{LoginResponse, Role, User};

pub const TOKEN_KEY: &str = "token";
pub const USER_KEY: &str = "user";

/// Minimal key-value persistence
pub trait KeyValueStorage {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str) -> Result<(), String>;
    fn remove(&self, key: &str);
}

/// `window.localStorage`; every call is a no-op when storage is unavailable
#[derive(Debug, Clone, Copy, Default)]
pub struct BrowserStorage;

impl BrowserStorage {
    fn storage() -> Option<web_sys::Storage> {
        web_sys::window()?.local_storage().ok().flatten()
    }
}

impl KeyValueStorage for BrowserStorage {
    fn get(&self, key: &str) -> Option<String> {
        Self::storage()?.get_item(key).ok().flatten()
    }

    fn set(&self, key: &str, value: &str) -> Result<(), String> {
        let storage = Self::storage().ok_or_else(|| "localStorage unavailable".to_string())?;
        storage
            .set_item(key, value)
            .map_err(|e| format!("localStorage write failed: {:?}", e))
    }

    fn remove(&self, key: &str) {
        if let Some(storage) = Self::storage() {
            let _ = storage.remove_item(key);
        }
    }
}

/// An authenticated admin
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub token: String,
    pub user: User,
}

impl Session {
    /// Accept a login response only for admin accounts
    pub fn admit(response: LoginResponse) -> Result<Self, ApiError> {
        if response.user.role != Role::Admin {
            return Err(ApiError::Forbidden(
                "Access denied. Admin privileges required.".to_string(),
            ));
        }
        Ok(Self {
            token: response.access_token,
            user: response.user,
        })
    }
}

/// Persists one session in a key-value storage
#[derive(Debug, Clone, Default)]
pub struct SessionStore<S: KeyValueStorage> {
    storage: S,
}

impl<S: KeyValueStorage> SessionStore<S> {
    pub fn new(storage: S) -> Self {
        Self { storage }
    }

    /// Restore the persisted session, or clear partial/corrupt leftovers
    pub fn init(&self) -> Option<Session> {
        let token = self.storage.get(TOKEN_KEY);
        let user = self.storage.get(USER_KEY);

        let restored = match (token, user) {
            (Some(token), Some(user)) if !token.is_empty() => match serde_json::from_str::<User>(&user) {
                Ok(user) => Some(Session { token, user }),
                Err(e) => {
                    log::warn!("stored user is unreadable, signing out: {}", e);
                    None
                }
            },
            (None, None) => return None,
            _ => None,
        };

        if restored.is_none() {
            self.clear();
        }
        restored
    }

    pub fn persist(&self, session: &Session) -> Result<(), String> {
        let user = serde_json::to_string(&session.user).map_err(|e| e.to_string())?;
        self.storage.set(TOKEN_KEY, &session.token)?;
        self.storage.set(USER_KEY, &user)
    }

    pub fn clear(&self) {
        self.storage.remove(TOKEN_KEY);
        self.storage.remove(USER_KEY);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::collections::HashMap;

    #[derive(Default)]
    struct MemoryStorage(RefCell<HashMap<String, String>>);

    impl KeyValueStorage for MemoryStorage {
        fn get(&self, key: &str) -> Option<String> {
            self.0.borrow().get(key).cloned()
        }

        fn set(&self, key: &str, value: &str) -> Result<(), String> {
            self.0.borrow_mut().insert(key.to_string(), value.to_string());
            Ok(())
        }

        fn remove(&self, key: &str) {
            self.0.borrow_mut().remove(key);
        }
    }

    fn user(role: &str) -> User {
        serde_json::from_value(serde_json::json!({
            "id": "u1", "phone_number": "+998901234567", "username": "admin",
            "telegram_id": null, "full_name": "Main Admin", "role": role, "current_lang": "ru",
            "is_active": true, "created_at": "2024-01-01T00:00:00", "updated_at": "2024-01-01T00:00:00",
            "last_login": null
        }))
        .unwrap()
    }

    fn login_response(role: &str) -> LoginResponse {
        LoginResponse {
            access_token: "jwt-token".to_string(),
            user: user(role),
        }
    }

    #[test]
    fn test_admin_login_is_admitted() {
        let session = Session::admit(login_response("admin")).unwrap();
        assert_eq!(session.token, "jwt-token");
        assert_eq!(session.user.username.as_deref(), Some("admin"));
    }

    #[test]
    fn test_non_admin_login_is_rejected() {
        let err = Session::admit(login_response("user")).unwrap_err();
        assert_eq!(err.user_message(), "Access denied. Admin privileges required.");
    }

    #[test]
    fn test_persist_then_init_restores() {
        let store = SessionStore::new(MemoryStorage::default());
        let session = Session::admit(login_response("admin")).unwrap();
        store.persist(&session).unwrap();

        assert_eq!(store.init(), Some(session));
    }

    #[test]
    fn test_init_on_empty_storage() {
        let store = SessionStore::new(MemoryStorage::default());
        assert_eq!(store.init(), None);
    }

    #[test]
    fn test_corrupt_user_clears_storage() {
        let storage = MemoryStorage::default();
        storage.set(TOKEN_KEY, "jwt-token").unwrap();
        storage.set(USER_KEY, "{not json").unwrap();
        let store = SessionStore::new(storage);

        assert_eq!(store.init(), None);
        assert_eq!(store.storage.get(TOKEN_KEY), None);
        assert_eq!(store.storage.get(USER_KEY), None);
    }

    #[test]
    fn test_token_without_user_is_dropped() {
        let storage = MemoryStorage::default();
        storage.set(TOKEN_KEY, "jwt-token").unwrap();
        let store = SessionStore::new(storage);

        assert_eq!(store.init(), None);
        assert_eq!(store.storage.get(TOKEN_KEY), None);
    }

    #[test]
    fn test_clear_removes_both_keys() {
        let store = SessionStore::new(MemoryStorage::default());
        store.persist(&Session::admit(login_response("admin")).unwrap()).unwrap();
        store.clear();
        assert_eq!(store.init(), None);
    }
}
