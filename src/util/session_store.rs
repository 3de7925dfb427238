//! Session store: the persisted signed-in identity.
//!
//! The identity (user id, access token, refresh token) lives in browser
//! `localStorage` under fixed keys. Access goes through the `SessionStore`
//! trait so session-dependent logic can be exercised against an in-memory
//! store in tests instead of ambient browser globals.

#[cfg(test)]
#[path = "session_store_test.rs"]
mod session_store_test;

use std::cell::RefCell;
use std::collections::HashMap;

use crate::net::error::ClientError;

const USER_ID_KEY: &str = "userId";
const ACCESS_TOKEN_KEY: &str = "accessToken";
const REFRESH_TOKEN_KEY: &str = "refreshToken";

/// The signed-in identity as persisted across reloads.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Identity {
    pub user_id: i64,
    pub access_token: String,
    pub refresh_token: String,
}

/// Key/value persistence for the session identity.
pub trait SessionStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str);
    fn remove(&self, key: &str);

    /// Load the full identity, or fail with `AuthMissing` when any part of
    /// it is absent or unreadable.
    fn identity(&self) -> Result<Identity, ClientError> {
        let user_id = self
            .get(USER_ID_KEY)
            .and_then(|raw| raw.parse::<i64>().ok())
            .ok_or(ClientError::AuthMissing)?;
        let access_token = self.get(ACCESS_TOKEN_KEY).ok_or(ClientError::AuthMissing)?;
        let refresh_token = self
            .get(REFRESH_TOKEN_KEY)
            .ok_or(ClientError::AuthMissing)?;
        Ok(Identity {
            user_id,
            access_token,
            refresh_token,
        })
    }

    /// Persist a freshly issued identity.
    fn store_identity(&self, identity: &Identity) {
        self.set(USER_ID_KEY, &identity.user_id.to_string());
        self.set(ACCESS_TOKEN_KEY, &identity.access_token);
        self.set(REFRESH_TOKEN_KEY, &identity.refresh_token);
    }

    /// Drop all identity keys (sign-out).
    fn clear_identity(&self) {
        self.remove(USER_ID_KEY);
        self.remove(ACCESS_TOKEN_KEY);
        self.remove(REFRESH_TOKEN_KEY);
    }
}

/// In-memory store for tests and server-side rendering.
#[derive(Debug, Default)]
pub struct MemoryStore {
    values: RefCell<HashMap<String, String>>,
}

impl SessionStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values.borrow().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) {
        self.values
            .borrow_mut()
            .insert(key.to_owned(), value.to_owned());
    }

    fn remove(&self, key: &str) {
        self.values.borrow_mut().remove(key);
    }
}

/// `localStorage`-backed store. Reads and writes silently no-op outside a
/// browser environment.
#[derive(Clone, Copy, Debug, Default)]
pub struct BrowserStore;

impl SessionStore for BrowserStore {
    fn get(&self, key: &str) -> Option<String> {
        #[cfg(feature = "hydrate")]
        {
            let storage = web_sys::window()?.local_storage().ok()??;
            storage.get_item(key).ok()?
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = key;
            None
        }
    }

    fn set(&self, key: &str, value: &str) {
        #[cfg(feature = "hydrate")]
        {
            if let Some(storage) = web_sys::window().and_then(|w| w.local_storage().ok().flatten())
            {
                let _ = storage.set_item(key, value);
            }
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = (key, value);
        }
    }

    fn remove(&self, key: &str) {
        #[cfg(feature = "hydrate")]
        {
            if let Some(storage) = web_sys::window().and_then(|w| w.local_storage().ok().flatten())
            {
                let _ = storage.remove_item(key);
            }
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = key;
        }
    }
}
