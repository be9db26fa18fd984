//! # Session store: token lifecycle and the invalidation event
//!
//! Holds the current bearer token and user profile. The token is the single
//! piece of durable client state, written under the well-known key
//! [`TOKEN_STORAGE_KEY`] through the [`TokenStorage`] seam:
//!
//! - **Web** (WASM + `web` feature): browser `localStorage` via
//!   [`LocalTokenStorage`]
//! - **Native / tests**: in-memory via [`MemoryTokenStorage`]
//!
//! A session with no token is unauthenticated regardless of whether a
//! profile is cached. Instead of the transport layer mutating the window
//! location on a 401, the store exposes an explicit "session invalidated"
//! subscription: the HTTP adapter calls [`SessionStore::invalidate`], and
//! the top-level navigation subscribes and redirects.

use std::sync::{Arc, Mutex};

use crate::models::UserProfile;

/// The durable-storage key holding the bearer token.
pub const TOKEN_STORAGE_KEY: &str = "token";

/// Durable storage for the bearer token.
pub trait TokenStorage {
    fn read(&self) -> Option<String>;
    fn write(&self, token: &str);
    fn clear(&self);
}

/// In-memory TokenStorage for tests and native fallback.
#[derive(Clone, Debug, Default)]
pub struct MemoryTokenStorage {
    token: Arc<Mutex<Option<String>>>,
}

impl MemoryTokenStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl TokenStorage for MemoryTokenStorage {
    fn read(&self) -> Option<String> {
        self.token.lock().unwrap().clone()
    }

    fn write(&self, token: &str) {
        *self.token.lock().unwrap() = Some(token.to_string());
    }

    fn clear(&self) {
        *self.token.lock().unwrap() = None;
    }
}

/// Browser `localStorage`-backed TokenStorage.
#[cfg(all(target_arch = "wasm32", feature = "web"))]
#[derive(Clone, Debug, Default)]
pub struct LocalTokenStorage;

#[cfg(all(target_arch = "wasm32", feature = "web"))]
impl LocalTokenStorage {
    pub fn new() -> Self {
        Self
    }

    fn storage() -> Option<web_sys::Storage> {
        web_sys::window()?.local_storage().ok()?
    }
}

#[cfg(all(target_arch = "wasm32", feature = "web"))]
impl TokenStorage for LocalTokenStorage {
    fn read(&self) -> Option<String> {
        Self::storage()?.get_item(TOKEN_STORAGE_KEY).ok()?
    }

    fn write(&self, token: &str) {
        if let Some(storage) = Self::storage() {
            let _ = storage.set_item(TOKEN_STORAGE_KEY, token);
        }
    }

    fn clear(&self) {
        if let Some(storage) = Self::storage() {
            let _ = storage.remove_item(TOKEN_STORAGE_KEY);
        }
    }
}

#[derive(Clone, Debug, Default)]
struct SessionState {
    token: Option<String>,
    user: Option<UserProfile>,
}

type InvalidatedHook = Box<dyn Fn() + Send + Sync>;

/// The current authentication session. Cheap to clone; clones share state.
#[derive(Clone)]
pub struct SessionStore {
    storage: Arc<dyn TokenStorage + Send + Sync>,
    state: Arc<Mutex<SessionState>>,
    invalidated_hooks: Arc<Mutex<Vec<InvalidatedHook>>>,
}

impl SessionStore {
    /// Create a session, restoring any token the storage already holds.
    pub fn new(storage: impl TokenStorage + Send + Sync + 'static) -> Self {
        let token = storage.read().filter(|t| !t.is_empty());
        Self {
            storage: Arc::new(storage),
            state: Arc::new(Mutex::new(SessionState { token, user: None })),
            invalidated_hooks: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Store the token durably and cache the profile, if provided. An absent
    /// profile signals a deferred profile fetch.
    pub fn login(&self, token: String, user: Option<UserProfile>) {
        self.storage.write(&token);
        let mut state = self.state.lock().unwrap();
        state.token = Some(token);
        state.user = user;
        tracing::info!("session established");
    }

    /// Clear the token from durable storage and memory, and drop the profile.
    pub fn logout(&self) {
        self.storage.clear();
        let mut state = self.state.lock().unwrap();
        state.token = None;
        state.user = None;
        tracing::info!("session cleared");
    }

    /// Like [`logout`](Self::logout), but also fires every registered
    /// session-invalidated subscriber. Called by the HTTP adapter on 401.
    pub fn invalidate(&self) {
        self.logout();
        let hooks = self.invalidated_hooks.lock().unwrap();
        for hook in hooks.iter() {
            hook();
        }
    }

    /// Register a callback fired whenever the session is invalidated.
    pub fn subscribe_invalidated(&self, hook: impl Fn() + Send + Sync + 'static) {
        self.invalidated_hooks.lock().unwrap().push(Box::new(hook));
    }

    /// True iff a non-empty token is present. Pure predicate.
    pub fn is_authenticated(&self) -> bool {
        self.state
            .lock()
            .unwrap()
            .token
            .as_deref()
            .is_some_and(|t| !t.is_empty())
    }

    pub fn token(&self) -> Option<String> {
        self.state.lock().unwrap().token.clone()
    }

    pub fn user(&self) -> Option<UserProfile> {
        self.state.lock().unwrap().user.clone()
    }

    /// Replace the cached profile (after a profile fetch or update).
    pub fn set_user(&self, user: UserProfile) {
        self.state.lock().unwrap().user = Some(user);
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;

    fn profile() -> UserProfile {
        UserProfile {
            id: 1,
            first_name: "Jane".to_string(),
            last_name: "Doe".to_string(),
            email: "jane@example.com".to_string(),
            phone: "555-0100".to_string(),
            profile_image: None,
            created_at: None,
        }
    }

    #[test]
    fn login_persists_token_and_logout_clears_it() {
        let storage = MemoryTokenStorage::new();
        let session = SessionStore::new(storage.clone());
        assert!(!session.is_authenticated());

        session.login("tok-123".to_string(), Some(profile()));
        assert!(session.is_authenticated());
        assert_eq!(storage.read().as_deref(), Some("tok-123"));
        assert_eq!(session.user().unwrap().first_name, "Jane");

        session.logout();
        assert!(!session.is_authenticated());
        assert_eq!(storage.read(), None);
        assert_eq!(session.user(), None);
    }

    #[test]
    fn token_restored_from_storage_on_startup() {
        let storage = MemoryTokenStorage::new();
        storage.write("persisted");
        let session = SessionStore::new(storage);
        assert!(session.is_authenticated());
        assert_eq!(session.token().as_deref(), Some("persisted"));
    }

    #[test]
    fn empty_stored_token_is_unauthenticated() {
        let storage = MemoryTokenStorage::new();
        storage.write("");
        let session = SessionStore::new(storage);
        assert!(!session.is_authenticated());
    }

    #[test]
    fn no_token_means_unauthenticated_even_with_user() {
        let session = SessionStore::new(MemoryTokenStorage::new());
        session.set_user(profile());
        assert!(!session.is_authenticated());
    }

    #[test]
    fn invalidate_clears_session_and_fires_subscribers() {
        let session = SessionStore::new(MemoryTokenStorage::new());
        let fired = Arc::new(AtomicUsize::new(0));
        let fired2 = fired.clone();
        session.subscribe_invalidated(move || {
            fired2.fetch_add(1, Ordering::SeqCst);
        });

        session.login("tok".to_string(), None);
        assert!(session.is_authenticated());

        session.invalidate();
        assert!(!session.is_authenticated());
        assert_eq!(fired.load(Ordering::SeqCst), 1);

        // Plain logout does not fire the event.
        session.login("tok2".to_string(), None);
        session.logout();
        assert_eq!(fired.load(Ordering::SeqCst), 1);
    }
}
