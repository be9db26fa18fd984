//! Shared service handles for all views.
//!
//! Built once by [`crate::AuthProvider`] and handed down through context:
//! one [`SessionStore`] backed by the platform-appropriate token storage
//! (browser `localStorage` on web, in-memory elsewhere), and the two
//! service wrappers bound to it.

use dioxus::prelude::*;

use api::{ApiConfig, AuthService, HttpClient, NoteCollection, NotesService, SessionStore};

/// The client set every view works with. Cheap to clone; clones share the
/// session and the note caches.
#[derive(Clone)]
pub struct Clients {
    pub session: SessionStore,
    pub auth: AuthService,
    pub notes: NoteCollection<NotesService>,
}

/// Get the shared clients provided by [`crate::AuthProvider`].
pub fn use_clients() -> Clients {
    use_context::<Clients>()
}

/// Build the platform-appropriate client set.
pub(crate) fn make_clients() -> Clients {
    let session = make_session();
    let config = ApiConfig::default();
    let http = HttpClient::new(session.clone());
    let auth = AuthService::new(http.clone(), &config);
    let notes = NoteCollection::new(NotesService::new(http, &config));
    Clients {
        session,
        auth,
        notes,
    }
}

fn make_session() -> SessionStore {
    #[cfg(all(target_arch = "wasm32", feature = "web"))]
    {
        SessionStore::new(api::LocalTokenStorage::new())
    }
    #[cfg(not(all(target_arch = "wasm32", feature = "web")))]
    {
        SessionStore::new(api::MemoryTokenStorage::new())
    }
}
