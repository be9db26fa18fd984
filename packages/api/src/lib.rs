//! # API crate: session, services and collection state for Notably
//!
//! This crate is the non-UI half of the Notably client. It owns the
//! session/token lifecycle, the REST wrappers for the two consumed services,
//! and the cached collection state the dashboard renders from. Everything
//! here compiles natively, so the interesting invariants are covered by
//! plain `cargo test` without a browser.
//!
//! ## Modules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`config`] | Base URLs for the auth and notes services |
//! | [`models`] | Wire types: profile, note, category, tag, dashboard stats, list envelopes, request payloads |
//! | [`error`] | [`ApiError`] taxonomy: local validation, network, remote rejection, authorization denied |
//! | [`session`] | [`SessionStore`]: durable token, cached profile, the session-invalidated event |
//! | [`http`] | [`HttpClient`]: bearer injection and the global 401 interceptor |
//! | [`auth`] | [`AuthService`]: register, login (+ follow-up profile fetch), profile update, account deletion |
//! | [`notes`] | [`NotesApi`] seam and the REST [`NotesService`] |
//! | [`controller`] | [`NoteCollection`]: normalized note cache, derived views, validated mutations |
//! | [`editor`] | [`EditorState`]: none-selected / viewing / editing with discard-on-cancel drafts |

pub mod auth;
pub mod config;
pub mod controller;
pub mod editor;
pub mod error;
pub mod http;
pub mod models;
pub mod notes;
pub mod session;

pub use auth::AuthService;
pub use config::ApiConfig;
pub use controller::NoteCollection;
pub use editor::EditorState;
pub use error::{ApiError, ApiResult};
pub use http::HttpClient;
pub use models::{
    Category, CategoryDraft, DashboardStats, Note, NoteDraft, NoteFilter, NoteUpdate,
    ProfileUpdate, RegisterRequest, Tag, UserProfile,
};
pub use notes::{NotesApi, NotesService};
pub use session::{MemoryTokenStorage, SessionStore, TokenStorage, TOKEN_STORAGE_KEY};

#[cfg(all(target_arch = "wasm32", feature = "web"))]
pub use session::LocalTokenStorage;
