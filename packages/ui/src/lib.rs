//! This crate contains all shared UI for the workspace.

mod clients;
pub use clients::{use_clients, Clients};

mod auth;
pub use auth::{use_auth, AuthProvider, AuthState, LogoutButton};

mod guard;
pub use guard::{redirect_to_login, RequireAuth};

mod confirm;
pub use confirm::confirm_action;

mod sidebar;
pub use sidebar::{DashboardSidebar, DashboardTab};

mod note_panel;
pub use note_panel::{NoteForm, NoteList, NoteView};
