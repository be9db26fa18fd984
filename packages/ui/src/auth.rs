//! Authentication context and hooks for the UI.

use dioxus::prelude::*;

use api::UserProfile;

use crate::clients::{make_clients, use_clients};
use crate::guard::redirect_to_login;

/// Authentication state for the application.
#[derive(Debug, Clone, PartialEq)]
pub struct AuthState {
    pub user: Option<UserProfile>,
    /// True until the stored session has been resolved once.
    pub loading: bool,
}

impl Default for AuthState {
    fn default() -> Self {
        Self {
            user: None,
            loading: true,
        }
    }
}

/// Get the current authentication state.
/// Returns a signal that updates when the user logs in or out.
pub fn use_auth() -> Signal<AuthState> {
    use_context::<Signal<AuthState>>()
}

/// Provider component that builds the service clients and manages
/// authentication state. Wrap the router with this component.
#[component]
pub fn AuthProvider(children: Element) -> Element {
    let clients = use_context_provider(make_clients);
    let mut auth_state = use_signal(AuthState::default);

    // Any 401 anywhere invalidates the session; land back on the login page.
    let session = clients.session.clone();
    use_hook(move || session.subscribe_invalidated(redirect_to_login));

    // Resolve the stored session once on mount.
    let _ = use_resource(move || {
        let clients = clients.clone();
        async move {
            if !clients.session.is_authenticated() {
                auth_state.set(AuthState {
                    user: None,
                    loading: false,
                });
                return;
            }
            match clients.auth.current_user().await {
                Ok(user) => {
                    clients.session.set_user(user.clone());
                    auth_state.set(AuthState {
                        user: Some(user),
                        loading: false,
                    });
                }
                Err(err) => {
                    // A 401 has already cleared the token; anything else
                    // leaves it in place for the next attempt (deferred
                    // profile).
                    tracing::warn!("session resolution failed: {err}");
                    auth_state.set(AuthState {
                        user: None,
                        loading: false,
                    });
                }
            }
        }
    });

    use_context_provider(|| auth_state);

    rsx! {
        {children}
    }
}

/// Button that clears the session and returns to the login page.
#[component]
pub fn LogoutButton(#[props(default = "logout-btn".to_string())] class: String) -> Element {
    let clients = use_clients();
    let mut auth_state = use_auth();

    rsx! {
        button {
            class: "{class}",
            onclick: move |_| {
                clients.session.logout();
                auth_state.set(AuthState {
                    user: None,
                    loading: false,
                });
                redirect_to_login();
            },
            "Sign Out"
        }
    }
}
