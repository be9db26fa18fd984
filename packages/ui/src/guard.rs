//! Route guard for protected views.

use dioxus::prelude::*;

use crate::auth::use_auth;
use crate::clients::use_clients;

/// Send the browser to the login page. No-op off-web (tests).
pub fn redirect_to_login() {
    #[cfg(target_arch = "wasm32")]
    {
        if let Some(window) = web_sys::window() {
            let _ = window.location().set_href("/login");
        }
    }
    #[cfg(not(target_arch = "wasm32"))]
    {
        tracing::debug!("redirect to login requested");
    }
}

/// Gate for protected content: shows a loading indicator until the session
/// is resolved, then either renders the children or redirects to login.
/// The decision is made exactly once per mount.
#[component]
pub fn RequireAuth(children: Element) -> Element {
    let auth = use_auth();
    let clients = use_clients();

    if auth().loading {
        return rsx! {
            div {
                class: "loading-screen",
                div { class: "loading" }
                p { "Loading..." }
            }
        };
    }

    if !clients.session.is_authenticated() {
        redirect_to_login();
        return rsx! {};
    }

    rsx! {
        {children}
    }
}
