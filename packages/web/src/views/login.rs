//! Login page view with email/password form.

use dioxus::prelude::*;

use ui::{use_auth, use_clients, AuthState};

use crate::Route;

/// Login page component.
#[component]
pub fn Login() -> Element {
    let clients = use_clients();
    let mut auth = use_auth();
    let mut email = use_signal(String::new);
    let mut password = use_signal(String::new);
    let mut error = use_signal(|| Option::<String>::None);
    let mut loading = use_signal(|| false);
    let nav = use_navigator();

    // Already signed in: straight to the dashboard.
    if !auth().loading && auth().user.is_some() {
        nav.replace(Route::Dashboard {});
    }

    let handle_login = move |evt: FormEvent| {
        evt.prevent_default();
        let clients = clients.clone();
        spawn(async move {
            error.set(None);
            loading.set(true);
            match clients.auth.login(&email(), &password()).await {
                Ok(user) => {
                    // `None` means the profile fetch is deferred; the auth
                    // provider retries it on the dashboard mount.
                    auth.set(AuthState {
                        user,
                        loading: false,
                    });
                    nav.push(Route::Dashboard {});
                }
                Err(e) => {
                    loading.set(false);
                    error.set(Some(e.to_string()));
                }
            }
        });
    };

    rsx! {
        div {
            class: "auth-page",

            div {
                class: "auth-card",

                h1 { class: "auth-title", "Notably" }
                p { class: "auth-subtitle", "Sign in to your notes" }

                form {
                    class: "auth-form",
                    onsubmit: handle_login,

                    if let Some(err) = error() {
                        div { class: "error-message", "{err}" }
                    }

                    input {
                        r#type: "email",
                        placeholder: "Email",
                        value: email(),
                        oninput: move |evt: FormEvent| email.set(evt.value()),
                    }

                    input {
                        r#type: "password",
                        placeholder: "Password",
                        value: password(),
                        oninput: move |evt: FormEvent| password.set(evt.value()),
                    }

                    button {
                        class: "btn-primary",
                        r#type: "submit",
                        disabled: loading(),
                        if loading() { "Signing in..." } else { "Sign In" }
                    }
                }

                p {
                    class: "auth-switch",
                    "Don't have an account? "
                    Link { to: Route::Signup {}, "Sign up" }
                }
            }
        }
    }
}
