//! Registration page view.

use dioxus::prelude::*;

use api::RegisterRequest;
use ui::{use_auth, use_clients, AuthState};

use crate::views::optional_field;
use crate::Route;

/// Signup page component. On success the new account is signed in and sent
/// to the dashboard; if the follow-up sign-in fails the user lands on the
/// login page with the account already created.
#[component]
pub fn Signup() -> Element {
    let clients = use_clients();
    let mut auth = use_auth();
    let mut first_name = use_signal(String::new);
    let mut last_name = use_signal(String::new);
    let mut email = use_signal(String::new);
    let mut phone = use_signal(String::new);
    let mut password = use_signal(String::new);
    let mut confirm_password = use_signal(String::new);
    let mut profile_image = use_signal(String::new);
    let mut error = use_signal(|| Option::<String>::None);
    let mut loading = use_signal(|| false);
    let nav = use_navigator();

    // Already signed in: straight to the dashboard.
    if !auth().loading && auth().user.is_some() {
        nav.replace(Route::Dashboard {});
    }

    let handle_signup = move |evt: FormEvent| {
        evt.prevent_default();
        let clients = clients.clone();
        spawn(async move {
            error.set(None);

            let payload = RegisterRequest {
                first_name: first_name().trim().to_string(),
                last_name: last_name().trim().to_string(),
                email: email().trim().to_string(),
                phone: phone().trim().to_string(),
                password: password(),
                confirm_password: confirm_password(),
                profile_image: optional_field(&profile_image()),
            };

            loading.set(true);
            if let Err(e) = clients.auth.register(&payload).await {
                loading.set(false);
                error.set(Some(e.to_string()));
                return;
            }

            match clients.auth.login(&payload.email, &payload.password).await {
                Ok(user) => {
                    auth.set(AuthState {
                        user,
                        loading: false,
                    });
                    nav.push(Route::Dashboard {});
                }
                Err(e) => {
                    tracing::warn!("sign-in after registration failed: {e}");
                    nav.push(Route::Login {});
                }
            }
        });
    };

    rsx! {
        div {
            class: "auth-page",

            div {
                class: "auth-card",

                h1 { class: "auth-title", "Create Account" }
                p { class: "auth-subtitle", "Sign up for Notably" }

                form {
                    class: "auth-form",
                    onsubmit: handle_signup,

                    if let Some(err) = error() {
                        div { class: "error-message", "{err}" }
                    }

                    div {
                        class: "form-row",
                        input {
                            r#type: "text",
                            placeholder: "First name",
                            value: first_name(),
                            oninput: move |evt: FormEvent| first_name.set(evt.value()),
                        }
                        input {
                            r#type: "text",
                            placeholder: "Last name",
                            value: last_name(),
                            oninput: move |evt: FormEvent| last_name.set(evt.value()),
                        }
                    }

                    input {
                        r#type: "email",
                        placeholder: "Email",
                        value: email(),
                        oninput: move |evt: FormEvent| email.set(evt.value()),
                    }

                    input {
                        r#type: "tel",
                        placeholder: "Phone number",
                        value: phone(),
                        oninput: move |evt: FormEvent| phone.set(evt.value()),
                    }

                    input {
                        r#type: "password",
                        placeholder: "Password (min 6 characters)",
                        value: password(),
                        oninput: move |evt: FormEvent| password.set(evt.value()),
                    }

                    input {
                        r#type: "password",
                        placeholder: "Confirm password",
                        value: confirm_password(),
                        oninput: move |evt: FormEvent| confirm_password.set(evt.value()),
                    }

                    input {
                        r#type: "text",
                        placeholder: "Profile image data URL (optional)",
                        value: profile_image(),
                        oninput: move |evt: FormEvent| profile_image.set(evt.value()),
                    }

                    button {
                        class: "btn-primary",
                        r#type: "submit",
                        disabled: loading(),
                        if loading() { "Creating account..." } else { "Sign Up" }
                    }
                }

                p {
                    class: "auth-switch",
                    "Already have an account? "
                    Link { to: Route::Login {}, "Sign in" }
                }
            }
        }
    }
}
