//! Profile page view: edit account details, delete the account.

use dioxus::prelude::*;

use api::ProfileUpdate;
use ui::{
    confirm_action, redirect_to_login, use_auth, use_clients, AuthState, RequireAuth,
};

use crate::views::optional_field;
use crate::Route;

/// Profile page component. Content is gated behind authentication.
#[component]
pub fn Profile() -> Element {
    rsx! {
        RequireAuth {
            ProfileContent {}
        }
    }
}

#[component]
fn ProfileContent() -> Element {
    let clients = use_clients();
    let mut auth = use_auth();
    let nav = use_navigator();

    let mut first_name = use_signal(String::new);
    let mut last_name = use_signal(String::new);
    let mut phone = use_signal(String::new);
    let mut profile_image = use_signal(String::new);
    let mut error = use_signal(|| Option::<String>::None);
    let mut saved = use_signal(|| false);
    let mut saving = use_signal(|| false);

    // Populate the form once the profile is resolved; re-runs after a save
    // with the server's representation, which is what the form should show.
    use_effect(move || {
        if let Some(user) = auth().user {
            first_name.set(user.first_name);
            last_name.set(user.last_name);
            phone.set(user.phone);
            profile_image.set(user.profile_image.unwrap_or_default());
        }
    });

    let handle_save = {
        let clients = clients.clone();
        move |evt: FormEvent| {
            evt.prevent_default();
            let clients = clients.clone();
            spawn(async move {
                error.set(None);
                saved.set(false);
                saving.set(true);
                let update = ProfileUpdate {
                    first_name: Some(first_name().trim().to_string()),
                    last_name: Some(last_name().trim().to_string()),
                    phone: Some(phone().trim().to_string()),
                    // Blank input leaves the stored image unchanged.
                    profile_image: optional_field(&profile_image()),
                };
                match clients.auth.update_profile(&update).await {
                    Ok(user) => {
                        auth.set(AuthState {
                            user: Some(user),
                            loading: false,
                        });
                        saved.set(true);
                    }
                    Err(e) => error.set(Some(e.to_string())),
                }
                saving.set(false);
            });
        }
    };

    let handle_delete = {
        let clients = clients.clone();
        move |_| {
            if !confirm_action(
                "Permanently delete your account and all of your notes? This cannot be undone.",
            ) {
                return;
            }
            let clients = clients.clone();
            spawn(async move {
                match clients.auth.delete_account().await {
                    Ok(()) => {
                        auth.set(AuthState {
                            user: None,
                            loading: false,
                        });
                        redirect_to_login();
                    }
                    Err(e) => error.set(Some(e.to_string())),
                }
            });
        }
    };

    let email = auth().user.map(|u| u.email).unwrap_or_default();

    rsx! {
        div {
            class: "profile-page",

            div {
                class: "profile-card",

                button {
                    class: "btn-secondary",
                    onclick: move |_| {
                        nav.push(Route::Dashboard {});
                    },
                    "← Back to Dashboard"
                }

                h1 { "Profile" }

                form {
                    class: "profile-form",
                    onsubmit: handle_save,

                    if let Some(err) = error() {
                        div { class: "error-message", "{err}" }
                    }
                    if saved() {
                        div { class: "success-message", "Profile updated" }
                    }

                    div {
                        class: "form-field",
                        label { "Email" }
                        input {
                            r#type: "email",
                            value: "{email}",
                            readonly: true,
                        }
                    }

                    div {
                        class: "form-row",
                        div {
                            class: "form-field",
                            label { "First name" }
                            input {
                                r#type: "text",
                                value: first_name(),
                                oninput: move |evt: FormEvent| first_name.set(evt.value()),
                            }
                        }
                        div {
                            class: "form-field",
                            label { "Last name" }
                            input {
                                r#type: "text",
                                value: last_name(),
                                oninput: move |evt: FormEvent| last_name.set(evt.value()),
                            }
                        }
                    }

                    div {
                        class: "form-field",
                        label { "Phone" }
                        input {
                            r#type: "tel",
                            value: phone(),
                            oninput: move |evt: FormEvent| phone.set(evt.value()),
                        }
                    }

                    div {
                        class: "form-field",
                        label { "Profile image (data URL)" }
                        input {
                            r#type: "text",
                            placeholder: "data:image/png;base64,...",
                            value: profile_image(),
                            oninput: move |evt: FormEvent| profile_image.set(evt.value()),
                        }
                    }

                    button {
                        class: "btn-primary",
                        r#type: "submit",
                        disabled: saving(),
                        if saving() { "Saving..." } else { "Save Changes" }
                    }
                }

                div {
                    class: "danger-zone",
                    h2 { "Danger Zone" }
                    p { "Deleting your account removes every note, category and tag you own." }
                    button {
                        class: "btn-danger",
                        onclick: handle_delete,
                        "Delete Account"
                    }
                }
            }
        }
    }
}
