use dioxus::prelude::*;

use crate::activity_log::{log_activity, use_activity_log, LogLevel};
use crate::auth::use_session_controller;
use crate::Route;

/// Checks done before the registration request is sent.
fn check_registration(email: &str, password: &str, confirm: &str) -> Result<(), &'static str> {
    if !email.contains('@') {
        return Err("Please enter a valid email");
    }
    if password.is_empty() {
        return Err("Password is required");
    }
    if password != confirm {
        return Err("Passwords do not match");
    }
    Ok(())
}

#[component]
pub fn Register() -> Element {
    let controller = use_session_controller();
    let nav = use_navigator();
    let mut log = use_activity_log();

    let mut email = use_signal(String::new);
    let mut password = use_signal(String::new);
    let mut confirm = use_signal(String::new);
    let mut error = use_signal(|| None::<String>);
    let mut submitting = use_signal(|| false);

    let handle_submit = move |evt: FormEvent| {
        evt.prevent_default();
        if let Err(message) = check_registration(email().trim(), &password(), &confirm()) {
            error.set(Some(message.to_string()));
            return;
        }
        spawn(async move {
            error.set(None);
            submitting.set(true);
            match controller.register(email().trim().to_string(), password()).await {
                Ok(session) => {
                    log_activity(
                        &mut log,
                        LogLevel::Success,
                        &format!("Registered {}", session.email()),
                    );
                    nav.replace(Route::landing(session.role()));
                }
                Err(message) => {
                    tracing::warn!("Registration failed: {}", message);
                    error.set(Some(message));
                }
            }
            submitting.set(false);
        });
    };

    rsx! {
        section {
            class: "auth-card",
            h1 { "Create an account" }
            if let Some(message) = error() {
                div { class: "error-message", "{message}" }
            }
            form {
                class: "auth-form",
                onsubmit: handle_submit,
                label { r#for: "register-email", "Email" }
                input {
                    id: "register-email",
                    r#type: "email",
                    value: email(),
                    oninput: move |evt: FormEvent| email.set(evt.value()),
                }
                label { r#for: "register-password", "Password" }
                input {
                    id: "register-password",
                    r#type: "password",
                    autocomplete: "new-password",
                    value: password(),
                    oninput: move |evt: FormEvent| password.set(evt.value()),
                }
                label { r#for: "register-confirm", "Confirm password" }
                input {
                    id: "register-confirm",
                    r#type: "password",
                    autocomplete: "new-password",
                    value: confirm(),
                    oninput: move |evt: FormEvent| confirm.set(evt.value()),
                }
                button {
                    r#type: "submit",
                    class: "btn-primary",
                    disabled: submitting(),
                    "Register"
                }
            }
            p {
                class: "auth-switch",
                "Already registered? "
                Link { to: Route::Login {}, "Sign in" }
            }
        }
    }
}
