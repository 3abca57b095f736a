use dioxus::prelude::*;

use crate::activity_log::{log_activity, use_activity_log, LogLevel};
use crate::auth::{use_session, use_session_controller};
use crate::routes::Redirect;
use crate::Route;

#[component]
pub fn Login() -> Element {
    rsx! {
        LoginForm { heading: "Sign in", admin: false }
    }
}

/// Entry point the gate sends admins to. Same endpoint; the server decides
/// the role and the landing route follows it.
#[component]
pub fn LoginAdmin() -> Element {
    rsx! {
        LoginForm { heading: "Admin sign in", admin: true }
    }
}

#[component]
fn LoginForm(heading: String, admin: bool) -> Element {
    let controller = use_session_controller();
    let state = use_session();
    let nav = use_navigator();
    let mut log = use_activity_log();

    let mut email = use_signal(String::new);
    let mut password = use_signal(String::new);
    let mut error = use_signal(|| None::<String>);
    let mut submitting = use_signal(|| false);

    // Already signed in: go straight to the landing page.
    if !state.loading && !submitting() {
        if let Some(route) = Route::landing_for(state.session.as_ref()) {
            return rsx! {
                Redirect { to: route }
            };
        }
    }

    let handle_submit = move |evt: FormEvent| {
        evt.prevent_default();
        spawn(async move {
            error.set(None);
            submitting.set(true);
            match controller.login(email(), password()).await {
                Ok(session) => {
                    log_activity(
                        &mut log,
                        LogLevel::Success,
                        &format!("Signed in as {}", session.email()),
                    );
                    if admin && !session.role().can(api::Capability::ViewAdminDashboard) {
                        log_activity(
                            &mut log,
                            LogLevel::Warning,
                            "Account has no admin access",
                        );
                    }
                    nav.replace(Route::landing(session.role()));
                }
                Err(message) => {
                    tracing::warn!("Sign in failed: {}", message);
                    password.set(String::new());
                    error.set(Some(message));
                }
            }
            submitting.set(false);
        });
    };

    rsx! {
        section {
            class: "auth-card",
            h1 { "{heading}" }
            if let Some(message) = error() {
                div { class: "error-message", "{message}" }
            }
            form {
                class: "auth-form",
                onsubmit: handle_submit,
                label { r#for: "login-email", "Email" }
                input {
                    id: "login-email",
                    r#type: "email",
                    autocomplete: "username",
                    value: email(),
                    oninput: move |evt: FormEvent| email.set(evt.value()),
                }
                label { r#for: "login-password", "Password" }
                input {
                    id: "login-password",
                    r#type: "password",
                    autocomplete: "current-password",
                    value: password(),
                    oninput: move |evt: FormEvent| password.set(evt.value()),
                }
                button {
                    r#type: "submit",
                    class: "btn-primary",
                    disabled: submitting(),
                    if submitting() { "Signing in..." } else { "Sign in" }
                }
            }
            if !admin {
                p {
                    class: "auth-switch",
                    "No account yet? "
                    Link { to: Route::Register {}, "Register" }
                }
            }
        }
    }
}
