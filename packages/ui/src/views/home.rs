use dioxus::prelude::*;

use crate::auth::use_session;
use crate::Route;

#[component]
pub fn Home() -> Element {
    let state = use_session();

    rsx! {
        section {
            class: "home",
            h1 { "Decision Analyzer" }
            p { "Write down the decision, list the options, rate them, pick one." }
            if let Some(session) = state.session.as_ref() {
                p { "Signed in as {session.email()}." }
                Link {
                    class: "btn-primary",
                    to: Route::landing(session.role()),
                    "Open dashboard"
                }
            } else if !state.loading {
                div {
                    class: "home-actions",
                    Link { class: "btn-primary", to: Route::Login {}, "Sign in" }
                    Link { class: "btn-secondary", to: Route::Register {}, "Create an account" }
                }
            }
        }
    }
}
