use api::access::menu_for;
use api::Session;
use dioxus::prelude::*;

use crate::auth::{use_session, LogoutButton};
use crate::Route;

/// Top navigation. Entries come from the role → capability table, so the
/// menu never offers a route the gate would refuse.
#[component]
pub fn Navbar() -> Element {
    let state = use_session();
    let mut menu_open = use_signal(|| false);

    let role = state.session.as_ref().map(Session::role);
    let links: Vec<(Route, &'static str)> = menu_for(role)
        .into_iter()
        .filter_map(|entry| Some((entry.path.parse::<Route>().ok()?, entry.label)))
        .collect();

    rsx! {
        nav {
            class: if menu_open() { "navbar menu-open" } else { "navbar" },
            Link {
                class: "nav-logo-link",
                to: Route::Home {},
                h1 { "Decision Analyzer" }
            }
            button {
                class: "hamburger",
                aria_label: "Toggle menu",
                onclick: move |_| menu_open.set(!menu_open()),
                "☰"
            }
            section {
                class: "nav-menu",
                for (route, label) in links {
                    Link {
                        key: "{label}",
                        class: "nav-link",
                        to: route,
                        onclick: move |_| menu_open.set(false),
                        "{label}"
                    }
                }
            }
            div {
                class: "nav-account",
                if let Some(session) = state.session {
                    span { class: "nav-email", "{session.email()}" }
                    LogoutButton { class: "btn-logout" }
                } else if !state.loading {
                    Link { class: "nav-link", to: Route::Login {}, "Sign in" }
                    Link { class: "nav-link", to: Route::Register {}, "Register" }
                }
            }
        }
    }
}
