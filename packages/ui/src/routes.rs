//! Application routes and the gate in front of the protected ones.
//!
//! Each protected route declares a [`RouteAccess`]; [`RouteGate`] evaluates
//! it against the current session on every navigation.

use api::access::{Capability, GuardOutcome, RouteAccess};
use api::{Role, Session};
use dioxus::prelude::*;

use crate::activity_log_panel::{ActivityLogPanel, ActivityLogToggle};
use crate::auth::use_session;
use crate::navbar::Navbar;
use crate::views::{
    AdminDashboard, Dashboard, Home, Login, LoginAdmin, NotFound, ProvidersTable, Register,
    UsersTable,
};

#[derive(Debug, Clone, Routable, PartialEq)]
#[rustfmt::skip]
pub enum Route {
    #[layout(AppShell)]
        #[route("/")]
        Home {},
        #[route("/login")]
        Login {},
        #[route("/login-admin")]
        LoginAdmin {},
        #[route("/register")]
        Register {},
        #[layout(RouteGate)]
            #[route("/dashboard")]
            Dashboard {},
            #[route("/admin")]
            AdminDashboard {},
            #[route("/admin/users")]
            UsersTable {},
            #[route("/admin/providers")]
            ProvidersTable {},
        #[end_layout]
        #[route("/:..segments")]
        NotFound { segments: Vec<String> },
}

impl Route {
    pub fn access(&self) -> RouteAccess {
        match self {
            Route::Dashboard {} => RouteAccess::Authenticated,
            Route::AdminDashboard {} => RouteAccess::Requires(Capability::ViewAdminDashboard),
            Route::UsersTable {} => RouteAccess::Requires(Capability::ManageUsers),
            Route::ProvidersTable {} => RouteAccess::Requires(Capability::ManageProviders),
            Route::Home {}
            | Route::Login {}
            | Route::LoginAdmin {}
            | Route::Register {}
            | Route::NotFound { .. } => RouteAccess::Public,
        }
    }

    /// Where a freshly signed-in user lands.
    pub fn landing(role: Role) -> Route {
        if role.can(Capability::ViewAdminDashboard) {
            Route::AdminDashboard {}
        } else {
            Route::Dashboard {}
        }
    }

    /// Landing route for an existing session, if any.
    pub fn landing_for(session: Option<&Session>) -> Option<Route> {
        session.map(|s| Route::landing(s.role()))
    }
}

#[component]
fn AppShell() -> Element {
    rsx! {
        Navbar {}
        main {
            class: "page",
            Outlet::<Route> {}
        }
        ActivityLogToggle {}
        ActivityLogPanel {}
    }
}

/// Replaces the current history entry with `to` once mounted.
#[component]
pub(crate) fn Redirect(to: Route) -> Element {
    let nav = use_navigator();
    use_effect(move || {
        nav.replace(to.clone());
    });
    rsx! {}
}

/// Layout wrapping every protected route.
#[component]
fn RouteGate() -> Element {
    let state = use_session();
    let route = use_route::<Route>();

    if state.loading {
        return rsx! {
            p { class: "loading", "Restoring session..." }
        };
    }

    match route.access().check(state.session.as_ref()) {
        GuardOutcome::Render => rsx! {
            Outlet::<Route> {}
        },
        GuardOutcome::Redirect(path) => {
            tracing::debug!("Route {} not allowed, redirecting to {}", route, path);
            match path.parse::<Route>() {
                Ok(target) => rsx! {
                    Redirect { key: "{path}", to: target }
                },
                Err(e) => {
                    tracing::error!("Redirect target {} is not a route: {}", path, e);
                    rsx! {}
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use api::access::{menu_for, ADMIN_LOGIN_PATH, HOME_PATH, LOGIN_PATH, MENU};

    #[test]
    fn test_menu_paths_are_routes_with_same_access() {
        for entry in MENU {
            let route: Route = entry.path.parse().unwrap();
            assert_eq!(route.access(), entry.access, "{}", entry.path);
        }
    }

    #[test]
    fn test_redirect_targets_are_routes() {
        assert_eq!(HOME_PATH.parse::<Route>().unwrap(), Route::Home {});
        assert_eq!(LOGIN_PATH.parse::<Route>().unwrap(), Route::Login {});
        assert_eq!(ADMIN_LOGIN_PATH.parse::<Route>().unwrap(), Route::LoginAdmin {});
    }

    #[test]
    fn test_customer_redirected_home_from_admin_routes() {
        let session =
            Session::new("u1".into(), "a@b.com".into(), Role::Customer, "t".into(), None).unwrap();
        for route in [
            Route::AdminDashboard {},
            Route::UsersTable {},
            Route::ProvidersTable {},
        ] {
            assert_eq!(
                route.access().check(Some(&session)),
                GuardOutcome::Redirect(HOME_PATH)
            );
        }
        assert_eq!(
            Route::Dashboard {}.access().check(Some(&session)),
            GuardOutcome::Render
        );
    }

    #[test]
    fn test_landing_route_is_reachable() {
        for role in Role::ALL {
            let session = Session::new("u".into(), "e".into(), role, "t".into(), None).unwrap();
            let landing = Route::landing(role);
            assert_eq!(landing.access().check(Some(&session)), GuardOutcome::Render);
            let path = landing.to_string();
            assert!(menu_for(Some(role)).iter().any(|e| e.path == path));
        }
    }

    #[test]
    fn test_signed_out_dashboard_redirects_to_user_login() {
        let target = match (Route::Dashboard {}).access().check(None) {
            GuardOutcome::Redirect(path) => path.parse::<Route>().unwrap(),
            GuardOutcome::Render => panic!("dashboard rendered without a session"),
        };
        assert_eq!(target, Route::Login {});

        for route in [
            Route::AdminDashboard {},
            Route::UsersTable {},
            Route::ProvidersTable {},
        ] {
            assert_eq!(
                route.access().check(None),
                GuardOutcome::Redirect(ADMIN_LOGIN_PATH)
            );
        }
    }

    #[test]
    fn test_unknown_path_is_not_found() {
        let route: Route = "/no/such/page".parse().unwrap();
        assert!(matches!(route, Route::NotFound { .. }));
        assert_eq!(route.access(), RouteAccess::Public);
    }
}
