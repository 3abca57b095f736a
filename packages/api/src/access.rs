//! # Role-based access
//!
//! One table, [`CAPABILITIES`], says what every [`Role`] may do. Everything
//! else is derived from it:
//!
//! - a route declares a [`RouteAccess`]; its allowed-role set is the set of
//!   roles holding the required [`Capability`],
//! - [`guard`] turns (session, allowed roles) into a [`GuardOutcome`],
//! - [`menu_for`] lists the navigation entries a role can reach.
//!
//! The guard is a pure function with no state of its own.

use crate::models::Role;
use crate::session::Session;

pub const HOME_PATH: &str = "/";
pub const LOGIN_PATH: &str = "/login";
pub const ADMIN_LOGIN_PATH: &str = "/login-admin";

/// Something a role may be allowed to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Capability {
    ManageDecisions,
    ViewAdminDashboard,
    ManageUsers,
    ManageProviders,
}

impl Capability {
    pub const ALL: [Capability; 4] = [
        Capability::ManageDecisions,
        Capability::ViewAdminDashboard,
        Capability::ManageUsers,
        Capability::ManageProviders,
    ];
}

/// Role → capabilities.
pub const CAPABILITIES: &[(Role, &[Capability])] = &[
    (Role::User, &[Capability::ManageDecisions]),
    (Role::Customer, &[Capability::ManageDecisions]),
    (Role::Provider, &[Capability::ManageDecisions]),
    (Role::Admin, &Capability::ALL),
];

impl Role {
    pub fn capabilities(self) -> &'static [Capability] {
        CAPABILITIES
            .iter()
            .find(|(role, _)| *role == self)
            .map(|(_, caps)| *caps)
            .unwrap_or_default()
    }

    pub fn can(self, capability: Capability) -> bool {
        self.capabilities().contains(&capability)
    }
}

/// A set of roles, as declared by a protected route.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RoleSet(u8);

impl RoleSet {
    fn bit(role: Role) -> u8 {
        match role {
            Role::User => 1,
            Role::Customer => 1 << 1,
            Role::Provider => 1 << 2,
            Role::Admin => 1 << 3,
        }
    }

    pub fn of(roles: &[Role]) -> Self {
        Self(roles.iter().fold(0, |bits, role| bits | Self::bit(*role)))
    }

    /// Every role holding `capability`.
    pub fn with_capability(capability: Capability) -> Self {
        let roles: Vec<Role> = Role::ALL
            .into_iter()
            .filter(|role| role.can(capability))
            .collect();
        Self::of(&roles)
    }

    pub fn contains(self, role: Role) -> bool {
        self.0 & Self::bit(role) != 0
    }
}

/// Result of evaluating a navigation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardOutcome {
    Render,
    Redirect(&'static str),
}

/// Decide whether a protected route may render.
///
/// - no session (or no token): redirect to the admin login when admins are
///   among the allowed roles, else to the general login,
/// - role outside a declared allowed set: redirect home,
/// - otherwise render.
pub fn guard(session: Option<&Session>, allowed: Option<RoleSet>) -> GuardOutcome {
    let Some(session) = session.filter(|s| !s.access_token().is_empty()) else {
        let admin_route = allowed.is_some_and(|set| set.contains(Role::Admin));
        return GuardOutcome::Redirect(if admin_route { ADMIN_LOGIN_PATH } else { LOGIN_PATH });
    };

    match allowed {
        Some(set) if !set.contains(session.role()) => GuardOutcome::Redirect(HOME_PATH),
        _ => GuardOutcome::Render,
    }
}

/// What a route requires before it renders.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteAccess {
    /// Anyone, signed in or not.
    Public,
    /// Any signed-in user.
    Authenticated,
    /// Signed-in users whose role holds the capability.
    Requires(Capability),
}

impl RouteAccess {
    pub fn allowed_roles(self) -> Option<RoleSet> {
        match self {
            RouteAccess::Public | RouteAccess::Authenticated => None,
            RouteAccess::Requires(capability) => Some(RoleSet::with_capability(capability)),
        }
    }

    pub fn check(self, session: Option<&Session>) -> GuardOutcome {
        match self {
            RouteAccess::Public => GuardOutcome::Render,
            _ => guard(session, self.allowed_roles()),
        }
    }
}

/// A navigation menu entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MenuEntry {
    pub label: &'static str,
    pub path: &'static str,
    pub access: RouteAccess,
}

pub const MENU: &[MenuEntry] = &[
    MenuEntry {
        label: "Home",
        path: HOME_PATH,
        access: RouteAccess::Public,
    },
    MenuEntry {
        label: "Dashboard",
        path: "/dashboard",
        access: RouteAccess::Authenticated,
    },
    MenuEntry {
        label: "Admin",
        path: "/admin",
        access: RouteAccess::Requires(Capability::ViewAdminDashboard),
    },
    MenuEntry {
        label: "Users",
        path: "/admin/users",
        access: RouteAccess::Requires(Capability::ManageUsers),
    },
    MenuEntry {
        label: "Providers",
        path: "/admin/providers",
        access: RouteAccess::Requires(Capability::ManageProviders),
    },
];

/// Menu entries that would render for `role` (`None` = signed out).
pub fn menu_for(role: Option<Role>) -> Vec<MenuEntry> {
    MENU.iter()
        .filter(|entry| match (entry.access, role) {
            (RouteAccess::Public, _) => true,
            (_, None) => false,
            (RouteAccess::Authenticated, Some(_)) => true,
            (RouteAccess::Requires(capability), Some(role)) => role.can(capability),
        })
        .copied()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session(role: Role) -> Session {
        Session::new("u1".into(), "a@b.com".into(), role, "token".into(), None).unwrap()
    }

    #[test]
    fn test_every_role_in_table() {
        for role in Role::ALL {
            assert!(!role.capabilities().is_empty(), "{role} has no capabilities");
        }
        assert!(Role::Admin.can(Capability::ManageUsers));
        assert!(!Role::Customer.can(Capability::ManageUsers));
    }

    #[test]
    fn test_guard_matches_table_for_all_combinations() {
        for role in Role::ALL {
            for capability in Capability::ALL {
                let access = RouteAccess::Requires(capability);
                let outcome = access.check(Some(&session(role)));
                if role.can(capability) {
                    assert_eq!(outcome, GuardOutcome::Render, "{role} / {capability:?}");
                } else {
                    assert_eq!(outcome, GuardOutcome::Redirect(HOME_PATH), "{role} / {capability:?}");
                }
            }
        }
    }

    #[test]
    fn test_guard_with_explicit_role_sets() {
        let only_providers = RoleSet::of(&[Role::Provider]);
        for role in Role::ALL {
            let expected = if role == Role::Provider {
                GuardOutcome::Render
            } else {
                GuardOutcome::Redirect(HOME_PATH)
            };
            assert_eq!(guard(Some(&session(role)), Some(only_providers)), expected);
        }
        assert_eq!(guard(Some(&session(Role::User)), None), GuardOutcome::Render);
    }

    #[test]
    fn test_signed_out_redirects_to_matching_login() {
        assert_eq!(
            RouteAccess::Requires(Capability::ViewAdminDashboard).check(None),
            GuardOutcome::Redirect(ADMIN_LOGIN_PATH)
        );
        assert_eq!(
            guard(None, Some(RoleSet::of(&[Role::User, Role::Customer]))),
            GuardOutcome::Redirect(LOGIN_PATH)
        );
        assert_eq!(
            RouteAccess::Authenticated.check(None),
            GuardOutcome::Redirect(LOGIN_PATH)
        );
        assert_eq!(RouteAccess::Public.check(None), GuardOutcome::Render);
    }

    #[test]
    fn test_signed_out_dashboard_goes_to_user_login() {
        let dashboard = MENU
            .iter()
            .find(|entry| entry.path == "/dashboard")
            .unwrap();
        assert_eq!(dashboard.access, RouteAccess::Authenticated);
        assert_eq!(dashboard.access.check(None), GuardOutcome::Redirect(LOGIN_PATH));
        for role in Role::ALL {
            assert!(role.can(Capability::ManageDecisions));
            assert_eq!(dashboard.access.check(Some(&session(role))), GuardOutcome::Render);
        }
    }

    #[test]
    fn test_customer_sent_home_from_admin_route() {
        let outcome = RouteAccess::Requires(Capability::ViewAdminDashboard)
            .check(Some(&session(Role::Customer)));
        assert_eq!(outcome, GuardOutcome::Redirect("/"));
    }

    #[test]
    fn test_menu_follows_table() {
        let labels = |role| {
            menu_for(role)
                .into_iter()
                .map(|entry| entry.label)
                .collect::<Vec<_>>()
        };
        assert_eq!(labels(None), ["Home"]);
        assert_eq!(labels(Some(Role::Customer)), ["Home", "Dashboard"]);
        assert_eq!(
            labels(Some(Role::Admin)),
            ["Home", "Dashboard", "Admin", "Users", "Providers"]
        );
    }

    #[test]
    fn test_menu_entries_agree_with_guard() {
        for role in Role::ALL {
            let visible = menu_for(Some(role));
            for entry in MENU {
                let renders = entry.access.check(Some(&session(role))) == GuardOutcome::Render;
                assert_eq!(visible.contains(entry), renders, "{role} / {}", entry.label);
            }
        }
    }
}
