//! # Users, roles and auth payloads
//!
//! ## [`Role`]
//!
//! The closed set of account roles. Serialized lowercase (`"user"`,
//! `"customer"`, `"provider"`, `"admin"`); anything else fails to parse, so a
//! tampered `userRole` in storage cannot smuggle in a new role.
//!
//! ## Auth payloads
//!
//! - [`Credentials`] — body of `POST /auth/login` and `POST /auth/register`.
//! - [`AuthTokens`] — their response: both tokens plus the identity.
//! - [`RefreshedTokens`] — response of `POST /auth/refresh`.
//! - [`UserProfile`] — response of `GET /auth/me`.
//!
//! ## Admin payloads
//!
//! [`AdminUser`] rows from `GET /admin/users`, [`RoleUpdate`] for
//! `PATCH /admin/users/{id}/role`, and [`DashboardStats`].

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Account role. Server-authoritative; the client only reads it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Customer,
    Provider,
    Admin,
}

impl Role {
    pub const ALL: [Role; 4] = [Role::User, Role::Customer, Role::Provider, Role::Admin];

    pub fn as_str(self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Customer => "customer",
            Role::Provider => "provider",
            Role::Admin => "admin",
        }
    }

    /// The role an admin toggle requests. Only user and admin swap;
    /// customers and providers keep their role.
    pub fn toggled_admin(self) -> Option<Role> {
        match self {
            Role::Admin => Some(Role::User),
            Role::User => Some(Role::Admin),
            Role::Customer | Role::Provider => None,
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Role::ALL
            .into_iter()
            .find(|role| role.as_str() == s)
            .ok_or_else(|| format!("Unknown role: {s}"))
    }
}

/// Login / registration request body.
#[derive(Debug, Clone, Serialize)]
pub struct Credentials<'a> {
    pub email: &'a str,
    pub password: &'a str,
}

/// Response of a successful login or registration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuthTokens {
    pub access_token: String,
    pub refresh_token: String,
    pub user_id: String,
    pub email: String,
    pub role: Role,
}

/// Response of a successful token refresh.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RefreshedTokens {
    pub access_token: String,
    pub refresh_token: String,
}

/// The "who am I" profile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: String,
    pub email: String,
    pub role: Role,
}

/// A user row as seen from the admin console.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdminUser {
    pub id: String,
    pub email: String,
    pub role: Role,
    #[serde(default)]
    pub created_at: Option<String>,
}

impl AdminUser {
    /// Keep only provider accounts, ordered by id. Numeric ids compare as
    /// numbers and sort before any non-numeric ones.
    pub fn providers(users: Vec<AdminUser>) -> Vec<AdminUser> {
        let mut providers: Vec<AdminUser> = users
            .into_iter()
            .filter(|u| u.role == Role::Provider)
            .collect();
        providers.sort_by(|a, b| compare_ids(&a.id, &b.id));
        providers
    }
}

fn compare_ids(a: &str, b: &str) -> Ordering {
    match (a.parse::<u64>(), b.parse::<u64>()) {
        (Ok(x), Ok(y)) => x.cmp(&y),
        (Ok(_), Err(_)) => Ordering::Less,
        (Err(_), Ok(_)) => Ordering::Greater,
        (Err(_), Err(_)) => a.cmp(b),
    }
}

/// Body of `PATCH /admin/users/{id}/role`.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct RoleUpdate {
    pub role: Role,
}

/// Totals shown on the admin dashboard.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DashboardStats {
    pub total_users: u64,
    pub total_admins: u64,
    pub total_decisions: u64,
    pub total_options: u64,
}
