//! Wire types exchanged with the REST API.

mod decision;
mod option;
mod user;

pub use decision::{Decision, DecisionPatch, NewDecision};
pub use option::{DecisionOption, NewOption, OptionPatch, Rating};
pub use user::{
    AdminUser, AuthTokens, Credentials, DashboardStats, RefreshedTokens, Role, RoleUpdate,
    UserProfile,
};
