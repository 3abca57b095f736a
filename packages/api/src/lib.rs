//! # API crate — typed client for the Decision Analyzer REST API
//!
//! Everything the front-ends need to talk to the backend and to decide who may
//! see what. Nothing here depends on the UI framework, so the whole crate is
//! exercised by native tests.
//!
//! ## Modules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`client`] | [`ApiClient`]: base URL, shared bearer-token slot, request/response logging, status → [`ApiError`] mapping |
//! | [`auth`] | `/auth/*` endpoints and the [`AuthApi`] seam used by the session store |
//! | [`decisions`] | `/decisions` and `/options` endpoints |
//! | [`admin`] | `/admin/*` endpoints |
//! | [`models`] | Wire types: users, roles, decisions, options, ratings |
//! | [`session`] | [`SessionStore`]: restore/login/register/logout/refresh over a [`store::KeyValueStore`] |
//! | [`access`] | Role → capability table, route guard, menu entries |
//! | [`error`] | [`ApiError`] taxonomy and user-facing messages |
//!
//! The client never retries and sets no timeout of its own; every failure is
//! returned to the caller, which logs it and shows a short message.

pub mod access;
pub mod admin;
pub mod auth;
pub mod client;
pub mod decisions;
pub mod error;
pub mod models;
pub mod session;

pub use access::{guard, Capability, GuardOutcome, RouteAccess};
pub use auth::AuthApi;
pub use client::ApiClient;
pub use error::ApiError;
pub use models::{
    AdminUser, AuthTokens, DashboardStats, Decision, DecisionOption, DecisionPatch, NewDecision,
    NewOption, OptionPatch, Rating, Role, UserProfile,
};
pub use session::{Session, SessionStore};
