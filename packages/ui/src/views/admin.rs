//! Admin console: dashboard stats, the users table and the providers list.

use api::{AdminUser, ApiError, DashboardStats, Role};
use dioxus::prelude::*;

use crate::activity_log::{log_activity, report_error, use_activity_log, ActivityLog, LogLevel};
use crate::auth::{use_api, use_session, ApiHandle};
use crate::Route;

#[component]
pub fn AdminDashboard() -> Element {
    let api = use_api();
    let mut log = use_activity_log();
    let mut stats = use_signal(|| None::<Result<DashboardStats, String>>);

    let _loader = use_resource(move || async move {
        let result = api
            .client()
            .dashboard_stats()
            .await
            .map_err(|e| report_error(&mut log, &e, "Failed to load dashboard"));
        stats.set(Some(result));
    });

    rsx! {
        section {
            class: "admin-dashboard",
            h1 { "Admin dashboard" }
            match stats() {
                None => rsx! { p { class: "loading", "Loading statistics..." } },
                Some(Err(message)) => rsx! { div { class: "error-message", "{message}" } },
                Some(Ok(stats)) => rsx! {
                    div {
                        class: "stats-grid",
                        StatCard { label: "Users", value: stats.total_users }
                        StatCard { label: "Admins", value: stats.total_admins }
                        StatCard { label: "Decisions", value: stats.total_decisions }
                        StatCard { label: "Options", value: stats.total_options }
                    }
                },
            }
            nav {
                class: "admin-links",
                Link { to: Route::UsersTable {}, "Manage users" }
                Link { to: Route::ProvidersTable {}, "Providers" }
            }
        }
    }
}

#[component]
fn StatCard(label: String, value: u64) -> Element {
    rsx! {
        div {
            class: "stat-card",
            span { class: "stat-value", "{value}" }
            span { class: "stat-label", "{label}" }
        }
    }
}

#[derive(Clone, Copy, PartialEq)]
struct UsersCtx {
    api: ApiHandle,
    users: Signal<Vec<AdminUser>>,
    error: Signal<Option<String>>,
    log: Signal<ActivityLog>,
}

impl UsersCtx {
    fn fail(mut self, err: &ApiError, fallback: &str) {
        let message = report_error(&mut self.log, err, fallback);
        self.error.set(Some(message));
    }

    async fn reload(mut self) {
        match self.api.client().list_users().await {
            Ok(users) => self.users.set(users),
            Err(e) => self.fail(&e, "Failed to load users"),
        }
    }

    async fn set_role(mut self, id: String, role: Role) {
        match self.api.client().set_user_role(&id, role).await {
            Ok(updated) => {
                self.error.set(None);
                log_activity(
                    &mut self.log,
                    LogLevel::Success,
                    &format!("{} is now {}", updated.email, updated.role),
                );
                self.reload().await;
            }
            Err(e) => self.fail(&e, "Failed to update role"),
        }
    }

    async fn delete(mut self, user: AdminUser) {
        match self.api.client().delete_user(&user.id).await {
            Ok(()) => {
                self.error.set(None);
                log_activity(
                    &mut self.log,
                    LogLevel::Success,
                    &format!("Deleted {}", user.email),
                );
                self.reload().await;
            }
            Err(e) => self.fail(&e, "Failed to delete user"),
        }
    }
}

#[component]
pub fn UsersTable() -> Element {
    let state = use_session();
    let ctx = UsersCtx {
        api: use_api(),
        users: use_signal(Vec::new),
        error: use_signal(|| None),
        log: use_activity_log(),
    };
    let mut loading = use_signal(|| true);

    let _loader = use_resource(move || async move {
        ctx.reload().await;
        loading.set(false);
    });

    let current_user = state.session.as_ref().map(|s| s.user_id().to_string());

    rsx! {
        section {
            class: "admin-users",
            h1 { "Users" }
            if let Some(message) = (ctx.error)() {
                div { class: "error-message", "{message}" }
            }
            if loading() {
                p { class: "loading", "Loading users..." }
            } else {
                table {
                    class: "data-table",
                    thead {
                        tr {
                            th { "Email" }
                            th { "Role" }
                            th { "Created" }
                            th { "Actions" }
                        }
                    }
                    tbody {
                        for user in (ctx.users)() {
                            UserRow {
                                key: "{user.id}",
                                ctx: ctx,
                                current_user: current_user.clone(),
                                user: user,
                            }
                        }
                    }
                }
            }
        }
    }
}

#[component]
fn UserRow(ctx: UsersCtx, current_user: Option<String>, user: AdminUser) -> Element {
    let mut confirming = use_signal(|| false);
    let is_self = current_user.as_deref() == Some(user.id.as_str());
    let toggle = user.role.toggled_admin();
    let toggle_label = match toggle {
        Some(role) => format!("Make {role}"),
        None => format!("{} role is fixed", user.role),
    };
    let created = user.created_at.clone().unwrap_or_else(|| "-".to_string());

    let toggled_id = user.id.clone();
    let deleted = user.clone();

    rsx! {
        tr {
            td { "{user.email}" }
            td { span { class: "role-badge role-{user.role}", "{user.role}" } }
            td { "{created}" }
            td {
                class: "table-actions",
                button {
                    class: "btn-secondary",
                    disabled: is_self || toggle.is_none(),
                    onclick: move |_| {
                        if let Some(role) = toggle {
                            spawn(ctx.set_role(toggled_id.clone(), role));
                        }
                    },
                    "{toggle_label}"
                }
                button {
                    class: "btn-delete",
                    disabled: is_self,
                    onclick: move |_| {
                        if !confirming() {
                            confirming.set(true);
                            return;
                        }
                        confirming.set(false);
                        spawn(ctx.delete(deleted.clone()));
                    },
                    if confirming() { "Really delete?" } else { "Delete" }
                }
            }
        }
    }
}

#[component]
pub fn ProvidersTable() -> Element {
    let api = use_api();
    let mut log = use_activity_log();
    let mut providers = use_signal(|| None::<Result<Vec<AdminUser>, String>>);

    let _loader = use_resource(move || async move {
        let result = api
            .client()
            .list_providers()
            .await
            .map_err(|e| report_error(&mut log, &e, "Failed to load providers"));
        providers.set(Some(result));
    });

    rsx! {
        section {
            class: "admin-providers",
            h1 { "Providers" }
            match providers() {
                None => rsx! { p { class: "loading", "Loading providers..." } },
                Some(Err(message)) => rsx! { div { class: "error-message", "{message}" } },
                Some(Ok(list)) if list.is_empty() => rsx! {
                    p { class: "empty-state", "No providers registered." }
                },
                Some(Ok(list)) => rsx! {
                    table {
                        class: "data-table",
                        thead {
                            tr {
                                th { "ID" }
                                th { "Email" }
                                th { "Joined" }
                            }
                        }
                        tbody {
                            for provider in list {
                                tr {
                                    key: "{provider.id}",
                                    td { "{provider.id}" }
                                    td { "{provider.email}" }
                                    td { {provider.created_at.clone().unwrap_or_else(|| "-".to_string())} }
                                }
                            }
                        }
                    }
                },
            }
        }
    }
}
