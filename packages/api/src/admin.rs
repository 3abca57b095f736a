//! `/admin/*` endpoints. The server rejects these for non-admin tokens.

use reqwest::Method;

use crate::client::ApiClient;
use crate::error::ApiError;
use crate::models::{AdminUser, DashboardStats, Role, RoleUpdate};

impl ApiClient {
    pub async fn list_users(&self) -> Result<Vec<AdminUser>, ApiError> {
        self.get_json("/admin/users").await
    }

    /// Provider accounts, ordered by id.
    pub async fn list_providers(&self) -> Result<Vec<AdminUser>, ApiError> {
        self.list_users().await.map(AdminUser::providers)
    }

    /// Request a role change. The server decides which transitions are allowed.
    pub async fn set_user_role(&self, id: &str, role: Role) -> Result<AdminUser, ApiError> {
        self.send_json(
            Method::PATCH,
            &format!("/admin/users/{id}/role"),
            &RoleUpdate { role },
        )
        .await
    }

    pub async fn delete_user(&self, id: &str) -> Result<(), ApiError> {
        self.send_empty(Method::DELETE, &format!("/admin/users/{id}"))
            .await
    }

    pub async fn dashboard_stats(&self) -> Result<DashboardStats, ApiError> {
        self.get_json("/admin/dashboard").await
    }
}
