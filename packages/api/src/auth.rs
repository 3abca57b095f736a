//! `/auth/*` endpoints.
//!
//! [`AuthApi`] is the seam between the session store and the network. The
//! production implementation is [`ApiClient`]; tests substitute a scripted fake.

use std::future::Future;

use reqwest::Method;
use serde_json::json;

use crate::client::ApiClient;
use crate::error::ApiError;
use crate::models::{AuthTokens, Credentials, RefreshedTokens, UserProfile};

/// Authentication calls the session store depends on.
pub trait AuthApi {
    fn login(&self, email: &str, password: &str) -> impl Future<Output = Result<AuthTokens, ApiError>>;
    fn register(&self, email: &str, password: &str) -> impl Future<Output = Result<AuthTokens, ApiError>>;
    fn refresh(&self, refresh_token: &str) -> impl Future<Output = Result<RefreshedTokens, ApiError>>;
    fn me(&self) -> impl Future<Output = Result<UserProfile, ApiError>>;
    fn logout(&self) -> impl Future<Output = Result<(), ApiError>>;

    /// Install or clear the bearer token sent with subsequent calls.
    fn set_access_token(&self, token: Option<String>);
}

impl AuthApi for ApiClient {
    async fn login(&self, email: &str, password: &str) -> Result<AuthTokens, ApiError> {
        self.send_json(Method::POST, "/auth/login", &Credentials { email, password })
            .await
    }

    async fn register(&self, email: &str, password: &str) -> Result<AuthTokens, ApiError> {
        self.send_json(Method::POST, "/auth/register", &Credentials { email, password })
            .await
    }

    async fn refresh(&self, refresh_token: &str) -> Result<RefreshedTokens, ApiError> {
        self.send_json(
            Method::POST,
            "/auth/refresh",
            &json!({ "refresh_token": refresh_token }),
        )
        .await
    }

    async fn me(&self) -> Result<UserProfile, ApiError> {
        self.get_json("/auth/me").await
    }

    async fn logout(&self) -> Result<(), ApiError> {
        self.send_empty(Method::POST, "/auth/logout").await
    }

    fn set_access_token(&self, token: Option<String>) {
        ApiClient::set_access_token(self, token);
    }
}
