//! # HTTP client
//!
//! [`ApiClient`] is a thin pass-through over `reqwest`. It owns three things:
//!
//! - the REST base URL,
//! - a shared access-token slot, attached as `Authorization: Bearer <token>`
//!   to every request while it is set,
//! - uniform logging and status mapping for every response.
//!
//! Clones share the token slot, so the session store can install or clear the
//! token once and every view's clone picks it up on its next request.

use std::sync::{Arc, PoisonError, RwLock};

use reqwest::{Method, RequestBuilder};
use serde::de::DeserializeOwned;
use serde::Serialize;
use store::ClientConfig;

use crate::error::ApiError;

/// Client for the Decision Analyzer REST API.
#[derive(Clone, Debug)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    token: Arc<RwLock<Option<String>>>,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            http: reqwest::Client::new(),
            base_url,
            token: Arc::new(RwLock::new(None)),
        }
    }

    pub fn from_config(config: &ClientConfig) -> Self {
        Self::new(config.api.base_url.clone())
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Install or clear the bearer token used by this client and all its clones.
    pub fn set_access_token(&self, token: Option<String>) {
        let token = token.filter(|t| !t.is_empty());
        *self.token.write().unwrap_or_else(PoisonError::into_inner) = token;
    }

    pub fn access_token(&self) -> Option<String> {
        self.token
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn has_access_token(&self) -> bool {
        self.token
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .is_some()
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let builder = self.http.request(method, self.url(path));
        match self.access_token() {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    /// Send a request and return the raw body of a success response.
    async fn dispatch(&self, method: Method, path: &str, builder: RequestBuilder) -> Result<String, ApiError> {
        tracing::debug!(%method, path, "request");
        let response = builder.send().await.map_err(|e| {
            tracing::error!(%method, path, "request failed: {}", e);
            ApiError::from(e)
        })?;

        let status = response.status();
        let body = response.text().await?;
        tracing::debug!(%method, path, status = status.as_u16(), "response");

        if status.is_success() {
            Ok(body)
        } else {
            let err = ApiError::from_status(status.as_u16(), &body);
            tracing::warn!(%method, path, status = status.as_u16(), "{}", err);
            Err(err)
        }
    }

    fn decode<T: DeserializeOwned>(path: &str, body: &str) -> Result<T, ApiError> {
        serde_json::from_str(body).map_err(|e| {
            tracing::error!(path, "failed to decode response: {}", e);
            ApiError::Decode(e.to_string())
        })
    }

    pub(crate) async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let builder = self.request(Method::GET, path);
        let body = self.dispatch(Method::GET, path, builder).await?;
        Self::decode(path, &body)
    }

    pub(crate) async fn send_json<B, T>(&self, method: Method, path: &str, payload: &B) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let builder = self.request(method.clone(), path).json(payload);
        let body = self.dispatch(method, path, builder).await?;
        Self::decode(path, &body)
    }

    /// Send a bodiless request whose response body is ignored.
    pub(crate) async fn send_empty(&self, method: Method, path: &str) -> Result<(), ApiError> {
        let builder = self.request(method.clone(), path);
        self.dispatch(method, path, builder).await.map(drop)
    }
}
