//! # Session store
//!
//! [`SessionStore`] is the single owner of the current [`Session`]. It keeps
//! three things in step:
//!
//! - the session value itself,
//! - the persisted keys in a [`KeyValueStore`] (see [`store::keys`]),
//! - the bearer token installed on the [`AuthApi`] client.
//!
//! ## Operations
//!
//! | Method | On success | On failure |
//! |--------|-----------|------------|
//! | [`restore`](SessionStore::restore) | session from `/auth/me` | storage cleared, session `None` |
//! | [`login`](SessionStore::login) / [`register`](SessionStore::register) | tokens persisted, session set | user-facing message, session unchanged |
//! | [`refresh`](SessionStore::refresh) | rotated tokens persisted | user-facing message, session unchanged |
//! | [`logout`](SessionStore::logout) | always: storage cleared, session `None` | failure only logged |
//!
//! Nothing retries. Refresh is only ever called explicitly.
//!
//! Clones share the session slot. The slot's lock is never held across an
//! await, so concurrent operations interleave at network boundaries and the
//! last one to finish wins.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use store::keys::{ACCESS_TOKEN, REFRESH_TOKEN, SESSION_KEYS, USER_ID, USER_ROLE};
use store::KeyValueStore;

use crate::auth::AuthApi;
use crate::models::{AuthTokens, Role};

const LOGIN_FAILED: &str = "Login failed";
const REGISTRATION_FAILED: &str = "Registration failed";
const REFRESH_FAILED: &str = "Session refresh failed";
const NOT_SIGNED_IN: &str = "Not signed in";

/// The authenticated identity, role and tokens of the current user.
///
/// Always carries a non-empty access token; constructors refuse anything else.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    user_id: String,
    email: String,
    role: Role,
    access_token: String,
    refresh_token: Option<String>,
}

impl Session {
    pub fn new(
        user_id: String,
        email: String,
        role: Role,
        access_token: String,
        refresh_token: Option<String>,
    ) -> Option<Self> {
        if access_token.is_empty() {
            return None;
        }
        Some(Self {
            user_id,
            email,
            role,
            access_token,
            refresh_token: refresh_token.filter(|t| !t.is_empty()),
        })
    }

    pub fn from_tokens(tokens: AuthTokens) -> Option<Self> {
        Self::new(
            tokens.user_id,
            tokens.email,
            tokens.role,
            tokens.access_token,
            Some(tokens.refresh_token),
        )
    }

    pub fn user_id(&self) -> &str {
        &self.user_id
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn role(&self) -> Role {
        self.role
    }

    pub fn access_token(&self) -> &str {
        &self.access_token
    }

    pub fn refresh_token(&self) -> Option<&str> {
        self.refresh_token.as_deref()
    }

    fn with_tokens(&self, access_token: String, refresh_token: String) -> Option<Self> {
        Self::new(
            self.user_id.clone(),
            self.email.clone(),
            self.role,
            access_token,
            Some(refresh_token),
        )
    }
}

/// Owner of the current session and its persisted copy.
#[derive(Clone)]
pub struct SessionStore<S, A> {
    storage: S,
    api: A,
    current: Arc<Mutex<Option<Session>>>,
}

impl<S: KeyValueStore, A: AuthApi> SessionStore<S, A> {
    pub fn new(storage: S, api: A) -> Self {
        Self {
            storage,
            api,
            current: Arc::new(Mutex::new(None)),
        }
    }

    fn slot(&self) -> MutexGuard<'_, Option<Session>> {
        self.current.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Snapshot of the current session.
    pub fn session(&self) -> Option<Session> {
        self.slot().clone()
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    /// Rebuild the session from a persisted access token.
    ///
    /// No token → `None` without touching the network. A token the server
    /// rejects is wiped along with every other session key.
    pub async fn restore(&self) -> Option<Session> {
        let Some(token) = self.storage.get(ACCESS_TOKEN).await.filter(|t| !t.is_empty()) else {
            tracing::debug!("No persisted access token");
            return None;
        };

        self.api.set_access_token(Some(token.clone()));
        let profile = match self.api.me().await {
            Ok(profile) => profile,
            Err(e) => {
                tracing::warn!("Persisted session rejected, clearing it: {}", e);
                self.clear().await;
                return None;
            }
        };

        let refresh_token = self.storage.get(REFRESH_TOKEN).await;
        let Some(session) = Session::new(profile.id, profile.email, profile.role, token, refresh_token) else {
            self.clear().await;
            return None;
        };

        self.storage
            .set_all(&[(USER_ROLE, session.role.as_str()), (USER_ID, session.user_id())])
            .await;
        tracing::info!("Restored session for {} ({})", session.email, session.role);
        *self.slot() = Some(session.clone());
        Some(session)
    }

    pub async fn login(&self, email: &str, password: &str) -> Result<Session, String> {
        tracing::debug!("Attempting login for {}", email);
        match self.api.login(email, password).await {
            Ok(tokens) => self.establish(tokens, LOGIN_FAILED).await,
            Err(e) => {
                tracing::error!("Login failed for {}: {}", email, e);
                Err(e.user_message(LOGIN_FAILED))
            }
        }
    }

    pub async fn register(&self, email: &str, password: &str) -> Result<Session, String> {
        tracing::debug!("Attempting registration for {}", email);
        match self.api.register(email, password).await {
            Ok(tokens) => self.establish(tokens, REGISTRATION_FAILED).await,
            Err(e) => {
                tracing::error!("Registration failed for {}: {}", email, e);
                Err(e.user_message(REGISTRATION_FAILED))
            }
        }
    }

    /// Exchange the refresh token for a new token pair.
    pub async fn refresh(&self) -> Result<Session, String> {
        let Some(current) = self.session() else {
            return Err(NOT_SIGNED_IN.to_string());
        };
        let Some(refresh_token) = current.refresh_token() else {
            return Err(REFRESH_FAILED.to_string());
        };

        let tokens = match self.api.refresh(refresh_token).await {
            Ok(tokens) => tokens,
            Err(e) => {
                tracing::error!("Token refresh failed: {}", e);
                return Err(e.user_message(REFRESH_FAILED));
            }
        };
        let Some(session) = current.with_tokens(tokens.access_token, tokens.refresh_token) else {
            tracing::error!("Token refresh returned an empty access token");
            return Err(REFRESH_FAILED.to_string());
        };

        self.persist_tokens(&session, &[]).await;
        self.api.set_access_token(Some(session.access_token.clone()));
        *self.slot() = Some(session.clone());
        Ok(session)
    }

    /// Sign out. The server call is best-effort; local state is always cleared.
    pub async fn logout(&self) {
        if let Err(e) = self.api.logout().await {
            tracing::warn!("Logout request failed, clearing local session anyway: {}", e);
        }
        self.clear().await;
        tracing::info!("Signed out");
    }

    async fn establish(&self, tokens: AuthTokens, fallback: &str) -> Result<Session, String> {
        let Some(session) = Session::from_tokens(tokens) else {
            tracing::error!("Server returned an empty access token");
            return Err(fallback.to_string());
        };

        self.persist_tokens(
            &session,
            &[(USER_ROLE, session.role.as_str()), (USER_ID, session.user_id())],
        )
        .await;
        self.api.set_access_token(Some(session.access_token.clone()));
        tracing::info!("Signed in as {} ({})", session.email, session.role);
        *self.slot() = Some(session.clone());
        Ok(session)
    }

    /// Write the session's tokens plus `extra`. Without a refresh token the
    /// key is removed rather than stored empty.
    async fn persist_tokens(&self, session: &Session, extra: &[(&str, &str)]) {
        let mut entries = vec![(ACCESS_TOKEN, session.access_token())];
        entries.extend_from_slice(extra);
        match session.refresh_token() {
            Some(token) => entries.push((REFRESH_TOKEN, token)),
            None => self.storage.remove_all(&[REFRESH_TOKEN]).await,
        }
        self.storage.set_all(&entries).await;
    }

    async fn clear(&self) {
        self.storage.remove_all(&SESSION_KEYS).await;
        self.api.set_access_token(None);
        *self.slot() = None;
    }
}
