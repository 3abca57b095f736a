//! Session context and hooks for the UI.
//!
//! [`SessionProvider`] owns the one [`AppSessionStore`] and is its only
//! writer: components change the session through [`SessionController`] and
//! observe it through [`use_session`], a read-only snapshot that re-renders
//! the caller whenever the session changes.

use api::{ApiClient, Session, SessionStore};
use dioxus::prelude::*;
use store::ClientConfig;

use crate::platform::{platform_store, AppSessionStore};
use crate::Route;

/// Read-only projection of the session for rendering.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionState {
    pub session: Option<Session>,
    /// True until the persisted session has been restored (or found absent).
    pub loading: bool,
}

impl Default for SessionState {
    fn default() -> Self {
        Self {
            session: None,
            loading: true,
        }
    }
}

/// The single writer of the session. Copy, so event handlers can capture it.
#[derive(Clone, Copy, PartialEq)]
pub struct SessionController {
    store: Signal<AppSessionStore>,
    state: Signal<SessionState>,
}

impl SessionController {
    fn store(&self) -> AppSessionStore {
        AppSessionStore::clone(&self.store.peek())
    }

    fn publish(&mut self, store: &AppSessionStore) {
        self.state.set(SessionState {
            session: store.session(),
            loading: false,
        });
    }

    pub fn state(&self) -> SessionState {
        (self.state)()
    }

    pub async fn restore(mut self) {
        let store = self.store();
        store.restore().await;
        self.publish(&store);
    }

    pub async fn login(mut self, email: String, password: String) -> Result<Session, String> {
        let store = self.store();
        let result = store.login(&email, &password).await;
        self.publish(&store);
        result
    }

    pub async fn register(mut self, email: String, password: String) -> Result<Session, String> {
        let store = self.store();
        let result = store.register(&email, &password).await;
        self.publish(&store);
        result
    }

    pub async fn logout(mut self) {
        let store = self.store();
        store.logout().await;
        self.publish(&store);
    }
}

/// Copy handle to the shared [`ApiClient`].
#[derive(Clone, Copy, PartialEq)]
pub struct ApiHandle(Signal<ApiClient>);

impl ApiHandle {
    pub fn client(&self) -> ApiClient {
        ApiClient::clone(&self.0.peek())
    }
}

/// Current session snapshot. Subscribes the calling component.
pub fn use_session() -> SessionState {
    use_context::<SessionController>().state()
}

pub fn use_session_controller() -> SessionController {
    use_context::<SessionController>()
}

pub fn use_api() -> ApiHandle {
    use_context::<ApiHandle>()
}

/// Provider component that owns the session.
/// Restores any persisted session on mount.
#[component]
pub fn SessionProvider(config: ClientConfig, children: Element) -> Element {
    let client = use_hook(|| ApiClient::from_config(&config));
    let store_client = client.clone();
    let store = use_signal(move || SessionStore::new(platform_store(), store_client));
    let state = use_signal(SessionState::default);

    let controller = use_context_provider(|| SessionController { store, state });
    use_context_provider(|| ApiHandle(Signal::new(client)));

    let _ = use_resource(move || async move {
        controller.restore().await;
    });

    rsx! {
        {children}
    }
}

/// Button to log out the current user.
#[component]
pub fn LogoutButton(
    #[props(default = "Logout".to_string())] label: String,
    #[props(default = "".to_string())] class: String,
) -> Element {
    let controller = use_session_controller();
    let nav = use_navigator();

    let onclick = move |_| async move {
        controller.logout().await;
        nav.replace(Route::Login {});
    };

    rsx! {
        button {
            class: "{class}",
            onclick: onclick,
            "{label}"
        }
    }
}
