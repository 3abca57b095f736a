//! Shared UI for the web and desktop front-ends.

use dioxus::prelude::*;
use store::ClientConfig;

pub mod activity_log;
pub use activity_log::{log_activity, report_error, use_activity_log, ActivityLog, LogLevel};

mod activity_log_panel;
pub use activity_log_panel::{ActivityLogPanel, ActivityLogToggle};

mod auth;
pub use auth::{
    use_api, use_session, use_session_controller, ApiHandle, LogoutButton, SessionController,
    SessionProvider, SessionState,
};

mod board;
pub use board::DecisionBoard;

mod navbar;
pub use navbar::Navbar;

mod platform;
#[cfg(not(target_arch = "wasm32"))]
pub use platform::data_dir;
pub use platform::{platform_store, AppSessionStore, PlatformStore};

mod routes;
pub use routes::Route;

pub mod views;

pub const MAIN_CSS: Asset = asset!("/assets/main.css");

/// Root of the application: activity log, session and router.
#[component]
pub fn App(config: ClientConfig) -> Element {
    use_context_provider(|| Signal::new(ActivityLog::default()));

    rsx! {
        document::Link { rel: "stylesheet", href: MAIN_CSS }
        SessionProvider {
            config: config,
            Router::<Route> {}
        }
    }
}
