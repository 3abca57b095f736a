use dioxus::prelude::*;
use store::ClientConfig;

/// API base URL baked in at build time, e.g.
/// `DECISIONLOG_API_URL=https://api.example.com dx build --platform web`.
const API_URL: Option<&str> = option_env!("DECISIONLOG_API_URL");

fn main() {
    dioxus::launch(Root);
}

fn client_config() -> ClientConfig {
    match API_URL {
        Some(url) if !url.trim().is_empty() => ClientConfig::default().with_base_url(url.trim()),
        _ => ClientConfig::default(),
    }
}

#[component]
fn Root() -> Element {
    let config = use_hook(|| {
        let config = client_config();
        tracing::info!("Using API at {}", config.api.base_url);
        config
    });

    rsx! {
        ui::App { config: config }
    }
}
