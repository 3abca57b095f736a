use dioxus::prelude::*;
use store::ClientConfig;

fn main() {
    dioxus::launch(Root);
}

/// Reads `decisionlog.toml` from the data directory; defaults when absent.
#[component]
fn Root() -> Element {
    let config = use_hook(|| {
        let dir = ui::data_dir();
        let config = ClientConfig::load_from_dir(&dir);
        tracing::info!(
            "Using API at {} (config dir {})",
            config.api.base_url,
            dir.display()
        );
        config
    });

    rsx! {
        ui::App { config: config }
    }
}
