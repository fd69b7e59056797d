mod app;
mod components;
mod context;
mod logging;
mod pages;

use greenlint_core::Config;
use leptos::prelude::*;

use app::App;

fn main() {
    let (config, config_error) = match Config::from_build_env() {
        Ok(config) => (config, None),
        Err(e) => (Config::default(), Some(e)),
    };

    logging::init(config.log_level);
    if let Some(e) = config_error {
        tracing::warn!("{}; using default configuration", e);
    }

    leptos::mount::mount_to_body(move || view! { <App config=config.clone() /> });
}
