use std::rc::Rc;

use greenlint_core::{Config, DashboardStore, HttpApi};
use leptos::prelude::*;
use leptos_router::components::*;
use leptos_router::path;
use tracing::{error, warn};
use wasm_bindgen_futures::spawn_local;

use crate::components::header::Header;
use crate::context::{api_base_url, ApiContext, DashboardContext};
use crate::pages::overview::OverviewPage;
use crate::pages::try_it::TryItPage;

#[component]
pub fn App(config: Config) -> impl IntoView {
    let api = match HttpApi::new(&api_base_url(&config), &config) {
        Ok(api) => Rc::new(api),
        Err(e) => {
            error!("Cannot create API client: {}", e);
            return view! {
                <div class="fatal-error">
                    <h2>"greenlint could not start"</h2>
                    <p>{e.to_string()}</p>
                </div>
            }
            .into_any();
        }
    };

    let store = Rc::new(DashboardStore::new(api.clone(), config.poll_interval));
    let dashboard = DashboardContext::new(store.clone());
    provide_context(dashboard);
    provide_context(ApiContext::new(api, &config));

    // Polling runs for the lifetime of the app: refresh now, then tick.
    store.start();
    spawn_local(async move {
        store.refresh().await;
    });

    let interval = set_interval_with_handle(
        move || {
            if let Some(store) = dashboard.store() {
                spawn_local(async move {
                    store.tick().await;
                });
            }
        },
        config.poll_interval,
    );
    let interval = match interval {
        Ok(handle) => Some(handle),
        Err(e) => {
            warn!("Could not schedule dashboard polling: {:?}", e);
            None
        }
    };

    on_cleanup(move || {
        if let Some(handle) = interval {
            handle.clear();
        }
        if let Some(store) = dashboard.store() {
            store.stop();
        }
    });

    view! {
        <Router>
            <style>{include_str!("app.css")}</style>
            <div class="app-layout">
                <Header />
                <main class="content">
                    <Routes fallback=|| view! { <p>"Page not found"</p> }>
                        <Route path=path!("/") view=OverviewPage />
                        <Route path=path!("/analyze") view=TryItPage />
                    </Routes>
                </main>
            </div>
        </Router>
    }
    .into_any()
}
