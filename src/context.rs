use std::rc::Rc;

use greenlint_core::api::AiProvider;
use greenlint_core::{Config, DashboardSnapshot, DashboardStore, HttpApi};
use leptos::prelude::*;
use wasm_bindgen_futures::spawn_local;

/// Dashboard state shared by the header and the overview page.
///
/// The store itself is not `Send`, so it lives in local storage and only
/// its snapshot is reactive.
#[derive(Clone, Copy)]
pub struct DashboardContext {
    pub snapshot: RwSignal<DashboardSnapshot>,
    store: StoredValue<Rc<DashboardStore<HttpApi>>, LocalStorage>,
}

impl DashboardContext {
    pub fn new(store: Rc<DashboardStore<HttpApi>>) -> Self {
        let snapshot = RwSignal::new(store.snapshot());
        store.subscribe(move |s| {
            snapshot.try_set(s.clone());
        });
        Self {
            snapshot,
            store: StoredValue::new_local(store),
        }
    }

    pub fn store(&self) -> Option<Rc<DashboardStore<HttpApi>>> {
        self.store.try_get_value()
    }

    /// Fetch the aggregate now, outside the poll schedule.
    pub fn refresh(&self) {
        if let Some(store) = self.store() {
            spawn_local(async move {
                store.refresh().await;
            });
        }
    }
}

/// Client and settings every page needs.
#[derive(Clone, Copy)]
pub struct ApiContext {
    pub provider: AiProvider,
    api: StoredValue<Rc<HttpApi>, LocalStorage>,
}

impl ApiContext {
    pub fn new(api: Rc<HttpApi>, config: &Config) -> Self {
        Self {
            provider: config.provider,
            api: StoredValue::new_local(api),
        }
    }

    pub fn api(&self) -> Option<Rc<HttpApi>> {
        self.api.try_get_value()
    }
}

/// Base URL for the client: the configured one, or this page's origin.
pub fn api_base_url(config: &Config) -> String {
    let origin = web_sys::window()
        .and_then(|w| w.location().origin().ok())
        .unwrap_or_default();
    config.resolve_base_url(&origin)
}
