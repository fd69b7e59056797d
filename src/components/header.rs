use greenlint_core::grade;
use leptos::prelude::*;

use crate::context::DashboardContext;

#[component]
pub fn Header() -> impl IntoView {
    let dashboard = expect_context::<DashboardContext>();
    let snapshot = dashboard.snapshot;

    view! {
        <header class="app-header">
            <style>{include_str!("header.css")}</style>
            <div class="header-brand">
                <h1 class="header-title">"greenlint"</h1>
                <p class="header-subtitle">"Energy-aware code optimization"</p>
            </div>
            <nav>
                <ul class="nav-list">
                    <li class="nav-item">
                        <a href="/" class="nav-link">"Overview"</a>
                    </li>
                    <li class="nav-item">
                        <a href="/analyze" class="nav-link">"Try It"</a>
                    </li>
                </ul>
            </nav>
            <div class="header-status">
                {move || snapshot.with(|s| s.sustainability_score()).map(|score| {
                    let g = grade(score);
                    view! {
                        <span class=format!("header-score {}", g.color_class())>
                            {format!("Score {:.0} ({})", score, g)}
                        </span>
                    }
                })}
                {move || {
                    let (class, label) = match snapshot.with(|s| (s.loaded, s.is_connected())) {
                        (false, _) => ("connection connection-pending", "Connecting"),
                        (true, true) => ("connection connection-live", "Live"),
                        (true, false) => ("connection connection-offline", "Offline"),
                    };
                    view! {
                        <span class=class>
                            <span class="connection-dot"></span>
                            {label}
                        </span>
                    }
                }}
            </div>
        </header>
    }
}
