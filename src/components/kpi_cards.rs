use greenlint_core::dashboard::kpi_cards;
use greenlint_core::DashboardSnapshot;
use leptos::prelude::*;

/// The four headline totals. Zeros until the first aggregate arrives.
#[component]
pub fn KpiCards(#[prop(into)] snapshot: Signal<DashboardSnapshot>) -> impl IntoView {
    view! {
        <div class="kpi-grid">
            <style>{include_str!("kpi_cards.css")}</style>
            {move || {
                snapshot.with(|s| kpi_cards(s.aggregate.as_ref()))
                    .into_iter()
                    .map(|kpi| view! {
                        <div class="card kpi-card">
                            <span class="kpi-label">{kpi.label}</span>
                            <span class="kpi-value">
                                {kpi.value}
                                <span class="kpi-unit">{kpi.unit}</span>
                            </span>
                        </div>
                    })
                    .collect::<Vec<_>>()
            }}
        </div>
    }
}
