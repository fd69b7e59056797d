use leptos::prelude::*;

use crate::components::code_diff::CodeDiff;
use crate::components::energy_chart::EnergyChart;
use crate::components::error_banner::ErrorBanner;
use crate::components::history_panel::HistoryPanel;
use crate::components::kpi_cards::KpiCards;
use crate::components::roi_calculator::RoiCalculator;
use crate::components::score_ring::SustainabilityScore;
use crate::context::DashboardContext;

#[component]
pub fn OverviewPage() -> impl IntoView {
    let dashboard = expect_context::<DashboardContext>();
    let snapshot = dashboard.snapshot;

    let history = Signal::derive(move || {
        snapshot.with(|s| {
            s.aggregate
                .as_ref()
                .map(|a| a.history.clone())
                .unwrap_or_default()
        })
    });
    let score = Signal::derive(move || snapshot.with(|s| s.sustainability_score()));
    let error = Signal::derive(move || snapshot.with(|s| s.error.clone()));

    let (selected, set_selected) = signal(None::<i64>);
    let selected_record = move || {
        let id = selected.get()?;
        history.with(|h| h.iter().find(|r| r.id == id).cloned())
    };

    view! {
        <div class="page overview-page">
            <style>{include_str!("overview.css")}</style>
            <h2>"Overview"</h2>
            <p class="page-description">
                "Energy, carbon and cost saved by optimizations recorded so far."
            </p>

            <ErrorBanner message=error />

            {move || (!snapshot.with(|s| s.loaded)).then(|| view! {
                <p class="loading-note">"Loading dashboard..."</p>
            })}

            <KpiCards snapshot=snapshot />

            <div class="overview-grid">
                <SustainabilityScore score=score />
                <EnergyChart history=history />
                <RoiCalculator />
            </div>

            <HistoryPanel
                history=history
                selected=selected
                on_select=Callback::new(move |id: i64| {
                    set_selected.update(|current| {
                        *current = if *current == Some(id) { None } else { Some(id) };
                    });
                })
            />

            {move || selected_record().map(|r| view! {
                <CodeDiff
                    filename=r.filename.clone()
                    original=r.original_code().map(str::to_string)
                    optimized=r.optimized_code().map(str::to_string)
                    chain_of_thought=r.chain_of_thought().map(str::to_string).unwrap_or_default()
                />
            })}
        </div>
    }
}
