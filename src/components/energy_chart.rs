//! Before/after energy bars for recent optimizations.

use greenlint_core::api::OptimizationRecord;
use greenlint_core::dashboard::{chart_max, energy_chart_series};
use leptos::prelude::*;

const CHART_HEIGHT: f64 = 160.0;
const BAR_WIDTH: f64 = 14.0;
const GROUP_WIDTH: f64 = 44.0;

#[component]
pub fn EnergyChart(#[prop(into)] history: Signal<Vec<OptimizationRecord>>) -> impl IntoView {
    view! {
        <div class="card energy-chart">
            <style>{include_str!("energy_chart.css")}</style>
            <h3>"Energy Before vs After"</h3>
            {move || {
                let series = history.with(|h| energy_chart_series(h));
                if series.is_empty() {
                    return view! {
                        <p class="chart-empty">"No optimizations yet. Try one on the Try It page."</p>
                    }
                    .into_any();
                }

                let max = chart_max(&series);
                let width = GROUP_WIDTH * series.len() as f64;
                let bar_height = move |v: f64| (v.max(0.0) / max) * CHART_HEIGHT;

                view! {
                    <svg
                        class="chart-svg"
                        viewBox=format!("0 0 {} {}", width, CHART_HEIGHT + 20.0)
                        preserveAspectRatio="none"
                    >
                        {series.into_iter().enumerate().map(|(i, point)| {
                            let x = i as f64 * GROUP_WIDTH + 4.0;
                            let before = bar_height(point.before);
                            let after = bar_height(point.after);
                            view! {
                                <g class="chart-group">
                                    <rect
                                        class="bar-before"
                                        x=x.to_string()
                                        y=(CHART_HEIGHT - before).to_string()
                                        width=BAR_WIDTH.to_string()
                                        height=before.to_string()
                                    />
                                    <rect
                                        class="bar-after"
                                        x=(x + BAR_WIDTH + 2.0).to_string()
                                        y=(CHART_HEIGHT - after).to_string()
                                        width=BAR_WIDTH.to_string()
                                        height=after.to_string()
                                    />
                                    <text
                                        class="bar-label"
                                        x=(x + BAR_WIDTH).to_string()
                                        y=(CHART_HEIGHT + 14.0).to_string()
                                        text-anchor="middle"
                                    >
                                        {truncate(&point.label, 8)}
                                    </text>
                                </g>
                            }
                        }).collect::<Vec<_>>()}
                    </svg>
                    <div class="chart-legend">
                        <span class="legend-before">"Before"</span>
                        <span class="legend-after">"After"</span>
                    </div>
                }
                .into_any()
            }}
        </div>
    }
}

fn truncate(label: &str, max: usize) -> String {
    if label.chars().count() <= max {
        label.to_string()
    } else {
        let head: String = label.chars().take(max - 1).collect();
        format!("{}\u{2026}", head)
    }
}
