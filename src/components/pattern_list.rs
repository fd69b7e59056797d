//! Detected energy anti-patterns for one analysis.

use greenlint_core::api::{AnalysisResult, DetectedPattern, Severity};
use greenlint_core::grade;
use leptos::prelude::*;

#[component]
pub fn AnalysisSummary(result: AnalysisResult, stale: bool) -> impl IntoView {
    let g = grade(result.total_energy_score);
    let high = result.high_severity_count();

    view! {
        <div class={if stale { "analysis-summary stale" } else { "analysis-summary" }}>
            <style>{include_str!("pattern_list.css")}</style>
            {stale.then(|| view! {
                <p class="stale-note">"Showing the previous result; the latest analysis failed."</p>
            })}
            <div class="summary-figures">
                <div class="summary-figure">
                    <span class="figure-label">"Energy score"</span>
                    <span class=format!("figure-value {}", g.color_class())>
                        {format!("{:.0} ({})", result.total_energy_score, g)}
                    </span>
                </div>
                <div class="summary-figure">
                    <span class="figure-label">"After optimization"</span>
                    <span class="figure-value">{format!("{:.0}", result.optimized_energy_score)}</span>
                </div>
                <div class="summary-figure">
                    <span class="figure-label">"Annual energy"</span>
                    <span class="figure-value">{format!("{:.4} kWh", result.estimated_kwh)}</span>
                </div>
                <div class="summary-figure">
                    <span class="figure-label">"Annual CO\u{2082}"</span>
                    <span class="figure-value">{format!("{:.4} kg", result.estimated_co2_kg)}</span>
                </div>
                <div class="summary-figure">
                    <span class="figure-label">"Annual cost"</span>
                    <span class="figure-value">{format!("{:.4} EUR", result.estimated_cost_eur)}</span>
                </div>
            </div>
            {(result.carbon_intensity_gco2_kwh > 0.0).then(|| view! {
                <p class="carbon-note">
                    {format!("Grid carbon intensity: {:.0} gCO\u{2082}/kWh", result.carbon_intensity_gco2_kwh)}
                </p>
            })}

            <h3>{format!("Detected Patterns ({}, {} high)", result.patterns.len(), high)}</h3>
            <PatternList patterns=result.patterns.clone() />
        </div>
    }
}

#[component]
pub fn PatternList(patterns: Vec<DetectedPattern>) -> impl IntoView {
    if patterns.is_empty() {
        return view! {
            <p class="no-patterns">"No energy anti-patterns detected. Nothing to optimize."</p>
        }
        .into_any();
    }

    view! {
        <div class="pattern-list">
            {patterns.into_iter().map(|p| view! { <PatternCard pattern=p /> }).collect::<Vec<_>>()}
        </div>
    }
    .into_any()
}

#[component]
fn PatternCard(pattern: DetectedPattern) -> impl IntoView {
    let severity_class = format!("severity-badge severity-{}", pattern.severity.as_str());
    let card_class = if pattern.severity.is_high() { "pattern-card high" } else { "pattern-card" };

    view! {
        <div class=card_class>
            <div class="pattern-header">
                <span class="pattern-name">{pattern.name.clone()}</span>
                <span class=severity_class>{severity_label(pattern.severity)}</span>
                <span class="pattern-lines">{pattern.line_range_label()}</span>
            </div>
            <p class="pattern-description">{pattern.description.clone()}</p>
            <p class="pattern-suggestion">
                <strong>"Suggestion: "</strong>
                {pattern.suggestion.clone()}
            </p>
            <p class="pattern-energy">
                {format!(
                    "Estimated cost {:.1}, saving {:.1}",
                    pattern.estimated_energy_cost, pattern.estimated_energy_saved
                )}
            </p>
        </div>
    }
}

fn severity_label(severity: Severity) -> &'static str {
    match severity {
        Severity::Low => "LOW",
        Severity::Medium => "MEDIUM",
        Severity::High => "HIGH",
    }
}
