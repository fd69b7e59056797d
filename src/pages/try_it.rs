//! Try-it page: paste code, analyze it, then optimize the findings.

use std::rc::Rc;

use greenlint_core::api::{Language, OptimizationResult};
use greenlint_core::{HttpApi, Phase, SessionController, SessionSnapshot};
use leptos::prelude::*;
use tracing::debug;
use wasm_bindgen_futures::spawn_local;

use crate::components::code_diff::CodeDiff;
use crate::components::error_banner::ErrorBanner;
use crate::components::pattern_list::AnalysisSummary;
use crate::context::{ApiContext, DashboardContext};

#[component]
pub fn TryItPage() -> impl IntoView {
    let api_ctx = expect_context::<ApiContext>();
    let dashboard = expect_context::<DashboardContext>();

    let Some(api) = api_ctx.api() else {
        return view! { <p class="error-message">"API client unavailable"</p> }.into_any();
    };

    let controller = Rc::new(SessionController::new(api, api_ctx.provider));
    let snapshot = RwSignal::new(controller.snapshot());
    controller.subscribe(move |s| {
        snapshot.try_set(s.clone());
    });
    // Each optimization adds a history entry on the service.
    controller.on_optimized(move |_| dashboard.refresh());

    let session = StoredValue::new_local(controller);
    on_cleanup(move || {
        if let Some(controller) = session.try_get_value() {
            controller.close();
        }
    });

    let with_session = move |f: fn(Rc<SessionController<HttpApi>>)| {
        if let Some(controller) = session.try_get_value() {
            f(controller);
        }
    };

    let on_analyze = move |_| {
        with_session(|controller| {
            spawn_local(async move {
                if let Err(e) = controller.submit_draft_for_analysis().await {
                    debug!("Analysis not completed: {}", e);
                }
            });
        })
    };

    let on_optimize = move |_| {
        with_session(|controller| {
            spawn_local(async move {
                if let Err(e) = controller.submit_for_optimization().await {
                    debug!("Optimization not completed: {}", e);
                }
            });
        })
    };

    let on_sample = move |_| with_session(|controller| controller.load_sample());

    let on_language = move |ev: web_sys::Event| {
        if let Ok(language) = event_target_value(&ev).parse::<Language>() {
            if let Some(controller) = session.try_get_value() {
                controller.set_language(language);
            }
        }
    };

    let on_code = move |ev: web_sys::Event| {
        let code = event_target_value(&ev);
        if let Some(controller) = session.try_get_value() {
            controller.set_code(code);
        }
    };

    let error = Signal::derive(move || snapshot.with(|s| s.error.clone()));
    let phase = move || snapshot.with(|s| s.phase);

    view! {
        <div class="page try-it-page">
            <style>{include_str!("try_it.css")}</style>

            <h2>"Try It"</h2>
            <p class="page-description">
                "Paste C++ or Python code to find energy anti-patterns, then let the AI rewrite them."
            </p>

            <ErrorBanner
                message=error
                on_dismiss=Callback::new(move |_| with_session(|controller| controller.clear_error()))
            />

            <div class="editor-toolbar">
                <select
                    class="input"
                    prop:value=move || snapshot.with(|s| s.draft.language.as_str())
                    on:change=on_language
                >
                    {Language::ALL.iter().map(|lang| view! {
                        <option value=lang.as_str()>{lang.label()}</option>
                    }).collect::<Vec<_>>()}
                </select>
                <button class="btn btn-secondary" on:click=on_sample>"Load Sample"</button>
            </div>

            <textarea
                class="code-editor"
                spellcheck="false"
                rows="18"
                prop:value=move || snapshot.with(|s| s.draft.code.clone())
                on:input=on_code
            ></textarea>

            <div class="action-buttons">
                <button
                    class="btn btn-primary"
                    on:click=on_analyze
                    disabled=move || !snapshot.with(|s| s.can_analyze)
                >
                    {move || if phase() == Phase::Analyzing { "Analyzing..." } else { "Analyze" }}
                </button>
                <button
                    class="btn btn-primary"
                    on:click=on_optimize
                    disabled=move || !snapshot.with(|s| s.can_optimize)
                >
                    {move || if phase() == Phase::Optimizing { "Optimizing..." } else { "Optimize" }}
                </button>
            </div>

            {move || matches!(phase(), Phase::Analyzing | Phase::Optimizing).then(|| view! {
                <div class="loading-indicator">
                    <div class="spinner"></div>
                    <p>
                        {if phase() == Phase::Analyzing {
                            "Analyzing your code..."
                        } else {
                            "Optimizing with AI. This can take a while."
                        }}
                    </p>
                </div>
            })}

            {move || snapshot.with(|s: &SessionSnapshot| {
                s.analysis.clone().map(|result| view! {
                    <AnalysisSummary result=result stale=s.analysis_is_stale />
                })
            })}

            {move || snapshot.with(|s| s.optimization.clone()).map(|result| view! {
                <OptimizationView result=result />
            })}
        </div>
    }
    .into_any()
}

#[component]
fn OptimizationView(result: OptimizationResult) -> impl IntoView {
    view! {
        <div class="optimization-result">
            <div class="savings-row">
                <span class="savings-item">
                    {format!("Energy {:.1} \u{2192} {:.1}", result.energy_before, result.energy_after)}
                </span>
                <span class="savings-item">{format!("{:.4} kWh saved", result.savings_kwh)}</span>
                <span class="savings-item">{format!("{:.4} kg CO\u{2082} saved", result.savings_co2_kg)}</span>
                <span class="savings-item">{format!("{:.4} EUR saved", result.savings_eur)}</span>
            </div>
            <CodeDiff
                filename=result.filename.clone()
                original=Some(result.original_code.clone()).filter(|c| !c.is_empty())
                optimized=Some(result.optimized_code.clone()).filter(|c| !c.is_empty())
                summary=result.changes_summary.clone()
                chain_of_thought=result.chain_of_thought.clone()
            />
        </div>
    }
}
