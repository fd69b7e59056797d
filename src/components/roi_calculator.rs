//! What-if annual savings calculator.

use std::rc::Rc;

use greenlint_core::api::RoiProjection;
use greenlint_core::roi::{DEFAULT_KWH_PRICE_EUR, DEFAULT_RUNS_PER_DAY};
use greenlint_core::{HttpApi, RoiInput, RoiProjector};
use leptos::prelude::*;
use tracing::debug;
use wasm_bindgen_futures::spawn_local;

use crate::context::ApiContext;

#[component]
pub fn RoiCalculator() -> impl IntoView {
    let api = expect_context::<ApiContext>();
    let projector = StoredValue::new_local(api.api().map(|api| Rc::new(RoiProjector::new(api))));

    let price = RwSignal::new(DEFAULT_KWH_PRICE_EUR.to_string());
    let runs = RwSignal::new(DEFAULT_RUNS_PER_DAY.to_string());
    let projection = RwSignal::new(None::<RoiProjection>);
    let error = RwSignal::new(None::<String>);
    let calculating = RwSignal::new(false);

    let calculate = move || {
        let Some(Some(projector)) = projector.try_get_value() else {
            return;
        };
        let Ok(runs_per_day) = runs.get_untracked().trim().parse::<u32>() else {
            projection.set(None);
            error.set(Some("Runs per day must be a whole number".to_string()));
            return;
        };
        let input = RoiInput {
            // unparseable prices are rejected by the projector
            kwh_price_eur: price.get_untracked().trim().parse().unwrap_or(f64::NAN),
            runs_per_day,
        };

        calculating.set(true);
        spawn_local(async move {
            if let Err(e) = projector.calculate(input).await {
                debug!("ROI calculation did not complete: {}", e);
            }
            projection.try_set(projector.projection());
            error.try_set(projector.error());
            calculating.try_set(projector.is_calculating());
        });
    };

    // Show figures for the defaults straight away.
    calculate();

    view! {
        <div class="card roi-calculator">
            <style>{include_str!("roi_calculator.css")}</style>
            <h3>"ROI Calculator"</h3>
            <div class="roi-inputs">
                <label class="roi-field">
                    <span>"Electricity price (EUR/kWh)"</span>
                    <input
                        type="number"
                        class="input"
                        min="0"
                        step="0.01"
                        prop:value=move || price.get()
                        on:input=move |ev| price.set(event_target_value(&ev))
                    />
                </label>
                <label class="roi-field">
                    <span>"Runs per day"</span>
                    <input
                        type="number"
                        class="input"
                        min="0"
                        step="1"
                        prop:value=move || runs.get()
                        on:input=move |ev| runs.set(event_target_value(&ev))
                    />
                </label>
                <button
                    class="btn btn-primary"
                    on:click=move |_| calculate()
                    disabled=move || calculating.get()
                >
                    {move || if calculating.get() { "Calculating..." } else { "Calculate" }}
                </button>
            </div>

            {move || error.get().map(|e| view! { <p class="roi-error">{e}</p> })}

            {move || projection.get().map(|p| view! {
                <div class="roi-results">
                    <div class="roi-figure">
                        <span class="roi-value">{format!("{:.2}", p.annual_kwh_saved)}</span>
                        <span class="roi-unit">"kWh / year"</span>
                    </div>
                    <div class="roi-figure">
                        <span class="roi-value">{format!("{:.2}", p.annual_co2_saved)}</span>
                        <span class="roi-unit">"kg CO\u{2082} / year"</span>
                    </div>
                    <div class="roi-figure">
                        <span class="roi-value">{format!("{:.2}", p.annual_eur_saved)}</span>
                        <span class="roi-unit">"EUR / year"</span>
                    </div>
                </div>
            })}
        </div>
    }
}
