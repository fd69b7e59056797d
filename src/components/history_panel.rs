//! Optimization history table.
//!
//! Rows keep the order the service sends (newest first). Selecting a row
//! shows its code comparison below the table.

use greenlint_core::api::OptimizationRecord;
use leptos::prelude::*;

#[component]
pub fn HistoryPanel(
    #[prop(into)] history: Signal<Vec<OptimizationRecord>>,
    /// Id of the highlighted record, if any.
    #[prop(into)]
    selected: Signal<Option<i64>>,
    /// Invoked with a record's id when its row is clicked.
    on_select: Callback<i64>,
) -> impl IntoView {
    view! {
        <div class="card history-panel">
            <style>{include_str!("history_panel.css")}</style>
            <h3 class="history-title">"Optimization History"</h3>

            {move || {
                let records = history.get();
                if records.is_empty() {
                    view! { <p class="history-empty">"No optimizations recorded yet."</p> }.into_any()
                } else {
                    view! {
                        <table class="history-table">
                            <thead>
                                <tr>
                                    <th>"Date"</th>
                                    <th>"File"</th>
                                    <th>"Patterns"</th>
                                    <th>"Energy"</th>
                                    <th>"kWh Saved"</th>
                                    <th>"CO\u{2082} Saved"</th>
                                    <th>"EUR Saved"</th>
                                </tr>
                            </thead>
                            <tbody>
                                {records.into_iter().map(|r| {
                                    let id = r.id;
                                    let row_class = move || {
                                        if selected.get() == Some(id) {
                                            "history-row selected"
                                        } else {
                                            "history-row"
                                        }
                                    };
                                    view! {
                                        <tr class=row_class on:click=move |_| on_select.run(id)>
                                            <td class="history-date">{r.date_label()}</td>
                                            <td class="history-file">{r.filename.clone()}</td>
                                            <td>{r.patterns_found}</td>
                                            <td>{format!("{:.1} \u{2192} {:.1}", r.energy_before, r.energy_after)}</td>
                                            <td>{format!("{:.4}", r.savings_kwh)}</td>
                                            <td>{format!("{:.4} kg", r.savings_co2_kg)}</td>
                                            <td>{format!("{:.4}", r.savings_eur)}</td>
                                        </tr>
                                    }
                                }).collect::<Vec<_>>()}
                            </tbody>
                        </table>
                    }.into_any()
                }
            }}
        </div>
    }
}
