//! Side-by-side view of original and optimized code.

use leptos::prelude::*;

/// Original and optimized code next to each other, with the model's
/// reasoning underneath when there is any.
#[component]
pub fn CodeDiff(
    #[prop(into)] filename: String,
    original: Option<String>,
    optimized: Option<String>,
    #[prop(optional)] summary: Option<String>,
    #[prop(optional)] chain_of_thought: Option<String>,
) -> impl IntoView {
    let summary = summary.filter(|s| !s.trim().is_empty());
    let reasoning = chain_of_thought.filter(|s| !s.trim().is_empty());

    view! {
        <div class="card code-diff">
            <style>{include_str!("code_diff.css")}</style>
            <h3>"Code Comparison"</h3>
            <p class="diff-filename"><code>{filename}</code></p>

            {summary.map(|s| view! { <p class="diff-summary">{s}</p> })}

            <div class="diff-columns">
                <div class="diff-pane diff-before">
                    <span class="diff-pane-title">"Original"</span>
                    {match original {
                        Some(code) => view! { <pre class="diff-code"><code>{code}</code></pre> }.into_any(),
                        None => view! { <p class="diff-missing">"No original code available"</p> }.into_any(),
                    }}
                </div>
                <div class="diff-pane diff-after">
                    <span class="diff-pane-title">"Optimized"</span>
                    {match optimized {
                        Some(code) => view! { <pre class="diff-code"><code>{code}</code></pre> }.into_any(),
                        None => view! { <p class="diff-missing">"No optimized code available"</p> }.into_any(),
                    }}
                </div>
            </div>

            {reasoning.map(|text| view! {
                <details class="diff-reasoning">
                    <summary>"Chain of thought"</summary>
                    <p class="reasoning-text">{text}</p>
                </details>
            })}
        </div>
    }
}
