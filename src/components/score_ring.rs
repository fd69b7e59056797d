//! Circular gauge for a 0-100 sustainability score.

use greenlint_core::{grade, ScoreRing};
use leptos::prelude::*;

#[component]
pub fn SustainabilityScore(
    #[prop(into)] score: Signal<Option<f64>>,
    #[prop(optional, into)] caption: Option<String>,
) -> impl IntoView {
    let caption = caption.unwrap_or_else(|| "Sustainability Score".to_string());

    view! {
        <div class="card score-card">
            <style>{include_str!("score_ring.css")}</style>
            <h3 class="score-caption">{caption}</h3>
            {move || {
                let current = score.get();
                let value = current.unwrap_or(0.0);
                let label = current.map(|v| format!("{:.0}", v)).unwrap_or_else(|| "--".to_string());
                let ring = ScoreRing::for_score(value);
                let g = grade(value);
                let size = ring.radius * 2.0 + 24.0;
                let center = (size / 2.0).to_string();
                let radius = ring.radius.to_string();
                view! {
                    <svg
                        class="score-ring"
                        width=size.to_string()
                        height=size.to_string()
                        viewBox=format!("0 0 {} {}", size, size)
                    >
                        <circle
                            class="score-track"
                            cx=center.clone()
                            cy=center.clone()
                            r=radius.clone()
                            fill="none"
                            stroke-width="10"
                        />
                        <circle
                            class=format!("score-arc {}", g.color_class())
                            cx=center.clone()
                            cy=center.clone()
                            r=radius.clone()
                            fill="none"
                            stroke-width="10"
                            stroke-linecap="round"
                            stroke-dasharray=ring.circumference.to_string()
                            stroke-dashoffset=ring.dash_offset.to_string()
                            transform=format!("rotate(-90 {} {})", center, center)
                        />
                        <text class="score-value" x=center.clone() y=center.clone() text-anchor="middle" dy="0.1em">
                            {label}
                        </text>
                        <text class="score-grade" x=center.clone() y=center.clone() text-anchor="middle" dy="1.6em">
                            {format!("Grade {}", g)}
                        </text>
                    </svg>
                }
            }}
        </div>
    }
}
