use leptos::prelude::*;

/// Non-blocking error strip. Renders nothing while `message` is `None`.
#[component]
pub fn ErrorBanner(
    #[prop(into)] message: Signal<Option<String>>,
    /// Shows a dismiss button when set.
    #[prop(optional)]
    on_dismiss: Option<Callback<()>>,
) -> impl IntoView {
    move || {
        message.get().map(|msg| {
            view! {
                <div class="error-banner" role="alert">
                    <span class="error-banner-text">{msg}</span>
                    {on_dismiss.map(|cb| view! {
                        <button class="btn btn-small btn-secondary" on:click=move |_| cb.run(())>
                            "Dismiss"
                        </button>
                    })}
                </div>
            }
        })
    }
}
