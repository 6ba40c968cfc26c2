use leptos::prelude::*;

#[component]
pub fn StatusBadge(
    /// The label text, e.g. "Claude"
    #[prop(into)]
    label: String,
    /// Whether an API key is stored for this provider
    configured: bool,
    /// Marks the provider currently used for analysis and negotiation
    #[prop(optional)]
    active: bool,
) -> impl IntoView {
    let (icon, class) = if configured {
        ("\u{2713}", "status-badge status-pass")
    } else {
        ("\u{2717}", "status-badge status-fail")
    };

    view! {
        <div class="provider-status">
            <span class=class>{icon}</span>
            <span class="provider-name">{label}</span>
            {active.then(|| view! { <span class="provider-active">"active"</span> })}
        </div>
    }
}
