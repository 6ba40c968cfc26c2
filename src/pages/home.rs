use leptos::prelude::*;

use crate::context::UserProfileContext;

#[component]
pub fn HomePage() -> impl IntoView {
    let profiles = expect_context::<UserProfileContext>().profiles;

    view! {
        <div class="page home-page">
            <h2>"Welcome to Darkroom"</h2>
            <p class="page-description">
                "License photography to newsrooms and teach the app your editing style."
            </p>

            <div class="card-grid">
                <div class="card">
                    <h3>"Newsroom"</h3>
                    <p>"Browse licensable photos and negotiate usage fees with the photographer's agent"</p>
                    <a href="/newsroom" class="btn btn-primary">"Open Newsroom"</a>
                </div>
                <div class="card">
                    <h3>"Style Hub"</h3>
                    <p>"Upload raw and edited pairs to derive a reusable style profile"</p>
                    <a href="/style-hub" class="btn btn-primary">"Train a Style"</a>
                </div>
                <div class="card">
                    <h3>"Settings"</h3>
                    <p>"Configure your AI provider and API keys"</p>
                    <a href="/settings" class="btn btn-primary">"Configure"</a>
                </div>
            </div>

            <p class="hint">
                {move || match profiles.with(|p| p.len()) {
                    0 => "No style profiles saved yet.".to_string(),
                    1 => "1 style profile saved this session.".to_string(),
                    n => format!("{} style profiles saved this session.", n),
                }}
            </p>
        </div>
    }
}
