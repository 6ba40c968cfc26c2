use leptos::prelude::*;
use leptos_router::components::*;
use leptos_router::path;
use wasm_bindgen_futures::spawn_local;

use crate::commands;
use crate::components::sidebar::Sidebar;
use crate::components::toast::ToastHost;
use crate::context::{Toasts, UserProfileContext};
use crate::pages::home::HomePage;
use crate::pages::newsroom::NewsroomPage;
use crate::pages::settings::SettingsPage;
use crate::pages::style_hub::StyleHubPage;
use crate::theme::{apply_theme, Theme, ThemeContext};

#[component]
pub fn App() -> impl IntoView {
    let theme = RwSignal::new(Theme::System);
    provide_context(ThemeContext { theme });
    provide_context(UserProfileContext::new());
    provide_context(Toasts::new());

    // Load saved theme preference on mount
    Effect::new(move |_| {
        spawn_local(async move {
            if let Ok(Some(saved)) = commands::get_preference("theme").await {
                theme.set(Theme::parse(&saved));
            }
        });
    });

    Effect::new(move |_| apply_theme(theme.get()));

    view! {
        <Router>
            <div class="app-layout">
                <Sidebar />
                <main class="content">
                    <Routes fallback=|| view! { <p>"Page not found"</p> }>
                        <Route path=path!("/") view=HomePage />
                        <Route path=path!("/newsroom") view=NewsroomPage />
                        <Route path=path!("/style-hub") view=StyleHubPage />
                        <Route path=path!("/settings") view=SettingsPage />
                    </Routes>
                </main>
            </div>
            <ToastHost />
        </Router>
    }
}
