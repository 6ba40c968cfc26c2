use leptos::prelude::*;
use wasm_bindgen_futures::spawn_local;

use crate::commands::{self, AiStatus, ModelInfo};
use crate::components::api_key_form::ApiKeyForm;
use crate::components::status_badge::StatusBadge;
use crate::theme::{Theme, ThemeContext};

/// (id, label, keychain service, key placeholder)
const PROVIDERS: [(&str, &str, &str, &str); 4] = [
    ("claude", "Claude", "darkroom-claude-api", "sk-ant-..."),
    ("openai", "OpenAI", "darkroom-openai-api", "sk-..."),
    ("kimi", "Kimi", "darkroom-kimi-api", "sk-..."),
    ("openrouter", "OpenRouter", "darkroom-openrouter-api", "sk-or-..."),
];

fn provider_label(id: &str) -> &'static str {
    PROVIDERS
        .iter()
        .find(|(pid, ..)| *pid == id)
        .map(|(_, label, ..)| *label)
        .unwrap_or("Unknown")
}

#[component]
pub fn SettingsPage() -> impl IntoView {
    let theme_ctx = expect_context::<ThemeContext>();
    let (status, set_status) = signal::<Option<AiStatus>>(None);
    let (models, set_models) = signal::<Vec<ModelInfo>>(vec![]);
    let (models_error, set_models_error) = signal::<Option<String>>(None);
    let (save_message, set_save_message) = signal::<Option<String>>(None);

    let refresh_status = move || {
        spawn_local(async move {
            match commands::get_ai_status().await {
                Ok(s) => set_status.set(Some(s)),
                Err(e) => set_save_message.set(Some(format!("Failed to load AI status: {}", e))),
            }
        });
    };

    let load_models = move |provider: String| {
        set_models_error.set(None);
        spawn_local(async move {
            match commands::list_models(&provider).await {
                Ok(list) => set_models.set(list),
                Err(e) => {
                    set_models.set(vec![]);
                    set_models_error.set(Some(e));
                }
            }
        });
    };

    Effect::new(move |_| refresh_status());

    let on_provider_change = move |ev: web_sys::Event| {
        let provider = event_target_value(&ev);
        spawn_local(async move {
            // A new provider starts from its default model
            let result = match commands::set_preference("ai_provider", &provider).await {
                Ok(()) => commands::set_preference("ai_model", "").await,
                Err(e) => Err(e),
            };
            match result {
                Ok(()) => {
                    set_models.set(vec![]);
                    set_save_message.set(Some(format!("Provider set to {}", provider_label(&provider))));
                    refresh_status();
                }
                Err(e) => set_save_message.set(Some(format!("Failed to save: {}", e))),
            }
        });
    };

    let on_model_change = move |ev: web_sys::Event| {
        let model = event_target_value(&ev);
        spawn_local(async move {
            match commands::set_preference("ai_model", &model).await {
                Ok(()) => {
                    set_save_message.set(Some(format!("Model set to {}", model)));
                    refresh_status();
                }
                Err(e) => set_save_message.set(Some(format!("Failed to save: {}", e))),
            }
        });
    };

    let on_theme_change = move |ev: web_sys::Event| {
        let theme = Theme::parse(&event_target_value(&ev));
        theme_ctx.theme.set(theme);
        spawn_local(async move {
            if let Err(e) = commands::set_preference("theme", theme.as_str()).await {
                set_save_message.set(Some(format!("Failed to save theme: {}", e)));
            }
        });
    };

    let key_changed = Callback::new(move |_: bool| refresh_status());

    view! {
        <div class="page settings-page">
            <h2>"Settings"</h2>

            <section class="settings-section">
                <h3>"AI Provider"</h3>
                <p class="section-description">
                    "Style analysis and negotiation use the selected provider and model."
                </p>

                <div class="provider-status-list">
                    {move || status.get().map(|s| {
                        let active = s.provider.clone();
                        s.keys.into_iter().map(|k| view! {
                            <StatusBadge
                                label=provider_label(&k.provider)
                                configured=k.configured
                                active=k.provider == active
                            />
                        }).collect_view()
                    })}
                </div>

                <div class="form-group">
                    <label for="ai-provider">"Provider"</label>
                    <select id="ai-provider" class="input" on:change=on_provider_change>
                        {PROVIDERS.iter().map(|(id, label, ..)| {
                            let id = *id;
                            view! {
                                <option
                                    value=id
                                    selected=move || status.get().map(|s| s.provider == id).unwrap_or(false)
                                >
                                    {*label}
                                </option>
                            }
                        }).collect_view()}
                    </select>
                </div>

                <div class="form-group">
                    <label for="ai-model">"Model"</label>
                    <div class="input-row">
                        <select id="ai-model" class="input" on:change=on_model_change>
                            {move || {
                                let current = status.get().map(|s| s.model).unwrap_or_default();
                                let mut list = models.get();
                                if !current.is_empty() && !list.iter().any(|m| m.id == current) {
                                    list.insert(0, ModelInfo { id: current.clone(), name: current.clone() });
                                }
                                list.into_iter().map(|m| {
                                    let selected = m.id == current;
                                    view! { <option value=m.id.clone() selected=selected>{m.name}</option> }
                                }).collect_view()
                            }}
                        </select>
                        <button
                            class="btn btn-secondary"
                            on:click=move |_| {
                                if let Some(s) = status.get_untracked() {
                                    load_models(s.provider);
                                }
                            }
                        >
                            "Load models"
                        </button>
                    </div>
                    {move || models_error.get().map(|e| view! {
                        <span class="status-text status-error">{e}</span>
                    })}
                </div>
            </section>

            <section class="settings-section">
                <h3>"API Keys"</h3>
                <p class="section-description">"API keys are stored securely in your OS keychain."</p>

                {PROVIDERS.iter().map(|(_, label, service, placeholder)| view! {
                    <ApiKeyForm
                        label=format!("{} API Key", label)
                        service_id=*service
                        placeholder=*placeholder
                        on_change=key_changed
                    />
                }).collect_view()}
            </section>

            <section class="settings-section">
                <h3>"Appearance"</h3>
                <div class="form-group">
                    <label for="theme">"Theme"</label>
                    <select id="theme" class="input" on:change=on_theme_change>
                        {Theme::ALL.into_iter().map(|t| view! {
                            <option value=t.as_str() selected=move || theme_ctx.theme.get() == t>
                                {t.label()}
                            </option>
                        }).collect_view()}
                    </select>
                </div>
            </section>

            <Show when=move || save_message.get().is_some()>
                <span class="status-text">{move || save_message.get().unwrap_or_default()}</span>
            </Show>
        </div>
    }
}
