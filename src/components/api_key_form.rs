use leptos::prelude::*;
use wasm_bindgen_futures::spawn_local;

use crate::commands;

#[component]
pub fn ApiKeyForm(
    /// Display name, e.g. "Claude API Key"
    #[prop(into)]
    label: String,
    /// Keyring service identifier, e.g. "darkroom-claude-api"
    #[prop(into)]
    service_id: String,
    #[prop(into)]
    placeholder: String,
    /// Called with the new configured state after a save or delete
    #[prop(optional)]
    on_change: Option<Callback<bool>>,
) -> impl IntoView {
    let (key_value, set_key_value) = signal(String::new());
    let (is_saved, set_is_saved) = signal(false);
    let (is_busy, set_is_busy) = signal(false);
    let (error_message, set_error_message) = signal::<Option<String>>(None);

    let service = StoredValue::new(service_id);

    Effect::new(move |_| {
        let sid = service.get_value();
        spawn_local(async move {
            match commands::get_api_key(&sid).await {
                Ok(found) => set_is_saved.set(found.is_some()),
                Err(e) => set_error_message.set(Some(format!("Failed to check key: {}", e))),
            }
        });
    });

    let notify = move |configured: bool| {
        if let Some(cb) = on_change {
            cb.run(configured);
        }
    };

    let save_key = move |_| {
        let key = key_value.get().trim().to_string();
        if key.is_empty() {
            set_error_message.set(Some("Please enter an API key".to_string()));
            return;
        }
        set_is_busy.set(true);
        set_error_message.set(None);
        spawn_local(async move {
            match commands::set_api_key(&service.get_value(), &key).await {
                Ok(()) => {
                    set_is_saved.set(true);
                    set_key_value.set(String::new());
                    notify(true);
                }
                Err(e) => set_error_message.set(Some(format!("Failed to save: {}", e))),
            }
            set_is_busy.set(false);
        });
    };

    let delete_key = move |_| {
        set_is_busy.set(true);
        set_error_message.set(None);
        spawn_local(async move {
            match commands::delete_api_key(&service.get_value()).await {
                Ok(()) => {
                    set_is_saved.set(false);
                    notify(false);
                }
                Err(e) => set_error_message.set(Some(format!("Failed to delete: {}", e))),
            }
            set_is_busy.set(false);
        });
    };

    view! {
        <div class="form-group api-key-form">
            <label>{label}</label>
            <div class="input-row">
                <input
                    type="password"
                    placeholder=placeholder
                    class="input input-password"
                    prop:value=move || key_value.get()
                    on:input=move |ev| set_key_value.set(event_target_value(&ev))
                    disabled=move || is_busy.get()
                />
                <button class="btn btn-save" on:click=save_key disabled=move || is_busy.get()>
                    {move || if is_busy.get() { "Saving..." } else { "Save" }}
                </button>
                <Show when=move || is_saved.get()>
                    <button class="btn btn-delete" on:click=delete_key disabled=move || is_busy.get()>
                        "Delete"
                    </button>
                </Show>
            </div>
            <div class="key-status-row">
                {move || match (error_message.get(), is_saved.get()) {
                    (Some(err), _) => view! {
                        <span class="status-text status-error">{err}</span>
                    }.into_any(),
                    (None, true) => view! {
                        <span class="status-text status-saved">"Saved to Keychain"</span>
                    }.into_any(),
                    (None, false) => view! {
                        <span class="status-text status-not-set">"Not configured"</span>
                    }.into_any(),
                }}
            </div>
        </div>
    }
}
