pub mod ai;
mod commands;
pub mod error;
pub mod negotiation;
pub mod style;

pub use negotiation::{NegotiationSessions, NegotiationTurnProcessor, TurnOutcome};
pub use style::{EditingInstructions, FilterChain, StyleAnalyzer, StyleProfile};

pub fn run() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    tauri::Builder::default()
        .plugin(tauri_plugin_store::Builder::new().build())
        .manage(NegotiationSessions::new())
        .invoke_handler(tauri::generate_handler![
            commands::keychain::set_api_key,
            commands::keychain::get_api_key,
            commands::keychain::delete_api_key,
            commands::config::get_preference,
            commands::config::set_preference,
            commands::config::get_ai_status,
            commands::models::list_models,
            commands::style::analyze_style,
            commands::style::render_style,
            commands::style::filter_preview,
            commands::negotiation::open_negotiation,
            commands::negotiation::submit_offer,
            commands::negotiation::close_negotiation,
        ])
        .setup(|app| {
            // Log the configured provider so a missing key is obvious at startup
            use tauri_plugin_store::StoreExt;
            if let Ok(store) = app.store("preferences.json") {
                let provider = store
                    .get("ai_provider")
                    .and_then(|v| v.as_str().map(|s| s.to_string()))
                    .filter(|s| !s.is_empty())
                    .unwrap_or_else(|| ai::Provider::Claude.to_string());
                tracing::info!("Darkroom starting with AI provider '{}'", provider);
            }
            Ok(())
        })
        .run(tauri::generate_context!())
        .expect("error while running tauri application");
}
