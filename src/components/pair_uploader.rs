//! Drop zone for one raw/edited pair at a time.

use leptos::prelude::*;
use wasm_bindgen_futures::spawn_local;

use crate::files::{read_file_list, UploadedImage};

#[component]
pub fn PairUploader(
    /// Receives every file of a batch in selection order
    on_batch: Callback<Vec<UploadedImage>>,
    #[prop(into)] disabled: Signal<bool>,
) -> impl IntoView {
    let (is_over, set_is_over) = signal(false);
    let (is_loading, set_is_loading) = signal(false);
    let file_input_id = "pair-file-input";

    let load = move |files: web_sys::FileList| {
        set_is_loading.set(true);
        spawn_local(async move {
            match read_file_list(files).await {
                Ok(images) => on_batch.run(images),
                Err(e) => {
                    web_sys::console::error_1(&format!("Failed to read files: {}", e).into());
                }
            }
            set_is_loading.set(false);
        });
    };

    let on_drop = move |ev: web_sys::DragEvent| {
        ev.prevent_default();
        set_is_over.set(false);
        if disabled.get_untracked() {
            return;
        }
        if let Some(files) = ev.data_transfer().and_then(|dt| dt.files()) {
            load(files);
        }
    };

    let on_input_change = move |ev: web_sys::Event| {
        let input: web_sys::HtmlInputElement = event_target(&ev);
        if let Some(files) = input.files() {
            load(files);
        }
        // Allow picking the same files again
        input.set_value("");
    };

    view! {
        <div
            class="drop-zone"
            class:drop-zone-active=move || is_over.get()
            class:drop-zone-loading=move || is_loading.get()
            on:dragover=move |ev: web_sys::DragEvent| {
                ev.prevent_default();
                set_is_over.set(true);
            }
            on:dragleave=move |_| set_is_over.set(false)
            on:drop=on_drop
        >
            <Show
                when=move || is_loading.get()
                fallback=move || view! {
                    <div class="drop-zone-content">
                        <p class="drop-main">"Drop a RAW image and its edited version"</p>
                        <p class="drop-hint">"Select both files together: raw first, edited second"</p>
                        <label for=file_input_id class="btn btn-secondary">
                            "Browse Files"
                        </label>
                        <input
                            type="file"
                            id=file_input_id
                            accept="image/*"
                            multiple=true
                            style="display: none"
                            disabled=move || disabled.get()
                            on:change=on_input_change
                        />
                    </div>
                }
            >
                <div class="drop-zone-loading-content">
                    <div class="spinner"></div>
                    <p>"Loading images..."</p>
                </div>
            </Show>
        </div>
    }
}
