//! Style Hub wizard: collect pairs, derive a profile, review and save it.

use leptos::prelude::*;
use wasm_bindgen_futures::spawn_local;

use crate::commands::{self, PairPayload, StyleProfile};
use crate::components::comparison_slider::{AfterLayer, ComparisonSlider};
use crate::components::pair_uploader::PairUploader;
use crate::components::profile_summary::InstructionsTable;
use crate::context::{Toasts, UserProfileContext};
use crate::files::UploadedImage;
use crate::pairs::{PairCollector, PairId, MAX_PAIRS_SENT, MIN_PAIRS_FOR_ANALYSIS};

#[derive(Debug, Clone, PartialEq)]
pub enum WizardStep {
    Upload,
    Analyzing,
    Review(StyleProfile),
}

fn payloads(collector: &PairCollector<UploadedImage>) -> Vec<PairPayload> {
    collector
        .pairs()
        .iter()
        .take(MAX_PAIRS_SENT)
        .map(|p| PairPayload {
            raw_base64: p.raw.base64.clone(),
            edited_base64: p.edited.base64.clone(),
        })
        .collect()
}

#[component]
pub fn StyleHubPage() -> impl IntoView {
    let toasts = expect_context::<Toasts>();

    let collector = RwSignal::new(PairCollector::<UploadedImage>::new());
    let (step, set_step) = signal(WizardStep::Upload);
    let (name_hint, set_name_hint) = signal(String::new());

    let on_batch = Callback::new(move |images: Vec<UploadedImage>| {
        // Incomplete batches are ignored without feedback
        collector.update(|c| {
            let _ = c.add_batch(images);
        });
    });

    let remove_pair = move |id: PairId| {
        collector.update(|c| {
            c.remove(id);
        });
    };

    let analyzing = Signal::derive(move || step.get() == WizardStep::Analyzing);

    let on_analyze = move |_| {
        if analyzing.get_untracked() || !collector.with_untracked(|c| c.can_analyze()) {
            return;
        }
        let pairs = collector.with_untracked(payloads);
        let name = Some(name_hint.get_untracked().trim().to_string()).filter(|n| !n.is_empty());
        set_step.set(WizardStep::Analyzing);

        spawn_local(async move {
            match commands::analyze_style(pairs, name).await {
                Ok(profile) => set_step.set(WizardStep::Review(profile)),
                Err(e) => {
                    toasts.error(format!("Style analysis failed. {}", e));
                    set_step.set(WizardStep::Upload);
                }
            }
        });
    };

    let start_over = Callback::new(move |_: ()| {
        collector.update(|c| c.clear());
        set_name_hint.set(String::new());
        set_step.set(WizardStep::Upload);
    });

    view! {
        <div class="page style-hub-page">
            <style>{include_str!("style_hub.css")}</style>

            <h2>"Style Hub"</h2>
            <ol class="wizard-steps">
                <li class:wizard-current=move || step.get() == WizardStep::Upload>"Upload pairs"</li>
                <li class:wizard-current=move || analyzing.get()>"Analyze"</li>
                <li class:wizard-current=move || matches!(step.get(), WizardStep::Review(_))>"Review"</li>
            </ol>

            {move || match step.get() {
                WizardStep::Upload | WizardStep::Analyzing => view! {
                    <div class="upload-step">
                        <p class="page-description">
                            {format!(
                                "Add at least {} raw/edited pairs of your own work. The first three are analyzed.",
                                MIN_PAIRS_FOR_ANALYSIS
                            )}
                        </p>

                        <PairUploader on_batch=on_batch disabled=analyzing />

                        <div class="pair-grid">
                            <For
                                each=move || collector.with(|c| c.pairs().to_vec())
                                key=|pair| pair.id
                                children=move |pair| {
                                    let id = pair.id;
                                    view! {
                                        <div class="pair-card">
                                            <img src=pair.raw.preview.clone() alt=pair.raw.name.clone() />
                                            <img src=pair.edited.preview.clone() alt=pair.edited.name.clone() />
                                            <button
                                                class="btn btn-delete"
                                                disabled=move || analyzing.get()
                                                on:click=move |_| remove_pair(id)
                                            >
                                                "Remove"
                                            </button>
                                        </div>
                                    }
                                }
                            />
                        </div>

                        <div class="form-group">
                            <label for="style-name">"Profile name (optional)"</label>
                            <input
                                id="style-name"
                                type="text"
                                class="input"
                                placeholder="e.g. Golden Hour Film"
                                prop:value=move || name_hint.get()
                                on:input=move |ev| set_name_hint.set(event_target_value(&ev))
                                disabled=move || analyzing.get()
                            />
                        </div>

                        <div class="action-buttons">
                            <button
                                class="btn btn-primary"
                                on:click=on_analyze
                                disabled=move || analyzing.get() || !collector.with(|c| c.can_analyze())
                            >
                                {move || {
                                    let n = collector.with(|c| c.len());
                                    if analyzing.get() {
                                        "Analyzing...".to_string()
                                    } else if n < MIN_PAIRS_FOR_ANALYSIS {
                                        format!("Analyze ({}/{} pairs)", n, MIN_PAIRS_FOR_ANALYSIS)
                                    } else {
                                        "Analyze Style".to_string()
                                    }
                                }}
                            </button>
                        </div>

                        <Show when=move || analyzing.get()>
                            <div class="loading-indicator">
                                <div class="spinner"></div>
                                <p>"Studying your edits..."</p>
                                <p class="hint">"This may take 10-30 seconds"</p>
                            </div>
                        </Show>
                    </div>
                }.into_any(),

                WizardStep::Review(profile) => {
                    let base = collector.with_untracked(|c| c.pairs().first().map(|p| p.raw.clone()));
                    view! {
                        <ReviewStep profile=profile base=base on_start_over=start_over />
                    }.into_any()
                }
            }}
        </div>
    }
}

#[component]
fn ReviewStep(
    profile: StyleProfile,
    /// Raw image the profile is previewed on
    base: Option<UploadedImage>,
    on_start_over: Callback<()>,
) -> impl IntoView {
    let toasts = expect_context::<Toasts>();
    let user_profiles = expect_context::<UserProfileContext>();

    let (filter_css, set_filter_css) = signal(String::new());
    let (rendered, set_rendered) = signal::<Option<String>>(None);
    let (is_rendering, set_is_rendering) = signal(false);
    let (is_saved, set_is_saved) = signal(false);

    let profile = StoredValue::new(profile);
    let base = StoredValue::new(base);

    Effect::new(move |_| {
        let instructions = profile.with_value(|p| p.instructions.clone());
        spawn_local(async move {
            match commands::filter_preview(&instructions).await {
                Ok(preview) => set_filter_css.set(preview.css),
                Err(e) => toasts.error(format!("Preview unavailable: {}", e)),
            }
        });
    });

    let render_full = move |_| {
        let Some(image) = base.get_value() else {
            return;
        };
        if is_rendering.get_untracked() {
            return;
        }
        set_is_rendering.set(true);
        let instructions = profile.with_value(|p| p.instructions.clone());
        spawn_local(async move {
            match commands::render_style(&image.base64, &instructions).await {
                Ok(png) => set_rendered.set(Some(format!("data:image/png;base64,{}", png))),
                Err(e) => toasts.error(format!("Render failed: {}", e)),
            }
            set_is_rendering.set(false);
        });
    };

    let save = move |_| {
        if user_profiles.save(profile.get_value()) {
            toasts.success(format!("Saved style profile \"{}\"", profile.with_value(|p| p.name.clone())));
        }
        set_is_saved.set(true);
    };

    let before = Signal::derive(move || base.with_value(|b| b.as_ref().map(|i| i.preview.clone()).unwrap_or_default()));
    let after = Signal::derive(move || match rendered.get() {
        Some(src) => AfterLayer::Image(src),
        None => AfterLayer::Filtered(filter_css.get()),
    });

    view! {
        <div class="review-step">
            <div class="review-header">
                <h3>{profile.with_value(|p| p.name.clone())}</h3>
                <p class="profile-description">{profile.with_value(|p| p.description.clone())}</p>
            </div>

            <div class="review-body">
                <Show
                    when=move || base.with_value(|b| b.is_some())
                    fallback=|| view! { <p class="hint">"No image to preview."</p> }
                >
                    <ComparisonSlider before=before after=after />
                </Show>
                <InstructionsTable instructions=profile.with_value(|p| p.instructions.clone()) />
            </div>

            <div class="action-buttons">
                <button
                    class="btn btn-secondary"
                    on:click=render_full
                    disabled=move || is_rendering.get() || rendered.get().is_some()
                >
                    {move || if is_rendering.get() { "Rendering..." } else { "Render full quality" }}
                </button>
                <button class="btn btn-primary" on:click=save disabled=move || is_saved.get()>
                    {move || if is_saved.get() { "Saved" } else { "Save profile" }}
                </button>
                <button class="btn btn-secondary" on:click=move |_| on_start_over.run(())>
                    "Train another style"
                </button>
            </div>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_payloads_follow_collector_order() {
        let mut collector = PairCollector::new();
        for i in 0..3 {
            collector
                .add_batch(vec![
                    UploadedImage::new(format!("raw{}.jpg", i), "image/jpeg", format!("R{}", i)),
                    UploadedImage::new(format!("edit{}.jpg", i), "image/jpeg", format!("E{}", i)),
                ])
                .unwrap();
        }
        let first = collector.pairs()[0].id;
        collector.remove(first);

        let sent = payloads(&collector);
        assert_eq!(sent.len(), 2);
        assert_eq!(sent[0].raw_base64, "R1");
        assert_eq!(sent[1].edited_base64, "E2");
    }

    #[test]
    fn test_payloads_send_only_the_analyzed_pairs() {
        let mut collector = PairCollector::new();
        for i in 0..5 {
            collector
                .add_batch(vec![
                    UploadedImage::new("r.jpg", "image/jpeg", format!("R{}", i)),
                    UploadedImage::new("e.jpg", "image/jpeg", format!("E{}", i)),
                ])
                .unwrap();
        }
        let sent = payloads(&collector);
        assert_eq!(sent.len(), MAX_PAIRS_SENT);
        assert_eq!(sent[2].raw_base64, "R2");
    }
}
