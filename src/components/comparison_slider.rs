//! Before/after comparison with a draggable split.

use leptos::html::Div;
use leptos::prelude::*;

use crate::split::SplitPosition;

/// What is shown full-bleed behind the "before" mask.
#[derive(Debug, Clone, PartialEq)]
pub enum AfterLayer {
    /// An independently rendered image.
    Image(String),
    /// The base image with a CSS `filter` applied.
    Filtered(String),
}

#[component]
pub fn ComparisonSlider(
    /// Source of the "before" image, usually a data URL
    #[prop(into)]
    before: Signal<String>,
    #[prop(into)] after: Signal<AfterLayer>,
) -> impl IntoView {
    let container = NodeRef::<Div>::new();
    let (position, set_position) = signal(SplitPosition::INITIAL);
    let (dragging, set_dragging) = signal(false);

    let move_to = move |client_x: f64| {
        if let Some(el) = container.get_untracked() {
            let rect = el.get_bounding_client_rect();
            set_position.set(SplitPosition::from_pointer(client_x, rect.left(), rect.width()));
        }
    };

    let after_view = move || match after.get() {
        AfterLayer::Image(src) => view! {
            <img class="compare-layer compare-after" src=src alt="After" draggable="false" />
        }
        .into_any(),
        AfterLayer::Filtered(css) => view! {
            <img
                class="compare-layer compare-after"
                src=move || before.get()
                alt="After"
                draggable="false"
                style:filter=css
            />
        }
        .into_any(),
    };

    view! {
        <div
            class="compare"
            node_ref=container
            on:mousedown=move |ev: web_sys::MouseEvent| {
                set_dragging.set(true);
                move_to(ev.client_x() as f64);
            }
            on:mousemove=move |ev: web_sys::MouseEvent| {
                if dragging.get_untracked() {
                    move_to(ev.client_x() as f64);
                }
            }
            on:mouseup=move |_| set_dragging.set(false)
            on:mouseleave=move |_| set_dragging.set(false)
            on:touchstart=move |ev: web_sys::TouchEvent| {
                if let Some(touch) = ev.touches().get(0) {
                    move_to(touch.client_x() as f64);
                }
            }
            on:touchmove=move |ev: web_sys::TouchEvent| {
                ev.prevent_default();
                if let Some(touch) = ev.touches().get(0) {
                    move_to(touch.client_x() as f64);
                }
            }
        >
            {after_view}
            <div
                class="compare-before"
                style:width=move || format!("{}%", position.get().before_width_percent())
                style:display=move || if position.get().is_hidden() { "none" } else { "block" }
            >
                <img
                    class="compare-layer"
                    src=move || before.get()
                    alt="Before"
                    draggable="false"
                    style:width=move || format!("{}%", position.get().magnification_percent())
                />
            </div>
            <div
                class="compare-handle"
                style:left=move || format!("{}%", position.get().percent())
            ></div>
            <span class="compare-label compare-label-before">"Before"</span>
            <span class="compare-label compare-label-after">"After"</span>
        </div>
    }
}
