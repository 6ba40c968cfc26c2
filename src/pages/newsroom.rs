//! Media-house dashboard: licensable photos and saved style profiles.

use leptos::prelude::*;

use crate::commands::NegotiationContext;
use crate::components::negotiation_dialog::NegotiationDialog;
use crate::components::profile_summary::ProfileCard;
use crate::context::{NewsroomState, NewsroomTab, UserProfileContext, Watermark};

#[derive(Debug, Clone, PartialEq)]
pub struct Listing {
    pub id: u32,
    pub title: &'static str,
    pub author: &'static str,
    pub location: &'static str,
    pub base_price: u64,
}

impl Listing {
    pub fn negotiation_context(&self) -> NegotiationContext {
        NegotiationContext {
            item_title: self.title.to_string(),
            author: self.author.to_string(),
            base_price: self.base_price,
            currency: "KES".to_string(),
        }
    }
}

pub fn listings() -> Vec<Listing> {
    vec![
        Listing {
            id: 1,
            title: "Rift Valley Storm",
            author: "K. Achieng",
            location: "Naivasha",
            base_price: 22_000,
        },
        Listing {
            id: 2,
            title: "Kibera Rooftops",
            author: "J. Mwangi",
            location: "Nairobi",
            base_price: 30_000,
        },
        Listing {
            id: 3,
            title: "Maasai Mara at First Light",
            author: "W. Njeri",
            location: "Narok",
            base_price: 25_000,
        },
        Listing {
            id: 4,
            title: "Old Town Dhow",
            author: "A. Salim",
            location: "Lamu",
            base_price: 18_500,
        },
    ]
}

#[component]
pub fn NewsroomPage() -> impl IntoView {
    let state = NewsroomState::new();
    provide_context(state);

    let tab_button = move |tab: NewsroomTab, label: &'static str| {
        view! {
            <button
                class="tab"
                class:tab-active=move || state.tab.get() == tab
                on:click=move |_| state.tab.set(tab)
            >
                {label}
            </button>
        }
    };

    view! {
        <div class="page newsroom-page">
            <style>{include_str!("newsroom.css")}</style>

            <h2>"Newsroom"</h2>
            <div class="tabs">
                {tab_button(NewsroomTab::Licensing, "Licensing")}
                {tab_button(NewsroomTab::StyleProfiles, "Style Profiles")}
            </div>

            {move || match state.tab.get() {
                NewsroomTab::Licensing => view! { <LicensingTab /> }.into_any(),
                NewsroomTab::StyleProfiles => view! { <StyleProfilesTab /> }.into_any(),
            }}
        </div>
    }
}

#[component]
fn LicensingTab() -> impl IntoView {
    let state = expect_context::<NewsroomState>();
    let (negotiating, set_negotiating) = signal::<Option<NegotiationContext>>(None);

    view! {
        <div class="licensing-tab">
            <div class="form-group watermark-select">
                <label for="watermark">"Preview watermark"</label>
                <select
                    id="watermark"
                    class="input"
                    on:change=move |ev| state.watermark.set(Watermark::parse(&event_target_value(&ev)))
                >
                    {Watermark::ALL.into_iter().map(|w| view! {
                        <option value=w.as_str() selected=move || state.watermark.get() == w>
                            {w.label()}
                        </option>
                    }).collect_view()}
                </select>
            </div>

            <div class="card-grid">
                {listings().into_iter().map(|listing| {
                    let context = listing.negotiation_context();
                    view! {
                        <div class="card listing-card">
                            <div class=move || format!("listing-thumb watermark-{}", state.watermark.get().as_str())>
                                <span class="listing-location">{listing.location}</span>
                            </div>
                            <h3>{listing.title}</h3>
                            <p class="listing-author">{listing.author}</p>
                            <p class="listing-price">{format!("KES {}", group_thousands(listing.base_price))}</p>
                            <button
                                class="btn btn-primary"
                                on:click=move |_| set_negotiating.set(Some(context.clone()))
                            >
                                "Negotiate"
                            </button>
                        </div>
                    }
                }).collect_view()}
            </div>

            {move || negotiating.get().map(|context| view! {
                <NegotiationDialog
                    context=context
                    on_close=Callback::new(move |_| set_negotiating.set(None))
                />
            })}
        </div>
    }
}

#[component]
fn StyleProfilesTab() -> impl IntoView {
    let profiles = expect_context::<UserProfileContext>().profiles;

    view! {
        <div class="style-profiles-tab">
            <Show
                when=move || profiles.with(|p| !p.is_empty())
                fallback=|| view! {
                    <p class="empty-state">
                        "No style profiles yet. Train one in the "
                        <a href="/style-hub">"Style Hub"</a>
                        "."
                    </p>
                }
            >
                <div class="card-grid">
                    <For
                        each=move || profiles.get()
                        key=|p| p.id.clone()
                        children=|profile| view! { <ProfileCard profile=profile /> }
                    />
                </div>
            </Show>
        </div>
    }
}

/// 25000 -> "25,000". The back end's `format_thousands` is not reachable
/// from the WASM crate, so the grouping lives here too.
fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}
