use leptos::prelude::*;

use crate::commands::{EditingInstructions, StyleProfile};

/// (label, value, unit, neutral, rendered)
fn instruction_rows(i: &EditingInstructions) -> Vec<(&'static str, f32, &'static str, f32, bool)> {
    vec![
        ("Brightness", i.brightness, "%", 100.0, true),
        ("Contrast", i.contrast, "%", 100.0, true),
        ("Saturation", i.saturation, "%", 100.0, true),
        ("Sepia", i.sepia, "%", 0.0, true),
        ("Hue rotate", i.hue_rotate, "\u{00b0}", 0.0, true),
        ("Warmth", i.warmth, "", 50.0, false),
        ("Grain", i.grain, "", 0.0, false),
    ]
}

fn format_value(value: f32, unit: &str) -> String {
    if value.fract() == 0.0 {
        format!("{:.0}{}", value, unit)
    } else {
        format!("{:.1}{}", value, unit)
    }
}

#[component]
pub fn InstructionsTable(instructions: EditingInstructions) -> impl IntoView {
    let rows = instruction_rows(&instructions);

    view! {
        <table class="instructions-table">
            <tbody>
                {rows.into_iter().map(|(label, value, unit, neutral, rendered)| {
                    let changed = (value - neutral).abs() > f32::EPSILON;
                    view! {
                        <tr class:instruction-changed=changed class:instruction-unrendered=!rendered>
                            <th>{label}</th>
                            <td>{format_value(value, unit)}</td>
                            <td class="instruction-note">
                                {if rendered { "" } else { "not applied in preview" }}
                            </td>
                        </tr>
                    }
                }).collect_view()}
            </tbody>
        </table>
    }
}

#[component]
pub fn ProfileCard(profile: StyleProfile) -> impl IntoView {
    let created = profile
        .created_at
        .split('T')
        .next()
        .unwrap_or_default()
        .to_string();

    view! {
        <div class="card profile-card">
            <h3>{profile.name}</h3>
            <p class="profile-description">{profile.description}</p>
            <p class="profile-meta">"Created " {created}</p>
            <InstructionsTable instructions=profile.instructions />
        </div>
    }
}
