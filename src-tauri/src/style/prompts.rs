//! Prompt and schema for deriving a style profile from training pairs.

use super::instructions::{BRIGHTNESS, CONTRAST, GRAIN, HUE_ROTATE, SATURATION, SEPIA, WARMTH};

pub const STYLE_SYSTEM_PROMPT: &str = "You are a senior photo retoucher. You compare unedited photographs with the photographer's finished edits and describe the editing style as numbers. Always respond with valid JSON only, no markdown formatting or code blocks.";

/// JSON schema for the style analysis response.
pub fn style_instructions_schema() -> serde_json::Value {
    serde_json::json!({
        "type": "object",
        "properties": {
            "name": {
                "type": "string",
                "description": "Short evocative name for the style"
            },
            "brightness": {"type": "number", "minimum": BRIGHTNESS.min, "maximum": BRIGHTNESS.max},
            "contrast": {"type": "number", "minimum": CONTRAST.min, "maximum": CONTRAST.max},
            "saturation": {"type": "number", "minimum": SATURATION.min, "maximum": SATURATION.max},
            "warmth": {"type": "number", "minimum": WARMTH.min, "maximum": WARMTH.max},
            "grain": {"type": "number", "minimum": GRAIN.min, "maximum": GRAIN.max},
            "sepia": {"type": "number", "minimum": SEPIA.min, "maximum": SEPIA.max},
            "hue_rotate": {"type": "number", "minimum": HUE_ROTATE.min, "maximum": HUE_ROTATE.max},
            "description": {
                "type": "string",
                "description": "One or two sentences describing the aesthetic"
            }
        },
        "required": ["brightness", "contrast", "saturation", "description"],
        "additionalProperties": false
    })
}

/// Build the analysis instruction for `pair_count` interleaved pairs.
pub fn build_style_analysis_prompt(pair_count: usize) -> String {
    format!(
        r#"You will receive {pair_count} image pairs. Each pair is a RAW photo followed by the photographer's EDITED version of the same photo.

Infer the single, consistent editing delta that turns each RAW image into its EDITED version, and express it as these parameters:
- brightness: {b_min}-{b_max} (100 = unchanged)
- contrast: {c_min}-{c_max} (100 = unchanged)
- saturation: {s_min}-{s_max} (100 = unchanged)
- warmth: {w_min}-{w_max} (50 = neutral, higher = warmer)
- grain: {g_min}-{g_max} (0 = none)
- sepia: {p_min}-{p_max} (0 = none)
- hue_rotate: {h_min} to {h_max} degrees (0 = none)
- description: one or two sentences describing the aesthetic
- name: a short name for the style

Return a single JSON object with exactly these keys. Use numbers, not strings, for numeric fields. Stay within the ranges."#,
        pair_count = pair_count,
        b_min = BRIGHTNESS.min,
        b_max = BRIGHTNESS.max,
        c_min = CONTRAST.min,
        c_max = CONTRAST.max,
        s_min = SATURATION.min,
        s_max = SATURATION.max,
        w_min = WARMTH.min,
        w_max = WARMTH.max,
        g_min = GRAIN.min,
        g_max = GRAIN.max,
        p_min = SEPIA.min,
        p_max = SEPIA.max,
        h_min = HUE_ROTATE.min,
        h_max = HUE_ROTATE.max,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_schema_requires_core_fields() {
        let schema = style_instructions_schema();
        let required: Vec<&str> = schema["required"]
            .as_array()
            .unwrap()
            .iter()
            .map(|v| v.as_str().unwrap())
            .collect();
        assert_eq!(required, vec!["brightness", "contrast", "saturation", "description"]);
    }

    #[test]
    fn test_schema_carries_ranges() {
        let schema = style_instructions_schema();
        assert_eq!(schema["properties"]["saturation"]["maximum"], 200.0);
        assert_eq!(schema["properties"]["hue_rotate"]["minimum"], -180.0);
    }

    #[test]
    fn test_prompt_mentions_pair_count_and_every_field() {
        let prompt = build_style_analysis_prompt(3);
        assert!(prompt.contains("3 image pairs"));
        for field in [
            "brightness",
            "contrast",
            "saturation",
            "warmth",
            "grain",
            "sepia",
            "hue_rotate",
            "description",
        ] {
            assert!(prompt.contains(field), "prompt missing {}", field);
        }
        assert!(prompt.contains("80-150"));
        assert!(prompt.contains("-180 to 180"));
    }
}
