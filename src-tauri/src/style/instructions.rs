//! Bounded editing parameters that make up a style profile.

use serde::{Deserialize, Serialize};

/// Valid range and neutral value of one numeric editing parameter.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParamRange {
    pub min: f32,
    pub max: f32,
    pub neutral: f32,
}

impl ParamRange {
    const fn new(min: f32, max: f32, neutral: f32) -> Self {
        Self { min, max, neutral }
    }

    /// Clamp into range. Non-finite input falls back to the neutral value.
    pub fn clamp(&self, value: f32) -> f32 {
        if value.is_finite() {
            value.clamp(self.min, self.max)
        } else {
            self.neutral
        }
    }

    pub fn contains(&self, value: f32) -> bool {
        value.is_finite() && value >= self.min && value <= self.max
    }
}

pub const BRIGHTNESS: ParamRange = ParamRange::new(80.0, 150.0, 100.0);
pub const CONTRAST: ParamRange = ParamRange::new(80.0, 150.0, 100.0);
pub const SATURATION: ParamRange = ParamRange::new(50.0, 200.0, 100.0);
pub const WARMTH: ParamRange = ParamRange::new(0.0, 100.0, 50.0);
pub const GRAIN: ParamRange = ParamRange::new(0.0, 10.0, 0.0);
pub const SEPIA: ParamRange = ParamRange::new(0.0, 100.0, 0.0);
pub const HUE_ROTATE: ParamRange = ParamRange::new(-180.0, 180.0, 0.0);

/// The numeric "delta" a photographer applies, plus a text description of
/// the aesthetic.
///
/// Brightness, contrast and saturation are percentages (100 = unchanged),
/// sepia is a percentage of full sepia, hue rotation is in degrees. Warmth
/// and grain are carried but not rendered.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditingInstructions {
    pub brightness: f32,
    pub contrast: f32,
    pub saturation: f32,
    pub warmth: f32,
    pub grain: f32,
    pub sepia: f32,
    #[serde(alias = "hueRotate", alias = "hue_shift", alias = "hueShift")]
    pub hue_rotate: f32,
    pub description: String,
}

impl Default for EditingInstructions {
    fn default() -> Self {
        Self::neutral()
    }
}

impl EditingInstructions {
    /// The identity edit.
    pub fn neutral() -> Self {
        Self {
            brightness: BRIGHTNESS.neutral,
            contrast: CONTRAST.neutral,
            saturation: SATURATION.neutral,
            warmth: WARMTH.neutral,
            grain: GRAIN.neutral,
            sepia: SEPIA.neutral,
            hue_rotate: HUE_ROTATE.neutral,
            description: String::new(),
        }
    }

    /// (name, value, range) for every numeric field, in declaration order.
    pub fn numeric_fields(&self) -> [(&'static str, f32, ParamRange); 7] {
        [
            ("brightness", self.brightness, BRIGHTNESS),
            ("contrast", self.contrast, CONTRAST),
            ("saturation", self.saturation, SATURATION),
            ("warmth", self.warmth, WARMTH),
            ("grain", self.grain, GRAIN),
            ("sepia", self.sepia, SEPIA),
            ("hue_rotate", self.hue_rotate, HUE_ROTATE),
        ]
    }

    /// Names of numeric fields outside their documented range.
    pub fn out_of_range_fields(&self) -> Vec<&'static str> {
        self.numeric_fields()
            .into_iter()
            .filter(|(_, value, range)| !range.contains(*value))
            .map(|(name, _, _)| name)
            .collect()
    }

    /// Copy with every numeric field forced into range.
    pub fn clamped(&self) -> Self {
        Self {
            brightness: BRIGHTNESS.clamp(self.brightness),
            contrast: CONTRAST.clamp(self.contrast),
            saturation: SATURATION.clamp(self.saturation),
            warmth: WARMTH.clamp(self.warmth),
            grain: GRAIN.clamp(self.grain),
            sepia: SEPIA.clamp(self.sepia),
            hue_rotate: HUE_ROTATE.clamp(self.hue_rotate),
            description: self.description.clone(),
        }
    }

    pub fn is_neutral(&self) -> bool {
        self.numeric_fields()
            .iter()
            .all(|(_, value, range)| *value == range.neutral)
    }
}
