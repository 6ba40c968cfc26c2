//! Ordered filter composition derived from [`EditingInstructions`].
//!
//! The chain is always brightness, contrast, saturation, sepia, hue-rotate,
//! in that order. Per-pixel math follows the CSS Filter Effects matrices so
//! the CSS string shown in the comparison view and the rendered PNG agree.

use serde::Serialize;

use super::instructions::EditingInstructions;

// Luminance weights shared by the saturate and hue-rotate matrices.
const LUM_R: f32 = 0.213;
const LUM_G: f32 = 0.715;
const LUM_B: f32 = 0.072;

type Matrix3 = [[f32; 3]; 3];

/// One filter primitive with its amount.
///
/// Brightness, contrast, saturate and sepia amounts are multipliers
/// (1.0 = unchanged for the first three, 0.0 = unchanged for sepia).
/// Hue rotation is in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "kind", content = "amount", rename_all = "snake_case")]
pub enum FilterStage {
    Brightness(f32),
    Contrast(f32),
    Saturate(f32),
    Sepia(f32),
    HueRotate(f32),
}

impl FilterStage {
    pub fn amount(&self) -> f32 {
        match *self {
            FilterStage::Brightness(a)
            | FilterStage::Contrast(a)
            | FilterStage::Saturate(a)
            | FilterStage::Sepia(a)
            | FilterStage::HueRotate(a) => a,
        }
    }

    pub fn css(&self) -> String {
        match *self {
            FilterStage::Brightness(a) => format!("brightness({:.2})", a),
            FilterStage::Contrast(a) => format!("contrast({:.2})", a),
            FilterStage::Saturate(a) => format!("saturate({:.2})", a),
            FilterStage::Sepia(a) => format!("sepia({:.2})", a),
            FilterStage::HueRotate(deg) => format!("hue-rotate({:.1}deg)", deg),
        }
    }

    /// Apply to one normalised RGB pixel. Output is clamped to [0, 1].
    pub fn apply(&self, rgb: [f32; 3]) -> [f32; 3] {
        let out = match *self {
            FilterStage::Brightness(a) => rgb.map(|v| v * a),
            FilterStage::Contrast(a) => rgb.map(|v| (v - 0.5) * a + 0.5),
            FilterStage::Saturate(s) => mul(&saturate_matrix(s), rgb),
            FilterStage::Sepia(a) => mul(&sepia_matrix(a.clamp(0.0, 1.0)), rgb),
            FilterStage::HueRotate(deg) => mul(&hue_rotate_matrix(deg), rgb),
        };
        out.map(|v| v.clamp(0.0, 1.0))
    }
}

/// Fixed-order filter composition.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FilterChain {
    stages: Vec<FilterStage>,
}

impl FilterChain {
    /// Clamp the instructions, then emit the five stages in contract order.
    pub fn from_instructions(instructions: &EditingInstructions) -> Self {
        let i = instructions.clamped();
        Self {
            stages: vec![
                FilterStage::Brightness(i.brightness / 100.0),
                FilterStage::Contrast(i.contrast / 100.0),
                FilterStage::Saturate(i.saturation / 100.0),
                FilterStage::Sepia(i.sepia / 100.0),
                FilterStage::HueRotate(i.hue_rotate),
            ],
        }
    }

    pub fn stages(&self) -> &[FilterStage] {
        &self.stages
    }

    /// CSS `filter` property value.
    pub fn to_css(&self) -> String {
        self.stages
            .iter()
            .map(FilterStage::css)
            .collect::<Vec<_>>()
            .join(" ")
    }

    pub fn apply_rgb(&self, rgb: [f32; 3]) -> [f32; 3] {
        self.stages
            .iter()
            .fold(rgb.map(|v| v.clamp(0.0, 1.0)), |px, stage| stage.apply(px))
    }

    pub fn is_identity(&self) -> bool {
        self.stages.iter().all(|stage| match *stage {
            FilterStage::Brightness(a) | FilterStage::Contrast(a) | FilterStage::Saturate(a) => {
                a == 1.0
            }
            FilterStage::Sepia(a) | FilterStage::HueRotate(a) => a == 0.0,
        })
    }
}

fn mul(m: &Matrix3, [r, g, b]: [f32; 3]) -> [f32; 3] {
    [
        m[0][0] * r + m[0][1] * g + m[0][2] * b,
        m[1][0] * r + m[1][1] * g + m[1][2] * b,
        m[2][0] * r + m[2][1] * g + m[2][2] * b,
    ]
}

fn saturate_matrix(s: f32) -> Matrix3 {
    [
        [LUM_R + (1.0 - LUM_R) * s, LUM_G - LUM_G * s, LUM_B - LUM_B * s],
        [LUM_R - LUM_R * s, LUM_G + (1.0 - LUM_G) * s, LUM_B - LUM_B * s],
        [LUM_R - LUM_R * s, LUM_G - LUM_G * s, LUM_B + (1.0 - LUM_B) * s],
    ]
}

fn sepia_matrix(amount: f32) -> Matrix3 {
    let k = 1.0 - amount;
    [
        [0.393 + 0.607 * k, 0.769 - 0.769 * k, 0.189 - 0.189 * k],
        [0.349 - 0.349 * k, 0.686 + 0.314 * k, 0.168 - 0.168 * k],
        [0.272 - 0.272 * k, 0.534 - 0.534 * k, 0.131 + 0.869 * k],
    ]
}

fn hue_rotate_matrix(degrees: f32) -> Matrix3 {
    let (sin, cos) = degrees.to_radians().sin_cos();
    [
        [
            LUM_R + cos * (1.0 - LUM_R) - sin * LUM_R,
            LUM_G - cos * LUM_G - sin * LUM_G,
            LUM_B - cos * LUM_B + sin * (1.0 - LUM_B),
        ],
        [
            LUM_R - cos * LUM_R + sin * 0.143,
            LUM_G + cos * (1.0 - LUM_G) + sin * 0.140,
            LUM_B - cos * LUM_B - sin * 0.283,
        ],
        [
            LUM_R - cos * LUM_R - sin * (1.0 - LUM_R),
            LUM_G - cos * LUM_G + sin * LUM_G,
            LUM_B + cos * (1.0 - LUM_B) + sin * LUM_B,
        ],
    ]
}
