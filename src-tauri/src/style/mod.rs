//! Style learning pipeline: training pairs in, style profile out, profile
//! re-applied to new images.

pub mod analyzer;
pub mod filter;
pub mod image_prep;
pub mod instructions;
pub mod profile;
pub mod prompts;
pub mod render;

pub use analyzer::{StyleAnalyzer, MAX_PAIRS_SENT, MIN_PAIRS};
pub use filter::{FilterChain, FilterStage};
pub use instructions::EditingInstructions;
pub use profile::{StyleProfile, TrainingPairInput};
pub use render::{render_base64, render_with_instructions};
