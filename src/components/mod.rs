pub mod api_key_form;
pub mod comparison_slider;
pub mod negotiation_dialog;
pub mod pair_uploader;
pub mod profile_summary;
pub mod sidebar;
pub mod status_badge;
pub mod toast;
