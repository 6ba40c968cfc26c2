pub mod home;
pub mod newsroom;
pub mod settings;
pub mod style_hub;
