pub mod config;
pub mod keychain;
pub mod models;
pub mod negotiation;
pub mod style;
