pub mod api;
pub mod config;

pub use config::{ClientConfig, config};
