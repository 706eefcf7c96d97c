// pdf-converter/src/config/mod.rs

pub mod app;

pub use app::{AppConfig, ConverterConfig, ServerConfig};
