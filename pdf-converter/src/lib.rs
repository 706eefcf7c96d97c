// src/lib.rs
pub mod api;
pub mod config;
pub mod error;
pub mod logging;
pub mod service;
pub mod utils;

// Re-export commonly used types
pub use api::{create_app, AppState};
pub use error::{AppError, AppResult};
