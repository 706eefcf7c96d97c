// src/api/handlers/mod.rs
pub mod conversion_handler;
pub mod system_handler;
