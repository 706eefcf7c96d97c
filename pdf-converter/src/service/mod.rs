// src/service/mod.rs
pub mod conversion_service;
pub mod converter;
pub mod scratch;
