// src/api/dto/mod.rs
pub mod conversion_dto;
pub mod system_dto;

pub use conversion_dto::PageRangeQuery;
pub use system_dto::{HealthResponse, ServiceInfoResponse};
