// pdf-converter/src/api/dto/system_dto.rs

use serde::{Deserialize, Serialize};

pub const SERVICE_NAME: &str = "PDF to DOCX Converter";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceInfoResponse {
    pub service: String,
    pub status: String,
    pub version: String,
}

impl ServiceInfoResponse {
    pub fn running() -> Self {
        Self {
            service: SERVICE_NAME.to_string(),
            status: "running".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
}

impl HealthResponse {
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
        }
    }
}
