// pdf-converter/src/utils/mod.rs

pub mod error_helper;
pub mod file_name;
