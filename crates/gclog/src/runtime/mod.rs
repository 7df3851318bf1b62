//! Runtime: logging init, config boot and batch analysis of many files.

pub mod batch;
pub mod boot;
