// file: src/utils/mod.rs
// version: 2.0.0
// guid: 2c8f4a61-b7d3-4e90-a516-3d9e0f7b2c48

//! Utility modules

pub mod validation;

pub use validation::ValidationUtils;
