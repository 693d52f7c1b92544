// file: src/logging/mod.rs
// version: 1.0.0
// guid: 8b2e4f61-0c3a-4d97-b5e8-71f6a2c9d043

//! Logging system for kubefedctl

pub mod logger;

pub use logger::{init_logger, LogFormat, LogOptions};
