// file: src/lib.rs
// version: 3.0.0
// guid: d82472d1-7f0f-4eb4-b0a3-6e1547103eb4

//! # kubefedctl
//!
//! Command line control of a Kubernetes Cluster Federation: enabling and
//! disabling propagation of API types, federating resources, and joining or
//! unjoining member clusters.
//!
//! Cluster access is resolved from kubeconfig once per invocation into a
//! [`config::FedConfig`] that every subcommand shares.

pub mod cli;
pub mod config;
pub mod error;
pub mod federation;
pub mod kubectl;
pub mod logging;
pub mod utils;

pub use error::{FedCtlError, Result};

/// Version information for the utility
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
